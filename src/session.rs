use crate::logger;
use crate::models::{
    AppState, LOOKUP_FAILED, LookupRequest, LookupResponse, Phase, QuizError, WordEntry,
};
use crate::quiz::QuizSession;
use crate::speech::SpeechOutput;
use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line text input with a cursor counted in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    pub text: String,
    pub cursor: usize,
}

impl InputBuffer {
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.text.remove(at);
            self.cursor -= 1;
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }
}

/// Everything the terminal front end needs: the quiz session plus the
/// input buffer, notices and the collaborators driven by key presses.
pub struct DrillApp {
    pub session: QuizSession,
    pub input: InputBuffer,
    /// Last user-visible rejection or warning.
    pub notice: Option<String>,
    pub loading_progress: (usize, usize),
    pub should_quit: bool,
    locale: String,
    speech: Box<dyn SpeechOutput>,
    lookup_tx: Option<Sender<LookupRequest>>,
}

impl DrillApp {
    pub fn new(
        session: QuizSession,
        locale: impl Into<String>,
        speech: Box<dyn SpeechOutput>,
        lookup_tx: Option<Sender<LookupRequest>>,
    ) -> Self {
        Self {
            session,
            input: InputBuffer::default(),
            notice: None,
            loading_progress: (0, 0),
            should_quit: false,
            locale: locale.into(),
            speech,
            lookup_tx,
        }
    }

    pub fn with_prefill(mut self, raw: impl Into<String>) -> Self {
        self.input = InputBuffer::with_text(raw);
        self
    }

    pub fn app_state(&self) -> AppState {
        match self.session.phase() {
            Phase::Idle => AppState::WordEntry,
            Phase::LoadingDefinitions => AppState::Loading,
            Phase::AwaitingSpelling | Phase::AwaitingMeaning | Phase::RoundResult => {
                AppState::Quiz
            }
            Phase::Complete => AppState::Summary,
        }
    }

    /// Plays the current word. Failures are logged and surfaced as a notice;
    /// they never affect the round.
    pub fn speak_current(&mut self) {
        let Some(word) = self.session.current_word().map(str::to_string) else {
            return;
        };
        if let Err(e) = self.speech.speak(&word, &self.locale) {
            logger::log(&format!("Speech failed: {}", e));
            self.notice = Some(format!("Audio unavailable: {}", e));
        }
    }

    fn reject(&mut self, error: QuizError) {
        self.notice = Some(error.to_string());
    }

    fn back_to_entry(&mut self) {
        let prefill = self.session.reset();
        self.input = InputBuffer::with_text(prefill);
        self.loading_progress = (0, 0);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        self.notice = None;

        match self.session.phase() {
            Phase::Idle => self.handle_word_entry_input(key),
            Phase::LoadingDefinitions => {
                if key.code == KeyCode::Esc {
                    logger::log("Lookup abandoned by user");
                    self.back_to_entry();
                }
            }
            Phase::AwaitingSpelling => self.handle_spelling_input(key),
            Phase::AwaitingMeaning => self.handle_meaning_input(key),
            Phase::RoundResult => self.handle_round_result_input(key),
            Phase::Complete => self.handle_summary_input(key),
        }
    }

    fn handle_text_edit(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.input.left(),
            KeyCode::Right => self.input.right(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert(c)
            }
            _ => {}
        }
    }

    fn is_repeat(key: &KeyEvent) -> bool {
        key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn handle_word_entry_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.start(),
            _ => self.handle_text_edit(key),
        }
    }

    fn start(&mut self) {
        let words = match self.session.begin(&self.input.text) {
            Ok(words) => words,
            Err(e) => return self.reject(e),
        };
        self.loading_progress = (0, words.len());

        let request = LookupRequest::Fetch {
            generation: self.session.generation(),
            words: words.clone(),
        };
        let sent = self
            .lookup_tx
            .as_ref()
            .is_some_and(|tx| tx.send(request).is_ok());

        if !sent {
            logger::log("Lookup worker unavailable, continuing without definitions");
            let entries = words
                .into_iter()
                .map(|w| WordEntry::sentinel(w, LOOKUP_FAILED))
                .collect();
            self.begin_play(entries);
        }
    }

    fn begin_play(&mut self, entries: Vec<WordEntry>) {
        match self.session.start_play(entries) {
            Ok(Some(_)) => {
                self.input = InputBuffer::default();
                self.speak_current();
            }
            Ok(None) => {}
            Err(e) => self.reject(e),
        }
    }

    /// Applies a worker message. Messages from an abandoned start are ignored.
    pub fn process_lookup_response(&mut self, response: LookupResponse) {
        let current = self.session.generation();
        let loading = self.session.phase() == Phase::LoadingDefinitions;
        match response {
            LookupResponse::Progress {
                generation,
                done,
                total,
            } if generation == current && loading => {
                self.loading_progress = (done, total);
            }
            LookupResponse::Complete {
                generation,
                entries,
            } if generation == current && loading => {
                self.loading_progress = (entries.len(), entries.len());
                self.begin_play(entries);
            }
            _ => logger::log("Discarding stale lookup response"),
        }
    }

    fn handle_spelling_input(&mut self, key: KeyEvent) {
        if Self::is_repeat(&key) {
            return self.speak_current();
        }
        match key.code {
            KeyCode::Esc => self.back_to_entry(),
            KeyCode::Enter => {
                let attempt = self.input.take();
                if let Err(e) = self.session.check_spelling(&attempt) {
                    self.reject(e);
                }
            }
            _ => self.handle_text_edit(key),
        }
    }

    fn handle_meaning_input(&mut self, key: KeyEvent) {
        if Self::is_repeat(&key) {
            return self.speak_current();
        }
        let result = match key.code {
            KeyCode::Esc => {
                self.back_to_entry();
                Ok(())
            }
            KeyCode::Up => self.session.move_selection(-1),
            KeyCode::Down => self.session.move_selection(1),
            KeyCode::Char(c @ '1'..='3') => self.session.select_option(c as usize - '1' as usize),
            KeyCode::Enter => self.session.submit_selected().map(|_| ()),
            _ => Ok(()),
        };
        if let Err(e) = result {
            self.reject(e);
        }
    }

    fn handle_round_result_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.back_to_entry(),
            KeyCode::Enter | KeyCode::Char('n') => match self.session.advance() {
                Ok(Some(_)) => self.speak_current(),
                Ok(None) => {}
                Err(e) => self.reject(e),
            },
            _ => {}
        }
    }

    fn handle_summary_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char('r') => self.back_to_entry(),
            _ => {}
        }
    }
}
