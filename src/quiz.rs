use crate::logger;
use crate::models::{
    Classification, FALLBACK_DISTRACTOR, Feedback, FinalTally, MeaningQuestion, NO_DEFINITIONS,
    OPTION_COUNT, Phase, QuizError, RoundState, Score, Tone, WordEntry,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SPELL_PROMPT: &str = "Spell the word you hear.";

/// Splits a comma-separated word list, trimming each token and dropping empties.
pub fn parse_word_list(raw: &str) -> Result<Vec<String>, QuizError> {
    let words: Vec<String> = raw
        .split(',')
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return Err(QuizError::EmptyWordList);
    }
    Ok(words)
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Builds the three-option question for `word`.
///
/// Distractors are taken in encountered order from every definition of every
/// entry, skipping only strings equal to the correct meaning. That means a
/// second definition of the same word can show up as a distractor.
pub fn build_meaning_question<R: Rng + ?Sized>(
    entries: &[WordEntry],
    word: &str,
    rng: &mut R,
) -> MeaningQuestion {
    let correct_meaning = entries
        .iter()
        .find(|e| e.word == word)
        .map(|e| e.primary_definition().to_string())
        .unwrap_or_else(|| NO_DEFINITIONS.to_string());

    let mut options = vec![correct_meaning.clone()];
    options.extend(
        entries
            .iter()
            .flat_map(|e| e.definitions.iter())
            .filter(|d| **d != correct_meaning)
            .take(OPTION_COUNT - 1)
            .cloned(),
    );
    while options.len() < OPTION_COUNT {
        options.push(FALLBACK_DISTRACTOR.to_string());
    }

    shuffle(&mut options, rng);

    MeaningQuestion {
        correct_meaning,
        options,
    }
}

fn distinct(words: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(words.len());
    for word in words {
        if !seen.contains(word) {
            seen.push(word.clone());
        }
    }
    seen
}

/// A single play-through: word list, play order, definitions and score.
///
/// All transitions are synchronous and UI-free; the caller is responsible for
/// speaking the word returned by [`QuizSession::load_next_word`].
#[derive(Debug)]
pub struct QuizSession {
    words: Vec<String>,
    play_order: Vec<String>,
    entries: Vec<WordEntry>,
    current_index: usize,
    score: Score,
    correct_words: Vec<String>,
    incorrect_words: Vec<String>,
    round: RoundState,
    phase: Phase,
    feedback: Option<Feedback>,
    generation: u64,
    rng: StdRng,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            words: Vec::new(),
            play_order: Vec::new(),
            entries: Vec::new(),
            current_index: 0,
            score: Score::default(),
            correct_words: Vec::new(),
            incorrect_words: Vec::new(),
            round: RoundState::default(),
            phase: Phase::Idle,
            feedback: None,
            generation: 0,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn play_order(&self) -> &[String] {
        &self.play_order
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_words(&self) -> usize {
        self.play_order.len()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn correct_words(&self) -> &[String] {
        &self.correct_words
    }

    pub fn incorrect_words(&self) -> &[String] {
        &self.incorrect_words
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Word being played, `None` once every word has been played.
    pub fn current_word(&self) -> Option<&str> {
        self.play_order.get(self.current_index).map(String::as_str)
    }

    fn require(&self, phase: Phase) -> Result<(), QuizError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(QuizError::WrongPhase(self.phase))
        }
    }

    /// Parses the raw list, shuffles the play order and enters the
    /// definition-loading phase. Returns the distinct words to look up, in
    /// input order. On an empty list nothing changes.
    pub fn begin(&mut self, raw_input: &str) -> Result<Vec<String>, QuizError> {
        self.require(Phase::Idle)?;
        let words = parse_word_list(raw_input)?;

        let mut play_order = words.clone();
        shuffle(&mut play_order, &mut self.rng);

        let lookups = distinct(&words);
        logger::log(&format!(
            "Starting session with {} words ({} distinct)",
            words.len(),
            lookups.len()
        ));

        self.words = words;
        self.play_order = play_order;
        self.entries.clear();
        self.feedback = None;
        self.generation += 1;
        self.phase = Phase::LoadingDefinitions;
        Ok(lookups)
    }

    /// Installs the fetched definitions and loads the first word.
    pub fn start_play(&mut self, entries: Vec<WordEntry>) -> Result<Option<String>, QuizError> {
        self.require(Phase::LoadingDefinitions)?;
        self.entries = entries;
        self.current_index = 0;
        self.score = Score::default();
        self.correct_words.clear();
        self.incorrect_words.clear();
        Ok(self.load_next_word())
    }

    /// Moves to the word at the current index, or to `Complete` when the
    /// list is exhausted. Returns the word that should be spoken.
    pub fn load_next_word(&mut self) -> Option<String> {
        self.round = RoundState::default();
        let Some(word) = self.current_word().map(str::to_string) else {
            self.current_index = self.play_order.len();
            self.phase = Phase::Complete;
            self.feedback = None;
            logger::log(&format!(
                "Session complete: {}",
                self.score.display()
            ));
            return None;
        };

        self.phase = Phase::AwaitingSpelling;
        self.feedback = Some(Feedback::new(SPELL_PROMPT, Tone::Neutral));
        Some(word)
    }

    /// Compares the attempt against the current word, ignoring case and
    /// surrounding whitespace, then moves on to the meaning question
    /// whatever the outcome.
    pub fn check_spelling(&mut self, input: &str) -> Result<bool, QuizError> {
        self.require(Phase::AwaitingSpelling)?;
        let word = self
            .current_word()
            .map(str::to_string)
            .ok_or(QuizError::WrongPhase(self.phase))?;

        let expected = word.to_lowercase();
        let matched = input.trim().to_lowercase() == expected;

        self.feedback = Some(if matched {
            Feedback::new("Correct spelling!", Tone::Good)
        } else {
            Feedback::new(
                format!("Incorrect! The correct spelling is \"{}\".", expected),
                Tone::Bad,
            )
        });

        self.round.spelling_correct = Some(matched);
        self.round.question = Some(build_meaning_question(
            &self.entries,
            &word,
            &mut self.rng,
        ));
        self.round.selected = None;
        self.phase = Phase::AwaitingMeaning;
        Ok(matched)
    }

    pub fn select_option(&mut self, index: usize) -> Result<(), QuizError> {
        self.require(Phase::AwaitingMeaning)?;
        if index < OPTION_COUNT {
            self.round.selected = Some(index);
        }
        Ok(())
    }

    /// Moves the selection by `delta`, wrapping around the options.
    pub fn move_selection(&mut self, delta: isize) -> Result<(), QuizError> {
        self.require(Phase::AwaitingMeaning)?;
        let len = OPTION_COUNT as isize;
        let next = match self.round.selected {
            Some(current) => (current as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.round.selected = Some(next as usize);
        Ok(())
    }

    pub fn selected_option(&self) -> Option<&str> {
        let question = self.round.question.as_ref()?;
        self.round
            .selected
            .and_then(|i| question.options.get(i))
            .map(String::as_str)
    }

    /// Submits whatever option is currently selected.
    pub fn submit_selected(&mut self) -> Result<Classification, QuizError> {
        let selected = self.selected_option().map(str::to_string);
        self.submit_meaning(selected.as_deref())
    }

    /// Classifies the round. A missing selection is rejected without
    /// touching the score.
    pub fn submit_meaning(&mut self, selected: Option<&str>) -> Result<Classification, QuizError> {
        self.require(Phase::AwaitingMeaning)?;
        let selected = selected.ok_or(QuizError::NoMeaningSelected)?;
        let correct_meaning = self
            .round
            .question
            .as_ref()
            .map(|q| q.correct_meaning.clone())
            .ok_or(QuizError::WrongPhase(self.phase))?;
        let word = self
            .current_word()
            .map(str::to_string)
            .ok_or(QuizError::WrongPhase(self.phase))?;

        let spelled = self.round.spelling_correct.unwrap_or(false);
        let (classification, feedback) = if selected == correct_meaning {
            if spelled {
                (
                    Classification::Correct,
                    Feedback::new("Correct spelling and meaning!", Tone::Good),
                )
            } else {
                (
                    Classification::MeaningOnly,
                    Feedback::new("Correct meaning, but incorrect spelling.", Tone::Partial),
                )
            }
        } else {
            (
                Classification::WrongMeaning,
                Feedback::new(
                    format!("Incorrect meaning! The correct meaning is: {}", correct_meaning),
                    Tone::Bad,
                ),
            )
        };

        if classification.is_correct() {
            self.score.correct += 1;
            self.correct_words.push(word);
        } else {
            self.score.incorrect += 1;
            self.incorrect_words.push(word);
        }

        self.round.classification = Some(classification);
        self.feedback = Some(feedback);
        self.phase = Phase::RoundResult;
        Ok(classification)
    }

    /// Moves past a classified round. Returns the next word to speak.
    pub fn advance(&mut self) -> Result<Option<String>, QuizError> {
        self.require(Phase::RoundResult)?;
        self.current_index += 1;
        Ok(self.load_next_word())
    }

    pub fn final_tally(&self) -> Option<FinalTally> {
        if !self.is_complete() {
            return None;
        }
        Some(FinalTally {
            correct: self.score.correct,
            incorrect: self.score.incorrect,
            correct_words: self.correct_words.clone(),
            incorrect_words: self.incorrect_words.clone(),
        })
    }

    /// Returns to `Idle`, keeping only the original word list. The returned
    /// string is that list in input order, for pre-filling the input field.
    pub fn reset(&mut self) -> String {
        let prefill = self.words.join(", ");
        self.play_order.clear();
        self.entries.clear();
        self.current_index = 0;
        self.score = Score::default();
        self.correct_words.clear();
        self.incorrect_words.clear();
        self.round = RoundState::default();
        self.feedback = None;
        self.phase = Phase::Idle;
        prefill
    }
}
