#[cfg(test)]
mod ui_integration_tests {
    use crate::models::{LookupRequest, LookupResponse, WordEntry};
    use crate::quiz::QuizSession;
    use crate::session::DrillApp;
    use crate::speech::SilentSpeech;
    use crate::AppState;
    use crate::ui::draw;
    use crossbeam_channel::unbounded;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &DrillApp) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn press(app: &mut DrillApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::empty()));
    }

    fn create_test_app() -> DrillApp {
        let (tx, rx) = unbounded();
        let mut app = DrillApp::new(
            QuizSession::with_seed(8),
            "es-ES",
            Box::new(SilentSpeech),
            Some(tx),
        )
        .with_prefill("gato, perro");
        press(&mut app, KeyCode::Enter);
        let LookupRequest::Fetch { generation, .. } = rx.try_recv().unwrap();
        app.process_lookup_response(LookupResponse::Progress {
            generation,
            done: 1,
            total: 2,
        });
        assert!(render(&app).contains("Fetching definitions... 1/2"));
        app.process_lookup_response(LookupResponse::Complete {
            generation,
            entries: vec![
                WordEntry::new("gato", vec!["a cat animal".into()]),
                WordEntry::new("perro", vec!["a dog animal".into()]),
            ],
        });
        app
    }

    #[test]
    fn test_word_entry_screen_shows_prefill_and_notice() {
        let mut app = DrillApp::new(QuizSession::with_seed(1), "es-ES", Box::new(SilentSpeech), None);
        press(&mut app, KeyCode::Enter);
        let screen = render(&app);
        assert!(screen.contains("Vocab Drill"));
        assert!(screen.contains("Please enter some Spanish words."));

        let app = DrillApp::new(QuizSession::with_seed(1), "es-ES", Box::new(SilentSpeech), None)
            .with_prefill("uno, dos");
        assert!(render(&app).contains("uno, dos"));
    }

    #[test]
    fn test_spelling_screen_shows_prompt_and_score() {
        let app = create_test_app();
        assert_eq!(app.app_state(), AppState::Quiz);
        let screen = render(&app);
        assert!(screen.contains("Spell the word you hear."));
        assert!(screen.contains("Correct: 0 | Incorrect: 0"));
        assert!(screen.contains("Word 1 / 2"));
    }

    #[test]
    fn test_meaning_screen_lists_three_options() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);
        let screen = render(&app);
        assert!(screen.contains("Incorrect! The correct spelling is"));
        assert!(screen.contains("1. "));
        assert!(screen.contains("2. "));
        assert!(screen.contains("3. "));
        assert!(screen.contains("a cat animal"));
        assert!(screen.contains("a dog animal"));
        assert!(screen.contains("No definition available."));
    }

    #[test]
    fn test_summary_screen_renders_none_sentinel() {
        let mut app = create_test_app();
        while app.app_state() == AppState::Quiz {
            press(&mut app, KeyCode::Char('x'));
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Char('1'));
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.app_state(), AppState::Summary);
        let screen = render(&app);
        assert!(screen.contains("Final Score"));
        assert!(screen.contains("Correct: 0"));
        assert!(screen.contains("Incorrect: 2"));
        assert!(screen.contains("None"));
    }

    #[test]
    fn test_long_option_is_truncated_to_one_line() {
        let (tx, rx) = unbounded();
        let mut app = DrillApp::new(
            QuizSession::with_seed(3),
            "es-ES",
            Box::new(SilentSpeech),
            Some(tx),
        )
        .with_prefill("gato");
        press(&mut app, KeyCode::Enter);
        let LookupRequest::Fetch { generation, .. } = rx.try_recv().unwrap();
        let long = format!("{} TAIL", "a small domesticated mammal ".repeat(6));
        app.process_lookup_response(LookupResponse::Complete {
            generation,
            entries: vec![WordEntry::new("gato", vec![long])],
        });
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);

        let screen = render(&app);
        assert!(screen.contains("a small domesticated mammal a small"));
        assert!(screen.contains("..."));
        assert!(!screen.contains("TAIL"));
    }
}
