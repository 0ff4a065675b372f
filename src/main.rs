use crossbeam_channel::{Receiver, unbounded};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use vocab_drill::models::LookupResponse;
use vocab_drill::speech::{CommandSpeech, SilentSpeech, SpeechOutput};
use vocab_drill::{
    DictionaryClient, DrillApp, DrillConfig, QuizSession, draw, logger, spawn_lookup_worker,
};

const TICK: Duration = Duration::from_millis(100);

fn build_app(config: &DrillConfig) -> (DrillApp, Option<Receiver<LookupResponse>>) {
    let speech: Box<dyn SpeechOutput> = match &config.speech {
        Some(program) => Box::new(CommandSpeech::new(program.clone())),
        None => Box::new(SilentSpeech),
    };

    let (request_tx, request_rx) = unbounded();
    let (response_tx, response_rx) = unbounded();

    let worker = DictionaryClient::new(config.dictionary_url.clone(), config.timeout)
        .map_err(|e| e.to_string())
        .and_then(|client| {
            spawn_lookup_worker(Arc::new(client), config.lookup_mode, response_tx, request_rx)
                .map_err(|e| e.to_string())
        });

    let (lookup_tx, lookup_rx) = match worker {
        Ok(_handle) => (Some(request_tx), Some(response_rx)),
        Err(e) => {
            logger::log(&format!("Dictionary lookups disabled: {}", e));
            (None, None)
        }
    };

    let app = DrillApp::new(QuizSession::new(), config.locale.clone(), speech, lookup_tx);
    (app, lookup_rx)
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut DrillApp,
    lookup_rx: Option<&Receiver<LookupResponse>>,
) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| draw(f, app))?;

        if let Some(rx) = lookup_rx {
            while let Ok(response) = rx.try_recv() {
                app.process_lookup_response(response);
            }
        }

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let config = DrillConfig::from_env();
    logger::init_at(&config.log_file);
    logger::log(&format!("Starting vocab-drill with {:?}", config));

    let prefill = std::env::args().skip(1).collect::<Vec<_>>().join(", ");
    let (app, lookup_rx) = build_app(&config);
    let mut app = app.with_prefill(prefill);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, lookup_rx.as_ref());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    logger::log("Exiting vocab-drill");
    result
}
