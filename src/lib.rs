pub mod config;
pub mod dictionary;
pub mod logger;
pub mod lookup_worker;
pub mod models;
pub mod quiz;
pub mod session;
pub mod speech;
pub mod ui;
pub mod utils;

mod ui_tests;

// Re-exports for convenience
pub use config::DrillConfig;
pub use dictionary::{DefinitionProvider, DictionaryClient, LookupError, LookupMode};
pub use lookup_worker::spawn_lookup_worker;
pub use models::{AppState, Classification, FinalTally, QuizError, Score, WordEntry};
pub use quiz::{QuizSession, build_meaning_question, parse_word_list, shuffle};
pub use session::DrillApp;
pub use speech::{CommandSpeech, SilentSpeech, SpeechError, SpeechOutput};
pub use ui::draw;
