use crate::dictionary::{DEFAULT_BASE_URL, LookupMode};
use crate::dictionary::client::DEFAULT_TIMEOUT_SECS;
use crate::logger::DEFAULT_LOG_FILE;
use crate::speech::{DEFAULT_LOCALE, SpeechProgram};
use std::collections::HashMap;
use std::env;
use std::time::Duration;

pub const ENV_LOCALE: &str = "VOCAB_DRILL_LOCALE";
pub const ENV_DICTIONARY_URL: &str = "VOCAB_DRILL_DICTIONARY_URL";
pub const ENV_SPEECH: &str = "VOCAB_DRILL_SPEECH";
pub const ENV_LOOKUP: &str = "VOCAB_DRILL_LOOKUP";
pub const ENV_TIMEOUT_SECS: &str = "VOCAB_DRILL_TIMEOUT_SECS";
pub const ENV_LOG: &str = "VOCAB_DRILL_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct DrillConfig {
    pub locale: String,
    pub dictionary_url: String,
    /// `None` disables audio.
    pub speech: Option<SpeechProgram>,
    pub lookup_mode: LookupMode,
    pub timeout: Duration,
    pub log_file: String,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            dictionary_url: DEFAULT_BASE_URL.to_string(),
            speech: Some(SpeechProgram::platform_default()),
            lookup_mode: LookupMode::Sequential,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl DrillConfig {
    pub fn from_env() -> Self {
        Self::from_vars(&env::vars().collect())
    }

    /// Builds a config from a variable map. Unparseable values fall back to
    /// the defaults.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        if let Some(locale) = get(ENV_LOCALE) {
            config.locale = locale.to_string();
        }
        if let Some(url) = get(ENV_DICTIONARY_URL) {
            config.dictionary_url = url.to_string();
        }
        if let Some(speech) = get(ENV_SPEECH) {
            config.speech = match speech.to_ascii_lowercase().as_str() {
                "off" | "none" | "0" => None,
                "say" => Some(SpeechProgram::Say),
                _ => Some(SpeechProgram::Espeak(speech.to_string())),
            };
        }
        if let Some(mode) = get(ENV_LOOKUP).and_then(|m| m.parse().ok()) {
            config.lookup_mode = mode;
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS).and_then(|s| s.parse::<u64>().ok()) {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(path) = get(ENV_LOG) {
            config.log_file = path.to_string();
        }
        config
    }
}
