use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

pub const DEFAULT_LOG_FILE: &str = "vocab_drill.log";

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

pub fn init() {
    init_at(DEFAULT_LOG_FILE);
}

/// Opens `path` for appending. Later calls are no-ops once a file is open.
pub fn init_at(path: impl AsRef<Path>) {
    let mut logger = LOGGER.lock().unwrap_or_else(|e| e.into_inner());
    if logger.is_none()
        && let Ok(file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
        {
            *logger = Some(file);
        }
}

pub fn log(message: &str) {
    let mut logger = LOGGER.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(file) = logger.as_mut() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(file, "[{}] {}", timestamp, message);
    }
}
