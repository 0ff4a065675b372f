use std::io;
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;
use thiserror::Error;

pub const DEFAULT_LOCALE: &str = "es-ES";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("failed to start speech command '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Renders a word as audio. Calls return once playback has been handed off;
/// there is no completion signal and replaying has no side effects.
pub trait SpeechOutput: Send {
    fn speak(&self, word: &str, locale: &str) -> Result<(), SpeechError>;
}

/// Which command-line synthesizer to drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechProgram {
    /// `espeak-ng -v <lang> <word>`
    Espeak(String),
    /// macOS `say`; the voice is left to the system default.
    Say,
}

impl SpeechProgram {
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            SpeechProgram::Say
        } else {
            SpeechProgram::Espeak("espeak-ng".to_string())
        }
    }

    pub fn program(&self) -> &str {
        match self {
            SpeechProgram::Espeak(program) => program,
            SpeechProgram::Say => "say",
        }
    }

    pub fn args(&self, word: &str, locale: &str) -> Vec<String> {
        match self {
            SpeechProgram::Espeak(_) => vec![
                "-v".to_string(),
                espeak_voice(locale),
                word.to_string(),
            ],
            SpeechProgram::Say => vec![word.to_string()],
        }
    }
}

/// espeak-ng voices are keyed by language, so `es-ES` becomes `es`.
pub fn espeak_voice(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .filter(|lang| !lang.is_empty())
        .unwrap_or("en")
        .to_ascii_lowercase()
}

/// Spawns an external synthesizer and does not wait for it.
///
/// At most one child is alive at a time: a new request stops and reaps the
/// previous utterance first, and dropping the speaker reaps the last one.
#[derive(Debug)]
pub struct CommandSpeech {
    program: SpeechProgram,
    playing: Mutex<Option<Child>>,
}

impl CommandSpeech {
    pub fn new(program: SpeechProgram) -> Self {
        Self {
            program,
            playing: Mutex::new(None),
        }
    }

    fn stop_playing(&self) {
        let mut playing = self.playing.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(mut child) = playing.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

impl SpeechOutput for CommandSpeech {
    fn speak(&self, word: &str, locale: &str) -> Result<(), SpeechError> {
        self.stop_playing();

        let child = Command::new(self.program.program())
            .args(self.program.args(word, locale))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.program().to_string(),
                source,
            })?;

        *self.playing.lock().unwrap_or_else(|e| e.into_inner()) = Some(child);
        Ok(())
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.stop_playing();
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeech;

impl SpeechOutput for SilentSpeech {
    fn speak(&self, _word: &str, _locale: &str) -> Result<(), SpeechError> {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every request instead of playing audio.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingSpeech {
        pub spoken: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl RecordingSpeech {
        pub fn words(&self) -> Vec<String> {
            self.spoken
                .lock()
                .unwrap()
                .iter()
                .map(|(w, _)| w.clone())
                .collect()
        }
    }

    impl SpeechOutput for RecordingSpeech {
        fn speak(&self, word: &str, locale: &str) -> Result<(), SpeechError> {
            self.spoken
                .lock()
                .unwrap()
                .push((word.to_string(), locale.to_string()));
            Ok(())
        }
    }

    /// Fails every request the way a missing synthesizer binary does.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FailingSpeech;

    impl SpeechOutput for FailingSpeech {
        fn speak(&self, _word: &str, _locale: &str) -> Result<(), SpeechError> {
            Err(SpeechError::Spawn {
                program: "espeak-ng".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            })
        }
    }
}
