use thiserror::Error;

pub const FALLBACK_DISTRACTOR: &str = "No definition available.";
pub const NO_DEFINITIONS: &str = "No detailed definitions available.";
pub const LOOKUP_FAILED: &str = "Error fetching definitions.";
pub const MAX_DEFINITIONS: usize = 3;
pub const OPTION_COUNT: usize = 3;

/// A word and the definitions fetched for it at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub definitions: Vec<String>,
}

impl WordEntry {
    /// Keeps at most three definitions; an empty list becomes the
    /// "no definitions" sentinel so every entry has a first definition.
    pub fn new(word: impl Into<String>, definitions: Vec<String>) -> Self {
        let mut definitions: Vec<String> =
            definitions.into_iter().take(MAX_DEFINITIONS).collect();
        if definitions.is_empty() {
            definitions.push(NO_DEFINITIONS.to_string());
        }
        Self {
            word: word.into(),
            definitions,
        }
    }

    pub fn sentinel(word: impl Into<String>, sentinel: &str) -> Self {
        Self {
            word: word.into(),
            definitions: vec![sentinel.to_string()],
        }
    }

    pub fn primary_definition(&self) -> &str {
        self.definitions
            .first()
            .map(String::as_str)
            .unwrap_or(NO_DEFINITIONS)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub incorrect: usize,
}

impl Score {
    pub fn rounds(&self) -> usize {
        self.correct + self.incorrect
    }

    pub fn display(&self) -> String {
        format!("Correct: {} | Incorrect: {}", self.correct, self.incorrect)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeaningQuestion {
    pub correct_meaning: String,
    pub options: Vec<String>,
}

impl MeaningQuestion {
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o == &self.correct_meaning)
    }
}

/// Transient per-word state, cleared when the next word loads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundState {
    pub spelling_correct: Option<bool>,
    pub question: Option<MeaningQuestion>,
    pub selected: Option<usize>,
    pub classification: Option<Classification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Correct,
    /// Meaning right, spelling wrong. Counted as incorrect.
    MeaningOnly,
    WrongMeaning,
}

impl Classification {
    pub fn is_correct(self) -> bool {
        matches!(self, Classification::Correct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Good,
    Partial,
    Bad,
}

/// User-visible message shown under the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub tone: Tone,
}

impl Feedback {
    pub fn new(message: impl Into<String>, tone: Tone) -> Self {
        Self {
            message: message.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LoadingDefinitions,
    AwaitingSpelling,
    AwaitingMeaning,
    RoundResult,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalTally {
    pub correct: usize,
    pub incorrect: usize,
    pub correct_words: Vec<String>,
    pub incorrect_words: Vec<String>,
}

impl FinalTally {
    pub fn render_list(words: &[String]) -> String {
        if words.is_empty() {
            "None".to_string()
        } else {
            words.join(", ")
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("Please enter some Spanish words.")]
    EmptyWordList,
    #[error("Please select a meaning.")]
    NoMeaningSelected,
    #[error("action not available while {0:?}")]
    WrongPhase(Phase),
}

#[derive(Debug)]
pub enum LookupRequest {
    Fetch { generation: u64, words: Vec<String> },
}

#[derive(Debug)]
pub enum LookupResponse {
    Progress {
        generation: u64,
        done: usize,
        total: usize,
    },
    Complete {
        generation: u64,
        entries: Vec<WordEntry>,
    },
}

#[derive(Debug, PartialEq)]
pub enum AppState {
    WordEntry,
    Loading,
    Quiz,
    Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_entry_caps_definitions() {
        let entry = WordEntry::new(
            "gato",
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
        );
        assert_eq!(entry.definitions, vec!["a", "b", "c"]);
        assert_eq!(entry.primary_definition(), "a");
    }

    #[test]
    fn test_word_entry_empty_definitions_become_sentinel() {
        let entry = WordEntry::new("zzz", vec![]);
        assert_eq!(entry.definitions, vec![NO_DEFINITIONS.to_string()]);
    }

    #[test]
    fn test_score_display() {
        let score = Score {
            correct: 2,
            incorrect: 1,
        };
        assert_eq!(score.display(), "Correct: 2 | Incorrect: 1");
        assert_eq!(score.rounds(), 3);
    }

    #[test]
    fn test_render_list_none_sentinel() {
        assert_eq!(FinalTally::render_list(&[]), "None");
        assert_eq!(
            FinalTally::render_list(&["gato".to_string(), "perro".to_string()]),
            "gato, perro"
        );
    }

    #[test]
    fn test_quiz_error_messages() {
        assert_eq!(
            QuizError::EmptyWordList.to_string(),
            "Please enter some Spanish words."
        );
        assert_eq!(
            QuizError::NoMeaningSelected.to_string(),
            "Please select a meaning."
        );
    }
}
