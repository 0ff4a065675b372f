use crate::dictionary::client::LookupError;
use crate::logger;
use crate::models::{LOOKUP_FAILED, NO_DEFINITIONS, WordEntry};
use async_trait::async_trait;
use futures::future::join_all;
use std::str::FromStr;

/// Source of definitions for a word. Implementations return at most three
/// short definitions, or an error the caller turns into a sentinel.
#[async_trait]
pub trait DefinitionProvider: Send + Sync {
    async fn definitions(&self, word: &str) -> Result<Vec<String>, LookupError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupMode {
    /// One lookup at a time, in input order.
    #[default]
    Sequential,
    /// All lookups in flight at once, joined before play starts.
    Concurrent,
}

impl FromStr for LookupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(LookupMode::Sequential),
            "concurrent" => Ok(LookupMode::Concurrent),
            other => Err(format!("Unknown lookup mode: {}", other)),
        }
    }
}

/// Looks up one word, degrading any failure to a single sentinel definition.
pub async fn lookup_word(provider: &dyn DefinitionProvider, word: &str) -> WordEntry {
    match provider.definitions(word).await {
        Ok(definitions) if definitions.is_empty() => {
            logger::log(&format!("No definitions for '{}'", word));
            WordEntry::sentinel(word, NO_DEFINITIONS)
        }
        Ok(definitions) => {
            logger::log(&format!(
                "Fetched {} definitions for '{}'",
                definitions.len(),
                word
            ));
            WordEntry::new(word, definitions)
        }
        Err(LookupError::NotFound(status)) => {
            logger::log(&format!("Lookup for '{}' returned {}", word, status));
            WordEntry::sentinel(word, NO_DEFINITIONS)
        }
        Err(e) => {
            logger::log(&format!("Lookup for '{}' failed: {}", word, e));
            WordEntry::sentinel(word, LOOKUP_FAILED)
        }
    }
}

/// Looks words up strictly one after another. `on_progress` is called with
/// `(done, total)` after each word.
pub async fn fetch_all_sequential<F>(
    provider: &dyn DefinitionProvider,
    words: &[String],
    mut on_progress: F,
) -> Vec<WordEntry>
where
    F: FnMut(usize, usize),
{
    let mut entries = Vec::with_capacity(words.len());
    for word in words {
        entries.push(lookup_word(provider, word).await);
        on_progress(entries.len(), words.len());
    }
    entries
}

/// Issues every lookup at once and waits for all of them. Output order
/// follows `words`.
pub async fn fetch_all_concurrent(
    provider: &dyn DefinitionProvider,
    words: &[String],
) -> Vec<WordEntry> {
    join_all(words.iter().map(|word| lookup_word(provider, word))).await
}

pub async fn fetch_all<F>(
    provider: &dyn DefinitionProvider,
    words: &[String],
    mode: LookupMode,
    on_progress: F,
) -> Vec<WordEntry>
where
    F: FnMut(usize, usize),
{
    match mode {
        LookupMode::Sequential => fetch_all_sequential(provider, words, on_progress).await,
        LookupMode::Concurrent => fetch_all_concurrent(provider, words).await,
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockProvider;
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[tokio::test]
    async fn test_lookup_word_success() {
        let provider = MockProvider::new(&[("gato", &["a cat animal", "a jack"])]);
        let entry = lookup_word(&provider, "gato").await;
        assert_eq!(entry.definitions, vec!["a cat animal", "a jack"]);
    }

    #[tokio::test]
    async fn test_lookup_word_not_found_sentinel() {
        let provider = MockProvider::new(&[]);
        let entry = lookup_word(&provider, "zzz").await;
        assert_eq!(entry.definitions, vec![NO_DEFINITIONS]);
    }

    #[tokio::test]
    async fn test_lookup_word_error_sentinel() {
        let provider = MockProvider::new(&[]);
        let entry = lookup_word(&provider, "broken").await;
        assert_eq!(entry.definitions, vec![LOOKUP_FAILED]);
    }

    #[tokio::test]
    async fn test_lookup_word_empty_success_sentinel() {
        let provider = MockProvider::new(&[("vacio", &[])]);
        let entry = lookup_word(&provider, "vacio").await;
        assert_eq!(entry.definitions, vec![NO_DEFINITIONS]);
    }

    #[tokio::test]
    async fn test_sequential_preserves_order_and_reports_progress() {
        let provider = MockProvider::new(&[("gato", &["a cat animal"]), ("perro", &["a dog animal"])]);
        let list = words(&["gato", "broken", "perro"]);
        let mut progress = Vec::new();

        let entries =
            fetch_all_sequential(&provider, &list, |done, total| progress.push((done, total)))
                .await;

        assert_eq!(*provider.calls.lock().unwrap(), list);
        assert_eq!(progress, vec![(1, 3), (2, 3), (3, 3)]);
        let names: Vec<&str> = entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(names, vec!["gato", "broken", "perro"]);
        assert_eq!(entries[1].definitions, vec![LOOKUP_FAILED]);
    }

    #[tokio::test]
    async fn test_concurrent_keeps_input_order() {
        let provider = MockProvider::new(&[("uno", &["one"]), ("dos", &["two"])]);
        let list = words(&["uno", "dos", "tres"]);
        let entries = fetch_all(&provider, &list, LookupMode::Concurrent, |_, _| {}).await;
        let firsts: Vec<&str> = entries.iter().map(|e| e.primary_definition()).collect();
        assert_eq!(firsts, vec!["one", "two", NO_DEFINITIONS]);
    }

    #[test]
    fn test_lookup_mode_from_str() {
        assert_eq!("Sequential".parse::<LookupMode>(), Ok(LookupMode::Sequential));
        assert_eq!(" concurrent ".parse::<LookupMode>(), Ok(LookupMode::Concurrent));
        assert!("parallel".parse::<LookupMode>().is_err());
    }
}
