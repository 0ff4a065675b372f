use crate::dictionary::provider::DefinitionProvider;
use crate::models::MAX_DEFINITIONS;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LookupError {
    #[error("dictionary returned status {0}")]
    NotFound(StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("failed to parse dictionary response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid dictionary URL '{0}'")]
    InvalidUrl(String),
}

#[derive(Debug, Deserialize)]
struct EntryRaw {
    #[serde(default)]
    meanings: Vec<MeaningRaw>,
}

#[derive(Debug, Deserialize)]
struct MeaningRaw {
    #[serde(default)]
    definitions: Vec<DefinitionRaw>,
}

#[derive(Debug, Deserialize)]
struct DefinitionRaw {
    definition: String,
}

/// Extracts up to three definitions from a dictionary response body.
///
/// Only the first entry is used; definitions across all of its meanings are
/// flattened in order.
pub fn parse_definitions(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let entries: Vec<EntryRaw> = serde_json::from_str(body)?;
    Ok(entries
        .into_iter()
        .next()
        .map(|entry| {
            entry
                .meanings
                .into_iter()
                .flat_map(|m| m.definitions.into_iter().map(|d| d.definition))
                .take(MAX_DEFINITIONS)
                .collect()
        })
        .unwrap_or_default())
}

#[derive(Debug, Clone)]
pub struct DictionaryClient {
    client: Client,
    base_url: Url,
}

impl DictionaryClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let raw = base_url.into();
        let base_url = match Url::parse(&raw) {
            Ok(url) if !url.cannot_be_a_base() => url,
            _ => return Err(LookupError::InvalidUrl(raw)),
        };
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// The word becomes one percent-encoded path segment under the base URL.
    pub fn entry_url(&self, word: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word.trim());
        }
        url
    }
}

#[async_trait]
impl DefinitionProvider for DictionaryClient {
    async fn definitions(&self, word: &str) -> Result<Vec<String>, LookupError> {
        let response = self.client.get(self.entry_url(word)).send().await?;

        if !response.status().is_success() {
            return Err(LookupError::NotFound(response.status()));
        }

        let body = response.text().await?;
        Ok(parse_definitions(&body)?)
    }
}
