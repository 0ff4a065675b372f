pub mod client;
pub mod provider;

// Public API exports
pub use client::{DEFAULT_BASE_URL, DictionaryClient, LookupError, parse_definitions};
pub use provider::{
    DefinitionProvider, LookupMode, fetch_all, fetch_all_concurrent, fetch_all_sequential,
    lookup_word,
};
