use std::collections::BTreeSet;

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AccessError {
    /// An entity failed construction-time validation.
    #[error("Malformed input: {0}")]
    Malformed(String),

    #[error("Disallowed characters: {}", join_chars(.0))]
    DisallowedCharacters(BTreeSet<char>),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

fn join_chars(chars: &BTreeSet<char>) -> String {
    chars
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, AccessError>;
