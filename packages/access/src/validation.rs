use std::collections::BTreeSet;

use common::config::{PolicyConfig, ProblemConfig};

use crate::error::{AccessError, Result};

/// Every character of `disallowed` that occurs in `text`.
pub fn find_disallowed_characters(text: &str, disallowed: &BTreeSet<char>) -> BTreeSet<char> {
    if disallowed.is_empty() {
        return BTreeSet::new();
    }
    text.chars().filter(|c| disallowed.contains(c)).collect()
}

/// Fail naming all disallowed characters found, not just the first.
pub fn validate_statement(text: &str, disallowed: &BTreeSet<char>) -> Result<()> {
    let found = find_disallowed_characters(text, disallowed);
    if found.is_empty() {
        Ok(())
    } else {
        Err(AccessError::DisallowedCharacters(found))
    }
}

/// Statement validator bound to a configured character set.
#[derive(Clone, Debug, Default)]
pub struct ProblemStatementValidator {
    disallowed: BTreeSet<char>,
}

impl ProblemStatementValidator {
    pub fn new(disallowed: impl IntoIterator<Item = char>) -> Self {
        Self {
            disallowed: disallowed.into_iter().collect(),
        }
    }

    pub fn from_config(config: &ProblemConfig) -> Self {
        Self {
            disallowed: config.disallowed_set(),
        }
    }

    /// Build from [`PolicyConfig::load`].
    pub fn load() -> Result<Self> {
        Ok(Self::from_config(&PolicyConfig::load()?.problem))
    }

    /// Build from the configuration file at `path`, with environment
    /// overrides.
    pub fn load_from(path: &str) -> Result<Self> {
        Ok(Self::from_config(&PolicyConfig::load_from(path)?.problem))
    }

    pub fn validate(&self, text: &str) -> Result<()> {
        validate_statement(text, &self.disallowed)
    }
}
