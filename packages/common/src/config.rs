use std::collections::BTreeSet;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Problem statement settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ProblemConfig {
    /// Characters rejected in problem statements, as one string.
    /// Default: typographic quotes `“”‘’`.
    #[serde(default = "default_disallowed_characters")]
    pub disallowed_characters: String,
}

fn default_disallowed_characters() -> String {
    "“”‘’".into()
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            disallowed_characters: default_disallowed_characters(),
        }
    }
}

impl ProblemConfig {
    /// The configured characters as a set.
    pub fn disallowed_set(&self) -> BTreeSet<char> {
        self.disallowed_characters.chars().collect()
    }
}

/// Access policy configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PolicyConfig {
    #[serde(default)]
    pub problem: ProblemConfig,
}

impl PolicyConfig {
    /// Load from `config/config.*` (or `$JUDGE_CONFIG`), overridden by
    /// `JUDGE__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("JUDGE_CONFIG").unwrap_or_else(|_| "config/config".to_string());
        Self::load_from(&config_path)
    }

    /// Load from the given file path (extension optional, file optional).
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default(
                "problem.disallowed_characters",
                default_disallowed_characters(),
            )?
            .add_source(File::with_name(path).required(false))
            // e.g. JUDGE__PROBLEM__DISALLOWED_CHARACTERS
            .add_source(Environment::with_prefix("JUDGE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
