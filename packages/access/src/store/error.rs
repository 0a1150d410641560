use std::fmt;

/// Errors reported by an external read-only store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached.
    Unavailable(String),
    /// The store returned data this core cannot use.
    InvalidData(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "store unavailable: {msg}"),
            Self::InvalidData(msg) => write!(f, "invalid stored data: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
