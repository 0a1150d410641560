#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Final result code recorded on a judged submission.
///
/// Stored as the short two or three letter code. When the `sea-orm` feature is
/// enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum ResultCode {
    /// Accepted. Partial credit is still `AC` with fewer points.
    #[serde(rename = "AC")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "AC"))]
    Accepted,
    #[serde(rename = "WA")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "WA"))]
    WrongAnswer,
    #[serde(rename = "TLE")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "TLE"))]
    TimeLimitExceeded,
    #[serde(rename = "MLE")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "MLE"))]
    MemoryLimitExceeded,
    #[serde(rename = "OLE")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "OLE"))]
    OutputLimitExceeded,
    /// Invalid return (non-zero exit code).
    #[serde(rename = "IR")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "IR"))]
    InvalidReturn,
    #[serde(rename = "RTE")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "RTE"))]
    RuntimeError,
    #[serde(rename = "CE")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "CE"))]
    CompileError,
    /// Internal judge error.
    #[serde(rename = "IE")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "IE"))]
    InternalError,
    /// Short-circuited after an earlier failing case.
    #[serde(rename = "SC")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "SC"))]
    ShortCircuited,
    /// Aborted by the user or an administrator.
    #[serde(rename = "AB")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "AB"))]
    Aborted,
}

impl ResultCode {
    /// Returns true for `AC`, regardless of how many points were awarded.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// All result codes.
    pub const ALL: &'static [ResultCode] = &[
        Self::Accepted,
        Self::WrongAnswer,
        Self::TimeLimitExceeded,
        Self::MemoryLimitExceeded,
        Self::OutputLimitExceeded,
        Self::InvalidReturn,
        Self::RuntimeError,
        Self::CompileError,
        Self::InternalError,
        Self::ShortCircuited,
        Self::Aborted,
    ];

    /// Returns the stored short code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "AC",
            Self::WrongAnswer => "WA",
            Self::TimeLimitExceeded => "TLE",
            Self::MemoryLimitExceeded => "MLE",
            Self::OutputLimitExceeded => "OLE",
            Self::InvalidReturn => "IR",
            Self::RuntimeError => "RTE",
            Self::CompileError => "CE",
            Self::InternalError => "IE",
            Self::ShortCircuited => "SC",
            Self::Aborted => "AB",
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an unknown result code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResultCodeError {
    invalid: String,
}

impl fmt::Display for ParseResultCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid result code '{}'. Valid values: {}",
            self.invalid,
            ResultCode::ALL
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseResultCodeError {}

impl FromStr for ResultCode {
    type Err = ParseResultCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResultCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| ParseResultCodeError {
                invalid: s.to_string(),
            })
    }
}
