//! Search parameters: the title term plus the year and type filters.

mod types;

pub use types::*;

use thiserror::Error;

/// Errors raised when parsing user-supplied filter values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid year '{0}': expected four digits")]
    InvalidYear(String),

    #[error("Unknown title type '{0}': expected movie, series or episode")]
    UnknownTitleType(String),
}
