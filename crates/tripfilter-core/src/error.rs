use thiserror::Error;

use crate::types::FilterKind;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("Unknown filter field: {0}")]
    UnknownField(String),

    #[error("Filter field declared twice: {0}")]
    DuplicateField(String),

    #[error("Field '{field}' expects a {expected} value, got {actual}")]
    KindMismatch {
        field: String,
        expected: FilterKind,
        actual: FilterKind,
    },

    #[error("Invalid range: lower bound {lower} exceeds upper bound {upper}")]
    InvalidRange { lower: f64, upper: f64 },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown catalog: {0}")]
    UnknownCatalog(String),
}

pub type Result<T> = std::result::Result<T, Error>;
