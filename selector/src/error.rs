//! Selector-specific error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Not enough members for an assignment: {count} (need at least {minimum})")]
    InsufficientMembers { count: usize, minimum: usize },

    #[error("Exhaustive search over {count} members exceeds the limit of {limit}")]
    EnumerationOverflow { count: usize, limit: usize },

    #[error("Computed assignment is invalid: {0}")]
    InvalidAssignment(#[from] SharedError),

    #[error("Configuration error: {field} = {value}")]
    ConfigurationError { field: String, value: String },
}

impl SelectorError {
    pub fn config(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::ConfigurationError {
            field: field.into(),
            value: value.into(),
        }
    }
}

pub type SelectorResult<T> = Result<T, SelectorError>;
