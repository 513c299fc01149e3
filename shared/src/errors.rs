//! Shared error types for the rotation workspace

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Invalid identifier: {input}")]
    InvalidId { input: String },

    #[error("Invalid selection mode: '{value}' (expected 'random' or 'optimal')")]
    InvalidSelectionMode { value: String },

    #[error("Invalid permission bits: {value}")]
    InvalidPermissions { value: String },

    #[error("Invalid assignment: {reason}")]
    InvalidAssignment { reason: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
