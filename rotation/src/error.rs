//! Rotation-specific error types

use selector::SelectorError;
use shared::{GuildId, MemberId, RotationId, SharedError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RotationError {
    #[error("Rotation not found: {rotation_id}")]
    RotationNotFound { rotation_id: RotationId },

    #[error("Guild {guild_id} already has an open rotation: {rotation_id}")]
    RotationAlreadyOpen {
        guild_id: GuildId,
        rotation_id: RotationId,
    },

    #[error("Rotation {rotation_id} has already started")]
    RotationAlreadyStarted { rotation_id: RotationId },

    #[error("No open rotation in guild {guild_id}")]
    NoOpenRotation { guild_id: GuildId },

    #[error("No rotations have been created in guild {guild_id}")]
    NoRotations { guild_id: GuildId },

    #[error("{member_id} already joined rotation {rotation_id}")]
    AlreadyJoined {
        member_id: MemberId,
        rotation_id: RotationId,
    },

    #[error("{member_id} is not permitted to {action} rotation {rotation_id}")]
    NotPermitted {
        member_id: MemberId,
        action: &'static str,
        rotation_id: RotationId,
    },

    #[error("Cannot start with {have} members (need at least {need})")]
    NotEnoughMembers { have: usize, need: usize },

    #[error("Assignment selection failed: {0}")]
    Selection(#[from] SelectorError),

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("Rotation store error: {message}")]
    StoreError { message: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },
}

impl RotationError {
    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreError {
            message: message.into(),
        }
    }

    pub fn config(field: impl Into<String>) -> Self {
        Self::ConfigurationError {
            field: field.into(),
        }
    }
}

pub type RotationResult<T> = Result<T, RotationError>;
