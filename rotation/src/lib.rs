//! Gift-exchange rotation lifecycle
//!
//! Rotations open in a guild, collect members, and start exactly once, at
//! which point the assignment selector pairs every member with someone to
//! give to. Storage is injected through [`RotationStore`].

pub mod coordinator;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use crate::core::{format_member_list, rotation_summary, Rotation, RotationLedger, RotationStatus, MIN_START_MEMBERS};
pub use coordinator::RotationCoordinator;
pub use error::{RotationError, RotationResult};
pub use services::{FileRotationStore, MemoryRotationStore};
pub use traits::{MockRotationStore, RotationStore};
