//! Core business logic modules
//!
//! Rotation state, the ledger stores are built on, and text rendering.
//! Nothing here performs I/O.

pub mod ledger;
pub mod render;
pub mod state;

pub use ledger::RotationLedger;
pub use render::{format_member_list, rotation_summary};
pub use state::{Rotation, RotationStatus, MIN_START_MEMBERS};
