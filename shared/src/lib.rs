//! Shared types for the gift-exchange rotation workspace
//!
//! Contains the identifiers and value types that cross crate boundaries:
//! the selection engine consumes pools and histories built from them, and
//! the rotation coordinator persists the assignment sets it returns.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
