//! Assignment selection engine for gift-exchange rotations
//!
//! Turns a member pool into a complete sender→receiver assignment with no
//! self-pairs. Two strategies are provided: a uniform random derangement and
//! a history-weighted search that minimizes repeated pairings. The engine is
//! pure and synchronous; callers supply the pool and history and receive a
//! fresh [`AssignmentSet`](shared::AssignmentSet).

pub mod config;
pub mod core;
pub mod error;
pub mod selector;
pub mod strategies;

// Re-export commonly used types
pub use config::{LargePoolPolicy, SelectorConfig};
pub use crate::core::{all_derangements, random_derangement, Derangements, TallyMatrix, TallyTable};
pub use error::{SelectorError, SelectorResult};
pub use selector::AssignmentSelector;
pub use strategies::{OptimalStrategy, RandomStrategy, SelectionStrategy};
