//! Selection strategies
//!
//! Each selection mode is a [`SelectionStrategy`] implementation; the
//! [`AssignmentSelector`](crate::AssignmentSelector) routes requests to them.

pub mod optimal;
pub mod random;
pub mod traits;

pub use optimal::OptimalStrategy;
pub use random::RandomStrategy;
pub use traits::{MockSelectionStrategy, SelectionStrategy};
