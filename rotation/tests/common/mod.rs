//! Common test utilities and infrastructure
//!
//! Fixtures, helpers and a mock-store builder shared by the rotation test
//! suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items for convenience
pub use fixtures::TestFixtures;
pub use helpers::{MockStoreBuilder, TestHelpers};
