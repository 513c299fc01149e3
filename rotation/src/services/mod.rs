//! Service implementations
//!
//! Production implementations of the store trait. Both share the ledger
//! logic in `core` and differ only in locking and persistence.

pub mod file_store;
pub mod memory_store;

#[cfg(test)]
mod tests;

pub use file_store::FileRotationStore;
pub use memory_store::MemoryRotationStore;
