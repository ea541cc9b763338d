//! Storage backend implementations
//!
//! This module contains concrete implementations of the KeyValueStore
//! trait defined in the domain layer.

mod file_store;
mod memory_store;

pub use file_store::JsonFileStore;
pub use memory_store::InMemoryStore;
