//! Infrastructure layer - Storage implementations
//!
//! This layer contains:
//! - Key-value storage backends (repositories)

pub mod repositories;

pub use repositories::*;
