//! Domain layer - Pure business abstractions
//!
//! This layer contains NO storage backends.
//! Only trait definitions and domain error types.

pub mod errors;
pub mod repositories;

pub use errors::{DomainError, StorageError};
pub use repositories::*;
