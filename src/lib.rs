//! Library catalog core: books, members and the loans between them.
//!
//! State lives in a [`LibraryDb`] backed by any [`KeyValueStore`]; the
//! rules for availability, borrowing and returning live in [`services`].

pub mod config;
pub mod db;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod services;

pub use db::{Collections, LibraryDb, load_all};
pub use domain::{DomainError, KeyValueStore, StorageError};
pub use infrastructure::{InMemoryStore, JsonFileStore};
