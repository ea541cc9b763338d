//! Storage trait definitions
//!
//! This trait defines the contract for the persistence boundary.
//! Implementations live in the infrastructure layer.

use super::errors::StorageError;

/// Key under which the book collection is persisted
pub const BOOKS_KEY: &str = "libraryBooks";
/// Key under which the member collection is persisted
pub const MEMBERS_KEY: &str = "libraryMembers";
/// Key under which the transaction collection is persisted
pub const TRANSACTIONS_KEY: &str = "libraryTransactions";

/// String key-value storage holding the serialized collections
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write every entry of the batch.
    ///
    /// Implementations must apply the batch all-or-nothing: after an error
    /// the previously stored values are still in place.
    fn put_all(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError>;
}
