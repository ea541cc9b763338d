//! Entity store: the three collections and their persistence.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{
    BOOKS_KEY, DomainError, KeyValueStore, MEMBERS_KEY, StorageError, TRANSACTIONS_KEY,
};
use crate::models::{Book, Member, Transaction};

/// Snapshot of every persisted collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collections {
    pub books: Vec<Book>,
    pub members: Vec<Member>,
    pub transactions: Vec<Transaction>,
}

/// Read all three collections from `storage`.
///
/// A missing or undecodable key yields an empty collection.
pub fn load_all(storage: &dyn KeyValueStore) -> Result<Collections, DomainError> {
    Ok(Collections {
        books: load_collection(storage, BOOKS_KEY)?,
        members: load_collection(storage, MEMBERS_KEY)?,
        transactions: load_collection(storage, TRANSACTIONS_KEY)?,
    })
}

fn load_collection<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, DomainError> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ok(Vec::new()),
        Err(StorageError::Corrupt(msg)) => {
            tracing::warn!("Storage is corrupt, starting {} empty: {}", key, msg);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(e) => {
            tracing::warn!("Discarding corrupt collection {}: {}", key, e);
            Ok(Vec::new())
        }
    }
}

fn encode<T: Serialize>(items: &[T]) -> Result<String, DomainError> {
    Ok(serde_json::to_string(items)?)
}

/// Owns the collections for the lifetime of the application and keeps
/// them in step with the storage backend.
pub struct LibraryDb {
    storage: Box<dyn KeyValueStore>,
    pub(crate) books: Vec<Book>,
    pub(crate) members: Vec<Member>,
    pub(crate) transactions: Vec<Transaction>,
}

impl LibraryDb {
    /// Open a store, loading whatever `storage` already holds
    pub fn open(storage: Box<dyn KeyValueStore>) -> Result<Self, DomainError> {
        let collections = load_all(storage.as_ref())?;

        tracing::info!(
            "Loaded {} books, {} members, {} transactions",
            collections.books.len(),
            collections.members.len(),
            collections.transactions.len()
        );

        Ok(Self {
            storage,
            books: collections.books,
            members: collections.members,
            transactions: collections.transactions,
        })
    }

    /// Persist all three collections as one batch.
    ///
    /// Everything is serialized before the backend is touched, so an
    /// encoding failure writes nothing.
    pub fn save(&mut self) -> Result<(), DomainError> {
        let entries = [
            (BOOKS_KEY, encode(&self.books)?),
            (MEMBERS_KEY, encode(&self.members)?),
            (TRANSACTIONS_KEY, encode(&self.transactions)?),
        ];

        self.storage.put_all(&entries)?;

        tracing::debug!(
            "Saved {} books, {} members, {} transactions",
            self.books.len(),
            self.members.len(),
            self.transactions.len()
        );
        Ok(())
    }

    /// Replace the in-memory collections with what storage currently holds
    pub fn reload(&mut self) -> Result<(), DomainError> {
        let collections = load_all(self.storage.as_ref())?;
        self.books = collections.books;
        self.members = collections.members;
        self.transactions = collections.transactions;
        Ok(())
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Copy of the current in-memory collections
    pub fn snapshot(&self) -> Collections {
        Collections {
            books: self.books.clone(),
            members: self.members.clone(),
            transactions: self.transactions.clone(),
        }
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }
}

impl std::fmt::Debug for LibraryDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryDb")
            .field("books", &self.books.len())
            .field("members", &self.members.len())
            .field("transactions", &self.transactions.len())
            .finish()
    }
}
