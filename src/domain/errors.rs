//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

use crate::models::{BookId, MemberId, TransactionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Every owned copy of the book is currently on loan
    NoCopiesAvailable(BookId),
    /// Book id does not resolve to a book in the store
    BookNotFound(BookId),
    /// Member id does not resolve to a member in the store
    MemberNotFound(MemberId),
    /// Transaction id does not resolve to a transaction in the store
    TransactionNotFound(TransactionId),
    /// Transaction has already been returned
    AlreadyReturned(TransactionId),
    /// Reading or writing the persisted collections failed
    Persistence(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NoCopiesAvailable(id) => {
                write!(f, "No copies available for borrowing (book {})", id)
            }
            DomainError::BookNotFound(id) => write!(f, "Book not found: {}", id),
            DomainError::MemberNotFound(id) => write!(f, "Member not found: {}", id),
            DomainError::TransactionNotFound(id) => write!(f, "Transaction not found: {}", id),
            DomainError::AlreadyReturned(id) => {
                write!(f, "Transaction {} is already returned", id)
            }
            DomainError::Persistence(msg) => write!(f, "Persistence error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

/// Failure reported by a key-value storage backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend could not be read or written
    Io(String),
    /// The backend holds data it cannot decode
    Corrupt(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "storage I/O failed: {}", msg),
            StorageError::Corrupt(msg) => write!(f, "storage is corrupt: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}

// Conversions used by the store when talking to a backend
impl From<StorageError> for DomainError {
    fn from(e: StorageError) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}
