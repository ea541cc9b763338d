use serde::{Deserialize, Serialize};

use super::BookId;

/// A catalogued title and how many copies of it the library owns
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    /// Total owned copies, including those on loan
    pub copies: u32,
}

/// Input for creating a book
#[derive(Debug, Clone, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub copies: u32,
}

impl Book {
    /// Case-insensitive substring match on title, author or isbn.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
            || self.isbn.to_lowercase().contains(needle)
    }
}

impl From<NewBook> for Book {
    fn from(input: NewBook) -> Self {
        Self {
            id: BookId::generate(),
            title: input.title,
            author: input.author,
            isbn: input.isbn,
            copies: input.copies,
        }
    }
}
