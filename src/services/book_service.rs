//! Book Service - Pure business logic without a presentation layer
//!
//! Catalogue additions, lookups and the substring search used by the
//! books view.

use crate::db::LibraryDb;
use crate::domain::DomainError;
use crate::models::{Book, BookId, NewBook};
use crate::services::availability_service::available_copies;

/// A book together with its currently available copies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookAvailability {
    pub book: Book,
    pub available: i64,
}

/// Create a new book and persist it
pub fn add_book(db: &mut LibraryDb, input: NewBook) -> Result<Book, DomainError> {
    let book = Book::from(input);
    db.books.push(book.clone());

    if let Err(e) = db.save() {
        db.books.pop();
        return Err(e);
    }

    tracing::info!("Added book {} ({:?}, {} copies)", book.id, book.title, book.copies);
    Ok(book)
}

/// Get a single book by ID
pub fn get_book<'a>(db: &'a LibraryDb, id: &BookId) -> Result<&'a Book, DomainError> {
    db.books()
        .iter()
        .find(|b| &b.id == id)
        .ok_or_else(|| DomainError::BookNotFound(id.clone()))
}

/// Every book with its available copies, in insertion order
pub fn list_books(db: &LibraryDb) -> Vec<BookAvailability> {
    db.books()
        .iter()
        .map(|book| BookAvailability {
            available: available_copies(book, db.transactions()),
            book: book.clone(),
        })
        .collect()
}

/// Books that can be borrowed right now
pub fn borrowable_books(db: &LibraryDb) -> Vec<&Book> {
    db.books()
        .iter()
        .filter(|book| available_copies(book, db.transactions()) > 0)
        .collect()
}

/// Lazy search over the catalogue. Cloning restarts it from the top.
#[derive(Debug, Clone)]
pub struct BookSearch<'a> {
    books: std::slice::Iter<'a, Book>,
    needle: Option<String>,
}

impl<'a> Iterator for BookSearch<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<Self::Item> {
        match &self.needle {
            None => self.books.next(),
            Some(needle) => self.books.by_ref().find(|book| book.matches(needle)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.books.len();
        match self.needle {
            None => (remaining, Some(remaining)),
            Some(_) => (0, Some(remaining)),
        }
    }
}

/// Case-insensitive substring search on title, author and isbn.
///
/// An empty term yields every book. Matches come back in insertion order.
pub fn search_books<'a>(db: &'a LibraryDb, term: &str) -> BookSearch<'a> {
    let needle = if term.is_empty() {
        None
    } else {
        Some(term.to_lowercase())
    };

    BookSearch {
        books: db.books().iter(),
        needle,
    }
}
