//! Availability Service - pure derivations over the collections
//!
//! Nothing here is cached: every figure is recomputed from the transaction
//! list on each call, since transactions change independently of books.

use chrono::NaiveDate;

use crate::db::LibraryDb;
use crate::domain::DomainError;
use crate::models::{Book, BookId, MemberId, Transaction};

/// Copies of `book` not currently on loan
pub fn available_copies(book: &Book, transactions: &[Transaction]) -> i64 {
    i64::from(book.copies) - on_loan(&book.id, transactions) as i64
}

/// Number of Borrowed transactions referencing `book_id`
pub fn on_loan(book_id: &BookId, transactions: &[Transaction]) -> usize {
    transactions
        .iter()
        .filter(|t| t.is_active() && &t.book_id == book_id)
        .count()
}

/// Number of Borrowed transactions held by `member_id`
pub fn active_borrow_count(member_id: &MemberId, transactions: &[Transaction]) -> usize {
    transactions
        .iter()
        .filter(|t| t.is_active() && &t.member_id == member_id)
        .count()
}

/// Borrowed and due strictly before `today`, compared as calendar dates
pub fn is_overdue(transaction: &Transaction, today: NaiveDate) -> bool {
    transaction.is_active() && transaction.due_date < today
}

pub fn total_copies(books: &[Book]) -> u64 {
    books.iter().map(|b| u64::from(b.copies)).sum()
}

pub fn total_borrowed(transactions: &[Transaction]) -> usize {
    transactions.iter().filter(|t| t.is_active()).count()
}

pub fn total_overdue(transactions: &[Transaction], today: NaiveDate) -> usize {
    transactions
        .iter()
        .filter(|t| is_overdue(t, today))
        .count()
}

/// Available copies of the stored book with id `book_id`
pub fn available_copies_for(db: &LibraryDb, book_id: &BookId) -> Result<i64, DomainError> {
    let book = db
        .books()
        .iter()
        .find(|b| &b.id == book_id)
        .ok_or_else(|| DomainError::BookNotFound(book_id.clone()))?;

    Ok(available_copies(book, db.transactions()))
}

/// Active borrows of the stored member with id `member_id`
pub fn active_borrow_count_for(db: &LibraryDb, member_id: &MemberId) -> Result<usize, DomainError> {
    if !db.members().iter().any(|m| &m.id == member_id) {
        return Err(DomainError::MemberNotFound(member_id.clone()));
    }

    Ok(active_borrow_count(member_id, db.transactions()))
}

/// Today's date on the local calendar
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
