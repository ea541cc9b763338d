//! Loan Service - Pure business logic without a presentation layer
//!
//! Transactions start out Borrowed and move to Returned exactly once.

use chrono::{Days, NaiveDate};

use crate::db::LibraryDb;
use crate::domain::DomainError;
use crate::models::{BookId, MemberId, Transaction, TransactionId, TransactionStatus};
use crate::services::availability_service::available_copies;
use crate::services::book_service::get_book;
use crate::services::member_service::get_member;

/// Transaction joined with the names the transactions view shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionWithDetails {
    pub transaction: Transaction,
    pub member_name: String,
    pub book_title: String,
}

/// Borrow one copy of a book.
///
/// Fails with `NoCopiesAvailable` when every copy is on loan; nothing is
/// recorded in that case. Any pair of dates is accepted.
pub fn borrow(
    db: &mut LibraryDb,
    book_id: &BookId,
    member_id: &MemberId,
    borrow_date: NaiveDate,
    due_date: NaiveDate,
) -> Result<Transaction, DomainError> {
    // 1. Check book and member exist
    let book = get_book(db, book_id)?;
    get_member(db, member_id)?;

    // 2. Check a copy is free
    if available_copies(book, db.transactions()) < 1 {
        return Err(DomainError::NoCopiesAvailable(book_id.clone()));
    }

    if due_date < borrow_date {
        tracing::warn!(
            "Borrow of book {} is due {} before it starts {}",
            book_id,
            due_date,
            borrow_date
        );
    }

    // 3. Record the transaction
    let transaction = Transaction::borrowed(
        book_id.clone(),
        member_id.clone(),
        borrow_date,
        due_date,
    );
    db.transactions.push(transaction.clone());

    if let Err(e) = db.save() {
        db.transactions.pop();
        return Err(e);
    }

    tracing::info!(
        "Book {} borrowed by member {} until {} (transaction {})",
        book_id,
        member_id,
        due_date,
        transaction.id
    );
    Ok(transaction)
}

/// Return a borrowed book.
///
/// Returning an already returned transaction fails with `AlreadyReturned`
/// and leaves the original return date in place.
pub fn return_book(
    db: &mut LibraryDb,
    transaction_id: &TransactionId,
    return_date: NaiveDate,
) -> Result<Transaction, DomainError> {
    // 1. Find transaction
    let index = db
        .transactions
        .iter()
        .position(|t| &t.id == transaction_id)
        .ok_or_else(|| DomainError::TransactionNotFound(transaction_id.clone()))?;

    if db.transactions[index].status == TransactionStatus::Returned {
        return Err(DomainError::AlreadyReturned(transaction_id.clone()));
    }

    // 2. Close it
    let previous = db.transactions[index].clone();
    {
        let transaction = &mut db.transactions[index];
        transaction.return_date = Some(return_date);
        transaction.status = TransactionStatus::Returned;
    }

    if let Err(e) = db.save() {
        db.transactions[index] = previous;
        return Err(e);
    }

    let updated = db.transactions[index].clone();
    tracing::info!(
        "Book {} returned by member {} on {} (transaction {})",
        updated.book_id,
        updated.member_id,
        return_date,
        updated.id
    );
    Ok(updated)
}

/// Get a single transaction by ID
pub fn get_transaction<'a>(
    db: &'a LibraryDb,
    id: &TransactionId,
) -> Result<&'a Transaction, DomainError> {
    db.transactions()
        .iter()
        .find(|t| &t.id == id)
        .ok_or_else(|| DomainError::TransactionNotFound(id.clone()))
}

/// All transactions with member name and book title.
///
/// Transactions whose book or member is no longer in the store are skipped.
pub fn list_transactions(db: &LibraryDb) -> Vec<TransactionWithDetails> {
    db.transactions()
        .iter()
        .filter_map(|transaction| {
            let book = db.books().iter().find(|b| b.id == transaction.book_id)?;
            let member = db.members().iter().find(|m| m.id == transaction.member_id)?;

            Some(TransactionWithDetails {
                transaction: transaction.clone(),
                member_name: member.name.clone(),
                book_title: book.title.clone(),
            })
        })
        .collect()
}

/// Transactions that can still be returned
pub fn open_loans(db: &LibraryDb) -> Vec<TransactionWithDetails> {
    list_transactions(db)
        .into_iter()
        .filter(|row| row.transaction.is_active())
        .collect()
}

/// Default due date offered to the borrow form
pub fn default_due_date(borrow_date: NaiveDate, loan_period_days: u32) -> NaiveDate {
    borrow_date
        .checked_add_days(Days::new(u64::from(loan_period_days)))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_due_date_adds_loan_period() {
        let borrowed = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(
            default_due_date(borrowed, 14),
            NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()
        );
        assert_eq!(default_due_date(NaiveDate::MAX, 1), NaiveDate::MAX);
    }
}
