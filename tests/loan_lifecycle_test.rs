//! Borrow / return lifecycle tests

use std::cell::Cell;
use std::rc::Rc;

use chrono::NaiveDate;
use library_catalog::models::{Book, BookId, Member, MemberId, NewBook, NewMember, TransactionId, TransactionStatus};
use library_catalog::services::{self, availability_service};
use library_catalog::{DomainError, InMemoryStore, KeyValueStore, LibraryDb, StorageError};

// Helper to create an empty in-memory store
fn setup_test_db() -> LibraryDb {
    LibraryDb::open(Box::new(InMemoryStore::new())).expect("Failed to open store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

// Helper to create a test book
fn create_test_book(db: &mut LibraryDb, title: &str, copies: u32) -> Book {
    services::add_book(
        db,
        NewBook {
            title: title.to_string(),
            author: "Test Author".to_string(),
            isbn: "9780000000000".to_string(),
            copies,
        },
    )
    .expect("Failed to create book")
}

// Helper to create a test member
fn create_test_member(db: &mut LibraryDb, name: &str) -> Member {
    services::add_member(
        db,
        NewMember {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
        },
    )
    .expect("Failed to create member")
}

#[test]
fn test_single_copy_scenario() {
    let mut db = setup_test_db();
    let book = create_test_book(&mut db, "Solaris", 1);
    let alice = create_test_member(&mut db, "Alice");
    let bob = create_test_member(&mut db, "Bob");

    let first = services::borrow(&mut db, &book.id, &alice.id, date(2024, 5, 1), date(2024, 5, 15))
        .expect("First borrow should succeed");
    assert_eq!(services::available_copies_for(&db, &book.id), Ok(0));

    let second = services::borrow(&mut db, &book.id, &bob.id, date(2024, 5, 2), date(2024, 5, 16));
    assert_eq!(second, Err(DomainError::NoCopiesAvailable(book.id.clone())));
    assert_eq!(db.transactions().len(), 1);

    services::return_book(&mut db, &first.id, date(2024, 5, 10)).expect("Return should succeed");
    assert_eq!(services::available_copies_for(&db, &book.id), Ok(1));
}

#[test]
fn test_borrow_appends_borrowed_transaction() {
    let mut db = setup_test_db();
    let book = create_test_book(&mut db, "Neuromancer", 3);
    let member = create_test_member(&mut db, "Case");

    let before = services::available_copies_for(&db, &book.id).unwrap();
    let t = services::borrow(&mut db, &book.id, &member.id, date(2024, 1, 1), date(2024, 1, 15))
        .unwrap();

    assert_eq!(services::available_copies_for(&db, &book.id).unwrap(), before - 1);
    assert_eq!(db.transactions().last(), Some(&t));
    assert_eq!(t.status, TransactionStatus::Borrowed);
    assert_eq!(t.return_date, None);
    assert_eq!(t.borrow_date, date(2024, 1, 1));
    assert_eq!(t.due_date, date(2024, 1, 15));
    assert_eq!(services::active_borrow_count_for(&db, &member.id), Ok(1));
}

#[test]
fn test_borrow_accepts_due_date_before_borrow_date() {
    let mut db = setup_test_db();
    let book = create_test_book(&mut db, "Ubik", 1);
    let member = create_test_member(&mut db, "Joe");

    let t = services::borrow(&mut db, &book.id, &member.id, date(2024, 3, 10), date(2024, 3, 1));
    assert!(t.is_ok());
}

#[test]
fn test_borrow_requires_existing_book_and_member() {
    let mut db = setup_test_db();
    let book = create_test_book(&mut db, "Emma", 1);
    let member = create_test_member(&mut db, "Jane");

    let missing_book = BookId::from("no-such-book");
    let result = services::borrow(&mut db, &missing_book, &member.id, date(2024, 1, 1), date(2024, 1, 2));
    assert_eq!(result, Err(DomainError::BookNotFound(missing_book)));

    let missing_member = MemberId::from("no-such-member");
    let result = services::borrow(&mut db, &book.id, &missing_member, date(2024, 1, 1), date(2024, 1, 2));
    assert_eq!(result, Err(DomainError::MemberNotFound(missing_member)));

    assert!(db.transactions().is_empty());
}

#[test]
fn test_zero_copy_book_cannot_be_borrowed() {
    let mut db = setup_test_db();
    let book = create_test_book(&mut db, "Reference Only", 0);
    let member = create_test_member(&mut db, "Reader");

    let result = services::borrow(&mut db, &book.id, &member.id, date(2024, 1, 1), date(2024, 1, 2));
    assert_eq!(result, Err(DomainError::NoCopiesAvailable(book.id)));
}

#[test]
fn test_return_sets_date_and_status() {
    let mut db = setup_test_db();
    let book = create_test_book(&mut db, "Middlemarch", 2);
    let member = create_test_member(&mut db, "Dorothea");

    let t = services::borrow(&mut db, &book.id, &member.id, date(2024, 4, 1), date(2024, 4, 15))
        .unwrap();
    let before = services::available_copies_for(&db, &book.id).unwrap();

    let returned = services::return_book(&mut db, &t.id, date(2024, 4, 20)).unwrap();
    assert_eq!(returned.status, TransactionStatus::Returned);
    assert_eq!(returned.return_date, Some(date(2024, 4, 20)));
    assert_eq!(services::get_transaction(&db, &t.id), Ok(&returned));
    assert_eq!(services::available_copies_for(&db, &book.id).unwrap(), before + 1);
    assert_eq!(services::active_borrow_count_for(&db, &member.id), Ok(0));
}

#[test]
fn test_return_twice_fails_and_keeps_first_date() {
    let mut db = setup_test_db();
    let book = create_test_book(&mut db, "Beloved", 1);
    let member = create_test_member(&mut db, "Sethe");

    let t = services::borrow(&mut db, &book.id, &member.id, date(2024, 6, 1), date(2024, 6, 15))
        .unwrap();
    services::return_book(&mut db, &t.id, date(2024, 6, 5)).unwrap();

    let again = services::return_book(&mut db, &t.id, date(2024, 6, 9));
    assert_eq!(again, Err(DomainError::AlreadyReturned(t.id.clone())));

    let stored = services::get_transaction(&db, &t.id).unwrap();
    assert_eq!(stored.return_date, Some(date(2024, 6, 5)));
    assert_eq!(stored.status, TransactionStatus::Returned);
}

#[test]
fn test_return_unknown_transaction() {
    let mut db = setup_test_db();
    let id = TransactionId::from("missing");

    let result = services::return_book(&mut db, &id, date(2024, 1, 1));
    assert_eq!(result, Err(DomainError::TransactionNotFound(id)));
}

#[test]
fn test_available_never_exceeds_owned_copies() {
    let mut db = setup_test_db();
    let books: Vec<Book> = (1..=3)
        .map(|i| create_test_book(&mut db, &format!("Volume {}", i), i))
        .collect();
    let member = create_test_member(&mut db, "Collector");

    for book in &books {
        for _ in 0..book.copies {
            services::borrow(&mut db, &book.id, &member.id, date(2024, 1, 1), date(2024, 1, 8))
                .unwrap();
        }
    }
    let first_loan = db.transactions()[0].id.clone();
    services::return_book(&mut db, &first_loan, date(2024, 1, 3)).unwrap();

    for row in services::list_books(&db) {
        let borrowed = availability_service::on_loan(&row.book.id, db.transactions()) as i64;
        assert!(row.available <= i64::from(row.book.copies));
        assert_eq!(row.available, i64::from(row.book.copies) - borrowed);
        assert!(row.available >= 0);
    }

    let borrowable: Vec<&str> = services::borrowable_books(&db)
        .into_iter()
        .map(|b| b.title.as_str())
        .collect();
    assert_eq!(borrowable, vec!["Volume 1"]);
}

#[test]
fn test_transactions_view_skips_dangling_references() {
    let store = InMemoryStore::with_entries([
        (
            "libraryBooks",
            r#"[{"id":"b1","title":"Kindred","author":"Octavia Butler","isbn":"123","copies":2}]"#,
        ),
        (
            "libraryMembers",
            r#"[{"id":"m1","name":"Dana","email":"dana@example.com","phone":null}]"#,
        ),
        (
            "libraryTransactions",
            r#"[
                {"id":"t1","bookId":"b1","memberId":"m1","borrowDate":"2024-01-01","dueDate":"2024-01-15","returnDate":null,"status":"borrowed"},
                {"id":"t2","bookId":"gone","memberId":"m1","borrowDate":"2024-01-01","dueDate":"2024-01-15","returnDate":null,"status":"borrowed"},
                {"id":"t3","bookId":"b1","memberId":"gone","borrowDate":"2024-01-01","dueDate":"2024-01-15","returnDate":"2024-01-02","status":"returned"}
            ]"#,
        ),
    ]);
    let db = LibraryDb::open(Box::new(store)).unwrap();

    let rows = services::list_transactions(&db);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].member_name, "Dana");
    assert_eq!(rows[0].book_title, "Kindred");
    assert_eq!(services::open_loans(&db).len(), 1);

    // Dangling transactions still hold a copy of b1
    assert_eq!(services::available_copies_for(&db, &BookId::from("b1")), Ok(1));
}

/// In-memory store whose writes can be switched off mid-test
struct SwitchableStore {
    inner: InMemoryStore,
    failing: Rc<Cell<bool>>,
}

impl KeyValueStore for SwitchableStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn put_all(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(StorageError::Io("quota exceeded".to_string()));
        }
        self.inner.put_all(entries)
    }
}

// Helper to create a store plus the switch that makes its saves fail
fn setup_switchable_db() -> (LibraryDb, Rc<Cell<bool>>) {
    let failing = Rc::new(Cell::new(false));
    let store = SwitchableStore {
        inner: InMemoryStore::new(),
        failing: Rc::clone(&failing),
    };
    let db = LibraryDb::open(Box::new(store)).expect("Failed to open store");
    (db, failing)
}

fn is_quota_error<T>(result: &Result<T, DomainError>) -> bool {
    matches!(result, Err(DomainError::Persistence(msg)) if msg.contains("quota"))
}

#[test]
fn test_failed_add_rolls_back() {
    let (mut db, failing) = setup_switchable_db();
    failing.set(true);

    let book = services::add_book(
        &mut db,
        NewBook {
            title: "Unsaved".to_string(),
            author: "Nobody".to_string(),
            isbn: "0".to_string(),
            copies: 1,
        },
    );
    assert!(is_quota_error(&book));
    assert!(db.books().is_empty());

    let member = services::add_member(
        &mut db,
        NewMember {
            name: "Ghost".to_string(),
            email: "ghost@example.com".to_string(),
            phone: None,
        },
    );
    assert!(is_quota_error(&member));
    assert!(db.members().is_empty());
}

#[test]
fn test_failed_borrow_leaves_transactions_unchanged() {
    let (mut db, failing) = setup_switchable_db();
    let book = create_test_book(&mut db, "Foundation", 1);
    let member = create_test_member(&mut db, "Hari");

    failing.set(true);
    let result = services::borrow(&mut db, &book.id, &member.id, date(2024, 8, 1), date(2024, 8, 15));

    assert!(is_quota_error(&result));
    assert!(db.transactions().is_empty());
    assert_eq!(services::available_copies_for(&db, &book.id), Ok(1));
}

#[test]
fn test_failed_return_keeps_loan_open() {
    let (mut db, failing) = setup_switchable_db();
    let book = create_test_book(&mut db, "Foundation", 1);
    let hari = create_test_member(&mut db, "Hari");
    let gaal = create_test_member(&mut db, "Gaal");

    let t = services::borrow(&mut db, &book.id, &hari.id, date(2024, 8, 1), date(2024, 8, 15))
        .expect("borrow");

    failing.set(true);
    let result = services::return_book(&mut db, &t.id, date(2024, 8, 10));
    assert!(is_quota_error(&result));

    let stored = services::get_transaction(&db, &t.id).expect("transaction");
    assert_eq!(stored.status, TransactionStatus::Borrowed);
    assert_eq!(stored.return_date, None);

    // The copy is still on loan
    failing.set(false);
    let second = services::borrow(&mut db, &book.id, &gaal.id, date(2024, 8, 11), date(2024, 8, 25));
    assert_eq!(second, Err(DomainError::NoCopiesAvailable(book.id.clone())));

    services::return_book(&mut db, &t.id, date(2024, 8, 12)).expect("return after recovery");
    assert_eq!(services::available_copies_for(&db, &book.id), Ok(1));
}
