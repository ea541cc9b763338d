use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookId, MemberId, TransactionId};

/// Lifecycle of a loan. Moves from `Borrowed` to `Returned` exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Borrowed,
    Returned,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Borrowed => "borrowed",
            TransactionStatus::Returned => "returned",
        }
    }
}

/// One borrow of one book by one member
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub book_id: BookId,
    pub member_id: MemberId,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    pub status: TransactionStatus,
}

impl Transaction {
    pub(crate) fn borrowed(
        book_id: BookId,
        member_id: MemberId,
        borrow_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::generate(),
            book_id,
            member_id,
            borrow_date,
            due_date,
            return_date: None,
            status: TransactionStatus::Borrowed,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TransactionStatus::Borrowed
    }
}
