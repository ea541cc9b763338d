pub mod book;
pub mod ids;
pub mod member;
pub mod transaction;

pub use book::{Book, NewBook};
pub use ids::{BookId, MemberId, TransactionId};
pub use member::{Member, NewMember};
pub use transaction::{Transaction, TransactionStatus};
