//! Services Layer
//!
//! This module contains the library's business rules as free functions
//! over a [`LibraryDb`](crate::db::LibraryDb). A front end calls them
//! directly and renders whatever they return.

pub mod availability_service;
pub mod book_service;
pub mod dashboard_service;
pub mod loan_service;
pub mod member_service;

// Re-export for convenience
pub use availability_service::{active_borrow_count_for, available_copies_for, is_overdue};
pub use book_service::*;
pub use dashboard_service::*;
pub use loan_service::*;
pub use member_service::*;
