//! Dashboard Service - headline figures for the landing view

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::LibraryDb;
use crate::services::availability_service::{
    today, total_borrowed, total_copies, total_overdue,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Sum of owned copies over every book
    pub total_copies: u64,
    pub total_members: usize,
    /// Transactions still Borrowed
    pub total_borrowed: usize,
    pub total_overdue: usize,
}

/// Summary as of the local calendar date
pub fn dashboard_summary(db: &LibraryDb) -> DashboardSummary {
    dashboard_summary_at(db, today())
}

/// Summary with overdue loans counted relative to `today`
pub fn dashboard_summary_at(db: &LibraryDb, today: NaiveDate) -> DashboardSummary {
    DashboardSummary {
        total_copies: total_copies(db.books()),
        total_members: db.members().len(),
        total_borrowed: total_borrowed(db.transactions()),
        total_overdue: total_overdue(db.transactions(), today),
    }
}
