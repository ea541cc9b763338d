//! Member Service - Pure business logic without a presentation layer

use crate::db::LibraryDb;
use crate::domain::DomainError;
use crate::models::{Member, MemberId, NewMember};
use crate::services::availability_service::active_borrow_count;

/// Member row for the members view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberWithLoans {
    pub member: Member,
    pub active_borrows: usize,
}

/// Create a new member and persist it
pub fn add_member(db: &mut LibraryDb, input: NewMember) -> Result<Member, DomainError> {
    let member = Member::from(input);
    db.members.push(member.clone());

    if let Err(e) = db.save() {
        db.members.pop();
        return Err(e);
    }

    tracing::info!("Added member {} ({:?})", member.id, member.name);
    Ok(member)
}

/// Get a single member by ID
pub fn get_member<'a>(db: &'a LibraryDb, id: &MemberId) -> Result<&'a Member, DomainError> {
    db.members()
        .iter()
        .find(|m| &m.id == id)
        .ok_or_else(|| DomainError::MemberNotFound(id.clone()))
}

/// List all members with their active borrow count
pub fn list_members(db: &LibraryDb) -> Vec<MemberWithLoans> {
    db.members()
        .iter()
        .map(|member| MemberWithLoans {
            active_borrows: active_borrow_count(&member.id, db.transactions()),
            member: member.clone(),
        })
        .collect()
}

/// Count total members
pub fn count_members(db: &LibraryDb) -> usize {
    db.members().len()
}
