use serde::{Deserialize, Serialize};

use super::MemberId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Input for creating a member
#[derive(Debug, Clone, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<NewMember> for Member {
    fn from(input: NewMember) -> Self {
        Self {
            id: MemberId::generate(),
            name: input.name,
            email: input.email,
            // An empty form field means no phone number
            phone: input.phone.filter(|p| !p.trim().is_empty()),
        }
    }
}
