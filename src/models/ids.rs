//! Opaque identifiers for the stored entities.
//!
//! Ids are random v4 UUIDs rendered as strings. Records written by older
//! front ends carry other string encodings; any string is accepted on load.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh, collision-resistant id
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`Book`](super::Book)
    BookId
);
define_id!(
    /// Identifier of a [`Member`](super::Member)
    MemberId
);
define_id!(
    /// Identifier of a [`Transaction`](super::Transaction)
    TransactionId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<BookId> = (0..1000).map(|_| BookId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = MemberId::from("lk3j2abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"lk3j2abc\"");
    }
}
