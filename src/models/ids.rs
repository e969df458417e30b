//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Common behaviour of every entity id, used by the generic repository
pub trait EntityId: Copy + Eq + std::hash::Hash + fmt::Display + fmt::Debug {
    /// See the inherent `matches` on each id type
    fn matches_reference(&self, reference: &str) -> bool;
}

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Check whether a user-supplied reference points at this ID
            ///
            /// Accepts the full UUID, the short display form (`wal-1a2b3c4d`),
            /// or a bare hex prefix of at least 4 characters.
            pub fn matches(&self, reference: &str) -> bool {
                let lowered = reference.trim().to_lowercase();
                let reference = lowered
                    .strip_prefix($display_prefix)
                    .unwrap_or(lowered.as_str());
                reference.len() >= 4 && self.0.to_string().starts_with(reference)
            }
        }

        impl EntityId for $name {
            fn matches_reference(&self, reference: &str) -> bool {
                self.matches(reference)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return Ok(Self(uuid));
                }
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(WalletId, "wal-");
define_id!(TransactionId, "txn-");
define_id!(BudgetId, "bud-");
define_id!(BillId, "bill-");
define_id!(LoanId, "loan-");
define_id!(GoalId, "goal-");
define_id!(InvestmentId, "inv-");
define_id!(NotificationId, "ntf-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = WalletId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("wal-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_equality() {
        let id1 = BillId::new();
        let id2 = id1;
        assert_eq!(id1, id2);
        assert_ne!(id1, BillId::new());
    }

    #[test]
    fn test_id_serialization() {
        let id = TransactionId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }

    #[test]
    fn test_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = WalletId::parse(uuid_str).unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let prefixed: LoanId = format!("loan-{}", uuid_str).parse().unwrap();
        assert_eq!(prefixed.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_matches_short_forms() {
        let id = WalletId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(id.matches("wal-550e8400"));
        assert!(id.matches("550e8400"));
        assert!(id.matches("550E"));
        assert!(id.matches("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!id.matches("550"));
        assert!(!id.matches("wal-deadbeef"));
    }
}
