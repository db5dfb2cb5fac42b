//! Strongly Typed Identifiers
//!
//! Newtype wrappers for the identifiers that cross crate boundaries in kadro.
//! Organization and external-subject identifiers are opaque strings minted by
//! an external system (`org_...`, `user_...`); local user identifiers are
//! UUIDs minted by us. Wrapping them prevents accidental mixups at compile
//! time.
//!
//! # Example
//!
//! ```
//! use kadro_core::{OrgId, UserId};
//!
//! let org = OrgId::from("org_1");
//! let user = UserId::new();
//!
//! fn requires_org(id: &OrgId) -> String {
//!     id.to_string()
//! }
//!
//! let result = requires_org(&org);
//! // requires_org(&user); // does not compile
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Macro to define a strongly-typed opaque string identifier.
macro_rules! define_opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from any string-like value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns `true` if the identifier is the empty string.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
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

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_opaque_id!(
    /// Strongly typed identifier for organizations (tenants).
    ///
    /// Opaque, globally unique, assigned through the administrative path
    /// (e.g. `org_2k3j4l5m`). Every tenant-scoped entity references exactly
    /// one organization by this identifier.
    OrgId
);

define_opaque_id!(
    /// Strongly typed identifier for external identity-provider subjects.
    ///
    /// The provider's stable unique id for a person (e.g. `user_2a9x8b7c`),
    /// used to correlate provider events with local users.
    SubjectId
);

/// Error type for ID parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The underlying parse error message.
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Strongly typed identifier for local user records.
///
/// Minted locally as a UUID v4 when the provisioning engine creates a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random ID using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an ID from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns a reference to the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|e| ParseIdError {
            id_type: "UserId",
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod org_id_tests {
        use super::*;

        #[test]
        fn test_preserves_value() {
            let id = OrgId::from("org_1");
            assert_eq!(id.as_str(), "org_1");
            assert_eq!(id.to_string(), "org_1");
        }

        #[test]
        fn test_equality() {
            assert_eq!(OrgId::from("org_1"), OrgId::new("org_1"));
            assert_ne!(OrgId::from("org_1"), OrgId::from("org_2"));
        }

        #[test]
        fn test_is_empty() {
            assert!(OrgId::from("").is_empty());
            assert!(!OrgId::from("org_1").is_empty());
        }

        #[test]
        fn test_serializes_as_plain_string() {
            let json = serde_json::to_string(&OrgId::from("org_1")).unwrap();
            assert_eq!(json, "\"org_1\"");
        }

        #[test]
        fn test_serde_roundtrip() {
            let original = OrgId::from("org_abc123");
            let json = serde_json::to_string(&original).unwrap();
            let deserialized: OrgId = serde_json::from_str(&json).unwrap();
            assert_eq!(original, deserialized);
        }
    }

    mod subject_id_tests {
        use super::*;
        use std::collections::HashMap;

        #[test]
        fn test_preserves_value() {
            let id = SubjectId::from("user_2a9x8b7c");
            assert_eq!(id.as_str(), "user_2a9x8b7c");
        }

        #[test]
        fn test_can_use_as_hashmap_key() {
            let mut map: HashMap<SubjectId, String> = HashMap::new();
            map.insert(SubjectId::from("ext_1"), "one".to_string());
            map.insert(SubjectId::from("ext_2"), "two".to_string());

            assert_eq!(map.get(&SubjectId::from("ext_1")), Some(&"one".to_string()));
            assert_eq!(map.get(&SubjectId::from("ext_2")), Some(&"two".to_string()));
        }
    }

    mod user_id_tests {
        use super::*;

        #[test]
        fn test_new_creates_valid_id() {
            let id = UserId::new();
            // UUID format: 8-4-4-4-12 hex digits
            assert_eq!(id.to_string().len(), 36);
        }

        #[test]
        fn test_from_uuid_preserves_value() {
            let uuid = Uuid::new_v4();
            let id = UserId::from_uuid(uuid);
            assert_eq!(id.as_uuid(), &uuid);
        }

        #[test]
        fn test_parse_valid_uuid() {
            let id: UserId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
            assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
        }

        #[test]
        fn test_parse_invalid_uuid_returns_error() {
            let result: std::result::Result<UserId, _> = "not-a-uuid".parse();
            assert!(result.is_err());
            let err = result.unwrap_err();
            assert_eq!(err.id_type, "UserId");
            assert!(!err.message.is_empty());
        }

        #[test]
        fn test_default_creates_new_id() {
            assert_ne!(UserId::default(), UserId::default());
        }

        #[test]
        fn test_copy_semantics() {
            let id1 = UserId::new();
            let id2 = id1; // Copy
            assert_eq!(id1, id2);
        }
    }
}
