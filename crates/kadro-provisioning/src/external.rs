//! External user payloads from the identity provider.
//!
//! The provider transmits an open-ended bag of fields; we model only the
//! handful the engine needs and fail closed when a required one is absent.
//! Everything else in the payload is ignored by construction.

use kadro_core::{OrgId, SubjectId};
use serde::Deserialize;
use serde_json::Value;

/// Metadata key carrying the tenant assignment.
pub const METADATA_ORGANIZATION_ID: &str = "organizationId";

/// An email address entry on the external user.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailAddress {
    /// Provider-assigned identifier for this address.
    pub id: String,

    /// The address itself.
    pub email_address: String,
}

/// A phone number entry on the external user.
#[derive(Debug, Clone, Deserialize)]
pub struct PhoneNumber {
    /// Provider-assigned identifier for this number.
    pub id: String,

    /// The number itself.
    pub phone_number: String,
}

/// The narrow slice of an external identity record the engine consumes.
///
/// Deserialized from the `data` object of `user.created` and `user.updated`
/// events. Unknown fields are dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUser {
    /// The provider's stable subject identifier.
    pub id: String,

    /// All email addresses on the record.
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,

    /// Identifier of the designated primary address, when set.
    #[serde(default)]
    pub primary_email_address_id: Option<String>,

    /// All phone numbers on the record.
    #[serde(default)]
    pub phone_numbers: Vec<PhoneNumber>,

    /// Identifier of the designated primary number, when set.
    #[serde(default)]
    pub primary_phone_number_id: Option<String>,

    /// First name, when the provider has one.
    #[serde(default)]
    pub first_name: Option<String>,

    /// Last name, when the provider has one.
    #[serde(default)]
    pub last_name: Option<String>,

    /// Open-ended metadata bag. Only the organization identifier is read.
    #[serde(default)]
    pub public_metadata: Value,
}

impl ExternalUser {
    /// Get the subject identifier as a typed id.
    #[must_use]
    pub fn subject_id(&self) -> SubjectId {
        SubjectId::from(self.id.as_str())
    }

    /// Resolve the email address: the designated primary if present, else
    /// the first available. `None` when the record carries no addresses.
    #[must_use]
    pub fn primary_email(&self) -> Option<&str> {
        if let Some(primary_id) = &self.primary_email_address_id {
            if let Some(entry) = self.email_addresses.iter().find(|e| &e.id == primary_id) {
                return Some(&entry.email_address);
            }
        }
        self.email_addresses.first().map(|e| e.email_address.as_str())
    }

    /// Resolve the phone number the same way as the email address.
    #[must_use]
    pub fn primary_phone(&self) -> Option<&str> {
        if let Some(primary_id) = &self.primary_phone_number_id {
            if let Some(entry) = self.phone_numbers.iter().find(|p| &p.id == primary_id) {
                return Some(&entry.phone_number);
            }
        }
        self.phone_numbers.first().map(|p| p.phone_number.as_str())
    }

    /// Extract the organization identifier from the metadata bag.
    ///
    /// `None` when the key is absent, not a string, or empty.
    #[must_use]
    pub fn organization_id(&self) -> Option<OrgId> {
        self.public_metadata
            .get(METADATA_ORGANIZATION_ID)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(OrgId::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn from_json(value: Value) -> ExternalUser {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_minimal_payload_deserializes() {
        let user = from_json(json!({ "id": "user_1" }));
        assert_eq!(user.subject_id(), SubjectId::from("user_1"));
        assert!(user.primary_email().is_none());
        assert!(user.primary_phone().is_none());
        assert!(user.organization_id().is_none());
    }

    #[test]
    fn test_primary_email_preferred_over_first() {
        let user = from_json(json!({
            "id": "user_1",
            "email_addresses": [
                { "id": "em_1", "email_address": "first@x.com" },
                { "id": "em_2", "email_address": "primary@x.com" }
            ],
            "primary_email_address_id": "em_2"
        }));
        assert_eq!(user.primary_email(), Some("primary@x.com"));
    }

    #[test]
    fn test_falls_back_to_first_email_when_primary_dangles() {
        let user = from_json(json!({
            "id": "user_1",
            "email_addresses": [
                { "id": "em_1", "email_address": "first@x.com" }
            ],
            "primary_email_address_id": "em_gone"
        }));
        assert_eq!(user.primary_email(), Some("first@x.com"));
    }

    #[test]
    fn test_organization_id_extraction() {
        let user = from_json(json!({
            "id": "user_1",
            "public_metadata": { "organizationId": "org_1", "plan": "trial" }
        }));
        assert_eq!(user.organization_id(), Some(OrgId::from("org_1")));
    }

    #[test]
    fn test_empty_or_non_string_organization_id_is_none() {
        let empty = from_json(json!({
            "id": "user_1",
            "public_metadata": { "organizationId": "" }
        }));
        assert!(empty.organization_id().is_none());

        let numeric = from_json(json!({
            "id": "user_1",
            "public_metadata": { "organizationId": 42 }
        }));
        assert!(numeric.organization_id().is_none());
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let user = from_json(json!({
            "id": "user_1",
            "profile_image_url": "https://example.test/a.png",
            "last_sign_in_at": 1700000000
        }));
        assert_eq!(user.id, "user_1");
    }
}
