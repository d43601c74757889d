use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::user::errors::EmailError;

/// User unique identifier type.
///
/// Store-assigned surrogate, immutable after creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type, the case-sensitive identity key.
///
/// Validates format using an RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity record aggregate.
///
/// `password_hash` is opaque and never serialized outward.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Profile view served to authenticated callers.
///
/// This is the snapshot stored in the cache, so it derives both serde
/// traits. `created_at` is absent on the synthesized fallback view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Synthesize a minimal view from the request identity.
    ///
    /// Used when the store has no row for a verified subject; the profile
    /// table is sparse relative to the identity table and a missing row is
    /// not an error.
    pub fn minimal(identity: &Identity) -> Self {
        Self {
            id: identity.user_id(),
            email: identity.email().as_str().to_string(),
            first_name: None,
            last_name: None,
            phone: None,
            address: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Partial profile update; only provided fields change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }
}

/// Command to register a new account with domain types.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: String,
    pub attrs: ProfileUpdate,
}

impl RegisterCommand {
    /// # Arguments
    /// * `email` - Validated identity key
    /// * `password` - Plain text password (hashed by the service)
    /// * `attrs` - Optional display attributes stored alongside
    pub fn new(email: EmailAddress, password: String, attrs: ProfileUpdate) -> Self {
        Self {
            email,
            password,
            attrs,
        }
    }
}

/// Request-scoped authenticated identity.
///
/// Constructed only by the authorization middleware after token
/// verification and read-only afterward; handlers receive it through
/// request extensions instead of a process-wide lookup.
#[derive(Debug, Clone)]
pub struct Identity {
    user_id: UserId,
    email: EmailAddress,
}

impl Identity {
    pub fn new(user_id: UserId, email: EmailAddress) -> Self {
        Self { user_id, email }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_address_valid() {
        let email = EmailAddress::new("alice@example.com".to_string()).unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_email_address_invalid() {
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("".to_string()).is_err());
    }

    #[test]
    fn test_minimal_profile_from_identity() {
        let identity = Identity::new(
            UserId(7),
            EmailAddress::new("bob@example.com".to_string()).unwrap(),
        );

        let profile = Profile::minimal(&identity);
        assert_eq!(profile.id, UserId(7));
        assert_eq!(profile.email, "bob@example.com");
        assert!(profile.first_name.is_none());
        assert!(profile.created_at.is_none());
    }

    #[test]
    fn test_profile_update_is_empty() {
        assert!(ProfileUpdate::default().is_empty());

        let update = ProfileUpdate {
            first_name: Some("Jane".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
