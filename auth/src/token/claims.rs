use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Claims carried by an access token.
///
/// Uses the RFC 7519 reserved names so any standards-compliant verifier
/// can read the timing bounds. The subject is the numeric user id encoded
/// as a string per JWT convention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject: numeric user id, stringified
    pub sub: String,

    /// Identity key the token was issued for
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp), strictly after `iat`
    pub exp: i64,
}

impl AccessClaims {
    /// Build claims for a user with the expiry window anchored at `now`.
    pub fn for_user(user_id: i64, email: &str, validity: Duration) -> Self {
        Self::at(user_id, email, Utc::now(), validity)
    }

    /// Build claims anchored at an explicit instant. Split out so tests
    /// can issue tokens in the past.
    pub fn at(user_id: i64, email: &str, issued_at: DateTime<Utc>, validity: Duration) -> Self {
        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + validity).timestamp(),
        }
    }

    /// Parse the subject back into the numeric user id.
    ///
    /// # Errors
    /// * `Malformed` - subject is not a decimal integer
    pub fn subject_id(&self) -> Result<i64, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user_window() {
        let claims = AccessClaims::for_user(7, "alice@example.com", Duration::hours(24));

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_subject_id_roundtrip() {
        let claims = AccessClaims::for_user(9001, "bob@example.com", Duration::hours(1));
        assert_eq!(claims.subject_id().unwrap(), 9001);
    }

    #[test]
    fn test_subject_id_rejects_non_numeric() {
        let mut claims = AccessClaims::for_user(1, "x@example.com", Duration::hours(1));
        claims.sub = "not-a-number".to_string();
        assert!(matches!(claims.subject_id(), Err(TokenError::Malformed)));
    }
}
