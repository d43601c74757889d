use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for profile cache operations.
///
/// Cache failures are recovered locally by the profile service (treated as
/// a miss on reads, degraded success on invalidation) and never escalate
/// to a request failure on their own.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Cache operation timed out")]
    Timeout,

    #[error("Failed to serialize cached value: {0}")]
    Serialization(String),
}

/// Top-level error for account operations.
///
/// A closed set of tagged kinds; the HTTP boundary performs the single
/// translation from kind to external status. `InvalidCredentials` is a
/// unit variant on purpose: an unknown identity key and a wrong password
/// must produce indistinguishable errors.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        // Hashing failure is fatal to the calling operation, never retried
        UserError::Internal(err.to_string())
    }
}

impl From<auth::TokenError> for UserError {
    fn from(err: auth::TokenError) -> Self {
        match err {
            auth::TokenError::EncodingFailed(e) => UserError::Internal(e),
            // Verification failures collapse into one externally visible kind
            auth::TokenError::Malformed
            | auth::TokenError::SignatureInvalid
            | auth::TokenError::Expired => UserError::InvalidToken,
        }
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Internal(err.to_string())
    }
}
