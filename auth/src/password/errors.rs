use thiserror::Error;

/// Error type for password operations.
///
/// Variants never carry the plaintext or any part of the hash,
/// only the underlying library's diagnostic message.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
