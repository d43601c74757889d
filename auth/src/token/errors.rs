use thiserror::Error;

/// Error type for token operations.
///
/// The verification variants form a closed taxonomy; transport layers are
/// expected to collapse all three into one generic invalid-token response
/// so a caller cannot probe which check failed.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,
}
