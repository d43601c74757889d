//! Authentication building blocks shared across services:
//! - Password hashing (Argon2id with per-call random salts)
//! - Signed access token issuance and verification (HS256)
//!
//! The crate is deliberately free of I/O: callers own persistence and
//! transport, this crate owns the cryptographic contracts.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//! let token = issuer.issue(42, "alice@example.com").unwrap();
//! let claims = issuer.verify(&token).unwrap();
//! assert_eq!(claims.subject_id().unwrap(), 42);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::AccessClaims;
pub use token::TokenError;
pub use token::TokenIssuer;
