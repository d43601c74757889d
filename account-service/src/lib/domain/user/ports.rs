use std::time::Duration;

use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Identity;
use crate::domain::user::models::Profile;
use crate::domain::user::models::ProfileUpdate;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::CacheError;
use crate::user::errors::UserError;

/// Persistence operations for the identity record store.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Check whether an identity key is already taken.
    ///
    /// # Errors
    /// * `Unavailable` - store unreachable
    async fn email_exists(&self, email: &str) -> Result<bool, UserError>;

    /// Persist a new identity record and return it with the store-assigned id.
    ///
    /// # Errors
    /// * `AlreadyExists` - unique constraint on the identity key fired
    /// * `Unavailable` - store unreachable
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, UserError>;

    /// Point lookup by identity key.
    ///
    /// # Returns
    /// Optional identity record (None if not found)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Point lookup by surrogate id.
    ///
    /// # Returns
    /// Optional identity record (None if not found)
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// Read the profile view for a subject.
    ///
    /// The profile table is sparse: a subject with no profile row still
    /// yields a view built from the identity record alone. Returns None
    /// only when the identity record itself is gone.
    async fn find_profile(&self, id: UserId) -> Result<Option<Profile>, UserError>;

    /// Atomically create or update the profile row for a subject.
    ///
    /// Fields left unset in `update` keep their stored values.
    ///
    /// # Errors
    /// * `Unavailable` - store unreachable
    async fn upsert_profile(&self, id: UserId, update: &ProfileUpdate) -> Result<(), UserError>;
}

/// Time-boxed key-value side cache for profile views.
///
/// All operations are best-effort: the adapter bounds each call with a
/// sub-second timeout and reports failures as `CacheError` values the
/// service recovers from locally. Deleting an absent key is not an error.
#[async_trait]
pub trait ProfileCache: Send + Sync + 'static {
    async fn get(&self, id: UserId) -> Result<Option<Profile>, CacheError>;

    async fn set(&self, id: UserId, profile: &Profile, ttl: Duration) -> Result<(), CacheError>;

    async fn delete(&self, id: UserId) -> Result<(), CacheError>;
}

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Errors
    /// * `AlreadyExists` - identity key is taken
    /// * `Unavailable` - store unreachable
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError>;

    /// Verify credentials for an identity key.
    ///
    /// # Errors
    /// * `InvalidCredentials` - unknown key or wrong password, deliberately
    ///   indistinguishable
    async fn login(&self, email: &EmailAddress, password: &str) -> Result<User, UserError>;

    /// Mint a signed access token for a verified identity record.
    async fn issue_token(&self, user: &User) -> Result<String, UserError>;

    /// Re-resolve the record and reissue a token with a fresh expiry window.
    ///
    /// # Errors
    /// * `NotFound` - record deleted since the current token was issued
    async fn refresh(&self, user_id: UserId) -> Result<(User, String), UserError>;
}

/// Result of a profile update, carrying cache-coherence state.
///
/// `cache_invalidated == false` is the degraded-success condition: the
/// store write committed but the cache entry could not be deleted, so
/// stale reads are possible until the TTL expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdateOutcome {
    pub cache_invalidated: bool,
}

/// Port for cached profile reads and cache-coherent writes.
#[async_trait]
pub trait ProfileServicePort: Send + Sync + 'static {
    /// Cache-aside read of the subject's profile.
    ///
    /// Never fails on a missing profile row; a minimal view is synthesized
    /// from the request identity instead.
    async fn get_profile(&self, identity: &Identity) -> Result<Profile, UserError>;

    /// Write profile fields, then invalidate the cached snapshot.
    async fn update_profile(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> Result<ProfileUpdateOutcome, UserError>;
}
