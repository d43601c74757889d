use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::user::models::Identity;
use crate::domain::user::models::Profile;
use crate::domain::user::models::ProfileUpdate;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::ProfileCache;
use crate::user::ports::ProfileServicePort;
use crate::user::ports::ProfileUpdateOutcome;
use crate::user::ports::UserRepository;

/// Cache-aside profile service.
///
/// The cache is an optional capability: when it is not wired at startup
/// every read is a permanent miss and every invalidation a no-op, never an
/// error. When present, reads populate it lazily and writes invalidate the
/// entry after the store commit (delete, not refresh, so a stale computed
/// value can never be reinserted by the write path itself).
pub struct ProfileService<UR, PC>
where
    UR: UserRepository,
    PC: ProfileCache,
{
    repository: Arc<UR>,
    cache: Option<Arc<PC>>,
    cache_ttl: Duration,
}

impl<UR, PC> ProfileService<UR, PC>
where
    UR: UserRepository,
    PC: ProfileCache,
{
    /// # Arguments
    /// * `repository` - system of record for identity and profile rows
    /// * `cache` - optional side cache; None degrades to uncached reads
    /// * `cache_ttl` - fixed time-to-live applied on every population
    pub fn new(repository: Arc<UR>, cache: Option<Arc<PC>>, cache_ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            cache_ttl,
        }
    }
}

#[async_trait]
impl<UR, PC> ProfileServicePort for ProfileService<UR, PC>
where
    UR: UserRepository,
    PC: ProfileCache,
{
    async fn get_profile(&self, identity: &Identity) -> Result<Profile, UserError> {
        let user_id = identity.user_id();

        if let Some(cache) = &self.cache {
            match cache.get(user_id).await {
                Ok(Some(profile)) => {
                    tracing::debug!(user_id = %user_id, "Profile cache hit");
                    return Ok(profile);
                }
                Ok(None) => {}
                // Cache trouble degrades to a miss, never to a request failure
                Err(e) => {
                    tracing::warn!(user_id = %user_id, error = %e, "Profile cache read failed");
                }
            }
        }

        let profile = match self.repository.find_profile(user_id).await? {
            Some(profile) => profile,
            // The profile table is sparse; serve a view built from the
            // already-verified request identity instead of failing.
            None => Profile::minimal(identity),
        };

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set(user_id, &profile, self.cache_ttl).await {
                tracing::warn!(user_id = %user_id, error = %e, "Profile cache population failed");
            }
        }

        Ok(profile)
    }

    async fn update_profile(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> Result<ProfileUpdateOutcome, UserError> {
        // Store write first; if it fails the cache still mirrors the truth
        // and must not be touched.
        self.repository.upsert_profile(id, &update).await?;

        let mut cache_invalidated = true;
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.delete(id).await {
                // Degraded success: the row changed but the old snapshot may
                // survive until its TTL expires. Surfaced to the caller.
                tracing::warn!(user_id = %id, error = %e, "Profile cache invalidation failed");
                cache_invalidated = false;
            }
        }

        Ok(ProfileUpdateOutcome { cache_invalidated })
    }
}
