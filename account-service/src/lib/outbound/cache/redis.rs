use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::time::timeout;

use crate::domain::user::models::Profile;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::ProfileCache;
use crate::user::errors::CacheError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Redis-backed profile cache.
///
/// Values are JSON snapshots keyed by subject id, expired server-side via
/// `SET EX`. Every operation is bounded by `op_timeout` so an unreachable
/// cache can never stall the request path beyond that bound; the timeout
/// is reported as `CacheError::Timeout` and handled by the caller as a
/// miss or a degraded success.
pub struct RedisProfileCache {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl RedisProfileCache {
    /// Connect to Redis and verify the connection.
    ///
    /// # Errors
    /// * `Unavailable` - URL is invalid or the server is unreachable
    /// * `Timeout` - connection attempt exceeded the connect bound
    pub async fn connect(url: &str, op_timeout: Duration) -> Result<Self, CacheError> {
        let client =
            redis::Client::open(url).map_err(|e| CacheError::Unavailable(e.to_string()))?;

        let conn = timeout(CONNECT_TIMEOUT, ConnectionManager::new(client))
            .await
            .map_err(|_| CacheError::Timeout)?
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        Ok(Self { conn, op_timeout })
    }

    fn key(id: UserId) -> String {
        format!("user_profile:{}", id)
    }
}

#[async_trait]
impl ProfileCache for RedisProfileCache {
    async fn get(&self, id: UserId) -> Result<Option<Profile>, CacheError> {
        let mut conn = self.conn.clone();

        let value: Option<String> = timeout(self.op_timeout, conn.get(Self::key(id)))
            .await
            .map_err(|_| CacheError::Timeout)?
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        match value {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| CacheError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    async fn set(&self, id: UserId, profile: &Profile, ttl: Duration) -> Result<(), CacheError> {
        let json =
            serde_json::to_string(profile).map_err(|e| CacheError::Serialization(e.to_string()))?;

        let mut conn = self.conn.clone();

        timeout(
            self.op_timeout,
            conn.set_ex::<_, _, ()>(Self::key(id), json, ttl.as_secs()),
        )
        .await
        .map_err(|_| CacheError::Timeout)?
        .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();

        // DEL of an absent key is a no-op, which keeps invalidation
        // idempotent.
        timeout(self.op_timeout, conn.del::<_, ()>(Self::key(id)))
            .await
            .map_err(|_| CacheError::Timeout)?
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        Ok(())
    }
}
