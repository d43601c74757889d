use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Profile;
use crate::domain::user::models::ProfileUpdate;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Postgres-backed identity record store.
///
/// Identity rows live in `users`, display attributes in the sparse
/// `user_profiles` table keyed by user id. Raw driver errors are wrapped
/// into domain kinds here and never leak upward.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, UserError> {
        Ok(User {
            id: UserId(row.try_get("id").map_err(db_err)?),
            email: EmailAddress::new(row.try_get("email").map_err(db_err)?)?,
            password_hash: row.try_get("password_hash").map_err(db_err)?,
            created_at: row.try_get("created_at").map_err(db_err)?,
        })
    }
}

/// Map a sqlx error to a domain kind: connectivity problems become
/// `Unavailable`, everything else `Internal`.
fn db_err(e: sqlx::Error) -> UserError {
    match e {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            UserError::Unavailable(e.to_string())
        }
        _ => UserError::Internal(e.to_string()),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn email_exists(&self, email: &str) -> Result<bool, UserError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) AS present")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        row.try_get("present").map_err(db_err)
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, UserError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The unique constraint resolves the service-level
            // check-then-act race; surface it as the domain conflict.
            if let sqlx::Error::Database(ref db) = e {
                if db.is_unique_violation() {
                    return UserError::AlreadyExists(email.to_string());
                }
            }
            db_err(e)
        })?;

        Self::row_to_user(&row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_profile(&self, id: UserId) -> Result<Option<Profile>, UserError> {
        // The profile table is optional relative to the identity table, so
        // the identity row alone still produces a view.
        let row = sqlx::query(
            r#"
            SELECT u.id, u.email, u.created_at,
                   p.first_name, p.last_name, p.phone, p.address, p.updated_at
            FROM users u
            LEFT JOIN user_profiles p ON u.id = p.user_id
            WHERE u.id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Profile {
            id: UserId(row.try_get("id").map_err(db_err)?),
            email: row.try_get("email").map_err(db_err)?,
            first_name: row.try_get("first_name").map_err(db_err)?,
            last_name: row.try_get("last_name").map_err(db_err)?,
            phone: row.try_get("phone").map_err(db_err)?,
            address: row.try_get("address").map_err(db_err)?,
            created_at: row.try_get("created_at").map_err(db_err)?,
            updated_at: row.try_get("updated_at").map_err(db_err)?,
        }))
    }

    async fn upsert_profile(&self, id: UserId, update: &ProfileUpdate) -> Result<(), UserError> {
        // Single-statement upsert; COALESCE keeps stored values for fields
        // the caller left unset.
        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, first_name, last_name, phone, address, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                first_name = COALESCE(EXCLUDED.first_name, user_profiles.first_name),
                last_name  = COALESCE(EXCLUDED.last_name, user_profiles.last_name),
                phone      = COALESCE(EXCLUDED.phone, user_profiles.phone),
                address    = COALESCE(EXCLUDED.address, user_profiles.address),
                updated_at = NOW()
            "#,
        )
        .bind(id.0)
        .bind(update.first_name.as_deref())
        .bind(update.last_name.as_deref())
        .bind(update.phone.as_deref())
        .bind(update.address.as_deref())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }
}
