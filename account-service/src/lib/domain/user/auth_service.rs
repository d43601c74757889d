use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Authentication orchestrator.
///
/// Stateless itself: all account state lives in the repository, token
/// state lives entirely inside the signed token. Holds the single
/// `TokenIssuer` for the deployment so every issuance path shares one
/// validity window.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
    token_issuer: Arc<auth::TokenIssuer>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, token_issuer: Arc<auth::TokenIssuer>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
            token_issuer,
        }
    }

    /// Stateless logout acknowledgement.
    ///
    /// Tokens are not revoked before their natural expiry; a server-side
    /// denylist keyed by token id would be needed for stronger guarantees.
    pub fn logout(&self) {}
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        // Check-then-act: the race between this check and the insert is
        // resolved by the store's unique constraint, which the repository
        // surfaces as AlreadyExists.
        if self.repository.email_exists(command.email.as_str()).await? {
            return Err(UserError::AlreadyExists(command.email.to_string()));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = self
            .repository
            .create(command.email.as_str(), &password_hash)
            .await?;

        if !command.attrs.is_empty() {
            self.repository
                .upsert_profile(user.id, &command.attrs)
                .await?;
        }

        tracing::info!(user_id = %user.id, "Account registered");

        Ok(user)
    }

    async fn login(&self, email: &EmailAddress, password: &str) -> Result<User, UserError> {
        // Unknown key and wrong password intentionally produce the same
        // error value; no caller can distinguish the two cases.
        let user = match self.repository.find_by_email(email.as_str()).await? {
            Some(user) => user,
            None => return Err(UserError::InvalidCredentials),
        };

        let verified = self
            .password_hasher
            .verify(password, &user.password_hash)
            .unwrap_or(false);

        if !verified {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn issue_token(&self, user: &User) -> Result<String, UserError> {
        let token = self.token_issuer.issue(user.id.0, user.email.as_str())?;
        Ok(token)
    }

    async fn refresh(&self, user_id: UserId) -> Result<(User, String), UserError> {
        // Re-resolve so a fresh token reflects current record state and a
        // deleted account stops refreshing.
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound(user_id.to_string()))?;

        let token = self.token_issuer.issue(user.id.0, user.email.as_str())?;

        Ok((user, token))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::Profile;
    use crate::domain::user::models::ProfileUpdate;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn email_exists(&self, email: &str) -> Result<bool, UserError>;
            async fn create(&self, email: &str, password_hash: &str) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;
            async fn find_profile(&self, id: UserId) -> Result<Option<Profile>, UserError>;
            async fn upsert_profile(&self, id: UserId, update: &ProfileUpdate) -> Result<(), UserError>;
        }
    }

    fn issuer() -> Arc<auth::TokenIssuer> {
        Arc::new(auth::TokenIssuer::new(
            b"test_secret_key_at_least_32_bytes!",
            chrono::Duration::hours(24),
        ))
    }

    fn stored_user(id: i64, email: &str, password: &str) -> User {
        User {
            id: UserId(id),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_email_exists()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(false));

        repository
            .expect_create()
            .withf(|email, hash| email == "a@x.com" && hash.starts_with("$argon2"))
            .times(1)
            .returning(|email, hash| {
                Ok(User {
                    id: UserId(1),
                    email: EmailAddress::new(email.to_string()).unwrap(),
                    password_hash: hash.to_string(),
                    created_at: Utc::now(),
                })
            });

        let service = AuthService::new(Arc::new(repository), issuer());

        let command = RegisterCommand::new(
            EmailAddress::new("a@x.com".to_string()).unwrap(),
            "secret1".to_string(),
            ProfileUpdate::default(),
        );

        let user = service.register(command).await.unwrap();
        assert_eq!(user.id, UserId(1));
        // The plaintext never reaches the repository
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_with_attrs_upserts_profile() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_email_exists()
            .times(1)
            .returning(|_| Ok(false));

        repository.expect_create().times(1).returning(|email, hash| {
            Ok(User {
                id: UserId(5),
                email: EmailAddress::new(email.to_string()).unwrap(),
                password_hash: hash.to_string(),
                created_at: Utc::now(),
            })
        });

        repository
            .expect_upsert_profile()
            .withf(|id, update| *id == UserId(5) && update.first_name.as_deref() == Some("Jane"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = AuthService::new(Arc::new(repository), issuer());

        let command = RegisterCommand::new(
            EmailAddress::new("jane@x.com".to_string()).unwrap(),
            "secret1".to_string(),
            ProfileUpdate {
                first_name: Some("Jane".to_string()),
                ..Default::default()
            },
        );

        assert!(service.register(command).await.is_ok());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_email_exists()
            .times(1)
            .returning(|_| Ok(true));
        repository.expect_create().times(0);

        let service = AuthService::new(Arc::new(repository), issuer());

        let command = RegisterCommand::new(
            EmailAddress::new("a@x.com".to_string()).unwrap(),
            "secret1".to_string(),
            ProfileUpdate::default(),
        );

        let result = service.register(command).await;
        assert!(matches!(result, Err(UserError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_lost_race_surfaces_conflict() {
        let mut repository = MockTestUserRepository::new();

        // Uniqueness check passes, insert loses the race to a concurrent
        // registration; the constraint violation arrives as AlreadyExists.
        repository
            .expect_email_exists()
            .times(1)
            .returning(|_| Ok(false));
        repository
            .expect_create()
            .times(1)
            .returning(|email, _| Err(UserError::AlreadyExists(email.to_string())));

        let service = AuthService::new(Arc::new(repository), issuer());

        let command = RegisterCommand::new(
            EmailAddress::new("a@x.com".to_string()).unwrap(),
            "secret1".to_string(),
            ProfileUpdate::default(),
        );

        let result = service.register(command).await;
        assert!(matches!(result, Err(UserError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_success_and_token_roundtrip() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user(1, "a@x.com", "secret1");
        let returned = user.clone();
        repository
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let token_issuer = issuer();
        let service = AuthService::new(Arc::new(repository), Arc::clone(&token_issuer));

        let email = EmailAddress::new("a@x.com".to_string()).unwrap();
        let user = service.login(&email, "secret1").await.unwrap();
        assert_eq!(user.id, UserId(1));

        let token = service.issue_token(&user).await.unwrap();
        let claims = token_issuer.verify(&token).unwrap();
        assert_eq!(claims.subject_id().unwrap(), 1);
        assert_eq!(claims.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user(1, "a@x.com", "secret1");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), issuer());

        let email = EmailAddress::new("a@x.com".to_string()).unwrap();
        let result = service.login(&email, "wrong").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_same_error_as_wrong_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), issuer());

        let email = EmailAddress::new("ghost@x.com".to_string()).unwrap();
        let unknown = service.login(&email, "whatever").await.unwrap_err();

        // Same variant, same rendered message as the wrong-password case
        assert!(matches!(unknown, UserError::InvalidCredentials));
        assert_eq!(unknown.to_string(), UserError::InvalidCredentials.to_string());
    }

    #[tokio::test]
    async fn test_refresh_reissues_token() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user(3, "c@x.com", "pw");
        repository
            .expect_find_by_id()
            .with(eq(UserId(3)))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let token_issuer = issuer();
        let service = AuthService::new(Arc::new(repository), Arc::clone(&token_issuer));

        let (user, token) = service.refresh(UserId(3)).await.unwrap();
        assert_eq!(user.id, UserId(3));

        let claims = token_issuer.verify(&token).unwrap();
        assert_eq!(claims.subject_id().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_refresh_deleted_account() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), issuer());

        let result = service.refresh(UserId(99)).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
