use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::ProfileUpdate;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;

const MIN_PASSWORD_LENGTH: usize = 6;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let command = body.try_into_command().map_err(ApiError::from)?;

    let user = state.auth_service.register(command).await?;

    let token = state.auth_service.issue_token(&user).await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        RegisterResponseData {
            user: (&user).into(),
            token,
        },
    ))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    email: String,
    password: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, UserError> {
        let email = EmailAddress::new(self.email)?;

        if self.password.len() < MIN_PASSWORD_LENGTH {
            return Err(UserError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let attrs = ProfileUpdate {
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            address: self.address,
        };

        Ok(RegisterCommand::new(email, self.password, attrs))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub user: UserData,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_rejected() {
        let body = RegisterRequestBody {
            email: "a@x.com".to_string(),
            password: "12345".to_string(),
            first_name: None,
            last_name: None,
            phone: None,
            address: None,
        };

        assert!(matches!(
            body.try_into_command(),
            Err(UserError::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let body = RegisterRequestBody {
            email: "nope".to_string(),
            password: "secret1".to_string(),
            first_name: None,
            last_name: None,
            phone: None,
            address: None,
        };

        assert!(matches!(
            body.try_into_command(),
            Err(UserError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_attrs_carried_into_command() {
        let body = RegisterRequestBody {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
            first_name: Some("Jane".to_string()),
            last_name: None,
            phone: None,
            address: None,
        };

        let command = body.try_into_command().unwrap();
        assert_eq!(command.attrs.first_name.as_deref(), Some("Jane"));
    }
}
