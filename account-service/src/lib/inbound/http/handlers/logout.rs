use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Identity;
use crate::inbound::http::router::AppState;

/// Stateless logout acknowledgement.
///
/// The issued token stays valid until its natural expiry; clients are
/// expected to discard it. Server-side revocation is a known gap.
pub async fn logout(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<ApiSuccess<LogoutResponseData>, ApiError> {
    state.auth_service.logout();

    tracing::debug!(user_id = %identity.user_id(), "Logout acknowledged");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData {
            status: "logged_out".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub status: String,
}
