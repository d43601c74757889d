use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Identity;
use crate::inbound::http::router::AppState;
use crate::user::ports::AuthServicePort;

/// Reissue a token with a fresh expiry window.
///
/// No credentials are re-entered: the gate has already proven possession
/// of a currently valid token for this subject.
pub async fn refresh(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let (_, token) = state.auth_service.refresh(identity.user_id()).await?;

    Ok(ApiSuccess::new(StatusCode::OK, RefreshResponseData { token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
}
