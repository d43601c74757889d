use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Identity;
use crate::domain::user::models::ProfileUpdate;
use crate::inbound::http::router::AppState;
use crate::user::ports::ProfileServicePort;

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<UpdateProfileRequestBody>,
) -> Result<ApiSuccess<UpdateProfileResponseData>, ApiError> {
    let update = ProfileUpdate {
        first_name: body.first_name,
        last_name: body.last_name,
        phone: body.phone,
        address: body.address,
    };

    let outcome = state
        .profile_service
        .update_profile(identity.user_id(), update)
        .await?;

    // cache_invalidated == false is a degraded success: the write
    // committed but a stale snapshot may survive until its TTL expires.
    Ok(ApiSuccess::new(
        StatusCode::OK,
        UpdateProfileResponseData {
            status: "updated".to_string(),
            cache_invalidated: outcome.cache_invalidated,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateProfileRequestBody {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateProfileResponseData {
    pub status: String,
    pub cache_invalidated: bool,
}
