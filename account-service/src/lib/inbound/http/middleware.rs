use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Identity;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Authorization gate for protected routes.
///
/// Reads the bearer credential, verifies it, and injects a read-only
/// [`Identity`] into the request extensions for downstream handlers.
/// Rejections are terminal: no downstream handler runs. Every
/// verification failure produces the same response body, so a caller
/// cannot probe whether a token was malformed, forged, or expired.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Header shape is checked before any cryptographic work
    let token = extract_bearer_token(req.headers()).map_err(unauthorized)?;

    let claims = state.token_issuer.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        unauthorized("Invalid or expired token")
    })?;

    // Signature already checked; now the claims may be trusted
    let user_id = claims
        .subject_id()
        .map(UserId)
        .map_err(|_| unauthorized("Invalid or expired token"))?;

    let email = EmailAddress::new(claims.email)
        .map_err(|_| unauthorized("Invalid or expired token"))?;

    req.extensions_mut().insert(Identity::new(user_id, email));

    Ok(next.run(req).await)
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The literal scheme prefix is required; its absence is an
/// authentication-required condition, not a token failure.
fn extract_bearer_token(headers: &http::HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header")?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or("Invalid Authorization header format. Expected: Bearer <token>")
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}
