//! Profile avatar proxy endpoint.

use crate::auth::middleware::AppState;
use crate::error::AppError;
use crate::models::AvatarRequest;
use axum::{extract::State, Json};

/// POST /api/profile/avatar — Look up a profile document by handle
///
/// The upstream document is proxied through untouched; the client reads
/// the avatar URL out of it.
pub async fn avatar(
    State(state): State<AppState>,
    Json(request): Json<AvatarRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    tracing::debug!(handle = %request.twitter_handle, "Avatar lookup");

    let profile = state
        .upstream
        .profile
        .user_profile(&request.twitter_handle)
        .await?;
    Ok(Json(profile))
}
