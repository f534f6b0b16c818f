//! Shared application state and the bearer-token extractor.

use crate::auth::token::{self, Claims};
use crate::config::Config;
use crate::error::AppError;
use crate::identity::IdentityStore;
use crate::upstream::Upstream;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

/// Application state shared across handlers.
///
/// Built once at startup; handlers never reach for ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub identity: Arc<dyn IdentityStore>,
    pub upstream: Arc<Upstream>,
}

/// Authenticated session extractor.
///
/// Extracts and verifies the JWT from `Authorization: Bearer {token}`.
/// Returns 401 Unauthorized if missing, malformed, or expired.
pub struct AuthSession {
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization format".to_string()))?;

        let secret = state
            .config
            .jwt_secret
            .as_ref()
            .ok_or_else(|| AppError::Config("JWT_SECRET is not set".to_string()))?;

        let claims = token::verify_token(secret, token)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthSession { claims })
    }
}
