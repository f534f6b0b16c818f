//! Wallet authentication endpoints.

use crate::auth::middleware::{AppState, AuthSession};
use crate::auth::{self, SigninMessage};
use crate::error::AppError;
use crate::identity;
use crate::models::{AuthenticateRequest, AuthenticateResponse, PublicUser, SessionInfo};
use axum::{extract::State, response::IntoResponse, Json};

/// POST /api/auth/wallet — Authenticate a wallet-signed message
///
/// Validates the claimed domain against the server's own, verifies the
/// Ed25519 signature over the message payload, resolves (or creates)
/// the user record for the wallet, and mints a session token.
///
/// The body is taken raw so every malformed shape (bad JSON, missing
/// fields, an inner message that isn't itself valid JSON) maps to the
/// same generic 400.
pub async fn authenticate_wallet(
    State(state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let request: AuthenticateRequest = serde_json::from_str(&body)
        .map_err(|_| AppError::BadRequest("Invalid request".to_string()))?;

    let message: SigninMessage = serde_json::from_str(&request.message)
        .map_err(|_| AppError::BadRequest("Invalid request".to_string()))?;

    // The domain is authorization context, not part of the signed
    // bytes; an exact match against our configured host rejects
    // cross-domain replay before any cryptography runs.
    if message.domain != state.config.expected_domain {
        tracing::warn!(
            action = "wallet_auth_failed",
            reason = "domain_mismatch",
            claimed_domain = %message.domain,
            "Rejected sign-in for foreign domain"
        );
        return Err(AppError::Unauthorized("Invalid domain".to_string()));
    }

    if !message.validate(&request.signature) {
        tracing::warn!(
            action = "wallet_auth_failed",
            reason = "invalid_signature",
            public_key = %message.public_key,
            "Invalid signature"
        );
        return Err(AppError::Unauthorized("Invalid signature".to_string()));
    }

    // Checked before touching the identity store: a server that cannot
    // mint tokens must not create user records either.
    let secret = state
        .config
        .jwt_secret
        .as_ref()
        .ok_or_else(|| AppError::Config("JWT_SECRET is not set".to_string()))?;

    // Lookup-then-create is not atomic. Two concurrent first logins for
    // the same wallet can both reach create_user; the store's unique
    // constraint on the derived email arbitrates.
    let email = identity::derived_email(&message.public_key);
    let user = match state
        .identity
        .find_user_by_email(&email)
        .await
        .map_err(|e| AppError::Internal(format!("Identity lookup failed: {}", e)))?
    {
        Some(user) => user,
        None => {
            let user = state
                .identity
                .create_user(&email, &message.public_key)
                .await
                .map_err(|e| AppError::Internal(format!("User creation failed: {}", e)))?;
            tracing::info!(
                action = "user_created",
                user_id = %user.id,
                public_key = %message.public_key,
                "Created user for new wallet"
            );
            user
        }
    };

    let token = auth::mint_token(
        secret,
        &message.public_key,
        &user.id,
        &user.email,
        state.config.token_ttl_secs,
    )
    .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))?;

    tracing::info!(
        action = "wallet_auth_success",
        user_id = %user.id,
        public_key = %message.public_key,
        "Wallet authenticated"
    );

    Ok(Json(AuthenticateResponse {
        token,
        user: PublicUser {
            id: user.id,
            email: user.email,
        },
    }))
}

/// GET /api/auth/session — Echo the claims of a presented bearer token
pub async fn session_info(session: AuthSession) -> Json<SessionInfo> {
    let claims = session.claims;
    Json(SessionInfo {
        public_key: claims.sub,
        user_id: claims.user_id,
        email: claims.email,
        expires_at: claims.exp,
    })
}
