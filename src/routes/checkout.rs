//! Checkout session endpoint.

use crate::auth::middleware::AppState;
use crate::error::AppError;
use crate::models::{CheckoutRequest, CheckoutResponse};
use axum::{extract::State, Json};

/// POST /api/checkout/session — Create a payment redirect session
///
/// The body is parsed manually so every validation failure, including a
/// mode outside payment/subscription, is a 400 carrying the parse error.
pub async fn create_session(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<CheckoutResponse>, AppError> {
    let request: CheckoutRequest = serde_json::from_str(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request: {}", e)))?;

    let session = state.upstream.stripe.create_checkout_session(&request).await?;

    tracing::info!(
        action = "checkout_session_created",
        session_id = %session.session_id,
        mode = request.mode.as_str(),
        "Created checkout session"
    );

    Ok(Json(session))
}
