//! API route handlers.

pub mod auth;
pub mod balance;
pub mod checkout;
pub mod profile;

use crate::auth::middleware::AppState;
use axum::{routing::get, routing::post, Router};

/// Build the API router with all endpoints.
///
/// Wrong methods on routed paths get axum's 405; CORS is layered on in
/// main so tests can exercise the router bare.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Auth endpoints
        .route("/api/auth/wallet", post(auth::authenticate_wallet))
        .route("/api/auth/session", get(auth::session_info))
        // Balance proxies
        .route("/api/balance/solana", get(balance::solana_balance))
        .route("/api/balance/ethereum", get(balance::ethereum_balance))
        // Profile avatar proxy
        .route("/api/profile/avatar", post(profile::avatar))
        // Checkout
        .route("/api/checkout/session", post(checkout::create_session))
}
