//! Chain balance proxy endpoints.

use crate::auth::middleware::AppState;
use crate::error::AppError;
use crate::models::{BalanceQuery, EthereumBalance, SolanaBalance};
use axum::{
    extract::{Query, State},
    Json,
};

/// GET /api/balance/solana?address= — Solana wallet holdings
pub async fn solana_balance(
    State(state): State<AppState>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<SolanaBalance>, AppError> {
    if query.address.is_empty() {
        return Err(AppError::BadRequest("Address is required".to_string()));
    }

    let balance = state.upstream.helius.wallet_balances(&query.address).await?;
    Ok(Json(balance))
}

/// GET /api/balance/ethereum?address= — Ether balance with USD value
pub async fn ethereum_balance(
    State(state): State<AppState>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<EthereumBalance>, AppError> {
    if query.address.is_empty() {
        return Err(AppError::BadRequest("Address is required".to_string()));
    }

    let balance = state.upstream.etherscan.ether_balance(&query.address).await?;
    Ok(Json(balance))
}
