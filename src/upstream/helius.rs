//! Helius DAS client for Solana wallet holdings.

use crate::config::Config;
use crate::error::AppError;
use crate::models::SolanaBalance;
use serde::Deserialize;
use serde_json::json;
use zeroize::Zeroizing;

/// Mainnet USDC mint.
const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

pub struct HeliusClient {
    http: reqwest::Client,
    rpc_url: String,
    api_key: Option<Zeroizing<String>>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<RpcResult>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResult {
    items: Vec<Asset>,
    #[serde(rename = "nativeBalance")]
    native_balance: NativeBalance,
}

#[derive(Debug, Deserialize)]
struct Asset {
    id: String,
    token_info: Option<TokenInfo>,
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    balance: f64,
    decimals: i32,
}

#[derive(Debug, Deserialize)]
struct NativeBalance {
    lamports: f64,
    total_price: f64,
}

impl HeliusClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            rpc_url: config.helius_rpc_url.clone(),
            api_key: config.helius_api_key.clone(),
        }
    }

    /// Fetch a wallet's holdings and reduce them to the USDC balance,
    /// SOL balance, and the SOL position's USD value.
    pub async fn wallet_balances(&self, address: &str) -> Result<SolanaBalance, AppError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::Config("HELIUS_API_KEY is not set".to_string()))?;

        let body = json!({
            "jsonrpc": "2.0",
            "id": "wallet-holdings",
            "method": "getAssetsByOwner",
            "params": {
                "ownerAddress": address,
                "page": 1,
                "limit": 1000,
                "sortBy": {
                    "sortBy": "created",
                    "sortDirection": "asc",
                },
                "options": {
                    "showUnverifiedCollections": false,
                    "showCollectionMetadata": false,
                    "showGrandTotal": true,
                    "showFungible": true,
                    "showNativeBalance": true,
                    "showInscription": false,
                    "showZeroBalance": false,
                },
            },
        });

        let response = self
            .http
            .post(format!("{}/?api-key={}", self.rpc_url, &**api_key))
            .json(&body)
            .send()
            .await?;

        let data: RpcResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Helius response decode: {}", e)))?;

        if let Some(err) = data.error {
            return Err(AppError::BadRequest(err.message));
        }

        let result = data
            .result
            .ok_or_else(|| AppError::Internal("Helius response missing result".to_string()))?;

        // showZeroBalance is off, so wallets holding no USDC simply have
        // no entry for the mint; that is a zero balance, not an error.
        let usdc_balance = result
            .items
            .iter()
            .find(|asset| asset.id == USDC_MINT)
            .and_then(|asset| asset.token_info.as_ref())
            .map(|info| info.balance / 10f64.powi(info.decimals))
            .unwrap_or(0.0);

        Ok(SolanaBalance {
            usdc_balance,
            sol_balance: result.native_balance.lamports / LAMPORTS_PER_SOL,
            sol_balance_usd: result.native_balance.total_price,
        })
    }
}
