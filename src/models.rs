//! Request and response models for the API.
//!
//! All models use serde for serialization/deserialization. Wire field
//! names follow what the frontend already consumes (camelCase on the
//! balance and checkout payloads).

use serde::{Deserialize, Serialize};

// ============================================================================
// Auth Models
// ============================================================================

/// Request body for wallet authentication.
///
/// `message` is itself a JSON-encoded string of the sign-in message
/// fields; it is parsed separately so a malformed inner document can be
/// rejected as a 400 rather than silently ignored.
#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    pub message: String,
    pub signature: String, // base58
}

/// User fields echoed back to the client after authentication.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub email: String,
}

/// Response after successful wallet authentication.
#[derive(Debug, Serialize)]
pub struct AuthenticateResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Claims echoed back for a presented bearer token.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub public_key: String,
    pub user_id: String,
    pub email: String,
    pub expires_at: i64,
}

// ============================================================================
// Balance Models
// ============================================================================

/// Query parameters for the balance endpoints.
#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    pub address: String,
}

/// Solana wallet holdings reduced to the fields the leaderboard shows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolanaBalance {
    pub usdc_balance: f64,
    pub sol_balance: f64,
    pub sol_balance_usd: f64,
}

/// Ethereum balance response, nested under `ether` on the wire.
#[derive(Debug, Serialize)]
pub struct EthereumBalance {
    pub ether: EtherBalance,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EtherBalance {
    /// Raw balance in wei, as the decimal string Etherscan returns.
    pub balance_wei: String,
    pub balance_ether: f64,
    pub price: f64,
    pub balance_usd: f64,
}

// ============================================================================
// Profile Models
// ============================================================================

/// Request body for the avatar lookup.
#[derive(Debug, Deserialize)]
pub struct AvatarRequest {
    #[serde(rename = "twitterHandle")]
    pub twitter_handle: String,
}

// ============================================================================
// Checkout Models
// ============================================================================

/// Checkout session mode. Anything outside these two values is a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    Payment,
    Subscription,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
            CheckoutMode::Subscription => "subscription",
        }
    }
}

/// Request body for creating a checkout session.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
    pub mode: CheckoutMode,
}

/// Response after creating a checkout session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub session_id: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_mode_rejects_unknown_values() {
        let err = serde_json::from_str::<CheckoutRequest>(
            r#"{"price_id":"price_1","success_url":"https://a/s","cancel_url":"https://a/c","mode":"setup"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_checkout_request_requires_all_fields() {
        let err = serde_json::from_str::<CheckoutRequest>(
            r#"{"price_id":"price_1","mode":"payment"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_solana_balance_wire_format() {
        let balance = SolanaBalance {
            usdc_balance: 12.5,
            sol_balance: 1.0,
            sol_balance_usd: 150.0,
        };
        let json = serde_json::to_value(&balance).unwrap();
        assert_eq!(json["usdcBalance"], 12.5);
        assert_eq!(json["solBalance"], 1.0);
        assert_eq!(json["solBalanceUsd"], 150.0);
    }

    #[test]
    fn test_ether_balance_wire_format() {
        let balance = EthereumBalance {
            ether: EtherBalance {
                balance_wei: "1500000000000000000".to_string(),
                balance_ether: 1.5,
                price: 2000.0,
                balance_usd: 3000.0,
            },
        };
        let json = serde_json::to_value(&balance).unwrap();
        assert_eq!(json["ether"]["balanceWei"], "1500000000000000000");
        assert_eq!(json["ether"]["balanceUsd"], 3000.0);
    }
}
