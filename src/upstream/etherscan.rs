//! Etherscan balance lookup with Kraken USD pricing.

use crate::config::Config;
use crate::error::AppError;
use crate::models::{EtherBalance, EthereumBalance};
use serde::Deserialize;
use std::collections::HashMap;
use zeroize::Zeroizing;

const WEI_PER_ETHER: f64 = 1e18;

pub struct EtherscanClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<Zeroizing<String>>,
    kraken_ticker_url: String,
}

#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    status: String,
    message: String,
    /// Balance in wei as a decimal string.
    result: String,
}

#[derive(Debug, Deserialize)]
struct KrakenTicker {
    result: HashMap<String, KrakenPair>,
}

#[derive(Debug, Deserialize)]
struct KrakenPair {
    /// Ask array; first element is the price.
    a: Vec<String>,
}

impl EtherscanClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_url: config.etherscan_api_url.clone(),
            api_key: config.etherscan_api_key.clone(),
            kraken_ticker_url: config.kraken_ticker_url.clone(),
        }
    }

    /// Fetch an address's Ether balance and value it at the current
    /// Kraken ask price.
    pub async fn ether_balance(&self, address: &str) -> Result<EthereumBalance, AppError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::Config("ETHERSCAN_API_KEY is not set".to_string()))?;

        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("module", "account"),
                ("action", "balance"),
                ("address", address),
                ("tag", "latest"),
                ("apikey", api_key.as_str()),
            ])
            .send()
            .await?;

        let data: EtherscanResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Etherscan response decode: {}", e)))?;

        // Etherscan signals errors in-band: status "1" is success,
        // anything else carries a human-readable message.
        if data.status != "1" {
            return Err(AppError::BadRequest(if data.message.is_empty() {
                "Failed to fetch Ether balance".to_string()
            } else {
                data.message
            }));
        }

        let balance_ether = data
            .result
            .parse::<f64>()
            .map_err(|_| {
                AppError::Internal(format!("Unexpected wei balance format: {}", data.result))
            })?
            / WEI_PER_ETHER;

        // A failed price lookup degrades to an unpriced balance rather
        // than failing the whole request.
        let price = match self.eth_usd_price().await {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!(error = %e, "ETH price lookup failed, reporting 0");
                0.0
            }
        };

        Ok(EthereumBalance {
            ether: EtherBalance {
                balance_wei: data.result,
                balance_ether,
                price,
                balance_usd: balance_ether * price,
            },
        })
    }

    async fn eth_usd_price(&self) -> Result<f64, AppError> {
        let ticker: KrakenTicker = self
            .http
            .get(&self.kraken_ticker_url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Kraken response decode: {}", e)))?;

        ticker
            .result
            .get("XETHZUSD")
            .and_then(|pair| pair.a.first())
            .and_then(|ask| ask.parse::<f64>().ok())
            .ok_or_else(|| AppError::Internal("Kraken ticker missing XETHZUSD ask".to_string()))
    }
}
