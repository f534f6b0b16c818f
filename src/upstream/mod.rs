//! Typed clients for the third-party services the API proxies.
//!
//! One reqwest client is shared across all of them. No retries anywhere:
//! a failed upstream call fails the surrounding request and the caller
//! is expected to retry the whole operation.

pub mod etherscan;
pub mod helius;
pub mod profile;
pub mod stripe;

use crate::config::Config;

pub use etherscan::EtherscanClient;
pub use helius::HeliusClient;
pub use profile::ProfileClient;
pub use stripe::StripeClient;

/// All upstream clients, constructed once at startup.
pub struct Upstream {
    pub helius: HeliusClient,
    pub etherscan: EtherscanClient,
    pub profile: ProfileClient,
    pub stripe: StripeClient,
}

impl Upstream {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::new();
        Self {
            helius: HeliusClient::new(http.clone(), config),
            etherscan: EtherscanClient::new(http.clone(), config),
            profile: ProfileClient::new(http.clone(), config),
            stripe: StripeClient::new(http, config),
        }
    }
}
