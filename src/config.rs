use std::env;
use std::net::SocketAddr;
use url::Url;
use zeroize::Zeroizing;

/// Process-wide configuration, built once at startup and passed into
/// handlers through shared state. Business logic never reads the
/// environment directly.
#[derive(Clone)]
pub struct Config {
    // Authentication
    /// Host component of AUTH_URL; the only domain accepted in signed
    /// sign-in messages.
    pub expected_domain: String,
    /// HMAC secret for session tokens. Optional at startup; requests
    /// that need it fail with a server error when absent.
    pub jwt_secret: Option<Zeroizing<String>>,
    pub token_ttl_secs: i64,

    // Identity store
    pub identity_url: String,
    pub identity_service_key: Zeroizing<String>,

    // Server
    pub bind_addr: SocketAddr,

    // Upstream services
    pub helius_rpc_url: String,
    pub helius_api_key: Option<Zeroizing<String>>,
    pub etherscan_api_url: String,
    pub etherscan_api_key: Option<Zeroizing<String>>,
    pub kraken_ticker_url: String,
    pub profile_api_url: String,
    pub stripe_api_url: String,
    pub stripe_secret_key: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn secret(value: &Option<Zeroizing<String>>) -> &'static str {
            if value.is_some() {
                "[REDACTED]"
            } else {
                "[unset]"
            }
        }

        f.debug_struct("Config")
            .field("expected_domain", &self.expected_domain)
            .field("jwt_secret", &secret(&self.jwt_secret))
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("identity_url", &self.identity_url)
            .field("identity_service_key", &"[REDACTED]")
            .field("bind_addr", &self.bind_addr)
            .field("helius_rpc_url", &self.helius_rpc_url)
            .field("helius_api_key", &secret(&self.helius_api_key))
            .field("etherscan_api_url", &self.etherscan_api_url)
            .field("etherscan_api_key", &secret(&self.etherscan_api_key))
            .field("kraken_ticker_url", &self.kraken_ticker_url)
            .field("profile_api_url", &self.profile_api_url)
            .field("stripe_api_url", &self.stripe_api_url)
            .field("stripe_secret_key", &secret(&self.stripe_secret_key))
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Attempt to load .env file, but don't fail if it doesn't exist
        // (env vars may be set directly in production)
        let _ = dotenvy::dotenv();

        // AUTH_URL is required; its host is the only signing domain we accept
        let auth_url =
            env::var("AUTH_URL").map_err(|_| ConfigError::MissingVar("AUTH_URL".to_string()))?;
        let expected_domain = expected_domain_from(&auth_url)?;

        let jwt_secret = secret_var("JWT_SECRET");
        let token_ttl_secs = parse_env_or_default("TOKEN_TTL_SECS", 3600)?;

        // Identity store — required, the auth flow cannot run without it
        let identity_url = env::var("IDENTITY_URL")
            .map_err(|_| ConfigError::MissingVar("IDENTITY_URL".to_string()))?;
        let identity_service_key = secret_var("IDENTITY_SERVICE_KEY")
            .ok_or_else(|| ConfigError::MissingVar("IDENTITY_SERVICE_KEY".to_string()))?;

        // Server
        let bind_addr_str = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_addr = bind_addr_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::ParseError("BIND_ADDR".to_string(), e.to_string()))?;

        // Upstream services — keys are optional so the auth flow keeps
        // working on deployments that don't enable every proxy
        let helius_rpc_url = env::var("HELIUS_RPC_URL")
            .unwrap_or_else(|_| "https://mainnet.helius-rpc.com".to_string());
        let helius_api_key = secret_var("HELIUS_API_KEY");

        let etherscan_api_url = env::var("ETHERSCAN_API_URL")
            .unwrap_or_else(|_| "https://api.etherscan.io/api".to_string());
        let etherscan_api_key = secret_var("ETHERSCAN_API_KEY");

        let kraken_ticker_url = env::var("KRAKEN_TICKER_URL").unwrap_or_else(|_| {
            "https://api.kraken.com/0/public/Ticker?pair=XETHZUSD".to_string()
        });

        let profile_api_url = env::var("PROFILE_API_URL")
            .unwrap_or_else(|_| "https://twitterapi-2cw6.onrender.com".to_string());

        let stripe_api_url =
            env::var("STRIPE_API_URL").unwrap_or_else(|_| "https://api.stripe.com".to_string());
        let stripe_secret_key = secret_var("STRIPE_SECRET_KEY");

        Ok(Config {
            expected_domain,
            jwt_secret,
            token_ttl_secs,
            identity_url,
            identity_service_key,
            bind_addr,
            helius_rpc_url,
            helius_api_key,
            etherscan_api_url,
            etherscan_api_key,
            kraken_ticker_url,
            profile_api_url,
            stripe_api_url,
            stripe_secret_key,
        })
    }
}

/// Derive the expected signing domain from the authentication URL.
///
/// Matches browser `URL.host` semantics: hostname plus the port when
/// the URL carries an explicit non-default one. Scheme and path never
/// appear in the result.
fn expected_domain_from(auth_url: &str) -> Result<String, ConfigError> {
    let url = Url::parse(auth_url)
        .map_err(|e| ConfigError::ParseError("AUTH_URL".to_string(), e.to_string()))?;

    let host = url.host_str().ok_or_else(|| {
        ConfigError::InvalidValue("AUTH_URL".to_string(), "missing host".to_string())
    })?;

    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Read an optional secret from the environment. Empty values count as
/// unset so a blank line in .env doesn't masquerade as a credential.
fn secret_var(key: &str) -> Option<Zeroizing<String>> {
    match env::var(key) {
        Ok(val) if !val.is_empty() => Some(Zeroizing::new(val)),
        _ => None,
    }
}

/// Helper function to parse environment variable with a default value
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::ParseError(key.to_string(), format!("{}: {}", e, val))),
        Err(_) => Ok(default),
    }
}
