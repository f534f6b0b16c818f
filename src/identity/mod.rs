//! Identity-store client.
//!
//! User records live in an external identity service keyed by an
//! email-shaped unique field. Wallets have no email, so one is derived
//! deterministically from the public key.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use http::HttpIdentityStore;

/// Domain part of the derived pseudo-email.
pub const EMAIL_DOMAIN: &str = "wallet.rugwatch.app";

/// Derive the identity-store key for a wallet public key.
///
/// Deterministic, so repeat authentications for the same wallet resolve
/// to the same user record.
pub fn derived_email(public_key: &str) -> String {
    format!("{}@{}", public_key, EMAIL_DOMAIN)
}

/// A user record as returned by the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Identity request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Identity service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected identity response: {0}")]
    Decode(String),
}

/// The identity-service operations this flow consumes.
///
/// `find` then `create` is not atomic; two concurrent first-time logins
/// for the same wallet can both observe no user and both attempt
/// creation. The store is relied upon to enforce uniqueness of the
/// derived email and reject the second creation.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str)
        -> Result<Option<IdentityUser>, IdentityError>;

    async fn create_user(
        &self,
        email: &str,
        public_key: &str,
    ) -> Result<IdentityUser, IdentityError>;
}
