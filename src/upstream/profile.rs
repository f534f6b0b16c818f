//! Social-profile lookup for account avatars.

use crate::config::Config;
use crate::error::AppError;

pub struct ProfileClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProfileClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.profile_api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a profile document by handle.
    ///
    /// The upstream document is passed through as-is; the frontend picks
    /// the avatar URL out of it.
    pub async fn user_profile(&self, handle: &str) -> Result<serde_json::Value, AppError> {
        let response = self
            .http
            .get(format!("{}/api/twitter/userProfile", self.base_url))
            .query(&[("handle", handle)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Internal(format!(
                "Profile service returned {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Profile response decode: {}", e)))
    }
}
