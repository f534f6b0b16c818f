//! HTTP implementation of the identity store.
//!
//! Talks to the identity service's admin-users API with a service-role
//! key. Consumed endpoints:
//! - `GET {base}/admin/users?email={email}` -> `{"users": [...]}`
//! - `POST {base}/admin/users` with `{email, email_confirm, user_metadata}`
//!
//! No retries: a single failed call fails the surrounding request.

use super::{IdentityError, IdentityStore, IdentityUser};
use crate::config::Config;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use zeroize::Zeroizing;

pub struct HttpIdentityStore {
    http: reqwest::Client,
    base_url: String,
    service_key: Zeroizing<String>,
}

#[derive(Debug, Deserialize)]
struct UserList {
    users: Vec<IdentityUser>,
}

impl HttpIdentityStore {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.identity_url.trim_end_matches('/').to_string(),
            service_key: config.identity_service_key.clone(),
        }
    }

    fn users_endpoint(&self) -> String {
        format!("{}/admin/users", self.base_url)
    }
}

#[async_trait]
impl IdentityStore for HttpIdentityStore {
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<IdentityUser>, IdentityError> {
        let response = self
            .http
            .get(self.users_endpoint())
            .query(&[("email", email)])
            .bearer_auth(&*self.service_key)
            .header("apikey", &*self.service_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let list: UserList = response
            .json()
            .await
            .map_err(|e| IdentityError::Decode(e.to_string()))?;

        // The email is unique in the store; anything past the first
        // entry would be a store-side integrity violation.
        Ok(list.users.into_iter().next())
    }

    async fn create_user(
        &self,
        email: &str,
        public_key: &str,
    ) -> Result<IdentityUser, IdentityError> {
        let body = json!({
            "email": email,
            "email_confirm": true,
            "user_metadata": { "public_key": public_key },
        });

        let response = self
            .http
            .post(self.users_endpoint())
            .bearer_auth(&*self.service_key)
            .header("apikey", &*self.service_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| IdentityError::Decode(e.to_string()))
    }
}
