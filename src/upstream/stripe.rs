//! Stripe checkout-session creation.

use crate::config::Config;
use crate::error::AppError;
use crate::models::{CheckoutRequest, CheckoutResponse};
use serde::Deserialize;
use zeroize::Zeroizing;

pub struct StripeClient {
    http: reqwest::Client,
    api_url: String,
    secret_key: Option<Zeroizing<String>>,
}

#[derive(Debug, Deserialize)]
struct Customer {
    id: String,
}

#[derive(Debug, Deserialize)]
struct CheckoutSession {
    id: String,
    /// Absent for sessions Stripe could not produce a redirect for.
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

impl StripeClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_url: config.stripe_api_url.trim_end_matches('/').to_string(),
            secret_key: config.stripe_secret_key.clone(),
        }
    }

    /// Create a checkout session for a single line item.
    ///
    /// Each session gets a fresh customer; payments here are one-shot
    /// and never tied to a stored identity.
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutResponse, AppError> {
        let secret_key = self
            .secret_key
            .as_ref()
            .ok_or_else(|| AppError::Config("STRIPE_SECRET_KEY is not set".to_string()))?;

        let customer: Customer = self
            .post_form(secret_key, "/v1/customers", &[])
            .await?;

        tracing::debug!(customer_id = %customer.id, "Created checkout customer");

        let session: CheckoutSession = self
            .post_form(
                secret_key,
                "/v1/checkout/sessions",
                &[
                    ("customer", customer.id.as_str()),
                    ("payment_method_types[0]", "card"),
                    ("line_items[0][price]", request.price_id.as_str()),
                    ("line_items[0][quantity]", "1"),
                    ("mode", request.mode.as_str()),
                    ("success_url", request.success_url.as_str()),
                    ("cancel_url", request.cancel_url.as_str()),
                ],
            )
            .await?;

        let url = session
            .url
            .ok_or_else(|| AppError::Internal("Checkout session URL not generated".to_string()))?;

        Ok(CheckoutResponse {
            session_id: session.id,
            url,
        })
    }

    /// POST a form-encoded Stripe API call, mapping Stripe's in-band
    /// errors to 400s with Stripe's own message.
    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        secret_key: &Zeroizing<String>,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .post(format!("{}{}", self.api_url, path))
            .bearer_auth(secret_key.as_str())
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| "Failed to create Stripe checkout session".to_string());
            return Err(AppError::BadRequest(message));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Stripe response decode: {}", e)))
    }
}
