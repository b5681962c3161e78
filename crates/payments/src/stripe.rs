//! Stripe HTTP adapter for [`PaymentGateway`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::checkout::{CheckoutRequest, CheckoutSessionCreated, PaymentGateway};
use crate::error::PaymentError;

/// HTTP request timeout for a single processor call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct StripeClient {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
}

impl StripeClient {
    /// * `api_base` - e.g. `https://api.stripe.com`, without a trailing slash.
    pub fn new(api_base: String, secret_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key,
        }
    }
}

/// Form fields for `POST /v1/checkout/sessions`.
pub fn checkout_form(request: &CheckoutRequest) -> Vec<(&'static str, String)> {
    vec![
        ("mode", request.mode().as_str().to_string()),
        ("customer_email", request.user_email.clone()),
        ("line_items[0][price]", request.price_id.clone()),
        ("line_items[0][quantity]", "1".to_string()),
        ("success_url", request.success_url.clone()),
        ("cancel_url", request.cancel_url.clone()),
        ("metadata[userId]", request.user_id.to_string()),
        ("metadata[product]", request.product.as_str().to_string()),
    ]
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSessionCreated, PaymentError> {
        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&checkout_form(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::InvalidResponse(e.to_string()))?;
        tracing::debug!(session_id = %session.id, "Checkout session created");
        Ok(CheckoutSessionCreated {
            session_id: session.id,
            url: session.url,
        })
    }
}
