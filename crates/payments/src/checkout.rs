//! The checkout port.

use async_trait::async_trait;
use serde::Serialize;
use zavia_core::access::{CheckoutMode, Product};
use zavia_core::types::DbId;

use crate::error::PaymentError;

/// Everything needed to open a hosted checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub product: Product,
    /// Processor price id configured for `product`.
    pub price_id: String,
    pub user_id: DbId,
    pub user_email: String,
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutRequest {
    pub fn mode(&self) -> CheckoutMode {
        self.product.checkout_mode()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionCreated {
    pub session_id: String,
    pub url: Option<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSessionCreated, PaymentError>;
}
