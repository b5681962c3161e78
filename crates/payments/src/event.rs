//! Decoding verified webhook payloads into typed events.

use std::collections::HashMap;

use serde::Deserialize;
use zavia_core::access::Product;
use zavia_core::types::DbId;

pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";
pub const SUBSCRIPTION_DELETED: &str = "customer.subscription.deleted";
pub const INVOICE_PAYMENT_FAILED: &str = "invoice.payment_failed";

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    data: RawEventData,
}

#[derive(Debug, Deserialize)]
struct RawEventData {
    object: serde_json::Value,
}

/// The checkout session object carried by `checkout.session.completed`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Minor units.
    pub amount_total: Option<i64>,
    pub currency: Option<String>,
    pub payment_intent: Option<String>,
    pub subscription: Option<String>,
    pub mode: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSession {
    /// `metadata.userId`, if present and numeric.
    pub fn user_id(&self) -> Option<DbId> {
        self.metadata.get("userId")?.parse().ok()
    }

    /// `metadata.product`, if present and a known product.
    pub fn product(&self) -> Option<Product> {
        self.metadata.get("product")?.parse().ok()
    }

    /// The processor's payment reference: the payment intent for one-time
    /// payments, the subscription id for subscriptions.
    pub fn payment_reference(&self) -> Option<String> {
        self.payment_intent.clone().or_else(|| self.subscription.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubscriptionRef {
    pub id: String,
    pub customer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InvoiceRef {
    pub id: String,
    pub customer: Option<String>,
    pub subscription: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEvent {
    CheckoutCompleted { event_id: String, session: CheckoutSession },
    SubscriptionDeleted { event_id: String, subscription: SubscriptionRef },
    InvoicePaymentFailed { event_id: String, invoice: InvoiceRef },
    /// Any other event type. Acknowledged without action.
    Other { event_id: String, event_type: String },
}

impl PaymentEvent {
    /// Decode a verified payload.
    pub fn parse(payload: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: RawEvent = serde_json::from_slice(payload)?;
        let event_id = raw.id;
        let event = match raw.event_type.as_str() {
            CHECKOUT_SESSION_COMPLETED => PaymentEvent::CheckoutCompleted {
                event_id,
                session: serde_json::from_value(raw.data.object)?,
            },
            SUBSCRIPTION_DELETED => PaymentEvent::SubscriptionDeleted {
                event_id,
                subscription: serde_json::from_value(raw.data.object)?,
            },
            INVOICE_PAYMENT_FAILED => PaymentEvent::InvoicePaymentFailed {
                event_id,
                invoice: serde_json::from_value(raw.data.object)?,
            },
            _ => PaymentEvent::Other {
                event_id,
                event_type: raw.event_type,
            },
        };
        Ok(event)
    }

    pub fn event_id(&self) -> &str {
        match self {
            PaymentEvent::CheckoutCompleted { event_id, .. }
            | PaymentEvent::SubscriptionDeleted { event_id, .. }
            | PaymentEvent::InvoicePaymentFailed { event_id, .. }
            | PaymentEvent::Other { event_id, .. } => event_id,
        }
    }
}
