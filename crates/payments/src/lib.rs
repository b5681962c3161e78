//! Payment-processor boundary: webhook signature verification, event
//! decoding, and the checkout gateway with its Stripe HTTP adapter.

pub mod checkout;
pub mod error;
pub mod event;
pub mod signature;
pub mod stripe;

pub use checkout::{CheckoutRequest, CheckoutSessionCreated, PaymentGateway};
pub use error::PaymentError;
pub use event::{CheckoutSession, PaymentEvent};
pub use signature::{verify_signature, SignatureError};
pub use stripe::StripeClient;
