//! Checkout and the webhook-driven access grant workflow.

use zavia_core::access::{AccessGrant, Product, DEFAULT_CURRENCY};
use zavia_core::error::CoreError;
use zavia_core::types::{DbId, Timestamp};
use zavia_db::models::purchase::{NewPurchase, Purchase};
use zavia_db::Store;
use zavia_payments::{
    verify_signature, CheckoutRequest, CheckoutSession, CheckoutSessionCreated, PaymentEvent,
    PaymentGateway,
};

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Open a hosted checkout session for `product`.
pub async fn checkout(
    store: &dyn Store,
    gateway: &dyn PaymentGateway,
    config: &ServerConfig,
    user_id: DbId,
    user_email: &str,
    product: &str,
) -> AppResult<CheckoutSessionCreated> {
    let product: Product = product.parse()?;
    let price_id = config.payments.prices.price_id(product).ok_or_else(|| {
        CoreError::Validation(format!("Checkout is not configured for product '{product}'"))
    })?;
    super::require_user(store, user_id).await?;

    let request = CheckoutRequest {
        product,
        price_id: price_id.to_string(),
        user_id,
        user_email: user_email.to_string(),
        success_url: format!("{}/dashboard?purchase=success", config.app_base_url),
        cancel_url: format!("{}/dashboard?purchase=cancelled", config.app_base_url),
    };
    let session = gateway.create_checkout_session(&request).await?;

    tracing::info!(
        user_id,
        product = %product,
        session_id = %session.session_id,
        "Checkout session created"
    );
    Ok(session)
}

/// Verify, decode, and act on one webhook delivery.
///
/// Returns `Ok` for every authentic event, including ignored ones.
pub async fn handle_webhook(
    store: &dyn Store,
    config: &ServerConfig,
    signature: Option<&str>,
    payload: &[u8],
    now: Timestamp,
) -> AppResult<()> {
    let signature =
        signature.ok_or_else(|| AppError::BadRequest("Missing signature header".into()))?;
    verify_signature(
        payload,
        signature,
        &config.payments.webhook_secret,
        now.timestamp(),
        config.payments.webhook_tolerance_secs,
    )
    .map_err(|e| {
        tracing::warn!(error = %e, "Webhook signature rejected");
        AppError::BadRequest(format!("Webhook signature verification failed: {e}"))
    })?;

    let event = PaymentEvent::parse(payload).map_err(|e| {
        tracing::warn!(error = %e, "Webhook payload could not be decoded");
        AppError::BadRequest("Invalid webhook payload".into())
    })?;

    match event {
        PaymentEvent::CheckoutCompleted { event_id, session } => {
            apply_checkout(store, &event_id, &session, now).await?;
        }
        PaymentEvent::SubscriptionDeleted {
            event_id,
            subscription,
        } => {
            tracing::info!(
                event_id = %event_id,
                subscription_id = %subscription.id,
                customer = subscription.customer.as_deref().unwrap_or(""),
                "Fellowship subscription cancelled"
            );
        }
        PaymentEvent::InvoicePaymentFailed { event_id, invoice } => {
            tracing::warn!(
                event_id = %event_id,
                invoice_id = %invoice.id,
                subscription_id = invoice.subscription.as_deref().unwrap_or(""),
                "Invoice payment failed"
            );
        }
        PaymentEvent::Other {
            event_id,
            event_type,
        } => {
            tracing::info!(event_id = %event_id, event_type = %event_type, "Unhandled webhook event");
        }
    }
    Ok(())
}

/// Record the purchase together with the product's access grant.
///
/// Sessions without usable metadata or for an unknown user are logged and
/// acknowledged. A session already on the ledger is a redelivery and is
/// acknowledged without effect. A failed write records nothing, and the
/// error response makes the processor redeliver.
pub async fn apply_checkout(
    store: &dyn Store,
    event_id: &str,
    session: &CheckoutSession,
    now: Timestamp,
) -> AppResult<Option<Purchase>> {
    let (Some(user_id), Some(product)) = (session.user_id(), session.product()) else {
        tracing::warn!(
            event_id,
            session_id = %session.id,
            "Checkout session is missing userId or product metadata"
        );
        return Ok(None);
    };
    if store.find_user(user_id).await?.is_none() {
        tracing::warn!(event_id, user_id, "Checkout completed for an unknown user");
        return Ok(None);
    }

    let input = NewPurchase {
        user_id,
        product,
        amount_cents: session.amount_total.unwrap_or_else(|| product.price_cents()),
        currency: session
            .currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        processor_payment_id: session.payment_reference(),
        processor_session_id: session.id.clone(),
        created_at: now,
    };
    let recorded = store.record_purchase(&input).await.map_err(|e| {
        tracing::warn!(
            event_id,
            user_id,
            product = %product,
            session_id = %session.id,
            error = %e,
            "Purchase and access grant could not be recorded; awaiting redelivery"
        );
        e
    })?;
    let Some(purchase) = recorded else {
        tracing::info!(event_id, session_id = %session.id, "Checkout session already recorded");
        return Ok(None);
    };

    tracing::info!(
        purchase_id = purchase.id,
        user_id,
        product = %product,
        amount_cents = purchase.amount_cents,
        "Purchase recorded"
    );
    if product.grant() != AccessGrant::None {
        tracing::info!(user_id, product = %product, "Access granted");
    }
    Ok(Some(purchase))
}

/// The user's purchase ledger, newest first.
pub async fn list_purchases(store: &dyn Store, user_id: DbId) -> AppResult<Vec<Purchase>> {
    super::require_user(store, user_id).await?;
    Ok(store.list_user_purchases(user_id).await?)
}
