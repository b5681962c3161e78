#![allow(dead_code)]

pub mod failing_store;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use zavia_api::app;
use zavia_api::config::{PaymentsConfig, PriceTable, ServerConfig};
use zavia_api::state::AppState;
use zavia_core::curriculum::{module_spec, ModuleNumber};
use zavia_core::status::ReviewDecision;
use zavia_core::types::DbId;
use zavia_db::models::assignment::{AssignmentReview, NewAssignment};
use zavia_db::models::user::{NewUser, User};
use zavia_db::{MemoryStore, Store};
use zavia_payments::signature::signature_header;
use zavia_payments::{CheckoutRequest, CheckoutSessionCreated, PaymentError, PaymentGateway};

pub const WEBHOOK_SECRET: &str = "whsec_test_secret";
pub const ADMIN_EMAIL: &str = "admin@zavia.test";
pub const APP_BASE_URL: &str = "http://localhost:3000";

/// Build a test `ServerConfig` with safe defaults.
///
/// Canon, guild, and fellowship have price ids; coaching is left
/// unconfigured.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        app_base_url: APP_BASE_URL.to_string(),
        admin_emails: vec![ADMIN_EMAIL.to_string()],
        payments: PaymentsConfig {
            secret_key: "sk_test".to_string(),
            webhook_secret: WEBHOOK_SECRET.to_string(),
            api_base: "http://payments.invalid".to_string(),
            webhook_tolerance_secs: 300,
            prices: PriceTable {
                canon: Some("price_canon".to_string()),
                guild: Some("price_guild".to_string()),
                fellowship: Some("price_fellowship".to_string()),
                coaching: None,
            },
        },
    }
}

/// Gateway double that records every checkout request.
#[derive(Default)]
pub struct FakeGateway {
    pub requests: Mutex<Vec<CheckoutRequest>>,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSessionCreated, PaymentError> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request.clone());
        let session_id = format!("cs_test_{}", requests.len());
        Ok(CheckoutSessionCreated {
            url: Some(format!("https://checkout.invalid/{session_id}")),
            session_id,
        })
    }
}

/// Build the full application router over an in-memory store.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_test_app_with_store(store)
}

/// Build the full application router over any store.
pub fn build_test_app_with_store(store: Arc<dyn Store>) -> Router {
    build_test_app_with_gateway(store, Arc::new(FakeGateway::default()))
}

/// Build the application exactly as the binary does, over `store` and
/// `gateway`.
pub fn build_test_app_with_gateway(store: Arc<dyn Store>, gateway: Arc<FakeGateway>) -> Router {
    let state = AppState {
        store,
        payments: gateway,
        config: Arc::new(test_config()),
    };
    app::router(state).unwrap()
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a raw webhook payload, optionally with a signature header.
pub async fn post_webhook(app: Router, payload: &[u8], signature: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/webhooks/payment")
        .header(CONTENT_TYPE, "application/json");
    if let Some(signature) = signature {
        builder = builder.header("stripe-signature", signature);
    }
    app.oneshot(builder.body(Body::from(payload.to_vec())).unwrap())
        .await
        .unwrap()
}

/// Sign `payload` with the test secret at the current time.
pub fn sign(payload: &[u8]) -> String {
    signature_header(WEBHOOK_SECRET, Utc::now().timestamp(), payload)
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Store fixtures
// ---------------------------------------------------------------------------

pub async fn create_user(store: &MemoryStore, email: &str, is_admin: bool) -> User {
    store
        .create_user(&NewUser {
            email: email.to_string(),
            name: "Test Strategist".to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            is_admin,
        })
        .await
        .unwrap()
}

pub fn module(n: i64) -> ModuleNumber {
    ModuleNumber::new(n).unwrap()
}

/// Content with exactly `n` words.
pub fn words(n: usize) -> String {
    vec!["strategy"; n].join(" ")
}

pub async fn complete_module_lessons(store: &MemoryStore, user_id: DbId, n: ModuleNumber) {
    for lesson in 1..=module_spec(n).total_lessons() as i32 {
        store
            .complete_lesson(user_id, n, lesson, Utc::now())
            .await
            .unwrap();
    }
}

/// Drive module `n` through lessons, submission, and a passing review.
pub async fn pass_module(store: &MemoryStore, user_id: DbId, admin_id: DbId, n: ModuleNumber) {
    complete_module_lessons(store, user_id, n).await;
    let assignment = store
        .submit_assignment(&NewAssignment {
            user_id,
            module_number: n,
            content: words(120),
            submitted_at: Utc::now(),
        })
        .await
        .unwrap();
    store
        .record_review(&AssignmentReview {
            assignment_id: assignment.id,
            reviewer_id: admin_id,
            decision: ReviewDecision::Pass,
            feedback: "Good diagnosis.".to_string(),
            reviewed_at: Utc::now(),
        })
        .await
        .unwrap();
}
