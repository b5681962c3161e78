use std::sync::Arc;

use zavia_db::Store;
use zavia_payments::PaymentGateway;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence port (PostgreSQL in production, in-memory in tests).
    pub store: Arc<dyn Store>,
    /// Payment processor checkout API.
    pub payments: Arc<dyn PaymentGateway>,
    pub config: Arc<ServerConfig>,
}
