//! Admin dashboard aggregates.

use std::collections::BTreeMap;

use serde::Serialize;
use zavia_core::access::Product;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: i64,
    pub canon_users: i64,
    pub guild_users: i64,
    pub fellowship_users: i64,
    pub pending_assignments: i64,
    pub pending_applications: i64,
    pub revenue: RevenueStats,
}

/// Completed-purchase revenue in minor units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueStats {
    pub total_cents: i64,
    pub this_month_cents: i64,
    /// Every product appears, with zero when it has no sales.
    pub by_product: BTreeMap<Product, i64>,
}

impl RevenueStats {
    pub fn empty() -> Self {
        Self {
            total_cents: 0,
            this_month_cents: 0,
            by_product: Product::ALL.iter().map(|p| (*p, 0)).collect(),
        }
    }
}
