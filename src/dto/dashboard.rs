use serde::Serialize;
use utoipa::ToSchema;

use crate::metrics::{LoyaltyTier, OrderUrgency};
use crate::models::Stage;

/// Headline numbers for the executive view. `supplier_debt` is clamped
/// at zero here; the raw reconciliation value stays internal.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardTotals {
    pub gross_revenue: f64,
    pub cash_on_hand: f64,
    pub receivables: f64,
    pub total_quantity: i64,
    pub produced_quantity: i64,
    pub supplier_debt: f64,
    pub net_profit: f64,
    pub expense_total: f64,
    pub order_count: usize,
    pub delivered_count: usize,
    pub open_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BacklogEntry {
    pub order_id: String,
    pub name: String,
    pub stage: Stage,
    pub urgency: OrderUrgency,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoyaltyEntry {
    pub customer: String,
    pub orders: usize,
    pub tier: LoyaltyTier,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub totals: DashboardTotals,
    pub backlog: Vec<BacklogEntry>,
    pub loyalty: Vec<LoyaltyEntry>,
}
