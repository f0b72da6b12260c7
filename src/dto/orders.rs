use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::metrics::OrderUrgency;
use crate::models::{Order, PaymentState, Stage};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Omit to let the ledger generate one.
    pub order_id: Option<String>,
    pub name: String,
    pub contact: Option<String>,
    pub quantity: i64,
    pub stage: Option<Stage>,
    pub payment_state: Option<PaymentState>,
    pub design_front: Option<String>,
    pub design_back: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub quantity: Option<i64>,
    pub stage: Option<Stage>,
    pub payment_state: Option<PaymentState>,
    pub called: Option<bool>,
    pub exported: Option<bool>,
    pub design_front: Option<String>,
    pub design_back: Option<String>,
}

/// One row of the edited grid, as the operator's editor hands it back.
/// Audit history and timestamps are never taken from the client; the
/// reconcile pass restores them from the previous snapshot.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SnapshotRow {
    pub order_id: Option<String>,
    pub name: String,
    pub contact: Option<String>,
    pub quantity: i64,
    pub stage: Stage,
    pub payment_state: PaymentState,
    pub called: Option<bool>,
    pub exported: Option<bool>,
    pub design_front: Option<String>,
    pub design_back: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveSnapshotRequest {
    /// Sheet version the edit was based on; a stale value is rejected.
    pub base_version: i64,
    pub rows: Vec<SnapshotRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaveSnapshotResponse {
    pub version: i64,
    pub rows: usize,
    pub created: usize,
    pub changed: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub version: i64,
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetail {
    pub order: Order,
    pub urgency: OrderUrgency,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteOrderResponse {
    pub order_id: String,
}
