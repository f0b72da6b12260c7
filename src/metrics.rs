//! Pure aggregate functions over ledger snapshots.
//!
//! Nothing here touches the store or the clock; callers pass the snapshot
//! and `now` in, which keeps every rule directly testable.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Expense, Order, PaymentState, Stage, DEFAULT_EXPENSE_CATEGORY};
use crate::pricing::{COST_PER_UNIT, DELIVERY_SLA_DAYS, PRODUCTION_SLA_DAYS, PROFIT_PER_UNIT};

/// Snapshot-wide rollup. `supplier_debt` is the raw reconciliation value
/// and may go negative when payouts run ahead of production; clamping
/// happens at display time only.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerTotals {
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

pub fn cash_on_hand(orders: &[Order]) -> f64 {
    orders
        .iter()
        .filter(|o| o.payment_state == PaymentState::Paid)
        .map(|o| o.total)
        .sum()
}

pub fn receivables(orders: &[Order]) -> f64 {
    orders
        .iter()
        .filter(|o| o.payment_state != PaymentState::Paid)
        .map(|o| o.total)
        .sum()
}

/// Cards at or past the point production work has begun. Hold is parked
/// work, not produced.
pub fn produced_quantity(orders: &[Order]) -> i64 {
    orders
        .iter()
        .filter(|o| o.stage.is_produced())
        .map(|o| o.quantity)
        .sum()
}

/// Payouts already recorded against the supplier. Blank categories were
/// normalized to "Supplier" at the read boundary.
pub fn supplier_expense_total(expenses: &[Expense]) -> f64 {
    expenses
        .iter()
        .filter(|e| e.category.eq_ignore_ascii_case(DEFAULT_EXPENSE_CATEGORY))
        .map(|e| e.amount)
        .sum()
}

/// What the shop still owes the supplier: produced cards at cost, minus
/// recorded payouts. Raw value, not clamped.
pub fn supplier_debt(orders: &[Order], expenses: &[Expense]) -> f64 {
    produced_quantity(orders) as f64 * COST_PER_UNIT - supplier_expense_total(expenses)
}

/// Flat per-unit profit estimate. Deliberately not a real P&L.
pub fn net_profit(orders: &[Order]) -> f64 {
    total_quantity(orders) as f64 * PROFIT_PER_UNIT
}

pub fn total_quantity(orders: &[Order]) -> i64 {
    orders.iter().map(|o| o.quantity).sum()
}

pub fn summarize(orders: &[Order], expenses: &[Expense]) -> LedgerTotals {
    let cash = cash_on_hand(orders);
    let owed = receivables(orders);
    let delivered_count = orders
        .iter()
        .filter(|o| o.stage == Stage::Delivered)
        .count();
    LedgerTotals {
        gross_revenue: cash + owed,
        cash_on_hand: cash,
        receivables: owed,
        total_quantity: total_quantity(orders),
        produced_quantity: produced_quantity(orders),
        supplier_debt: supplier_debt(orders, expenses),
        net_profit: net_profit(orders),
        expense_total: expenses.iter().map(|e| e.amount).sum(),
        order_count: orders.len(),
        delivered_count,
        open_count: orders.len() - delivered_count,
    }
}

/// Where an order stands against one SLA deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Urgency {
    /// Creation timestamp missing or unparseable; excluded from deadline
    /// math rather than treated as due now.
    NoDate,
    Late { days_overdue: i64 },
    /// One day or less remaining, including the deadline day itself.
    Urgent,
    OnTrack { days_remaining: i64 },
    /// Delivered orders are done on both axes regardless of elapsed time.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrderUrgency {
    pub production: Urgency,
    pub delivery: Urgency,
}

pub fn urgency(order: &Order, now: DateTime<Utc>) -> OrderUrgency {
    if order.stage == Stage::Delivered {
        return OrderUrgency {
            production: Urgency::Complete,
            delivery: Urgency::Complete,
        };
    }
    OrderUrgency {
        production: classify(order.created_at, now, PRODUCTION_SLA_DAYS),
        delivery: classify(order.created_at, now, DELIVERY_SLA_DAYS),
    }
}

fn classify(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>, sla_days: i64) -> Urgency {
    let Some(created) = created_at else {
        return Urgency::NoDate;
    };
    let remaining = sla_days - (now - created).num_days();
    if remaining < 0 {
        Urgency::Late {
            days_overdue: -remaining,
        }
    } else if remaining <= 1 {
        Urgency::Urgent
    } else {
        Urgency::OnTrack {
            days_remaining: remaining,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoyaltyTier {
    Returning,
    Loyal,
}

/// Threshold classifier over a customer's historical order count.
pub fn loyalty_tier(order_count: usize) -> Option<LoyaltyTier> {
    if order_count >= 5 {
        Some(LoyaltyTier::Loyal)
    } else if order_count >= 3 {
        Some(LoyaltyTier::Returning)
    } else {
        None
    }
}

/// Order counts per customer key (contact, falling back to name).
pub fn customer_order_counts(orders: &[Order]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for order in orders {
        if let Some(key) = order.customer_key() {
            *counts.entry(key.to_string()).or_insert(0) += 1;
        }
    }
    counts
}
