use chrono::Utc;

use crate::{
    dto::dashboard::{BacklogEntry, DashboardResponse, DashboardTotals, LoyaltyEntry},
    error::AppResult,
    metrics,
    models::Stage,
    response::{ApiResponse, Meta},
    services::{expense_service, ledger_service},
    state::AppState,
};

/// One rollup over both ledgers: headline totals, the urgency backlog
/// for open orders, and the loyalty tiers.
pub async fn dashboard(state: &AppState) -> AppResult<ApiResponse<DashboardResponse>> {
    let (_, orders) = ledger_service::read_orders(state).await?;
    let (_, expenses) = expense_service::read_expenses(state).await?;

    let totals = metrics::summarize(&orders, &expenses);
    let now = Utc::now();

    let backlog: Vec<BacklogEntry> = orders
        .iter()
        .filter(|o| o.stage != Stage::Delivered)
        .map(|o| BacklogEntry {
            order_id: o.order_id.clone(),
            name: o.name.clone(),
            stage: o.stage,
            urgency: metrics::urgency(o, now),
        })
        .collect();

    let mut loyalty: Vec<LoyaltyEntry> = metrics::customer_order_counts(&orders)
        .into_iter()
        .filter_map(|(customer, count)| {
            metrics::loyalty_tier(count).map(|tier| LoyaltyEntry {
                customer,
                orders: count,
                tier,
            })
        })
        .collect();
    loyalty.sort_by(|a, b| b.orders.cmp(&a.orders).then_with(|| a.customer.cmp(&b.customer)));

    let data = DashboardResponse {
        totals: DashboardTotals {
            gross_revenue: totals.gross_revenue,
            cash_on_hand: totals.cash_on_hand,
            receivables: totals.receivables,
            total_quantity: totals.total_quantity,
            produced_quantity: totals.produced_quantity,
            // Reporting never shows a negative debt; the raw value stays
            // in the metrics layer.
            supplier_debt: totals.supplier_debt.max(0.0),
            net_profit: totals.net_profit,
            expense_total: totals.expense_total,
            order_count: totals.order_count,
            delivered_count: totals.delivered_count,
            open_count: totals.open_count,
        },
        backlog,
        loyalty,
    };

    Ok(ApiResponse::success("Ok", data, Some(Meta::empty())))
}
