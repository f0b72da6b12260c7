use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    audit,
    dto::orders::{
        CreateOrderRequest, DeleteOrderResponse, OrderDetail, OrderList, SaveSnapshotRequest,
        SaveSnapshotResponse, SnapshotRow, UpdateOrderRequest,
    },
    error::{AppError, AppResult},
    metrics,
    models::{col, Order, PaymentState, Stage, ORDER_COLUMNS, ORDER_SHEET},
    response::{ApiResponse, Meta},
    routes::params::{ExportQuery, OrderListQuery, SortOrder},
    sheet::Row,
    state::AppState,
};

/// Columns of the supplier hand-off file, in order.
const EXPORT_COLUMNS: [&str; 7] = [
    col::ORDER_ID,
    col::NAME,
    col::CONTACT,
    col::QTY,
    col::TOTAL,
    col::STATUS,
    col::CREATED_AT,
];

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (version, mut orders) = read_orders(state).await?;

    if let Some(stage) = query.stage {
        orders.retain(|o| o.stage == stage);
    }
    if let Some(payment_state) = query.payment_state {
        orders.retain(|o| o.payment_state == payment_state);
    }
    if let Some(q) = query.q.as_ref().filter(|q| !q.is_empty()) {
        let needle = q.to_ascii_lowercase();
        orders.retain(|o| {
            o.name.to_ascii_lowercase().contains(&needle)
                || o.contact.to_ascii_lowercase().contains(&needle)
                || o.order_id.to_ascii_lowercase().contains(&needle)
        });
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    orders.sort_by_key(|o| o.created_at);
    if matches!(sort_order, SortOrder::Desc) {
        orders.reverse();
    }

    let total = orders.len() as i64;
    let (page, per_page, offset) = query.pagination.normalize();
    let items: Vec<Order> = orders
        .into_iter()
        .skip(offset as usize)
        .take(per_page as usize)
        .collect();

    let meta = Meta::new(page, per_page, total);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { version, items },
        Some(meta),
    ))
}

pub async fn get_order(state: &AppState, id: &str) -> AppResult<ApiResponse<OrderDetail>> {
    let (_, orders) = read_orders(state).await?;
    let order = orders
        .into_iter()
        .find(|o| o.order_id == id)
        .ok_or(AppError::NotFound)?;

    let urgency = metrics::urgency(&order, Utc::now());
    Ok(ApiResponse::success(
        "Ok",
        OrderDetail { order, urgency },
        Some(Meta::empty()),
    ))
}

pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".into()));
    }
    if payload.quantity < 1 {
        return Err(AppError::BadRequest("Quantity must be at least 1".into()));
    }

    let (version, mut orders) = read_orders(state).await?;
    let now = Utc::now();

    let order_id = match payload
        .order_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        Some(id) => {
            if orders.iter().any(|o| o.order_id == id) {
                return Err(AppError::BadRequest(format!(
                    "Order ID '{id}' already exists"
                )));
            }
            id.to_string()
        }
        None => audit::next_order_id(now),
    };

    let order = Order {
        order_id,
        name,
        contact: payload.contact.unwrap_or_default().trim().to_string(),
        quantity: payload.quantity,
        total: state.pricing.total(payload.quantity),
        payment_state: payload.payment_state.unwrap_or(PaymentState::Unpaid),
        stage: payload.stage.unwrap_or(Stage::Pending),
        created_at: Some(now),
        status_updated_at: Some(now),
        audit_log: audit::creation_entry(now),
        exported: false,
        called: false,
        design_front: payload.design_front,
        design_back: payload.design_back,
    };

    orders.push(order.clone());
    write_orders(state, &orders, version).await?;

    tracing::info!(order_id = %order.order_id, quantity = order.quantity, "order created");
    Ok(ApiResponse::success("Order created", order, Some(Meta::empty())))
}

pub async fn update_order(
    state: &AppState,
    id: &str,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    if let Some(quantity) = payload.quantity {
        if quantity < 1 {
            return Err(AppError::BadRequest("Quantity must be at least 1".into()));
        }
    }
    if let Some(name) = payload.name.as_deref() {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Name is required".into()));
        }
    }

    let (version, orders) = read_orders(state).await?;
    let pos = orders
        .iter()
        .position(|o| o.order_id == id)
        .ok_or(AppError::NotFound)?;

    let mut edited = orders.clone();
    {
        let row = &mut edited[pos];
        if let Some(name) = payload.name {
            row.name = name.trim().to_string();
        }
        if let Some(contact) = payload.contact {
            row.contact = contact.trim().to_string();
        }
        if let Some(quantity) = payload.quantity {
            row.quantity = quantity;
            row.total = state.pricing.total(quantity);
        }
        if let Some(stage) = payload.stage {
            row.stage = stage;
        }
        if let Some(payment_state) = payload.payment_state {
            row.payment_state = payment_state;
        }
        if let Some(called) = payload.called {
            row.called = called;
        }
        if let Some(exported) = payload.exported {
            row.exported = exported;
        }
        if let Some(front) = payload.design_front {
            row.design_front = (!front.trim().is_empty()).then(|| front.trim().to_string());
        }
        if let Some(back) = payload.design_back {
            row.design_back = (!back.trim().is_empty()).then(|| back.trim().to_string());
        }
    }

    let now = Utc::now();
    let (merged, changes) = audit::reconcile(&orders, edited, now);
    write_orders(state, &merged, version).await?;

    for change in &changes {
        tracing::info!(order_id = %change.order_id, entries = ?change.entries, "order updated");
    }

    let order = merged
        .into_iter()
        .find(|o| o.order_id == id)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("updated order vanished from snapshot")))?;

    Ok(ApiResponse::success("Order updated", order, Some(Meta::empty())))
}

/// Hard delete. Permitted, but deliberately leaves no audit trail; the
/// row and its history are gone.
pub async fn delete_order(
    state: &AppState,
    id: &str,
) -> AppResult<ApiResponse<DeleteOrderResponse>> {
    let (version, mut orders) = read_orders(state).await?;
    let before = orders.len();
    orders.retain(|o| o.order_id != id);
    if orders.len() == before {
        return Err(AppError::NotFound);
    }

    write_orders(state, &orders, version).await?;
    tracing::warn!(order_id = %id, "order deleted, history discarded");

    Ok(ApiResponse::success(
        "Order deleted",
        DeleteOrderResponse {
            order_id: id.to_string(),
        },
        Some(Meta::empty()),
    ))
}

/// Save a full edited grid. The whole sheet is replaced in one write;
/// audit entries and timestamps come out of the reconcile pass, and the
/// client's base version has to match the sheet or nothing happens.
pub async fn save_snapshot(
    state: &AppState,
    payload: SaveSnapshotRequest,
) -> AppResult<ApiResponse<SaveSnapshotResponse>> {
    let (version, previous) = read_orders(state).await?;
    if payload.base_version != version {
        return Err(AppError::Conflict(format!(
            "ledger is at version {version}, edit was based on {}",
            payload.base_version
        )));
    }

    let edited: Vec<Order> = payload
        .rows
        .into_iter()
        .map(|row| snapshot_row_to_order(state, row))
        .collect::<AppResult<_>>()?;

    let now = Utc::now();
    let (merged, changes) = audit::reconcile(&previous, edited, now);
    let new_version = write_orders(state, &merged, version).await?;

    let created = changes.iter().filter(|c| c.created).count();
    let changed = changes.len() - created;
    tracing::info!(
        rows = merged.len(),
        created,
        changed,
        version = new_version,
        "snapshot saved"
    );

    Ok(ApiResponse::success(
        "Snapshot saved",
        SaveSnapshotResponse {
            version: new_version,
            rows: merged.len(),
            created,
            changed,
        },
        Some(Meta::empty()),
    ))
}

/// Build the supplier hand-off CSV: every un-exported order that has not
/// been delivered, optionally restricted to a creation-date range, then
/// mark those rows exported. Returns the CSV text and the row count.
pub async fn export_supplier_batch(
    state: &AppState,
    query: ExportQuery,
) -> AppResult<(String, usize)> {
    let (version, mut orders) = read_orders(state).await?;

    let from = query.from.and_then(day_start);
    let to = query.to.and_then(day_end);

    let selected: Vec<usize> = orders
        .iter()
        .enumerate()
        .filter(|(_, o)| !o.exported && o.stage != Stage::Delivered && in_range(o, from, to))
        .map(|(i, _)| i)
        .collect();

    let mut lines = vec![EXPORT_COLUMNS.map(csv_escape).join(",")];
    for &i in &selected {
        let row = orders[i].to_row();
        let line = EXPORT_COLUMNS
            .iter()
            .map(|column| csv_escape(crate::sheet::cell(&row, column)))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    let csv = lines.join("\n");

    if !selected.is_empty() {
        for &i in &selected {
            orders[i].exported = true;
        }
        write_orders(state, &orders, version).await?;
    }

    tracing::info!(rows = selected.len(), "supplier batch exported");
    Ok((csv, selected.len()))
}

pub async fn read_orders(state: &AppState) -> AppResult<(i64, Vec<Order>)> {
    let sheet = state.store.read(ORDER_SHEET, ORDER_COLUMNS).await?;
    let orders = sheet.rows.iter().map(Order::from_row).collect();
    Ok((sheet.version, orders))
}

async fn write_orders(state: &AppState, orders: &[Order], expected_version: i64) -> AppResult<i64> {
    let rows: Vec<Row> = orders.iter().map(Order::to_row).collect();
    state.store.replace(ORDER_SHEET, &rows, expected_version).await
}

fn snapshot_row_to_order(state: &AppState, row: SnapshotRow) -> AppResult<Order> {
    let name = row.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".into()));
    }
    if row.quantity < 1 {
        return Err(AppError::BadRequest("Quantity must be at least 1".into()));
    }
    Ok(Order {
        order_id: row.order_id.unwrap_or_default().trim().to_string(),
        name,
        contact: row.contact.unwrap_or_default().trim().to_string(),
        quantity: row.quantity,
        total: state.pricing.total(row.quantity),
        payment_state: row.payment_state,
        stage: row.stage,
        // Filled from the previous snapshot (or set to now for new rows)
        // during reconcile.
        created_at: None,
        status_updated_at: None,
        audit_log: String::new(),
        exported: row.exported.unwrap_or(false),
        called: row.called.unwrap_or(false),
        design_front: row.design_front.filter(|v| !v.trim().is_empty()),
        design_back: row.design_back.filter(|v| !v.trim().is_empty()),
    })
}

fn in_range(order: &Order, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> bool {
    match (from, to, order.created_at) {
        (None, None, _) => true,
        // A date filter only matches orders whose creation date parsed.
        (_, _, None) => false,
        (from, to, Some(created)) => {
            from.is_none_or(|f| created >= f) && to.is_none_or(|t| created <= t)
        }
    }
}

fn day_start(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

fn day_end(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(23, 59, 59).map(|naive| naive.and_utc())
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
