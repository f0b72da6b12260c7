use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::{
    dto::orders::{
        CreateOrderRequest, DeleteOrderResponse, OrderDetail, OrderList, SaveSnapshotRequest,
        SaveSnapshotResponse, UpdateOrderRequest,
    },
    error::AppResult,
    middleware::auth::OperatorSession,
    models::Order,
    response::ApiResponse,
    routes::params::{ExportQuery, OrderListQuery},
    services::ledger_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_orders).post(create_order).put(save_snapshot),
        )
        .route("/export", post(export_supplier_batch))
        .route(
            "/{id}",
            get(get_order).patch(update_order).delete(delete_order),
        )
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 50"),
        ("stage" = Option<String>, Query, description = "Filter by pipeline stage"),
        ("payment_state" = Option<String>, Query, description = "Filter by payment state"),
        ("q" = Option<String>, Query, description = "Substring match over name, contact, order id"),
        ("sort_order" = Option<String>, Query, description = "Sort by creation time: asc, desc")
    ),
    responses(
        (status = 200, description = "Full ledger with filters applied", body = ApiResponse<OrderList>),
        (status = 401, description = "No live session"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    _session: OperatorSession,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = ledger_service::list_orders(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Create an order", body = ApiResponse<Order>),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "No live session"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    _session: OperatorSession,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = ledger_service::create_order(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/orders",
    request_body = SaveSnapshotRequest,
    responses(
        (status = 200, description = "Save a full edited snapshot", body = ApiResponse<SaveSnapshotResponse>),
        (status = 401, description = "No live session"),
        (status = 409, description = "Edit was based on a stale version"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn save_snapshot(
    State(state): State<AppState>,
    _session: OperatorSession,
    Json(payload): Json<SaveSnapshotRequest>,
) -> AppResult<Json<ApiResponse<SaveSnapshotResponse>>> {
    let resp = ledger_service::save_snapshot(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/export",
    params(
        ("from" = Option<String>, Query, description = "Creation date lower bound, YYYY-MM-DD"),
        ("to" = Option<String>, Query, description = "Creation date upper bound, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Supplier CSV batch; included rows are marked exported", body = String),
        (status = 401, description = "No live session"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn export_supplier_batch(
    State(state): State<AppState>,
    _session: OperatorSession,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let (csv, _count) = ledger_service::export_supplier_batch(&state, query).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        csv,
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "One order with its urgency classification", body = ApiResponse<OrderDetail>),
        (status = 401, description = "No live session"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    _session: OperatorSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = ledger_service::get_order(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}",
    params(("id" = String, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Update an order; stage and payment transitions are audited", body = ApiResponse<Order>),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "No live session"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    _session: OperatorSession,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = ledger_service::update_order(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Delete an order (no audit trail is kept)", body = ApiResponse<DeleteOrderResponse>),
        (status = 401, description = "No live session"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    _session: OperatorSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeleteOrderResponse>>> {
    let resp = ledger_service::delete_order(&state, &id).await?;
    Ok(Json(resp))
}
