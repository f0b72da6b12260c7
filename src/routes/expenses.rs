use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::{
    dto::expenses::{CreateExpenseRequest, ExpenseList},
    error::AppResult,
    middleware::auth::OperatorSession,
    models::Expense,
    response::ApiResponse,
    routes::params::ExpenseListQuery,
    services::expense_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_expenses).post(create_expense))
}

#[utoipa::path(
    get,
    path = "/api/expenses",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 50"),
        ("category" = Option<String>, Query, description = "Filter by category")
    ),
    responses(
        (status = 200, description = "Expense ledger", body = ApiResponse<ExpenseList>),
        (status = 401, description = "No live session"),
    ),
    security(("bearer_auth" = [])),
    tag = "Expenses"
)]
pub async fn list_expenses(
    State(state): State<AppState>,
    _session: OperatorSession,
    Query(query): Query<ExpenseListQuery>,
) -> AppResult<Json<ApiResponse<ExpenseList>>> {
    let resp = expense_service::list_expenses(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 200, description = "Record an expense (append-only)", body = ApiResponse<Expense>),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "No live session"),
    ),
    security(("bearer_auth" = [])),
    tag = "Expenses"
)]
pub async fn create_expense(
    State(state): State<AppState>,
    _session: OperatorSession,
    Json(payload): Json<CreateExpenseRequest>,
) -> AppResult<Json<ApiResponse<Expense>>> {
    let resp = expense_service::create_expense(&state, payload).await?;
    Ok(Json(resp))
}
