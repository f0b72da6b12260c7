use axum::{extract::State, routing::get, Json, Router};

use crate::{
    dto::dashboard::DashboardResponse,
    error::AppResult,
    middleware::auth::OperatorSession,
    response::ApiResponse,
    services::metrics_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Metric rollup, urgency backlog and loyalty tiers", body = ApiResponse<DashboardResponse>),
        (status = 401, description = "No live session"),
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    _session: OperatorSession,
) -> AppResult<Json<ApiResponse<DashboardResponse>>> {
    let resp = metrics_service::dashboard(&state).await?;
    Ok(Json(resp))
}
