use axum::{extract::State, routing::post, Json, Router};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, LogoutResponse},
    error::AppResult,
    middleware::auth::OperatorSession,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Open an operator session", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Invalid password")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Revoke the current session", body = ApiResponse<LogoutResponse>),
        (status = 401, description = "No live session")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    session: OperatorSession,
) -> AppResult<Json<ApiResponse<LogoutResponse>>> {
    let resp = auth_service::logout(&state, &session).await?;
    Ok(Json(resp))
}
