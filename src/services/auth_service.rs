use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::{
    dto::auth::{LoginRequest, LoginResponse, LogoutResponse, SessionClaims},
    error::{AppError, AppResult},
    middleware::auth::OperatorSession,
    response::{ApiResponse, Meta},
    state::AppState,
};

const SESSION_HOURS: i64 = 12;

/// Single-operator login against the shared admin secret. A successful
/// login registers a fresh session id; the token is worthless once that
/// id is removed again.
pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    if payload.password != state.config.admin_password {
        return Err(AppError::BadRequest("Invalid password".into()));
    }

    let session_id = Uuid::new_v4();
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(SESSION_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = SessionClaims {
        sub: session_id.to_string(),
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.session_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    state.sessions.write().await.insert(session_id);
    tracing::info!(%session_id, "operator logged in");

    let resp = LoginResponse {
        token: format!("Bearer {}", token),
    };

    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

pub async fn logout(
    state: &AppState,
    session: &OperatorSession,
) -> AppResult<ApiResponse<LogoutResponse>> {
    state.sessions.write().await.remove(&session.session_id);
    tracing::info!(session_id = %session.session_id, "operator logged out");

    Ok(ApiResponse::success(
        "Logged out",
        LogoutResponse { logged_out: true },
        Some(Meta::empty()),
    ))
}
