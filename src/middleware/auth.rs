use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{decode, DecodingKey, Validation};
use uuid::Uuid;

use crate::{dto::auth::SessionClaims, error::AppError, state::AppState};

/// The authenticated operator for this request. There is exactly one
/// operator role; a request either carries a live session or it doesn't.
#[derive(Debug, Clone)]
pub struct OperatorSession {
    pub session_id: Uuid,
}

impl FromRequestParts<AppState> for OperatorSession {
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header.to_str().map_err(|_| AppError::Unauthorized)?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::Unauthorized);
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();

        let decoded = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(state.config.session_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized)?;

        let session_id =
            Uuid::parse_str(&decoded.claims.sub).map_err(|_| AppError::Unauthorized)?;

        // A token that outlived its logout is no longer valid.
        if !state.sessions.read().await.contains(&session_id) {
            return Err(AppError::Unauthorized);
        }

        Ok(OperatorSession { session_id })
    }
}
