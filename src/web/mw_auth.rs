// src/web/mw_auth.rs
use crate::{error::AppError, services::auth_service, state::AppState};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

/// Middleware gating the protected routes. Expects `Authorization: Bearer
/// <token>`; a missing header is 401, a bad or expired token is 403. On
/// success the verified identity is stored as a request extension for the
/// handlers downstream.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AppError::MissingToken)?;

    let claims = auth_service::verify_token(&state.config.jwt_secret, token)?;
    tracing::debug!("authenticated request: {}", claims.username);

    request.extensions_mut().insert(AuthAdmin {
        id: claims.id,
        username: claims.username,
    });
    Ok(next.run(request).await)
}

/// Identity of the acting admin, as verified by `require_auth`.
#[derive(Clone, Debug)]
pub struct AuthAdmin {
    pub id: u64,
    pub username: String,
}
