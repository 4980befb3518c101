// src/web/auth_handlers.rs
use crate::{
    error::AppResult,
    models::admin::{LoginRequest, RegisterRequest},
    services::auth_service,
    state::AppState,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

// POST /api/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(form): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("login attempt: {}", form.username);
    let (token, user) = auth_service::login(&state.store, &state.config.jwt_secret, form).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Login berhasil",
        "token": token,
        "user": user,
    })))
}

// POST /api/register: behind the auth gate; any logged-in admin may add
// another admin account.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(form): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let user = auth_service::register(&state.store, form).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Admin berhasil ditambahkan",
            "user": user,
        })),
    ))
}
