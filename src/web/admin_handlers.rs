// src/web/admin_handlers.rs
use crate::{services::stats_service, state::AppState, web::mw_auth::AuthAdmin};
use axum::{
    extract::{Extension, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde_json::json;

// GET /api/stats: public aggregate counters.
pub async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    let stats = stats_service::statistics(&state.store).await;
    Json(json!({ "success": true, "data": stats }))
}

// GET /api/dashboard: protected recents + monthly series.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
) -> impl IntoResponse {
    tracing::debug!("dashboard requested by {}", admin.username);
    let dashboard = stats_service::dashboard(&state.store).await;
    Json(json!({ "success": true, "data": dashboard }))
}

// GET /api/backup: read-only snapshot of all three collections plus the
// school settings. Password hashes never leave the process; restore is out
// of scope.
pub async fn get_backup(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
) -> impl IntoResponse {
    tracing::info!("backup requested by {}", admin.username);

    let snapshot = state.store.lock().await.backup();
    let filename = format!(
        "attachment; filename=\"backup-{}.json\"",
        snapshot.timestamp.format("%Y-%m-%d")
    );
    let body = json!({
        "timestamp": snapshot.timestamp,
        "siswa": snapshot.siswa,
        "admin": snapshot.admin,
        "cetakan": snapshot.cetakan,
        "settings": state.config.settings,
    });

    ([(header::CONTENT_DISPOSITION, filename)], Json(body))
}
