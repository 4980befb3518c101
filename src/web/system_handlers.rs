// src/web/system_handlers.rs
use crate::{error::AppError, models::siswa::StatusSiswa, state::AppState};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

// GET /api: self-describing index, handy for smoke tests.
pub async fn api_index() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "🎉 Kartu Pelajar API is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
        "endpoints": {
            "auth": { "login": "POST /api/login" },
            "siswa": {
                "list": "GET /api/siswa",
                "create": "POST /api/siswa",
                "detail": "GET /api/siswa/{id}",
                "update": "PUT /api/siswa/{id}",
                "delete": "DELETE /api/siswa/{id}",
                "pdf": "GET /api/siswa/{id}/pdf",
            },
            "admin": {
                "stats": "GET /api/stats",
                "dashboard": "GET /api/dashboard",
            },
            "tools": {
                "search": "GET /api/search",
                "settings": "GET /api/settings",
            },
        },
    }))
}

// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "success": true, "data": state.config.settings }))
}

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub image: String,
}

// POST /api/upload: pass-through blob store. The submitted data URI is the
// stored reference. A real deployment would persist it and hand back a
// stable URL.
pub async fn upload_foto(Json(req): Json<UploadRequest>) -> Result<impl IntoResponse, AppError> {
    if !req.image.starts_with("data:image") {
        return Err(AppError::Validation("Format gambar tidak valid".to_string()));
    }
    Ok(Json(json!({
        "success": true,
        "url": req.image,
        "message": "Gambar berhasil diupload",
    })))
}

// GET /api/health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let siswa_count = {
        let data = state.store.lock().await;
        data.siswa
            .iter()
            .filter(|s| s.status == StatusSiswa::Active)
            .count()
    };
    Json(json!({
        "success": true,
        "status": "healthy",
        "timestamp": Utc::now(),
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "siswa_count": siswa_count,
    }))
}

// Anything that matches no route.
pub async fn fallback_404(request: Request) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Endpoint tidak ditemukan",
            "path": request.uri().path(),
            "method": request.method().as_str(),
        })),
    )
}
