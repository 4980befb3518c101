// src/web/siswa_handlers.rs
use crate::{
    error::AppResult,
    models::{
        cetakan::JenisCetak,
        siswa::{ListParams, NewSiswa, SiswaUpdate},
    },
    services::{
        card_service::{self, CardMode},
        siswa_service,
    },
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use serde_json::json;

// GET /api/siswa
pub async fn list_siswa(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let page = siswa_service::list(&state.store, params).await;
    Json(json!({
        "success": true,
        "data": page.data,
        "meta": page.meta,
        "filters": { "kelas": page.kelas_list },
    }))
}

// POST /api/siswa
pub async fn create_siswa(
    State(state): State<AppState>,
    Json(input): Json<NewSiswa>,
) -> AppResult<impl IntoResponse> {
    let siswa = siswa_service::create(&state.store, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "✅ Kartu pelajar berhasil dibuat!",
            "data": siswa,
            "pdf_url": format!("/api/siswa/{}/pdf", siswa.id),
            "print_url": format!("/api/print/{}", siswa.id),
        })),
    ))
}

// GET /api/siswa/{id}
pub async fn get_siswa(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<impl IntoResponse> {
    let siswa = siswa_service::get(&state.store, id).await?;
    Ok(Json(json!({ "success": true, "data": siswa })))
}

// PUT /api/siswa/{id}: protected
pub async fn update_siswa(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<SiswaUpdate>,
) -> AppResult<impl IntoResponse> {
    let siswa = siswa_service::update(&state.store, id, patch).await?;
    Ok(Json(json!({
        "success": true,
        "message": "✅ Data siswa berhasil diperbarui",
        "data": siswa,
    })))
}

// DELETE /api/siswa/{id}: protected
pub async fn delete_siswa(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<impl IntoResponse> {
    siswa_service::delete(&state.store, id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "✅ Siswa berhasil dihapus",
    })))
}

// GET /api/siswa/{id}/pdf: printable card. The page drives the browser's
// print dialog; producing it counts as a "pdf" print event.
pub async fn render_kartu_pdf(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<impl IntoResponse> {
    let siswa = siswa_service::get(&state.store, id).await?;
    let html = card_service::render(&siswa, CardMode::Cetak)?;

    siswa_service::record_print(&state.store, siswa.id, JenisCetak::Pdf, None).await;

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"kartu-pelajar-{}.html\"", siswa.nis),
            ),
        ],
        Html(html),
    ))
}

// GET /api/siswa/{id}/preview: on-screen variant, no print event.
pub async fn render_kartu_preview(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<impl IntoResponse> {
    let siswa = siswa_service::get(&state.store, id).await?;
    let html = card_service::render(&siswa, CardMode::Pratinjau)?;
    Ok(Html(html))
}

// GET /api/print/{id}
pub async fn redirect_print(Path(id): Path<u64>) -> Redirect {
    Redirect::temporary(&format!("/api/siswa/{}/pdf", id))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

// GET /api/search?q=
pub async fn search_siswa(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let result = siswa_service::search(&state.store, &params.q).await;
    match result.message {
        Some(message) => Json(json!({
            "success": true,
            "data": result.data,
            "message": message,
        })),
        None => Json(json!({
            "success": true,
            "data": result.data,
            "total": result.total,
        })),
    }
}

// GET /api/check-nis/{nis}
pub async fn check_nis(
    State(state): State<AppState>,
    Path(nis): Path<String>,
) -> impl IntoResponse {
    let available = siswa_service::check_nis(&state.store, &nis).await;
    Json(json!({
        "success": true,
        "available": available,
        "message": if available { "NIS tersedia" } else { "NIS sudah terdaftar" },
    }))
}
