// src/services/siswa_service.rs
//
// Student CRUD plus the read-side queries: listing with pagination, quick
// search and NIS availability. Mutations acquire the store lock once and run
// check-plus-write under it.

use crate::{
    error::{AppError, AppResult},
    models::{
        cetakan::JenisCetak,
        siswa::{ListMeta, ListParams, NewSiswa, Siswa, SiswaPage, SiswaUpdate, StatusSiswa},
    },
    store::Store,
};
use serde::Serialize;

/// Results are capped; `total` still counts every match.
pub const SEARCH_CAP: usize = 20;
/// Queries shorter than this (after trimming) are answered with an empty
/// result instead of an error.
pub const SEARCH_MIN_LEN: usize = 2;

const DEFAULT_LIMIT: u64 = 10;

pub async fn create(store: &Store, input: NewSiswa) -> AppResult<Siswa> {
    let siswa = store.lock().await.create_siswa(input)?;
    tracing::info!("siswa created: id={} nis={}", siswa.id, siswa.nis);
    Ok(siswa)
}

pub async fn update(store: &Store, id: u64, patch: SiswaUpdate) -> AppResult<Siswa> {
    let siswa = store.lock().await.update_siswa(id, patch)?;
    tracing::info!("siswa updated: id={}", siswa.id);
    Ok(siswa)
}

pub async fn delete(store: &Store, id: u64) -> AppResult<()> {
    store.lock().await.soft_delete_siswa(id)?;
    tracing::info!("siswa soft-deleted: id={}", id);
    Ok(())
}

/// Active records only; a soft-deleted student is not found here.
pub async fn get(store: &Store, id: u64) -> AppResult<Siswa> {
    store
        .lock()
        .await
        .get_active_siswa(id)
        .cloned()
        .ok_or(AppError::NotFound("Siswa"))
}

pub async fn record_print(
    store: &Store,
    siswa_id: u64,
    jenis: JenisCetak,
    dicetak_oleh: Option<u64>,
) {
    store.lock().await.record_cetakan(siswa_id, jenis, dicetak_oleh);
    tracing::debug!("cetakan recorded: siswa_id={} jenis={:?}", siswa_id, jenis);
}

/// Filter order: status, then free-text match, then exact class, then
/// pagination. The class list in the result ignores the current filter so the
/// frontend dropdown always shows every active class.
pub async fn list(store: &Store, params: ListParams) -> SiswaPage {
    let status = params.status.as_deref().unwrap_or("active");
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).max(1);
    let needle = params.search.to_lowercase();

    let data = store.lock().await;

    let mut matched: Vec<&Siswa> = data
        .siswa
        .iter()
        .filter(|s| s.status.as_str() == status)
        .collect();

    if !needle.is_empty() {
        matched.retain(|s| {
            s.nama.to_lowercase().contains(&needle)
                || s.nis.to_lowercase().contains(&needle)
                || s.kelas.to_lowercase().contains(&needle)
        });
    }
    if !params.kelas.is_empty() {
        matched.retain(|s| s.kelas == params.kelas);
    }

    let total = matched.len();
    // Saturating arithmetic: page and limit come straight from the query
    // string, so an absurd page must land on an empty slice, not overflow.
    let start = page.saturating_sub(1).saturating_mul(limit);
    let end = start.saturating_add(limit).min(total as u64);
    let items = if start < total as u64 {
        matched[start as usize..end as usize]
            .iter()
            .map(|s| (*s).clone())
            .collect()
    } else {
        Vec::new()
    };

    let mut kelas_list: Vec<String> = data
        .siswa
        .iter()
        .filter(|s| s.status == StatusSiswa::Active)
        .map(|s| s.kelas.clone())
        .collect();
    kelas_list.sort();
    kelas_list.dedup();

    SiswaPage {
        data: items,
        meta: ListMeta {
            total,
            page,
            limit,
            total_pages: (total as u64).div_ceil(limit),
            has_next: start.saturating_add(limit) < total as u64,
            has_prev: start > 0,
        },
        kelas_list,
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub data: Vec<Siswa>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Substring search over active students, extended to `jurusan`. Never an
/// error: a too-short query just comes back empty with a hint.
pub async fn search(store: &Store, query: &str) -> SearchResult {
    let needle = query.trim().to_lowercase();
    if needle.chars().count() < SEARCH_MIN_LEN {
        return SearchResult {
            data: Vec::new(),
            total: 0,
            message: Some("Masukkan minimal 2 karakter".to_string()),
        };
    }

    let data = store.lock().await;
    let matched: Vec<&Siswa> = data
        .siswa
        .iter()
        .filter(|s| {
            s.status == StatusSiswa::Active
                && (s.nama.to_lowercase().contains(&needle)
                    || s.nis.to_lowercase().contains(&needle)
                    || s.kelas.to_lowercase().contains(&needle)
                    || s.jurusan.to_lowercase().contains(&needle))
        })
        .collect();

    SearchResult {
        total: matched.len(),
        data: matched
            .into_iter()
            .take(SEARCH_CAP)
            .cloned()
            .collect(),
        message: None,
    }
}

/// True iff no active student currently holds the NIS.
pub async fn check_nis(store: &Store, nis: &str) -> bool {
    store.lock().await.find_active_by_nis(nis).is_none()
}
