// src/services/stats_service.rs
//
// Aggregations for /api/stats and /api/dashboard. All pure in-memory
// computation under a single read of the store. "Today" means since local
// midnight, and the monthly series buckets by calendar month in local time,
// not by rolling 30-day windows.

use crate::{
    models::{
        cetakan::CetakanSummary,
        siswa::{SiswaSummary, StatusSiswa},
    },
    store::{Store, StoreData},
};
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

const BULAN_PENDEK: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Months in the dashboard series, current month included.
const MONTHLY_POINTS: i32 = 6;

#[derive(Debug, Serialize)]
pub struct Stats {
    pub total_siswa: usize,
    pub total_cetakan: usize,
    pub total_admin: usize,
    pub today_cetakan: usize,
    pub today_siswa: usize,
    pub per_kelas: BTreeMap<String, usize>,
    pub per_jurusan: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
pub struct MonthlyStat {
    pub month: String,
    pub siswa: usize,
    pub cetakan: usize,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub recent_siswa: Vec<SiswaSummary>,
    pub recent_cetakan: Vec<CetakanSummary>,
    pub monthly_stats: Vec<MonthlyStat>,
}

fn is_today_local(ts: DateTime<Utc>, today: NaiveDate) -> bool {
    ts.with_timezone(&Local).date_naive() == today
}

/// (year, month) of a timestamp in local time, flattened for comparison.
fn local_month_index(ts: DateTime<Utc>) -> i32 {
    let local = ts.with_timezone(&Local);
    local.year() * 12 + local.month0() as i32
}

pub async fn statistics(store: &Store) -> Stats {
    let data = store.lock().await;
    let today = Local::now().date_naive();

    let active: Vec<_> = data
        .siswa
        .iter()
        .filter(|s| s.status == StatusSiswa::Active)
        .collect();

    let mut per_kelas: BTreeMap<String, usize> = BTreeMap::new();
    let mut per_jurusan: BTreeMap<String, usize> = BTreeMap::new();
    for siswa in &active {
        *per_kelas.entry(siswa.kelas.clone()).or_default() += 1;
        let jurusan = if siswa.jurusan.is_empty() {
            "Belum Ditentukan".to_string()
        } else {
            siswa.jurusan.clone()
        };
        *per_jurusan.entry(jurusan).or_default() += 1;
    }

    Stats {
        total_siswa: active.len(),
        total_cetakan: data.cetakan.len(),
        total_admin: data.admin.len(),
        today_cetakan: data
            .cetakan
            .iter()
            .filter(|c| is_today_local(c.tanggal_cetak, today))
            .count(),
        today_siswa: active
            .iter()
            .filter(|s| is_today_local(s.tanggal_dibuat, today))
            .count(),
        per_kelas,
        per_jurusan,
    }
}

pub async fn dashboard(store: &Store) -> Dashboard {
    let data = store.lock().await;
    Dashboard {
        recent_siswa: recent_siswa(&data),
        recent_cetakan: recent_cetakan(&data),
        monthly_stats: monthly_stats(&data, Utc::now()),
    }
}

/// Ten most recently created active students, newest first.
fn recent_siswa(data: &StoreData) -> Vec<SiswaSummary> {
    let mut active: Vec<_> = data
        .siswa
        .iter()
        .filter(|s| s.status == StatusSiswa::Active)
        .collect();
    active.sort_by(|a, b| b.tanggal_dibuat.cmp(&a.tanggal_dibuat));
    active.into_iter().take(10).map(SiswaSummary::from).collect()
}

/// Ten most recent print events joined with their student. The reference is
/// weak: a vanished student renders as "Unknown" instead of failing.
fn recent_cetakan(data: &StoreData) -> Vec<CetakanSummary> {
    let mut events: Vec<_> = data.cetakan.iter().collect();
    events.sort_by(|a, b| b.tanggal_cetak.cmp(&a.tanggal_cetak));
    events
        .into_iter()
        .take(10)
        .map(|c| {
            let siswa = data.siswa.iter().find(|s| s.id == c.siswa_id);
            CetakanSummary {
                id: c.id,
                siswa_id: c.siswa_id,
                siswa_nama: siswa.map_or("Unknown".to_string(), |s| s.nama.clone()),
                siswa_nis: siswa.map_or("Unknown".to_string(), |s| s.nis.clone()),
                tanggal_cetak: c.tanggal_cetak,
                jenis_cetak: c.jenis_cetak,
            }
        })
        .collect()
}

/// Six trailing calendar months, oldest first, current month last. Each point
/// counts active-student creations and all print events falling inside that
/// month, anchored to the month itself.
fn monthly_stats(data: &StoreData, now: DateTime<Utc>) -> Vec<MonthlyStat> {
    let now_index = local_month_index(now);
    (0..MONTHLY_POINTS)
        .rev()
        .map(|back| {
            let index = now_index - back;
            let year = index.div_euclid(12);
            let month0 = index.rem_euclid(12) as usize;

            let siswa = data
                .siswa
                .iter()
                .filter(|s| {
                    s.status == StatusSiswa::Active && local_month_index(s.tanggal_dibuat) == index
                })
                .count();
            let cetakan = data
                .cetakan
                .iter()
                .filter(|c| local_month_index(c.tanggal_cetak) == index)
                .count();

            MonthlyStat {
                month: format!("{} {}", BULAN_PENDEK[month0], year),
                siswa,
                cetakan,
            }
        })
        .collect()
}
