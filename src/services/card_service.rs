// src/services/card_service.rs
//
// Pure presentation transform: one student record in, printable markup out.
// Never fails on content; missing fields render as empty and a missing photo
// becomes the placeholder block.

use crate::{error::AppResult, models::siswa::Siswa, templates::KartuTemplate};
use askama::Template;
use chrono::{Datelike, Local, NaiveDate};

const BULAN_PANJANG: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Which rendering the caller wants. Print is the page that opens the browser
/// print dialog; preview is the on-screen version with a longer address cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardMode {
    Cetak,
    Pratinjau,
}

impl CardMode {
    fn alamat_limit(&self) -> usize {
        match self {
            CardMode::Cetak => 30,
            CardMode::Pratinjau => 50,
        }
    }
}

/// "2006-05-15" -> "15 Mei 2006". Anything unparseable renders empty rather
/// than failing the card.
pub fn format_tanggal_panjang(tanggal: &str) -> String {
    match NaiveDate::parse_from_str(tanggal, "%Y-%m-%d") {
        Ok(date) => format!(
            "{} {} {}",
            date.day(),
            BULAN_PANJANG[date.month0() as usize],
            date.year()
        ),
        Err(_) => String::new(),
    }
}

/// Character-based truncation with an ellipsis marker, UTF-8 safe.
fn truncate_alamat(alamat: &str, limit: usize) -> String {
    if alamat.chars().count() > limit {
        let mut cut: String = alamat.chars().take(limit).collect();
        cut.push_str("...");
        cut
    } else {
        alamat.to_string()
    }
}

fn tanggal_cetak_hari_ini() -> String {
    let now = Local::now();
    format!("{}/{}/{}", now.day(), now.month(), now.year())
}

pub fn render(siswa: &Siswa, mode: CardMode) -> AppResult<String> {
    let tanggal_lahir = format_tanggal_panjang(&siswa.tanggal_lahir);
    let ttl = match (siswa.tempat_lahir.is_empty(), tanggal_lahir.is_empty()) {
        (false, false) => format!("{}, {}", siswa.tempat_lahir, tanggal_lahir),
        (false, true) => siswa.tempat_lahir.clone(),
        (true, _) => tanggal_lahir,
    };

    let template = KartuTemplate {
        nama: siswa.nama.clone(),
        nis: siswa.nis.clone(),
        kelas: siswa.kelas.clone(),
        jurusan: siswa.jurusan.clone(),
        ttl,
        alamat: truncate_alamat(&siswa.alamat, mode.alamat_limit()),
        qr_code: siswa.qr_code.clone(),
        foto_url: siswa.foto_url.clone(),
        tanggal_cetak: tanggal_cetak_hari_ini(),
        autoprint: mode == CardMode::Cetak,
    };
    Ok(template.render()?)
}
