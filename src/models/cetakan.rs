// src/models/cetakan.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the card was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JenisCetak {
    /// On-screen rendering; also recorded once implicitly when a student is
    /// created.
    Digital,
    /// The printable page served by `/api/siswa/{id}/pdf`.
    Pdf,
}

/// A print-history entry. `siswa_id` is a weak reference: the student may be
/// soft-deleted later and the event is kept anyway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cetakan {
    pub id: u64,
    pub siswa_id: u64,
    pub tanggal_cetak: DateTime<Utc>,
    pub jenis_cetak: JenisCetak,
    /// Admin who triggered the print; `None` for anonymous prints.
    pub dicetak_oleh: Option<u64>,
}

/// Dashboard projection: a print event joined with its student, or "Unknown"
/// when the student no longer resolves.
#[derive(Debug, Serialize)]
pub struct CetakanSummary {
    pub id: u64,
    pub siswa_id: u64,
    pub siswa_nama: String,
    pub siswa_nis: String,
    pub tanggal_cetak: DateTime<Utc>,
    pub jenis_cetak: JenisCetak,
}
