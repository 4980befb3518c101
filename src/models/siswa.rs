// src/models/siswa.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a student record. Deletion is a status flip, never a removal:
/// print history keeps pointing at the row and a freed NIS may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusSiswa {
    Active,
    Deleted,
}

impl StatusSiswa {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusSiswa::Active => "active",
            StatusSiswa::Deleted => "deleted",
        }
    }
}

/// A student record as stored and as serialized on the wire. Field names are
/// the public API contract of the original frontend, so they stay Indonesian.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Siswa {
    pub id: u64,
    pub nama: String,
    pub nis: String,
    pub kelas: String,
    pub jurusan: String,
    pub tempat_lahir: String,
    pub tanggal_lahir: String,
    pub alamat: String,
    pub no_hp: String,
    pub foto_url: String,
    pub qr_code: String,
    pub tanggal_dibuat: DateTime<Utc>,
    pub status: StatusSiswa,
}

/// Creation payload. `nama`, `nis` and `kelas` are required; the rest default
/// to empty strings.
#[derive(Debug, Default, Deserialize)]
pub struct NewSiswa {
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub nis: String,
    #[serde(default)]
    pub kelas: String,
    #[serde(default)]
    pub jurusan: String,
    #[serde(default)]
    pub tempat_lahir: String,
    #[serde(default)]
    pub tanggal_lahir: String,
    #[serde(default)]
    pub alamat: String,
    #[serde(default)]
    pub no_hp: String,
    #[serde(default)]
    pub foto: String,
}

/// Partial-update payload. This is an explicit whitelist: anything outside
/// these fields (notably `id`, `status`, `qr_code`, `tanggal_dibuat`) cannot
/// be touched through the update endpoint. Absent fields are preserved.
#[derive(Debug, Default, Deserialize)]
pub struct SiswaUpdate {
    pub nama: Option<String>,
    pub nis: Option<String>,
    pub kelas: Option<String>,
    pub jurusan: Option<String>,
    pub tempat_lahir: Option<String>,
    pub tanggal_lahir: Option<String>,
    pub alamat: Option<String>,
    pub no_hp: Option<String>,
    pub foto: Option<String>,
}

impl SiswaUpdate {
    pub fn is_empty(&self) -> bool {
        self.nama.is_none()
            && self.nis.is_none()
            && self.kelas.is_none()
            && self.jurusan.is_none()
            && self.tempat_lahir.is_none()
            && self.tanggal_lahir.is_none()
            && self.alamat.is_none()
            && self.no_hp.is_none()
            && self.foto.is_none()
    }
}

/// Query string for `GET /api/siswa`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub kelas: String,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListMeta {
    pub total: usize,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// One page of students plus the distinct active class names used by the
/// frontend to populate its filter dropdown.
#[derive(Debug, Serialize)]
pub struct SiswaPage {
    pub data: Vec<Siswa>,
    pub meta: ListMeta,
    pub kelas_list: Vec<String>,
}

/// Projection used by the dashboard recent-students list.
#[derive(Debug, Serialize)]
pub struct SiswaSummary {
    pub id: u64,
    pub nama: String,
    pub nis: String,
    pub kelas: String,
    pub tanggal_dibuat: DateTime<Utc>,
}

impl From<&Siswa> for SiswaSummary {
    fn from(s: &Siswa) -> Self {
        SiswaSummary {
            id: s.id,
            nama: s.nama.clone(),
            nis: s.nis.clone(),
            kelas: s.kelas.clone(),
            tanggal_dibuat: s.tanggal_dibuat,
        }
    }
}
