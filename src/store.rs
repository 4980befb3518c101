// src/store.rs
//
// The authoritative in-memory state: students, admins and print history.
// Everything lives behind a single async Mutex; a service locks once and runs
// a whole operation (checks plus writes) under the guard, so two racing
// creates for the same NIS can never both pass the uniqueness check.

use crate::error::{AppError, AppResult};
use crate::models::{
    admin::{AdminLevel, AdminPublic, AdminUser},
    cetakan::{Cetakan, JenisCetak},
    siswa::{NewSiswa, Siswa, SiswaUpdate, StatusSiswa},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct StoreData {
    pub siswa: Vec<Siswa>,
    pub admin: Vec<AdminUser>,
    pub cetakan: Vec<Cetakan>,
}

/// Point-in-time export of every collection. Admin records are the
/// password-free projection; deleted students are left out.
#[derive(Debug, Serialize)]
pub struct BackupData {
    pub timestamp: DateTime<Utc>,
    pub siswa: Vec<Siswa>,
    pub admin: Vec<AdminPublic>,
    pub cetakan: Vec<Cetakan>,
}

/// NIS is the natural external key: 5 to 10 ASCII digits.
fn valid_nis(nis: &str) -> bool {
    (5..=10).contains(&nis.len()) && nis.bytes().all(|b| b.is_ascii_digit())
}

impl StoreData {
    /// Ids are monotonic and never reused: max existing + 1, even when older
    /// records are soft-deleted.
    fn next_siswa_id(&self) -> u64 {
        self.siswa.iter().map(|s| s.id).max().map_or(1, |m| m + 1)
    }

    /// Uniqueness only counts active records, so a deleted NIS is free again.
    fn nis_taken(&self, nis: &str, exclude_id: Option<u64>) -> bool {
        self.siswa.iter().any(|s| {
            s.nis == nis && s.status == StatusSiswa::Active && Some(s.id) != exclude_id
        })
    }

    pub fn create_siswa(&mut self, input: NewSiswa) -> AppResult<Siswa> {
        // All validation happens before the first write; a failed create
        // leaves the store untouched.
        if input.nama.trim().is_empty()
            || input.nis.trim().is_empty()
            || input.kelas.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Nama, NIS, dan Kelas harus diisi".to_string(),
            ));
        }
        if !valid_nis(&input.nis) {
            return Err(AppError::Validation(
                "NIS harus terdiri dari 5-10 digit angka".to_string(),
            ));
        }
        if self.nis_taken(&input.nis, None) {
            return Err(AppError::Conflict("NIS sudah terdaftar".to_string()));
        }

        let now = Utc::now();
        // Verification code: KARTU + NIS + last four digits of the creation
        // epoch millis, assigned once and never changed.
        let qr_code = format!("KARTU{}{:04}", input.nis, now.timestamp_millis() % 10_000);

        let siswa = Siswa {
            id: self.next_siswa_id(),
            nama: input.nama.to_uppercase(),
            nis: input.nis,
            kelas: input.kelas,
            jurusan: input.jurusan,
            tempat_lahir: input.tempat_lahir,
            tanggal_lahir: input.tanggal_lahir,
            alamat: input.alamat,
            no_hp: input.no_hp,
            foto_url: input.foto,
            qr_code,
            tanggal_dibuat: now,
            status: StatusSiswa::Active,
        };
        self.siswa.push(siswa.clone());

        // Creating a card counts as its first digital print. Kept as observed
        // in the original system even though it conflates "created" with
        // "printed once".
        self.record_cetakan(siswa.id, JenisCetak::Digital, None);

        Ok(siswa)
    }

    /// Partial merge over an existing record. Lookup ignores status: a
    /// deleted record can still be edited. An empty patch is a no-op that
    /// returns the record unchanged.
    pub fn update_siswa(&mut self, id: u64, patch: SiswaUpdate) -> AppResult<Siswa> {
        let idx = self
            .siswa
            .iter()
            .position(|s| s.id == id)
            .ok_or(AppError::NotFound("Siswa"))?;

        // Validate everything up front; the record is only touched once all
        // provided fields are acceptable.
        if let Some(nama) = &patch.nama {
            if nama.trim().is_empty() {
                return Err(AppError::Validation("Nama tidak boleh kosong".to_string()));
            }
        }
        if let Some(kelas) = &patch.kelas {
            if kelas.trim().is_empty() {
                return Err(AppError::Validation("Kelas tidak boleh kosong".to_string()));
            }
        }
        if let Some(nis) = &patch.nis {
            if *nis != self.siswa[idx].nis {
                if !valid_nis(nis) {
                    return Err(AppError::Validation(
                        "NIS harus terdiri dari 5-10 digit angka".to_string(),
                    ));
                }
                if self.nis_taken(nis, Some(id)) {
                    return Err(AppError::Conflict(
                        "NIS sudah digunakan oleh siswa lain".to_string(),
                    ));
                }
            }
        }

        let siswa = &mut self.siswa[idx];
        if let Some(nama) = patch.nama {
            siswa.nama = nama.to_uppercase();
        }
        if let Some(nis) = patch.nis {
            siswa.nis = nis;
        }
        if let Some(kelas) = patch.kelas {
            siswa.kelas = kelas;
        }
        if let Some(jurusan) = patch.jurusan {
            siswa.jurusan = jurusan;
        }
        if let Some(tempat_lahir) = patch.tempat_lahir {
            siswa.tempat_lahir = tempat_lahir;
        }
        if let Some(tanggal_lahir) = patch.tanggal_lahir {
            siswa.tanggal_lahir = tanggal_lahir;
        }
        if let Some(alamat) = patch.alamat {
            siswa.alamat = alamat;
        }
        if let Some(no_hp) = patch.no_hp {
            siswa.no_hp = no_hp;
        }
        if let Some(foto) = patch.foto {
            siswa.foto_url = foto;
        }

        Ok(siswa.clone())
    }

    /// Status flip, idempotent: deleting an already-deleted record succeeds
    /// silently.
    pub fn soft_delete_siswa(&mut self, id: u64) -> AppResult<()> {
        let siswa = self
            .siswa
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(AppError::NotFound("Siswa"))?;
        siswa.status = StatusSiswa::Deleted;
        Ok(())
    }

    /// Direct lookup only sees active records; deleted ones are reachable
    /// exclusively through list queries with an explicit status filter.
    pub fn get_active_siswa(&self, id: u64) -> Option<&Siswa> {
        self.siswa
            .iter()
            .find(|s| s.id == id && s.status == StatusSiswa::Active)
    }

    pub fn find_active_by_nis(&self, nis: &str) -> Option<&Siswa> {
        self.siswa
            .iter()
            .find(|s| s.nis == nis && s.status == StatusSiswa::Active)
    }

    /// Appends a print event. Never fails: history is kept even when the
    /// student id no longer resolves to a live record.
    pub fn record_cetakan(
        &mut self,
        siswa_id: u64,
        jenis: JenisCetak,
        dicetak_oleh: Option<u64>,
    ) -> Cetakan {
        let cetakan = Cetakan {
            id: self.cetakan.len() as u64 + 1,
            siswa_id,
            tanggal_cetak: Utc::now(),
            jenis_cetak: jenis,
            dicetak_oleh,
        };
        self.cetakan.push(cetakan.clone());
        cetakan
    }

    pub fn create_admin(
        &mut self,
        username: String,
        password_hash: String,
        nama_lengkap: String,
        level: AdminLevel,
    ) -> AppResult<AdminUser> {
        if self.admin.iter().any(|a| a.username == username) {
            return Err(AppError::Conflict("Username sudah digunakan".to_string()));
        }
        let admin = AdminUser {
            id: self.admin.len() as u64 + 1,
            username,
            password_hash,
            nama_lengkap,
            level,
            created_at: Utc::now(),
        };
        self.admin.push(admin.clone());
        Ok(admin)
    }

    pub fn find_admin(&self, username: &str) -> Option<&AdminUser> {
        self.admin.iter().find(|a| a.username == username)
    }

    pub fn backup(&self) -> BackupData {
        BackupData {
            timestamp: Utc::now(),
            siswa: self
                .siswa
                .iter()
                .filter(|s| s.status == StatusSiswa::Active)
                .cloned()
                .collect(),
            admin: self.admin.iter().map(|a| a.to_public()).collect(),
            cetakan: self.cetakan.clone(),
        }
    }

    /// Demo dataset matching the original deployment: one superadmin, three
    /// students, one historical print event.
    pub fn seed(&mut self, admin_username: &str, admin_hash: String) {
        let now = Utc::now();
        self.admin.push(AdminUser {
            id: 1,
            username: admin_username.to_string(),
            password_hash: admin_hash,
            nama_lengkap: "Administrator".to_string(),
            level: AdminLevel::Superadmin,
            created_at: now,
        });

        let samples = [
            (
                "Andi Pratama",
                "20230001",
                "XII IPA 1",
                "IPA",
                "Jakarta",
                "2006-05-15",
                "Jl. Merdeka No. 123, Jakarta Pusat",
                "081234567890",
            ),
            (
                "Budi Santoso",
                "20230002",
                "XII IPA 2",
                "IPA",
                "Bandung",
                "2006-08-20",
                "Jl. Sudirman No. 45, Bandung",
                "081298765432",
            ),
            (
                "Siti Rahmawati",
                "20230003",
                "XI IPS 1",
                "IPS",
                "Surabaya",
                "2007-03-10",
                "Jl. Pahlawan No. 78, Surabaya",
                "081345678901",
            ),
        ];
        for (i, (nama, nis, kelas, jurusan, tempat, tgl, alamat, hp)) in
            samples.into_iter().enumerate()
        {
            self.siswa.push(Siswa {
                id: i as u64 + 1,
                nama: nama.to_string(),
                nis: nis.to_string(),
                kelas: kelas.to_string(),
                jurusan: jurusan.to_string(),
                tempat_lahir: tempat.to_string(),
                tanggal_lahir: tgl.to_string(),
                alamat: alamat.to_string(),
                no_hp: hp.to_string(),
                foto_url: String::new(),
                qr_code: format!("KARTU{}", nis),
                tanggal_dibuat: now,
                status: StatusSiswa::Active,
            });
        }

        self.cetakan.push(Cetakan {
            id: 1,
            siswa_id: 1,
            tanggal_cetak: now,
            jenis_cetak: JenisCetak::Digital,
            dicetak_oleh: Some(1),
        });
    }
}

/// Shared handle to the store. Cloning is cheap; all clones see the same
/// collections.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<StoreData>>,
}

impl Store {
    pub fn new() -> Store {
        Store::default()
    }

    /// Exclusive access for the duration of one logical operation.
    pub async fn lock(&self) -> MutexGuard<'_, StoreData> {
        self.inner.lock().await
    }
}
