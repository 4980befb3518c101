// src/config.rs
use serde::Serialize;
use std::env;

/// School profile served by `GET /api/settings` and embedded in backups.
/// Fields can be overridden through the environment, except `ukuran_kartu`,
/// which is pinned to the dimensions of the card template. The defaults
/// mirror the demo school shipped with the original frontend.
#[derive(Debug, Clone, Serialize)]
pub struct SchoolSettings {
    pub nama_sekolah: String,
    pub alamat_sekolah: String,
    pub tahun_ajaran: String,
    pub email_sekolah: String,
    pub telepon_sekolah: String,
    pub website: String,
    pub kepala_sekolah: String,
    pub nip_kepsek: String,
    pub logo_url: String,
    pub warna_utama: String,
    pub ukuran_kartu: String,
    pub masa_berlaku: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub admin_username: String,
    pub admin_password: String,
    pub settings: SchoolSettings,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Config {
        dotenvy::dotenv().ok();

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let jwt_secret = env_or("JWT_SECRET", "secret_key");
        if jwt_secret == "secret_key" {
            tracing::warn!("JWT_SECRET not set, using the insecure default");
        }

        Config {
            port,
            jwt_secret,
            admin_username: env_or("ADMIN_USERNAME", "admin"),
            admin_password: env_or("ADMIN_PASSWORD", "admin123"),
            settings: SchoolSettings {
                nama_sekolah: env_or("NAMA_SEKOLAH", "SMA NEGERI 1 DIGITAL"),
                alamat_sekolah: env_or(
                    "ALAMAT_SEKOLAH",
                    "Jl. Pendidikan No. 123, Kota Digital, Jawa Barat",
                ),
                tahun_ajaran: env_or("TAHUN_AJARAN", "2023/2024"),
                email_sekolah: env_or("EMAIL_SEKOLAH", "info@sman1digital.sch.id"),
                telepon_sekolah: env_or("TELEPON_SEKOLAH", "(021) 1234-5678"),
                website: env_or("WEBSITE_SEKOLAH", "www.sman1digital.sch.id"),
                kepala_sekolah: env_or("KEPALA_SEKOLAH", "Dr. H. Ahmad Budiman, M.Pd"),
                nip_kepsek: env_or("NIP_KEPSEK", "196512151992031002"),
                logo_url: env_or(
                    "LOGO_URL",
                    "https://via.placeholder.com/100x100/2563eb/ffffff?text=SD",
                ),
                warna_utama: env_or("WARNA_UTAMA", "#2563eb"),
                ukuran_kartu: "85mm x 54mm".to_string(),
                masa_berlaku: env_or("MASA_BERLAKU", "1 Tahun"),
            },
        }
    }
}
