// src/templates.rs
use askama::Template;

/// The printable student card. All fields arrive pre-formatted from
/// `card_service`; the template itself only decides layout.
#[derive(Template)]
#[template(path = "kartu.html")]
pub struct KartuTemplate {
    pub nama: String,
    pub nis: String,
    pub kelas: String,
    pub jurusan: String,
    /// "Tempat, tanggal lahir" line, already joined.
    pub ttl: String,
    /// Already truncated to the mode's limit.
    pub alamat: String,
    pub qr_code: String,
    pub foto_url: String,
    pub tanggal_cetak: String,
    /// Print mode embeds the script that opens the browser print dialog.
    pub autoprint: bool,
}
