// src/services/mod.rs
pub mod auth_service;
pub mod card_service;
pub mod siswa_service;
pub mod stats_service;
