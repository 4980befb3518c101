// src/models/mod.rs
pub mod admin;
pub mod cetakan;
pub mod siswa;
