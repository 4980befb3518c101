// src/web/mod.rs
pub mod admin_handlers;
pub mod auth_handlers;
pub mod mw_auth;
pub mod routes;
pub mod siswa_handlers;
pub mod system_handlers;
