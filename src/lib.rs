// src/lib.rs
//
// Backend for the Kartu Pelajar Digital admin panel: an in-memory student
// record service with JWT-gated mutations and a printable card renderer.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod templates;
pub mod web;
