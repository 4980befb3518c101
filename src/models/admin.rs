// src/models/admin.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminLevel {
    Admin,
    Superadmin,
}

/// An admin account. Admins are never soft-deleted; `username` is unique
/// across the whole collection.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: u64,
    pub username: String,
    pub password_hash: String,
    pub nama_lengkap: String,
    pub level: AdminLevel,
    pub created_at: DateTime<Utc>,
}

impl AdminUser {
    /// Password-free projection for responses and backups.
    pub fn to_public(&self) -> AdminPublic {
        AdminPublic {
            id: self.id,
            username: self.username.clone(),
            nama_lengkap: self.nama_lengkap.clone(),
            level: self.level,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminPublic {
    pub id: u64,
    pub username: String,
    pub nama_lengkap: String,
    pub level: AdminLevel,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub nama_lengkap: Option<String>,
}
