// src/services/auth_service.rs
//
// Login and token handling. Passwords are bcrypt-hashed; verification runs on
// the blocking pool so the hash work never stalls the async runtime. Tokens
// are HS256 JWTs valid for 24 hours; there is no refresh and no revocation,
// re-login is the only renewal path.

use crate::{
    error::{AppError, AppResult},
    models::admin::{AdminLevel, AdminPublic, AdminUser, LoginRequest, RegisterRequest},
    store::Store,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

// bcrypt hash of an arbitrary throwaway password. Verified against when the
// username does not exist, so a login probe costs the same whether the
// username is right or not.
const DUMMY_HASH: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

/// Identity claims carried inside the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: u64,
    pub username: String,
    pub level: AdminLevel,
    pub iat: u64,
    pub exp: u64,
}

/// Generates a bcrypt hash for a password.
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| {
            tracing::error!("spawn_blocking failed (hash_password): {:?}", e);
            AppError::Internal
        })?
        .map_err(|e| {
            tracing::error!("bcrypt hash error: {:?}", e);
            AppError::PasswordHashing
        })
}

/// Checks a password against a stored hash.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &stored_hash))
        .await
        .map_err(|e| {
            tracing::error!("spawn_blocking failed (verify_password): {:?}", e);
            AppError::Internal
        })?
        .map_err(|e| {
            tracing::error!("bcrypt verify error: {:?}", e);
            AppError::PasswordHashing
        })
}

pub fn issue_token(secret: &str, admin: &AdminUser) -> AppResult<String> {
    let now = Utc::now().timestamp() as u64;
    let claims = Claims {
        id: admin.id,
        username: admin.username.clone(),
        level: admin.level,
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("token encoding failed: {:?}", e);
        AppError::Internal
    })
}

/// Signature and expiry check. Any failure collapses to InvalidToken; the
/// caller never learns which part was wrong.
pub fn verify_token(secret: &str, token: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("token rejected: {:?}", e);
        AppError::InvalidToken
    })
}

/// Exact-username lookup plus bcrypt comparison. Unknown username and wrong
/// password produce the same error and take the same effort.
pub async fn login(
    store: &Store,
    secret: &str,
    form: LoginRequest,
) -> AppResult<(String, AdminPublic)> {
    if form.username.is_empty() || form.password.is_empty() {
        return Err(AppError::Validation(
            "Username dan password harus diisi".to_string(),
        ));
    }

    // Clone the admin out so the store lock is not held across the bcrypt
    // call.
    let admin = store.lock().await.find_admin(&form.username).cloned();

    match admin {
        Some(admin) => {
            if verify_password(&form.password, &admin.password_hash).await? {
                let token = issue_token(secret, &admin)?;
                tracing::info!("login ok: {}", admin.username);
                Ok((token, admin.to_public()))
            } else {
                tracing::warn!("login failed (bad password): {}", form.username);
                Err(AppError::InvalidCredentials)
            }
        }
        None => {
            // Burn a verification anyway; see DUMMY_HASH.
            let _ = verify_password(&form.password, DUMMY_HASH).await;
            tracing::warn!("login failed (unknown username): {}", form.username);
            Err(AppError::InvalidCredentials)
        }
    }
}

/// Creates a regular admin account. Only reachable behind the auth gate.
pub async fn register(store: &Store, form: RegisterRequest) -> AppResult<AdminPublic> {
    if form.username.is_empty() || form.password.is_empty() {
        return Err(AppError::Validation(
            "Username dan password harus diisi".to_string(),
        ));
    }

    let nama_lengkap = form.nama_lengkap.unwrap_or_else(|| form.username.clone());
    let password_hash = hash_password(&form.password).await?;

    let admin = store.lock().await.create_admin(
        form.username,
        password_hash,
        nama_lengkap,
        AdminLevel::Admin,
    )?;
    tracing::info!("admin created: {} (id={})", admin.username, admin.id);
    Ok(admin.to_public())
}
