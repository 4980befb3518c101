// src/error.rs
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Required input missing or malformed. The caller must fix the payload;
    /// nothing was written.
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation (active NIS, admin username).
    #[error("{0}")]
    Conflict(String),

    #[error("{0} tidak ditemukan")]
    NotFound(&'static str),

    #[error("Username atau password salah")]
    InvalidCredentials,

    #[error("Access token required")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Gagal memproses password")]
    PasswordHashing,

    #[error("Terjadi kesalahan pada server")]
    Internal,

    #[error("Gagal membuat kartu")]
    Render(#[from] askama::Error),
}

impl AppError {
    /// Stable machine-checkable discriminant, independent of the message text.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Conflict(_) => "conflict",
            AppError::NotFound(_) => "not_found",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::MissingToken => "missing_token",
            AppError::InvalidToken => "invalid_token",
            AppError::PasswordHashing | AppError::Internal | AppError::Render(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials | AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken => StatusCode::FORBIDDEN,
            AppError::PasswordHashing | AppError::Internal | AppError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// Every failure leaves the wire as the same JSON envelope the frontend
// already understands: { success: false, error, kind }.
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {:?}", self);
        } else {
            tracing::debug!("request rejected: {:?}", self);
        }

        let body = json!({
            "success": false,
            "error": self.to_string(),
            "kind": self.kind(),
        });
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T = ()> = Result<T, AppError>;
