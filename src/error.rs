use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {message}")]
    Validation { message: String, fields: Vec<String> },

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Resume file is required")]
    MissingResume,

    #[error("Invalid media type: {0}")]
    InvalidMediaType(String),

    #[error("File size exceeds {}MB limit", .limit_bytes / (1024 * 1024))]
    FileTooLarge { limit_bytes: usize },

    #[error("Storage error: {0}")]
    StorageIo(#[from] std::io::Error),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Notification failure: {0}")]
    Notification(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn validation(message: impl Into<String>, fields: Vec<String>) -> Self {
        Error::Validation {
            message: message.into(),
            fields,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_)
            | Error::Validation { .. }
            | Error::MissingResume
            | Error::InvalidMediaType(_)
            | Error::FileTooLarge { .. }
            | Error::Json(_)
            | Error::Multipart(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::NotFound(_) | Error::JobNotFound(_) => StatusCode::NOT_FOUND,
            Error::DuplicateKey(_) => StatusCode::CONFLICT,
            Error::Config(_)
            | Error::StorageIo(_)
            | Error::Notification(_)
            | Error::Database(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let body = match self {
            Error::Validation { message, fields } => {
                json!({ "error": message, "fields": fields })
            }
            Error::NotFound(msg) | Error::JobNotFound(msg) => json!({ "error": msg }),
            Error::DuplicateKey(msg) => json!({ "error": msg }),
            Error::Unauthorized(msg) | Error::BadRequest(msg) => json!({ "error": msg }),
            Error::InvalidMediaType(msg) => json!({ "error": msg }),
            err @ (Error::MissingResume
            | Error::FileTooLarge { .. }
            | Error::Json(_)
            | Error::Multipart(_)) => json!({ "error": err.to_string() }),
            Error::StorageIo(_) => json!({ "error": "Failed to store file" }),
            Error::Database(_) | Error::Config(_) | Error::Internal(_) | Error::Notification(_) => {
                json!({ "error": "An unexpected error occurred" })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23505") => {
                Error::DuplicateKey(db.message().to_string())
            }
            other => Error::Database(other),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for Error {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<axum::extract::multipart::MultipartRejection> for Error {
    fn from(rejection: axum::extract::multipart::MultipartRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors.errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        Error::Validation {
            message: format!("Invalid or missing fields: {}", fields.join(", ")),
            fields,
        }
    }
}
