//! Error types.
//!
//! Three layers, three enums:
//!
//! - [`Error`] — infrastructure failures during bootstrap and serving:
//!   loading configuration, binding a port, connecting to PostgreSQL.
//! - [`StoreError`] — a failed statement, classified by what went wrong.
//! - [`ApiError`] — what a handler returns. Each variant maps to one HTTP
//!   status and renders as `{"error": "<message>"}`.

use serde_json::json;
use sqlx::error::ErrorKind;
use thiserror::Error;
use tracing::{error, warn};

use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// The error type returned by catalog's fallible bootstrap operations.
///
/// Request-level failures never become an `Error`; they are rendered as
/// [`ApiError`] responses.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("config: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address `{addr}`: {reason}")]
    Addr { addr: String, reason: String },
}

/// A failed store operation.
///
/// The message is the one the database produced, passed through untouched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Foreign-key or uniqueness violation.
    #[error("{0}")]
    Conflict(String),

    /// Not-null, check, or data-range violation (e.g. a name over 50 chars).
    #[error("{0}")]
    Invalid(String),

    /// The database could not be reached.
    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Other(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => {
                let message = db.message().to_owned();
                match db.kind() {
                    ErrorKind::ForeignKeyViolation | ErrorKind::UniqueViolation => {
                        Self::Conflict(message)
                    }
                    ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                        Self::Invalid(message)
                    }
                    // SQLSTATE class 22: data exception (string too long, out of range, ...)
                    _ if db.code().is_some_and(|code| code.starts_with("22")) => {
                        Self::Invalid(message)
                    }
                    _ => Self::Other(message),
                }
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable(err.to_string()),
            _ => Self::Other(err.to_string()),
        }
    }
}

/// A request that could not be served.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::BadRequest(_) => Status::BadRequest,
            Self::NotFound(_) => Status::NotFound,
            Self::Conflict(_) => Status::Conflict,
            Self::PayloadTooLarge(_) => Status::PayloadTooLarge,
            Self::Unavailable(_) => Status::ServiceUnavailable,
            Self::Internal(_) => Status::InternalServerError,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(m) => Self::Conflict(m),
            StoreError::Invalid(m) => Self::BadRequest(m),
            StoreError::Unavailable(m) => Self::Unavailable(m),
            StoreError::Other(m) => Self::Internal(m),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = status.code();
        let message = self.to_string();

        if code >= 500 {
            error!(status = code, error = %message, "request failed");
        } else {
            warn!(status = code, error = %message, "request rejected");
        }

        let body = json!({ "error": message });
        Response::builder()
            .status(status)
            .json(body.to_string().into_bytes())
    }
}
