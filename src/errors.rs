//! Error types shared across the application.

use std::fmt::{Display, Formatter};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// Persistence failure when interacting with `SQLite`.
    Db(String),
    /// Mattermost REST API failure.
    Mattermost(String),
    /// Netlify REST API failure.
    Netlify(String),
    /// OAuth authorization or token exchange failure.
    OAuth(String),
    /// Token encryption, decryption or signature verification failure.
    Crypto(String),
    /// Requested entity does not exist.
    NotFound(String),
    /// Caller is not authorized to perform the requested action.
    Unauthorized(String),
    /// Caller is known but the request must not be honoured.
    Forbidden(String),
    /// Request payload was malformed or incomplete.
    BadRequest(String),
    /// File-system or I/O operation failure.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Db(msg) => write!(f, "db: {msg}"),
            Self::Mattermost(msg) => write!(f, "mattermost: {msg}"),
            Self::Netlify(msg) => write!(f, "netlify: {msg}"),
            Self::OAuth(msg) => write!(f, "oauth: {msg}"),
            Self::Crypto(msg) => write!(f, "crypto: {msg}"),
            Self::NotFound(msg) => write!(f, "not found: {msg}"),
            Self::Unauthorized(msg) => write!(f, "unauthorized: {msg}"),
            Self::Forbidden(msg) => write!(f, "forbidden: {msg}"),
            Self::BadRequest(msg) => write!(f, "bad request: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// HTTP status used when the error escapes an HTTP handler.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Mattermost(_) | Self::Netlify(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) | Self::Db(_) | Self::OAuth(_) | Self::Crypto(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        // Internal details stay in the log.
        let message = match &self {
            Self::Db(_) | Self::Crypto(_) | Self::Config(_) | Self::Io(_) => {
                "internal server error".to_owned()
            }
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Db(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
