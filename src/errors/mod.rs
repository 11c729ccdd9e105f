/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Classification of a failed APOD fetch.
///
/// The `Display` text is the message shown to the user, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Error 401: La API Key es incorrecta o no autorizada.")]
    Unauthorized,
    #[error("Error 404: No se encontró el recurso en la API.")]
    NotFound,
    #[error("Error del servidor: {0}")]
    ServerError(u16),
    #[error("Error de red: No se pudo conectar a la API de la NASA.")]
    NetworkUnreachable,
    #[error("Error inesperado: {0}")]
    Unexpected(String),
}

impl ErrorKind {
    /// Short kind name for logs
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::ServerError(_) => "SERVER_ERROR",
            ErrorKind::NetworkUnreachable => "NETWORK_UNREACHABLE",
            ErrorKind::Unexpected(_) => "UNEXPECTED",
        }
    }
}

/// Unified error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Errors surfaced by the screen's own HTTP endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Retry unavailable: {0}")]
    RetryUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::RetryUnavailable(msg) => {
                (StatusCode::CONFLICT, "RETRY_UNAVAILABLE", msg.clone())
            }
        };

        let error_response = ErrorResponse {
            ok: false,
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}

/// Type alias for handler results
pub type ApiResult<T> = Result<T, ApiError>;
