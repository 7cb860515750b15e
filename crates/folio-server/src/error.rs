//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_site::{PageError, SiteError};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Page could not be loaded.
    #[error("{0}")]
    Page(#[from] PageError),

    /// Layout data could not be loaded.
    #[error("{0}")]
    Layout(#[from] SiteError),

    /// Failed to bind or serve.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Listen address is not a valid socket address.
    #[error("invalid address: {0}")]
    Address(#[from] std::net::AddrParseError),
}

impl ServerError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Page(PageError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Page(_) | Self::Layout(_) | Self::Io(_) | Self::Address(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::NOT_FOUND {
            "not found"
        } else {
            tracing::error!(error = ?self, "Request failed");
            "internal error"
        };

        let body = json!({"error": message, "status": status.as_u16()});
        (status, axum::Json(body)).into_response()
    }
}
