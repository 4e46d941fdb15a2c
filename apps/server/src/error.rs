//! Error types for the HTTP API.
//!
//! The status-code mapping lives here and only here: the inner crates know
//! nothing about HTTP.
//!
//! ```text
//! ValidationError (stockbook-core) → 400 Bad Request   (client fault)
//! DbError         (stockbook-db)   → 500 Internal      (server fault)
//! absence of a product/row         → 200 with null/0   (not an error)
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use stockbook_core::ValidationError;
use stockbook_db::DbError;

/// API-level errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed/missing input, detected before any transaction opened.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Storage failure after validation passed; the in-flight transaction
    /// was rolled back before this surfaced.
    #[error("{0}")]
    Storage(#[from] DbError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_client_fault() {
        let err = ApiError::Validation(ValidationError::required("barcode"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_maps_to_server_fault() {
        let err = ApiError::Storage(DbError::PoolExhausted);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
