use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error as ThisError;

/// Failures surfaced by the catalog endpoints.
///
/// The error text of `Database` is returned to the caller verbatim on the
/// query and add endpoints; that transparency is part of the API contract.
#[derive(Debug, ThisError)]
pub enum CatalogError {
    #[error("Library does not contain {0}")]
    NotFound(String),

    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> axum::response::Response {
        match self {
            CatalogError::NotFound(name) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "Key Error": format!("Library does not contain {name}") })),
            )
                .into_response(),
            CatalogError::Database(err) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "Error": err.to_string() })),
            )
                .into_response(),
        }
    }
}
