//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gowiki_storage::StorageError;

/// Server error type.
///
/// An unrecognised route and an invalid page title are the same outcome.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Path does not name an operation and a valid title.
    #[error("404 page not found")]
    RouteNotFound(String),

    /// Page store failure other than "page does not exist".
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// Template rendering failure.
    #[error("{0}")]
    Render(#[from] minijinja::Error),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::RouteNotFound(path) => tracing::debug!(path = %path, "Route not found"),
            Self::Storage(e) => tracing::error!(error = %e, "Storage error"),
            Self::Render(e) => tracing::error!(error = %e, "Render error"),
        }

        (status, format!("{self}\n")).into_response()
    }
}
