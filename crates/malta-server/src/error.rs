//! Error types for the HTTP server.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No file at the requested path.
    #[error("File not found: {0}")]
    NotFound(String),

    /// The site config couldn't be loaded.
    #[error("Config error: {0}")]
    Config(#[from] malta_config::ConfigError),

    /// Rendering a page failed.
    #[error("Render error: {0}")]
    Render(#[from] malta_site::RenderError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "404 - Not found".to_owned()),
            Self::Config(_) | Self::Render(_) | Self::Io(_) => {
                tracing::error!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}
