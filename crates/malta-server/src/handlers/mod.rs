//! HTTP request handlers.
//!
//! A path with an extension is a static file. Anything else is a page and
//! resolves to `<path>.<ext>` or `<path>/index.<ext>`, where `<ext>` is `md`
//! in dev mode and `html` in preview mode.

mod dev;
mod preview;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;

use crate::ServeMode;
use crate::error::ServerError;
use crate::state::AppState;

/// Fallback handler for every request.
pub(crate) async fn serve(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ServerError> {
    let path = RequestPath::parse(uri.path())
        .ok_or_else(|| ServerError::NotFound(uri.path().to_owned()))?;

    match state.mode {
        ServeMode::Dev => dev::serve(&state, &path),
        ServeMode::Preview => preview::serve(&state, &path),
    }
}

/// Decoded request path split into segments.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RequestPath {
    segments: Vec<String>,
}

impl RequestPath {
    /// Percent-decode and split `raw`. Returns `None` for paths that are not
    /// valid UTF-8 or that try to leave the served directory.
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        let decoded = percent_decode_str(raw).decode_utf8().ok()?;
        let segments: Vec<String> = decoded
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .map(str::to_owned)
            .collect();
        if segments.iter().any(|s| s == ".." || s.contains('\\')) {
            return None;
        }
        Some(Self { segments })
    }

    /// Normalized URL path (`/` for the root).
    pub(crate) fn url_path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Extension of the last segment, if any.
    pub(crate) fn extension(&self) -> Option<&str> {
        self.segments
            .last()
            .and_then(|last| Path::new(last).extension())
            .and_then(|ext| ext.to_str())
    }

    /// Path relative to the served directory.
    pub(crate) fn relative(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// Page source candidates in lookup order.
    pub(crate) fn page_candidates(&self, ext: &str) -> Vec<PathBuf> {
        let Some((last, parents)) = self.segments.split_last() else {
            return vec![PathBuf::from(format!("index.{ext}"))];
        };
        let dir: PathBuf = parents.iter().collect();
        vec![
            dir.join(format!("{last}.{ext}")),
            self.relative().join(format!("index.{ext}")),
        ]
    }
}

/// First candidate under `base` that is a regular file.
pub(crate) fn first_file(base: &Path, candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|candidate| base.join(candidate))
        .find(|path| path.is_file())
}

pub(crate) fn html_response(status: StatusCode, body: impl Into<Body>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        body.into(),
    )
        .into_response()
}

/// Response for a static file, typed by its extension.
pub(crate) fn file_response(name: &str, contents: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, malta_assets::mime_for(name))], contents).into_response()
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    /// Send a GET request, returning status, content type and body.
    pub(crate) async fn get(app: Router, uri: &str) -> (StatusCode, String, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .map(|v| v.to_str().unwrap().to_owned())
            .unwrap_or_default();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, body.to_vec())
    }
}
