//! Preview mode: serve the built site.

use std::fs;
use std::io;

use axum::http::StatusCode;
use axum::response::Response;

use super::{RequestPath, file_response, first_file, html_response};
use crate::error::ServerError;
use crate::state::AppState;

pub(super) fn serve(state: &AppState, path: &RequestPath) -> Result<Response, ServerError> {
    let root = &state.output_dir;

    if path.extension().is_some() {
        let file = root.join(path.relative());
        if !file.is_file() {
            return Err(ServerError::NotFound(path.url_path()));
        }
        return Ok(file_response(&path.url_path(), fs::read(file)?));
    }

    match first_file(root, &path.page_candidates("html")) {
        Some(file) => Ok(html_response(StatusCode::OK, fs::read(file)?)),
        None => match fs::read(root.join("404.html")) {
            Ok(html) => Ok(html_response(StatusCode::NOT_FOUND, html)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ServerError::NotFound(path.url_path()))
            }
            Err(e) => Err(e.into()),
        },
    }
}
