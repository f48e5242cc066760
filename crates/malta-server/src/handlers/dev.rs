//! Dev mode: render Markdown sources on request.

use std::fs::File;

use axum::http::StatusCode;
use axum::response::Response;
use malta_config::Config;
use malta_site::{PageRenderer, SiteAssets};

use super::{RequestPath, file_response, first_file, html_response};
use crate::error::ServerError;
use crate::state::AppState;

pub(super) fn serve(state: &AppState, path: &RequestPath) -> Result<Response, ServerError> {
    let mut config = Config::load(Some(&state.config_path), None)?;
    config.domain = format!("http://localhost:{}", state.port);
    let assets = SiteAssets::resolve(&config.paths.project_dir, &config.domain, false)?;

    if path.extension().is_some() {
        let name = path.relative().to_string_lossy().into_owned();
        let asset = assets
            .get(&name)
            .ok_or_else(|| ServerError::NotFound(path.url_path()))?;
        return Ok(file_response(&asset.output_filename, asset.contents.clone()));
    }

    let renderer = PageRenderer::new(&config, assets);
    let Some(source) = first_file(&config.paths.pages_dir, &path.page_candidates("md")) else {
        tracing::debug!(path = %path.url_path(), "No page source");
        return Ok(html_response(StatusCode::NOT_FOUND, renderer.render_404()?));
    };

    let html = renderer.render_page(&path.url_path(), File::open(&source)?)?;
    Ok(html_response(StatusCode::OK, html))
}
