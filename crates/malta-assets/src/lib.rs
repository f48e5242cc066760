//! Bundled stylesheets for Malta sites.
//!
//! The stylesheets under `assets/` are compiled into the binary via
//! `rust-embed` and copied next to the generated pages at build time.

use std::borrow::Cow;

#[derive(rust_embed::RustEmbed)]
#[folder = "assets"]
struct Assets;

/// Get a bundled asset by file name (e.g. `main.css`).
///
/// Returns the file contents if the asset exists, `None` otherwise.
pub fn get(name: &str) -> Option<Cow<'static, [u8]>> {
    Assets::get(name).map(|f| f.data)
}

/// Names of all bundled stylesheets, sorted.
pub fn stylesheets() -> Vec<String> {
    let mut names: Vec<String> = Assets::iter()
        .filter(|name| name.ends_with(".css"))
        .map(Cow::into_owned)
        .collect();
    names.sort();
    names
}

/// Return the MIME type string for the given file path.
///
/// Falls back to `application/octet-stream` for unknown extensions.
pub fn mime_for(path: &str) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
}
