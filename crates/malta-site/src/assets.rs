//! Site assets: stylesheets, logo, social preview image and favicon.
//!
//! Stylesheets come from `malta-assets` plus the generated `highlight.css`.
//! `logo.*`, `og-logo.*` and `favicon.ico` are picked up from the project
//! root when present.

use std::fs;
use std::io;
use std::path::Path;

use sha1::{Digest, Sha1};

use crate::page::RenderError;

/// Name of the generated syntax highlighting stylesheet.
const HIGHLIGHT_CSS: &str = "highlight.css";
const LOGO_STEM: &str = "logo";
const OG_LOGO_STEM: &str = "og-logo";
const FAVICON: &str = "favicon.ico";

/// Content-addressed file name: hex SHA-1 of `bytes` plus the extension of
/// `filename` (with its dot).
///
/// ```
/// use malta_site::hashed_filename;
///
/// assert_eq!(
///     hashed_filename(b"body {}", "main.css"),
///     hashed_filename(b"body {}", "other.css"),
/// );
/// assert!(hashed_filename(b"", "logo.svg").ends_with(".svg"));
/// ```
pub fn hashed_filename(bytes: &[u8], filename: &str) -> String {
    let digest = hex::encode(Sha1::digest(bytes));
    match Path::new(filename).extension() {
        Some(ext) => format!("{digest}.{}", ext.to_string_lossy()),
        None => digest,
    }
}

/// A file copied into the output root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    /// Source file name.
    pub filename: String,
    /// Name in the output root. Equals `filename` unless hashing is on.
    pub output_filename: String,
    /// File contents.
    pub contents: Vec<u8>,
}

impl Asset {
    fn new(filename: &str, contents: Vec<u8>, hashing: bool) -> Self {
        let output_filename = if hashing {
            hashed_filename(&contents, filename)
        } else {
            filename.to_owned()
        };
        Self {
            filename: filename.to_owned(),
            output_filename,
            contents,
        }
    }

    /// Root-relative URL of the asset.
    pub fn href(&self) -> String {
        format!("/{}", self.output_filename)
    }
}

/// Assets resolved for one site, with the hrefs the page template needs.
#[derive(Clone, Debug, Default)]
pub struct SiteAssets {
    /// Stylesheet hrefs in link order.
    pub stylesheets: Vec<String>,
    /// Logo `src`, if a logo exists.
    pub logo_src: Option<String>,
    /// Absolute social preview image URL, if an `og-logo.*` exists.
    pub og_image_url: Option<String>,
    /// Favicon href, if `favicon.ico` exists.
    pub favicon_href: Option<String>,
    pub(crate) files: Vec<Asset>,
}

impl SiteAssets {
    /// Resolve assets for a site rooted at `project_dir`.
    ///
    /// `domain` prefixes the social image URL. With `hashing`, stylesheets,
    /// logo and social image are renamed to [`hashed_filename`]; the favicon
    /// never is.
    ///
    /// # Errors
    ///
    /// Returns an error if a project asset can't be read or the highlight
    /// stylesheet can't be generated.
    pub fn resolve(project_dir: &Path, domain: &str, hashing: bool) -> Result<Self, RenderError> {
        let mut assets = Self::default();

        let mut stylesheets: Vec<Asset> = malta_assets::stylesheets()
            .iter()
            .filter_map(|name| {
                malta_assets::get(name).map(|data| Asset::new(name, data.into_owned(), hashing))
            })
            .collect();
        let highlight_css = malta_renderer::theme_css()?;
        stylesheets.push(Asset::new(HIGHLIGHT_CSS, highlight_css.into_bytes(), hashing));
        assets.stylesheets = stylesheets.iter().map(Asset::href).collect();
        assets.files.extend(stylesheets);

        if let Some(logo) = find_by_stem(project_dir, LOGO_STEM)? {
            let logo = Asset::new(&logo, fs::read(project_dir.join(&logo))?, hashing);
            assets.logo_src = Some(logo.href());
            assets.files.push(logo);
        }

        if let Some(og_logo) = find_by_stem(project_dir, OG_LOGO_STEM)? {
            let og_logo = Asset::new(&og_logo, fs::read(project_dir.join(&og_logo))?, hashing);
            assets.og_image_url = Some(format!("{domain}/{}", og_logo.output_filename));
            assets.files.push(og_logo);
        }

        let favicon_path = project_dir.join(FAVICON);
        if favicon_path.is_file() {
            let favicon = Asset::new(FAVICON, fs::read(favicon_path)?, false);
            assets.favicon_href = Some(favicon.href());
            assets.files.push(favicon);
        }

        tracing::debug!(files = assets.files.len(), hashing, "Resolved site assets");
        Ok(assets)
    }

    /// All files to copy into the output root.
    pub fn files(&self) -> &[Asset] {
        &self.files
    }

    /// Look up an asset by its output file name.
    pub fn get(&self, output_filename: &str) -> Option<&Asset> {
        self.files
            .iter()
            .find(|asset| asset.output_filename == output_filename)
    }

    /// Write every asset into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file can't be written.
    pub fn write(&self, output_dir: &Path) -> io::Result<()> {
        fs::create_dir_all(output_dir)?;
        for asset in &self.files {
            fs::write(output_dir.join(&asset.output_filename), &asset.contents)?;
        }
        Ok(())
    }
}

/// First file in `dir` (by name) whose name without extension is `stem`.
fn find_by_stem(dir: &Path, stem: &str) -> io::Result<Option<String>> {
    let mut matches: Vec<String> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| Path::new(name).file_stem().is_some_and(|s| s == stem))
        .collect();
    matches.sort();
    Ok(matches.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hashed_filename_is_sha1_hex() {
        assert_eq!(
            hashed_filename(b"abc", "main.css"),
            "a9993e364706816aba3e25717850c26c9cd0d89d.css"
        );
    }

    #[test]
    fn test_hashed_filename_depends_on_content() {
        let a = hashed_filename(b"body { color: red }", "main.css");
        let b = hashed_filename(b"body { color: red }", "main.css");
        let c = hashed_filename(b"body { color: rad }", "main.css");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hashed_filename_keeps_last_extension() {
        assert!(hashed_filename(b"x", "logo.min.svg").ends_with(".svg"));
        assert_eq!(hashed_filename(b"x", "LICENSE").len(), 40);
    }

    #[test]
    fn test_resolve_without_project_assets() {
        let dir = tempfile::tempdir().unwrap();
        let assets = SiteAssets::resolve(dir.path(), "https://example.com", false).unwrap();

        assert_eq!(
            assets.stylesheets,
            vec!["/main.css", "/markdown.css", "/highlight.css"]
        );
        assert_eq!(assets.logo_src, None);
        assert_eq!(assets.og_image_url, None);
        assert_eq!(assets.favicon_href, None);
        assert_eq!(assets.files().len(), 3);
        assert!(assets.get("highlight.css").is_some());
    }

    #[test]
    fn test_resolve_project_assets() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("og-logo.png"), [0x89, b'P', b'N', b'G']).unwrap();
        fs::write(dir.path().join("favicon.ico"), [0, 0, 1, 0]).unwrap();
        fs::create_dir(dir.path().join("logo")).unwrap();

        let assets = SiteAssets::resolve(dir.path(), "https://example.com", false).unwrap();

        assert_eq!(assets.logo_src.as_deref(), Some("/logo.svg"));
        assert_eq!(
            assets.og_image_url.as_deref(),
            Some("https://example.com/og-logo.png")
        );
        assert_eq!(assets.favicon_href.as_deref(), Some("/favicon.ico"));
        assert_eq!(assets.get("logo.svg").unwrap().contents, b"<svg/>");
    }

    #[test]
    fn test_resolve_with_hashing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("og-logo.png"), "png").unwrap();
        fs::write(dir.path().join("favicon.ico"), "ico").unwrap();

        let assets = SiteAssets::resolve(dir.path(), "https://example.com", true).unwrap();

        let main_css = malta_assets::get("main.css").unwrap();
        assert_eq!(
            assets.stylesheets[0],
            format!("/{}", hashed_filename(&main_css, "main.css"))
        );
        assert_eq!(
            assets.logo_src,
            Some(format!("/{}", hashed_filename(b"<svg/>", "logo.svg")))
        );
        assert_eq!(
            assets.og_image_url,
            Some(format!(
                "https://example.com/{}",
                hashed_filename(b"png", "og-logo.png")
            ))
        );
        assert_eq!(assets.favicon_href.as_deref(), Some("/favicon.ico"));
        assert!(assets.get("main.css").is_none());
    }

    #[test]
    fn test_write_assets() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dist");
        fs::write(dir.path().join("favicon.ico"), "ico").unwrap();

        let assets = SiteAssets::resolve(dir.path(), "https://example.com", false).unwrap();
        assets.write(&out).unwrap();

        assert!(out.join("main.css").is_file());
        assert!(out.join("markdown.css").is_file());
        assert!(out.join("highlight.css").is_file());
        assert_eq!(fs::read(out.join("favicon.ico")).unwrap(), b"ico");
    }
}
