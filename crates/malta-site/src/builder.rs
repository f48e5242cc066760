//! Static site builder.
//!
//! Renders every page into memory first and writes only when all pages
//! succeeded, so a failing build leaves the output directory empty.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use malta_config::Config;

use crate::assets::SiteAssets;
use crate::page::{PageRenderer, RenderError};
use crate::scanner::discover_pages;

/// Error returned by [`SiteBuilder::build`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A page failed to render.
    #[error("Page {}: {source}", .path.display())]
    Page {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
    /// Asset resolution or 404 rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Summary of a finished build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildStats {
    /// Pages written, not counting `404.html`.
    pub pages: usize,
    /// Asset files written.
    pub assets: usize,
    pub output_dir: PathBuf,
}

/// Builds the site described by a [`Config`] into its output directory.
pub struct SiteBuilder {
    config: Config,
}

impl SiteBuilder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build the site.
    ///
    /// The output directory is removed first.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Page`] for the first page that fails to render,
    /// in which case nothing is written.
    pub fn build(&self) -> Result<BuildStats, BuildError> {
        let paths = &self.config.paths;
        remove_dir_if_exists(&paths.output_dir)?;

        let assets = SiteAssets::resolve(
            &paths.project_dir,
            &self.config.domain,
            self.config.asset_hashing,
        )?;
        let sources = discover_pages(&paths.pages_dir)?;
        tracing::debug!(pages = sources.len(), dir = %paths.pages_dir.display(), "Discovered pages");

        let renderer = PageRenderer::new(&self.config, assets);
        let mut rendered = Vec::with_capacity(sources.len());
        for page in &sources {
            let html = fs::File::open(&page.source)
                .map_err(RenderError::from)
                .and_then(|file| renderer.render_page(&page.url_path, file))
                .map_err(|source| BuildError::Page {
                    path: page.source.clone(),
                    source,
                })?;
            tracing::debug!(url = %page.url_path, "Rendered page");
            rendered.push((paths.output_dir.join(&page.output), html));
        }
        let not_found = renderer.render_404()?;

        for (path, html) in &rendered {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, html)?;
        }
        fs::create_dir_all(&paths.output_dir)?;
        fs::write(paths.output_dir.join("404.html"), not_found)?;
        renderer.assets().write(&paths.output_dir)?;

        let stats = BuildStats {
            pages: rendered.len(),
            assets: renderer.assets().files().len(),
            output_dir: paths.output_dir.clone(),
        };
        tracing::info!(
            pages = stats.pages,
            assets = stats.assets,
            output = %stats.output_dir.display(),
            "Site built"
        );
        Ok(stats)
    }
}

fn remove_dir_if_exists(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const CONFIG: &str = r#"{
        "name": "Malta",
        "description": "Docs made simple",
        "domain": "https://example.com",
        "sidebar": [{"title": "Docs", "pages": [["Home", "/"], ["Guide", "/guide"]]}]
    }"#;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("malta.config.json"), CONFIG).unwrap();
        fs::create_dir(dir.path().join("pages")).unwrap();
        for (path, content) in files {
            let path = dir.path().join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn builder(dir: &TempDir) -> SiteBuilder {
        let config = Config::load(Some(&dir.path().join("malta.config.json")), None).unwrap();
        SiteBuilder::new(config)
    }

    #[test]
    fn test_build_site() {
        let dir = project(&[
            ("pages/index.md", "---\ntitle: Intro\n---\n# Hi\n"),
            ("pages/guide/index.md", "---\ntitle: Guide\n---\nGuide body\n"),
            ("pages/guide/setup.md", "---\ntitle: Setup\n---\n| a |\n|---|\n| 1 |\n"),
            ("favicon.ico", "ico"),
        ]);

        let stats = builder(&dir).build().unwrap();
        let dist = dir.path().join("dist");
        assert_eq!(stats.pages, 3);
        assert_eq!(stats.assets, 4);
        assert_eq!(stats.output_dir, dist);

        let index = fs::read_to_string(dist.join("index.html")).unwrap();
        assert!(index.contains("<h1 id=\"hi\">"));
        assert!(index.contains("<title>Intro"));

        let setup = fs::read_to_string(dist.join("guide/setup.html")).unwrap();
        assert!(setup.contains("<div class=\"table-wrapper\"><table>"));
        assert!(setup.contains("content=\"https://example.com/guide/setup\""));
        assert!(setup.contains("<a href=\"/guide\" aria-current=\"page\">Guide</a>"));

        assert!(dist.join("guide/index.html").is_file());
        assert!(
            fs::read_to_string(dist.join("404.html"))
                .unwrap()
                .contains("<h1>404 - Not found</h1>")
        );
        for asset in ["main.css", "markdown.css", "highlight.css", "favicon.ico"] {
            assert!(dist.join(asset).is_file(), "missing {asset}");
        }
    }

    #[test]
    fn test_build_with_asset_hashing() {
        let dir = project(&[("pages/index.md", "---\ntitle: Intro\n---\n"), ("logo.svg", "<svg/>")]);
        let config_path = dir.path().join("malta.config.json");
        fs::write(
            &config_path,
            CONFIG.replace("\"name\"", "\"asset_hashing\": true, \"name\""),
        )
        .unwrap();

        builder(&dir).build().unwrap();
        let dist = dir.path().join("dist");
        let logo = crate::hashed_filename(b"<svg/>", "logo.svg");

        assert!(dist.join(&logo).is_file());
        assert!(!dist.join("main.css").exists());
        let index = fs::read_to_string(dist.join("index.html")).unwrap();
        assert!(index.contains(&format!("<img src=\"/{logo}\"")));
    }

    #[test]
    fn test_missing_title_writes_nothing() {
        let dir = project(&[
            ("pages/a.md", "---\ntitle: A\n---\n"),
            ("pages/b.md", "# No title\n"),
            ("dist/stale.html", "old"),
        ]);

        let err = builder(&dir).build().unwrap_err();
        assert!(matches!(err, BuildError::Page { ref path, .. } if path.ends_with("b.md")));
        assert!(err.to_string().ends_with("missing attribute: title"));

        let dist = dir.path().join("dist");
        assert!(!dist.exists() || fs::read_dir(&dist).unwrap().next().is_none());
    }

    #[test]
    fn test_missing_pages_dir() {
        let dir = project(&[]);
        fs::remove_dir(dir.path().join("pages")).unwrap();
        let err = builder(&dir).build().unwrap_err();
        assert!(matches!(err, BuildError::Io(_)));
    }
}
