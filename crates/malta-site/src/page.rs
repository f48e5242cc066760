//! Full-page rendering shared by `malta build` and the dev server.

use std::io::{self, Read};

use malta_config::{Config, NavSection};
use malta_renderer::{FrontMatterError, MarkdownRenderer, split_front_matter};

use crate::assets::SiteAssets;
use crate::navigation::match_closest_page;
use crate::template::{PageData, render_page};

const NOT_FOUND_TITLE: &str = "Not found";
const NOT_FOUND_HTML: &str =
    "<h1>404 - Not found</h1><p>The page you were looking for does not exist.</p>";

/// Error returned when a page can't be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Reading the source failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Front matter is missing, malformed or incomplete.
    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),
    /// Markdown conversion failed.
    #[error(transparent)]
    Markdown(#[from] malta_renderer::RenderError),
}

/// Renders Markdown sources into complete HTML pages.
pub struct PageRenderer {
    site_name: String,
    description: String,
    domain: String,
    twitter: Option<String>,
    nav_sections: Vec<NavSection>,
    assets: SiteAssets,
    markdown: MarkdownRenderer,
}

impl PageRenderer {
    /// Create a renderer for the site described by `config`.
    pub fn new(config: &Config, assets: SiteAssets) -> Self {
        Self {
            site_name: config.name.clone(),
            description: config.description.clone(),
            domain: config.domain.clone(),
            twitter: config.twitter.clone(),
            nav_sections: config.nav_sections.clone(),
            assets,
            markdown: MarkdownRenderer::new(),
        }
    }

    /// Assets referenced by rendered pages.
    pub fn assets(&self) -> &SiteAssets {
        &self.assets
    }

    /// Render the page at `url_path` (e.g. `/guide/setup`) from its source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source can't be read, has no title, or fails
    /// to convert.
    pub fn render_page(&self, url_path: &str, mut reader: impl Read) -> Result<String, RenderError> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;

        let (body, matter) = split_front_matter(&source)?;
        let html_content = self.markdown.render_markdown(body)?;
        let url = format!("{}{url_path}", self.domain);

        Ok(render_page(&PageData {
            title: &matter.title,
            description: matter.description.as_deref().unwrap_or(&self.description),
            site_name: &self.site_name,
            url: &url,
            twitter: self.twitter.as_deref(),
            nav_sections: &self.nav_sections,
            current_href: match_closest_page(&self.nav_sections, url_path),
            assets: &self.assets,
            html_content: &html_content,
        }))
    }

    /// Render the 404 page.
    ///
    /// # Errors
    ///
    /// Currently infallible; returns `Result` to match [`Self::render_page`].
    pub fn render_404(&self) -> Result<String, RenderError> {
        let url = format!("{}/404", self.domain);
        Ok(render_page(&PageData {
            title: NOT_FOUND_TITLE,
            description: &self.description,
            site_name: &self.site_name,
            url: &url,
            twitter: self.twitter.as_deref(),
            nav_sections: &self.nav_sections,
            current_href: None,
            assets: &self.assets,
            html_content: NOT_FOUND_HTML,
        }))
    }
}
