//! Page rendering and static site building for Malta.
//!
//! This crate provides:
//! - [`PageRenderer`]: renders one Markdown page (or the 404 page) into a full
//!   HTML document. Used by both `malta build` and the dev server.
//! - [`SiteBuilder`]: renders every page under `pages/` and writes the site
//!   to the output directory.
//! - [`match_closest_page`]: picks the sidebar entry to highlight for a URL.
//! - [`SiteAssets`]: stylesheets, logo, social image and favicon, optionally
//!   renamed to their content hash.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use malta_config::Config;
//! use malta_site::SiteBuilder;
//!
//! let config = Config::load(None, None)?;
//! let stats = SiteBuilder::new(config).build()?;
//! println!("{} pages", stats.pages);
//! # Ok(())
//! # }
//! ```

mod assets;
mod builder;
mod navigation;
mod page;
mod scanner;
mod template;

pub use assets::{Asset, SiteAssets, hashed_filename};
pub use builder::{BuildError, BuildStats, SiteBuilder};
pub use navigation::match_closest_page;
pub use page::{PageRenderer, RenderError};
pub use scanner::{SourcePage, discover_pages};
pub use template::{PageData, render_page};
