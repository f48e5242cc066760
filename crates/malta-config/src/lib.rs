//! Site configuration for Malta.
//!
//! Parses `malta.config.json` with serde and resolves the project layout
//! (`pages/` source tree, `dist/` output tree) relative to the config file.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```json
//! {
//!   "name": "Malta",
//!   "description": "Docs generator",
//!   "domain": "https://malta.example.com",
//!   "twitter": "@malta",
//!   "sidebar": [
//!     { "title": "Guides", "pages": [["Getting started", "/getting-started"]] }
//!   ],
//!   "asset_hashing": true
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "malta.config.json";

/// CLI settings that override configuration values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override build output directory.
    pub output_dir: Option<PathBuf>,
}

/// A sidebar page: display title and link target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavPage {
    pub title: String,
    pub href: String,
}

/// A titled group of sidebar pages, in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavSection {
    pub title: String,
    pub pages: Vec<NavPage>,
}

/// Raw sidebar section as written in JSON (`pages` is a list of `[label, href]`).
#[derive(Debug, Deserialize)]
struct SidebarSectionRaw {
    title: String,
    #[serde(default)]
    pages: Vec<(String, String)>,
}

impl From<SidebarSectionRaw> for NavSection {
    fn from(raw: SidebarSectionRaw) -> Self {
        Self {
            title: raw.title,
            pages: raw
                .pages
                .into_iter()
                .map(|(title, href)| NavPage { title, href })
                .collect(),
        }
    }
}

/// Raw config as parsed from JSON.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigRaw {
    name: String,
    description: String,
    domain: String,
    twitter: Option<String>,
    sidebar: Vec<SidebarSectionRaw>,
    asset_hashing: bool,
}

/// Dev/preview server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

/// Resolved project layout.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    /// Directory containing the config file. Logo, og image and favicon live here.
    pub project_dir: PathBuf,
    /// Markdown source tree.
    pub pages_dir: PathBuf,
    /// Generated site.
    pub output_dir: PathBuf,
}

impl ProjectPaths {
    fn with_base(base: &Path) -> Self {
        Self {
            project_dir: base.to_path_buf(),
            pages_dir: base.join("pages"),
            output_dir: base.join("dist"),
        }
    }
}

/// Site configuration.
///
/// Built once per invocation and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Site name.
    pub name: String,
    /// Site description, used for meta tags.
    pub description: String,
    /// Origin URL (e.g. `https://example.com`), no trailing slash.
    pub domain: String,
    /// Twitter handle for card meta tags.
    pub twitter: Option<String>,
    /// Sidebar sections in display order.
    pub nav_sections: Vec<NavSection>,
    /// Rename assets to their content hash.
    pub asset_hashing: bool,
    /// Dev/preview server settings.
    pub server: ServerConfig,
    /// Resolved project layout.
    pub paths: ProjectPaths,
    /// Path to the config file.
    pub config_path: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Missing '{}'", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A required field is missing or empty.
    #[error("Missing config: {0}")]
    MissingField(&'static str),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &'static str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::MissingField(field));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is `None`, loads `malta.config.json` from the current
    /// directory. Paths are resolved against the config file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file doesn't exist, and
    /// [`ConfigError::MissingField`] if `name`, `domain` or `description`
    /// is empty.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = config_path.map_or_else(|| PathBuf::from(CONFIG_FILENAME), Path::to_path_buf);
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        let content = std::fs::read_to_string(&path)?;
        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut config = Self::from_json(&content, base)?;
        config.config_path = path;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse and validate configuration from JSON, resolving paths against `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a required field is empty.
    pub fn from_json(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let raw: ConfigRaw = serde_json::from_str(content)?;
        Self::from_raw(raw, base)
    }

    fn from_raw(raw: ConfigRaw, base: &Path) -> Result<Self, ConfigError> {
        // First missing field wins: name, domain, description.
        require_non_empty(&raw.name, "name")?;
        require_non_empty(&raw.domain, "domain")?;
        require_non_empty(&raw.description, "description")?;

        Ok(Self {
            name: raw.name,
            description: raw.description,
            domain: raw.domain.trim_end_matches('/').to_owned(),
            twitter: raw.twitter.filter(|handle| !handle.is_empty()),
            nav_sections: raw.sidebar.into_iter().map(NavSection::from).collect(),
            asset_hashing: raw.asset_hashing,
            server: ServerConfig::default(),
            paths: ProjectPaths::with_base(base),
            config_path: base.join(CONFIG_FILENAME),
        })
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(output_dir) = &settings.output_dir {
            self.paths.output_dir.clone_from(output_dir);
        }
    }
}
