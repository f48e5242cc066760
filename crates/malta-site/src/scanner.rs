//! Page discovery by filesystem walking.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A Markdown source found under the pages directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourcePage {
    /// Path to the `.md` file.
    pub source: PathBuf,
    /// Output path relative to the output root (e.g. `guide/setup.html`).
    pub output: PathBuf,
    /// URL path (e.g. `/guide/setup`, `/` for the root index).
    pub url_path: String,
}

/// Find every `.md` file under `pages_dir`, sorted by path.
///
/// Hidden files and directories (leading `.`) are skipped.
///
/// # Errors
///
/// Returns an error if `pages_dir` or a subdirectory can't be read.
pub fn discover_pages(pages_dir: &Path) -> io::Result<Vec<SourcePage>> {
    let mut pages = Vec::new();
    scan_directory(pages_dir, Path::new(""), &mut pages)?;
    Ok(pages)
}

fn scan_directory(dir: &Path, rel_dir: &Path, pages: &mut Vec<SourcePage>) -> io::Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<io::Result<_>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let rel_path = rel_dir.join(&name);
        if entry.file_type()?.is_dir() {
            scan_directory(&path, &rel_path, pages)?;
        } else if path.extension().is_some_and(|e| e == "md") {
            pages.push(SourcePage {
                url_path: url_path(&rel_path),
                output: rel_path.with_extension("html"),
                source: path,
            });
        }
    }
    Ok(())
}

/// Convert a path relative to the pages directory to a URL path.
///
/// - `index.md` -> `/`
/// - `guide.md` -> `/guide`
/// - `guide/index.md` -> `/guide`
/// - `guide/setup.md` -> `/guide/setup`
pub(crate) fn url_path(rel_path: &Path) -> String {
    let mut segments: Vec<String> = rel_path
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.last().is_some_and(|last| last == "index") {
        segments.pop();
    }
    format!("/{}", segments.join("/"))
}
