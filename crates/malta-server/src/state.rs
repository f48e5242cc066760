//! Application state.

use std::path::PathBuf;

use crate::ServeMode;

/// State shared across all handlers.
///
/// Holds only locations. Dev mode loads everything else per request.
pub(crate) struct AppState {
    pub(crate) mode: ServeMode,
    pub(crate) config_path: PathBuf,
    pub(crate) output_dir: PathBuf,
    /// Listening port, used for the dev site domain.
    pub(crate) port: u16,
}
