//! Colored terminal output.

use std::fmt::Display;

use console::{Style, Term};

/// Writes user-facing messages to stderr.
pub(crate) struct Output {
    term: Term,
    label: Style,
    success: Style,
    error: Style,
    link: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
            success: Style::new().green(),
            error: Style::new().red(),
            link: Style::new().cyan().bold(),
        }
    }

    /// Print `label: value` with a dimmed label.
    pub(crate) fn field(&self, label: &str, value: impl Display) {
        let _ = self
            .term
            .write_line(&format!("{} {value}", self.label.apply_to(format!("{label}:"))));
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.success.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.error.apply_to(msg).to_string());
    }

    /// Print the address a server listens on (cyan bold).
    pub(crate) fn listening(&self, host: &str, port: u16) {
        let url = format!("http://{host}:{port}");
        let _ = self
            .term
            .write_line(&format!("Listening on {}", self.link.apply_to(url)));
    }
}
