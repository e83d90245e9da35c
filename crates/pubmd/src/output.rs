//! Colored terminal output for publish summaries.
//!
//! Everything goes to stderr so stdout stays free for the action runner.

use std::fmt::Display;

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    ok: Style,
    warn: Style,
    err: Style,
    banner: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            err: Style::new().red(),
            banner: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Plain line.
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    /// `label: value` line with a dimmed label.
    pub(crate) fn field(&self, label: &str, value: impl Display) {
        self.line(&format!("{} {value}", self.dim.apply_to(format!("{label}:"))));
    }

    /// Indented list entry.
    pub(crate) fn item(&self, msg: &str) {
        self.line(&format!("  - {msg}"));
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.ok.apply_to(msg).to_string());
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.warn.apply_to(msg).to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.err.apply_to(msg).to_string());
    }

    pub(crate) fn highlight(&self, msg: &str) {
        self.line(&self.banner.apply_to(msg).to_string());
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }
}
