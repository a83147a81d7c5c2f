//! Console output for the uninstall flow.
//!
//! Status lines go to stdout so they can be captured; logs stay on stderr.

use colored::Colorize;
use nova_common::ErrorEntry;
use nova_common::util::indent_lines;
use std::io::{self, Write};

/// Writes human-readable progress lines.
pub struct Reporter<W: Write> {
    out: W,
    color: bool,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), console::user_attended())
    }
}

impl Reporter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr(), console::user_attended_stderr())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Plain-text reporter over a buffer.
    pub fn plain(out: W) -> Self {
        Self::new(out, false)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, marker: &str, styled: String, plain: &str) {
        let text = if self.color { styled } else { plain.to_string() };
        if marker.is_empty() {
            let _ = writeln!(self.out, "{}", text);
        } else {
            let _ = writeln!(self.out, "{} {}", marker, text);
        }
    }

    pub fn header(&mut self, text: &str) {
        let _ = writeln!(self.out);
        self.line("", text.bold().to_string(), text);
    }

    pub fn step(&mut self, text: &str) {
        let marker = if self.color {
            "→".cyan().to_string()
        } else {
            "->".to_string()
        };
        self.line(&marker, text.to_string(), text);
    }

    pub fn success(&mut self, text: &str) {
        let marker = if self.color {
            "✓".green().to_string()
        } else {
            "[ok]".to_string()
        };
        self.line(&marker, text.green().to_string(), text);
    }

    pub fn info(&mut self, text: &str) {
        self.line("  ", text.dimmed().to_string(), text);
    }

    pub fn warn(&mut self, text: &str) {
        let marker = if self.color {
            "!".yellow().bold().to_string()
        } else {
            "[warn]".to_string()
        };
        self.line(&marker, text.yellow().to_string(), text);
    }

    pub fn list_item(&mut self, text: &str) {
        let _ = writeln!(self.out, "    - {}", text);
    }

    /// Catalog entry with remediation, plus the underlying cause.
    pub fn error_entry(&mut self, entry: &ErrorEntry, detail: &str) {
        let full = entry.format_full();
        if self.color {
            let _ = writeln!(self.out, "{}", full.red());
        } else {
            let _ = writeln!(self.out, "{}", full);
        }
        if !detail.is_empty() {
            let _ = writeln!(self.out, "\nCause:\n{}", indent_lines(detail, "  "));
        }
    }
}
