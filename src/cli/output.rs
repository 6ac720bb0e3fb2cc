//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::io::{self, Write};

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Write section header (cyan bold)
pub fn header(out: &mut dyn Write, msg: &(impl std::fmt::Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg.to_string().cyan().bold())
}

/// Print success status (green checkmark) to stderr, keeping stdout for demo lines
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{} {}", "✓".green(), msg);
}

/// Write labelled value (green label)
pub fn action(
    out: &mut dyn Write,
    label: &str,
    msg: &(impl std::fmt::Display + ?Sized),
) -> io::Result<()> {
    writeln!(out, "{}: {}", label.green(), msg)
}
