//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::io::{self, Write};

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Write a step that succeeded (green)
pub fn step_created(
    out: &mut dyn Write,
    msg: &(impl std::fmt::Display + ?Sized),
) -> io::Result<()> {
    writeln!(out, "{}", msg.to_string().green())
}

/// Write a step that failed (red)
pub fn step_failed(
    out: &mut dyn Write,
    msg: &(impl std::fmt::Display + ?Sized),
) -> io::Result<()> {
    writeln!(out, "{}", msg.to_string().red())
}
