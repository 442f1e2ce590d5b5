//! Terminal output helpers.

use crate::fallback::FallbackWarning;
use console::style;

/// Print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Print a fallback warning to stderr so stdout stays machine-readable.
pub fn display_fallback_warning(warning: &FallbackWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print shell commands one per line.
pub fn display_commands(commands: &[String]) {
    for command in commands {
        println!("{}", command);
    }
}

/// Format a bump as `from -> to` for status output.
pub fn format_bump(from: &str, to: &str) -> String {
    format!("{} -> {}", style(from).red(), style(to).green())
}
