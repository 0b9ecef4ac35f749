//! Operator-facing output.
//!
//! Severity-colored log lines: green for progress, yellow for warnings,
//! red (on stderr) for fatal errors.

use console::style;

pub fn display_info(message: &str) {
    println!("{}", style(message).green());
}

pub fn display_warning(message: &str) {
    println!("{}", style(message).yellow());
}

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}
