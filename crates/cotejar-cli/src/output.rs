//! Output formatting utilities.

use colored::Colorize;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a verification pass line
pub(crate) fn pass(message: &str) {
    println!("{}", message.green());
}
