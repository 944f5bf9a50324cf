//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::domain::{Forest, Reaping};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print the forest report with a highlighted header line
pub fn report(forest: &Forest) {
    let report = forest.to_string();
    let mut lines = report.lines();
    if let Some(header) = lines.next() {
        println!("{}", header.cyan().bold());
    }
    for line in lines {
        println!("{}", line);
    }
}

/// Print one reap/replace pair
pub fn reaping(reaping: &Reaping) {
    println!("{} {}", "Reaping the tall tree".red(), reaping.reaped);
    println!("{} {}", "Replaced with new tree".green(), reaping.replacement);
}
