//! Terminal styling utilities for consistent CLI output

use crate::transform::ElementSummary;
use colored::Colorize;

/// Print an error message to stderr
pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

/// Print a warning message to stderr
pub fn warning(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

/// Print a success message to stdout
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn hint(msg: &str) {
    eprintln!("{} {}", "hint:".dimmed(), msg.dimmed());
}

/// Print a status update (fetch progress, server lifecycle)
pub fn status(msg: &str) {
    println!("{} {}", "→".blue(), msg);
}

pub fn path(p: &std::path::Path) -> String {
    p.display().to_string().bright_white().to_string()
}

/// Format a label-value pair for summaries
pub fn metric(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {}: {}", label.dimmed(), value.to_string().cyan())
}

pub fn url(u: &str) -> String {
    u.bright_blue().underline().to_string()
}

/// Print a section header
pub fn section(title: &str) {
    println!("\n{}", title.bold());
}

/// Print element counts of a composed view
pub fn element_summary(summary: &ElementSummary) {
    section("Elements");
    println!("{}", metric("Nodes", summary.nodes));
    println!("{}", metric("  units", summary.units));
    println!("{}", metric("  containers", summary.containers));
    println!("{}", metric("Edges", summary.edges));
    println!("{}", metric("  membership", summary.membership_edges));
    println!("{}", metric("  dependency", summary.dependency_edges));
    println!("{}", metric("  hierarchy", summary.hierarchy_edges));
}
