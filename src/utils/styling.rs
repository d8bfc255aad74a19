//! Terminal styling utilities for console output

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("autolysis").cyan().bold(),
        style(format!("v{}", version)).dim()
    );
    println!(
        "    {}",
        style("Quick-look exploratory analysis for CSV files").dim()
    );
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the input/output locations before the run starts
pub fn print_paths(input: &Path, output_dir: &Path) {
    println!(
        "    {} Input:  {}",
        FOLDER,
        style(truncate_path(input, 60)).dim()
    );
    println!(
        "    {} Output: {}",
        CHART,
        style(truncate_path(output_dir, 60)).dim()
    );
    println!();
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a recoverable problem
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print a fatal problem. Goes to stdout like every other line of the run.
pub fn print_error(message: &str) {
    println!("    {} {}", style("✗").red().bold(), style(message).red());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Analysis complete!").green().bold()
    );
    println!();
}

/// Print the usage line shown for a wrong argument count
pub fn print_usage() {
    println!("Usage: autolysis <path_to_csv_file>");
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
