//! Pure formatting functions for console output.
//!
//! All terminal styling lives here, separated from prompts and from the
//! orchestration logic.

use console::style;

/// Format and print an error message in red, to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a warning, to stderr.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().bold(), message);
}

/// Display the versions that have a prepared message file.
pub fn display_versions(versions: &[String]) {
    println!("{}", style("Known versions:").bold());
    for version in versions {
        println!("  - {}", version);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_success() {
        // Visual verification test - output is printed to stdout
        display_success("test success");
    }

    #[test]
    fn test_display_versions() {
        display_versions(&["v0.1.0".to_string(), "v0.2.0".to_string()]);
    }
}
