//! Console output for the labeling run.
//!
//! Plain coloured lines for people reading the job log, plus the workflow
//! command the runner turns into a failure annotation.

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Escape data for a `::command::data` workflow command.
pub fn escape_command_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Build the `::error::` workflow command for a message.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_command_data(message))
}

/// Mark the run as failed: annotate the job and print the error.
pub fn report_failure(message: &str) {
    println!("{}", error_command(message));
    display_error(message);
}
