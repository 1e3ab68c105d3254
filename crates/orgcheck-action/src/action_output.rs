//! GitHub Actions workflow-command output.

use std::io::Write;

/// Escape a message for use as workflow-command data.
pub(crate) fn escape_command_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub(crate) fn render_failure_annotation(message: &str) -> String {
    format!("::error::{}", escape_command_data(message))
}

/// Mark the step as failed. The caller still has to exit non-zero.
pub(crate) fn signal_failure(message: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(stdout, "{}", render_failure_annotation(message));
    let _ = stdout.flush();
}
