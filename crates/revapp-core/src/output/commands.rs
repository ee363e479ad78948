//! GitHub Actions workflow command rendering

use tracing::Level;

/// Escape command data (percent-encoding the characters the runner parses)
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Render one log line as the workflow command matching its level.
///
/// INFO stays a plain line; the runner prints it verbatim, so it is not
/// percent-encoded and line breaks are folded into spaces.
pub fn workflow_command(level: Level, text: &str) -> String {
    let command = match level {
        Level::ERROR => "error",
        Level::WARN => "warning",
        Level::INFO => return text.replace(['\r', '\n'], " "),
        _ => "debug",
    };
    format!("::{}::{}", command, escape_data(text))
}
