/// Output: the YAML document to a file or stdout, and the error report to stderr.
use std::io::{IsTerminal, Write};
use std::path::Path;

use anstyle::{AnsiColor, Color, Style};

use crate::ami::AmiError;

const RED: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Write `document` to `out_file` (created or truncated), or to stdout when `None`.
/// Both targets receive the same bytes.
///
/// # Errors
///
/// Returns `AmiError::Write` or `AmiError::Stdout` on I/O failure.
pub fn emit(document: &str, out_file: Option<&Path>) -> Result<(), AmiError> {
    match out_file {
        Some(path) => std::fs::write(path, document).map_err(|source| AmiError::Write {
            path: path.to_owned(),
            source,
        }),
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            out.write_all(document.as_bytes())
                .and_then(|()| out.flush())
                .map_err(AmiError::Stdout)
        }
    }
}

/// Report a fatal error on stderr: the cause chain, then a one-line summary in red.
///
/// No backtrace is printed. The error is only wrapped here, so one would point
/// at this reporter rather than at the failing call.
pub fn write_error(err: AmiError) {
    let err = anyhow::Error::new(err);
    let stderr = std::io::stderr();
    let color = stderr.is_terminal();
    let mut out = stderr.lock();
    let _ = writeln!(out, "{}", error_trace(&err));
    let _ = writeln!(out, "{}", error_summary(&err, color));
}

fn error_trace(err: &anyhow::Error) -> String {
    let mut trace = format!("Error: {err}");
    for (i, cause) in err.chain().skip(1).enumerate() {
        trace.push_str(&format!("\n  {i}: {cause}"));
    }
    trace
}

fn error_summary(err: &anyhow::Error, color: bool) -> String {
    let message = format!("Error finding base AMI ID.\nMessage: {err:#}");
    if color {
        format!("{RED}{message}{RED:#}")
    } else {
        message
    }
}
