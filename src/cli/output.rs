//! CLI output: error mapping from domain errors to the printed CLI surface.

use crate::error::DemoError;

/// Render an error for stdout: `Error: <message>`, followed by the captured
/// command output or response body when there is one. Help text is printed as is.
pub fn map_error(e: &DemoError) -> String {
    match e {
        DemoError::Help(text) => text.trim_end().to_string(),
        _ => match e.detail().map(str::trim_end) {
            Some(detail) if !detail.is_empty() => format!("Error: {}\n{}", e, detail),
            _ => format!("Error: {}", e),
        },
    }
}
