//! Printing results and errors.

use colored::Colorize;
use serde_json::Value;

use flagscan_core::FlagsError;

/// Render a value as raw or pretty JSON
pub fn render_json(value: &Value, raw: bool) -> Result<String, serde_json::Error> {
    if raw {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

/// Render an error for stderr.
///
/// Validation failures print their report as JSON below the headline so the
/// field list stays machine-readable.
pub fn render_error(err: &anyhow::Error, color: bool) -> String {
    let prefix = if color {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    };

    let report = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<FlagsError>())
        .and_then(FlagsError::report);

    match report {
        Some(report) => format!("{} {}\n{}", prefix, "Invalid CLI Flags", report),
        None => format!("{} {:#}", prefix, err),
    }
}
