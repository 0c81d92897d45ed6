//! Command-line value validation

use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate};

/// Date format used by daily note names and date tags
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Get the current date in local timezone, formatted as `YYYY-MM-DD`
pub fn local_date_today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Parse and validate a `--today` override
///
/// # Arguments
/// * `date_str` - Date string in YYYY-MM-DD format
///
/// # Returns
/// The same date, normalized to zero-padded `YYYY-MM-DD`
pub fn parse_date_arg(date_str: &str) -> Result<String> {
    NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|_| {
            anyhow!(
                "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
                date_str
            )
        })
}

/// Resolve an optional `--today` override against the local clock
pub fn resolve_today(date_arg: Option<&str>) -> Result<String> {
    match date_arg {
        Some(date_str) => parse_date_arg(date_str),
        None => Ok(local_date_today()),
    }
}
