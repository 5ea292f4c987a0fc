//! Client-count summary line handling.
//!
//! The report closes with a line such as
//! `No of Clients(version 4): 3 in the Scope : 10.19.10.0.` The count is
//! informational: it is cross-checked against the parsed rows but never
//! decides what gets returned.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// SAFETY: These regexes are compile-time constants and are validated by tests.
static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"No of Clients(?:\(version \d+\))?\s*:\s*(\d+)\s+in the Scope\s*:\s*(\S+?)\.?\s*$")
        .expect("static regex must compile")
});
static ZERO_RECORDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b0 in the Scope\b").expect("static regex must compile"));

/// Count and scope reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub client_count: usize,
    pub scope: String,
}

/// Parses one summary line.
///
/// # Examples
///
/// ```
/// use dhcp_lease_parser::summary::parse_summary;
///
/// let summary = parse_summary("No of Clients(version 4): 3 in the Scope : 10.19.10.0.").unwrap();
/// assert_eq!(summary.client_count, 3);
/// assert_eq!(summary.scope, "10.19.10.0");
/// ```
pub fn parse_summary(line: &str) -> Option<ReportSummary> {
    let caps = SUMMARY_RE.captures(line.trim())?;
    let client_count = caps.get(1)?.as_str().parse().ok()?;
    let scope = caps.get(2)?.as_str().to_string();
    Some(ReportSummary {
        client_count,
        scope,
    })
}

/// Finds the summary among the last `window` lines of a report.
pub fn find_summary(lines: &[&str], window: usize) -> Option<ReportSummary> {
    lines.iter().rev().take(window).find_map(|line| parse_summary(line))
}

/// Returns `true` for the line the server prints when a scope has no clients.
pub fn is_zero_records_line(line: &str) -> bool {
    ZERO_RECORDS_RE.is_match(line)
}
