//! Record assembly over selected report rows.
//!
//! The builder walks the selected rows in order, skips blank lines and the
//! zero-clients sentinel, and runs every field extractor on the rest. Each
//! row ends up as either a [`LeaseRecord`] or a [`LineFailure`]; nothing is
//! dropped silently and nothing aborts mid-walk. Callers then pick a
//! [`FailurePolicy`] to turn the batch into a plain record list.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use dhcp_lease_core::LeaseRecord;

use crate::error::{LeaseError, LineError, Result};
use crate::fields::{
    extract_ip_address, extract_lease_expiration, extract_lease_type, extract_mac_address,
    extract_name, extract_subnet_mask,
};
use crate::layout::{DataRow, ReportLayout, select_rows};
use crate::summary::{ReportSummary, find_summary, is_zero_records_line};

/// How extraction failures are handled when collapsing a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// The first failing line fails the whole batch.
    #[default]
    FailFast,
    /// Failing lines are left out; the rest is returned.
    SkipMalformed,
}

/// A data row that could not become a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFailure {
    /// 1-based line number within the full report.
    pub line_number: usize,
    pub line: String,
    pub error: LineError,
}

/// Everything learned from one report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportParse {
    /// Records in report order.
    pub records: Vec<LeaseRecord>,
    /// Rows that failed extraction, in report order.
    pub failures: Vec<LineFailure>,
    /// Blank and zero-clients rows that were passed over.
    pub skipped: usize,
    /// The server's own client count, when the summary line was found.
    pub summary: Option<ReportSummary>,
}

impl ReportParse {
    /// Returns `true` when every non-skipped row produced a record.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Collapses the batch into records according to `policy`.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::FailFast`], returns
    /// [`LeaseError::MalformedLine`] for the first failing row.
    pub fn into_records(self, policy: FailurePolicy) -> Result<Vec<LeaseRecord>> {
        match (policy, self.failures.into_iter().next()) {
            (FailurePolicy::FailFast, Some(failure)) => Err(LeaseError::MalformedLine {
                line_number: failure.line_number,
                source: failure.error,
            }),
            _ => Ok(self.records),
        }
    }
}

/// Runs all field extractors on one data row.
///
/// # Errors
///
/// Returns the first [`LineError`] raised by an extractor, so a record is
/// never built with a missing field.
pub fn parse_line(line: &str, layout: &ReportLayout) -> std::result::Result<LeaseRecord, LineError> {
    Ok(LeaseRecord {
        ip_address: extract_ip_address(line, layout)?.to_string(),
        subnet_mask: extract_subnet_mask(line, layout)?.to_string(),
        mac_address: extract_mac_address(line)?.to_string(),
        lease_expiration: extract_lease_expiration(line, layout)?.to_string(),
        lease_type: extract_lease_type(line)?,
        name: extract_name(line, layout)?.to_string(),
    })
}

/// Builds records from already-selected rows.
pub fn build_records(rows: &[DataRow<'_>], layout: &ReportLayout) -> ReportParse {
    let mut parse = ReportParse::default();

    for row in rows {
        if row.text.trim().is_empty() || is_zero_records_line(row.text) {
            parse.skipped += 1;
            continue;
        }

        match parse_line(row.text, layout) {
            Ok(record) => parse.records.push(record),
            Err(error) => {
                warn!(line_number = row.line_number, error = %error, "Skipping malformed lease row");
                parse.failures.push(LineFailure {
                    line_number: row.line_number,
                    line: row.text.to_string(),
                    error,
                });
            }
        }
    }

    parse
}

/// Selects rows from a complete report and builds records from them.
///
/// # Examples
///
/// ```
/// use dhcp_lease_parser::builder::parse_report;
/// use dhcp_lease_parser::layout::ReportLayout;
///
/// let report = "\
/// Changed the current scope context to 10.19.10.0 scope.
///
/// Type : N - NONE, D - DHCP B - BOOTP, U - UNSPECIFIED, R - RESERVATION IP
/// ===============================================================================
/// IP Address      - Subnet Mask    - Unique ID           - Lease Expires        -Type -Name
/// ===============================================================================
/// 10.19.10.8      - 255.255.255.0  - 00-23-24-11-92-30   -NEVER EXPIRES            -D-  ComputerOne
///
/// No of Clients(version 4): 1 in the Scope : 10.19.10.0.
/// Command completed successfully.
/// ";
///
/// let parse = parse_report(report, &ReportLayout::default());
/// assert_eq!(parse.records.len(), 1);
/// assert_eq!(parse.records[0].name, "ComputerOne");
/// assert_eq!(parse.summary.unwrap().client_count, 1);
/// ```
pub fn parse_report(text: &str, layout: &ReportLayout) -> ReportParse {
    let lines: Vec<&str> = text.lines().collect();
    let rows = select_rows(&lines, layout);
    let mut parse = build_records(&rows, layout);

    parse.summary = find_summary(&lines, layout.footer_lines + 1);
    match &parse.summary {
        Some(summary) if summary.client_count != parse.records.len() + parse.failures.len() => {
            warn!(
                scope = %summary.scope,
                reported = summary.client_count,
                parsed = parse.records.len(),
                failed = parse.failures.len(),
                "Client count in report summary does not match parsed rows"
            );
        }
        Some(_) => {}
        None => debug!("Report summary line not found"),
    }

    parse
}
