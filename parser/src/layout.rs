//! Fixed report layout and row selection.
//!
//! The `show clients` report has a stable shape: a fixed block of leading
//! boilerplate, one line per lease, and a fixed block of trailing lines. All
//! positional constants the parser depends on live in [`ReportLayout`].
//!
//! Row selection is by index, not by content. If the DHCP server changes how
//! many header or footer lines it prints (new Windows release, different
//! locale), the selection shifts. That fragility is known; adjust the layout
//! through configuration rather than teaching the selector to guess.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Positional schema for one report format.
///
/// # Examples
///
/// ```
/// use dhcp_lease_parser::layout::ReportLayout;
///
/// let layout = ReportLayout::default();
/// assert_eq!(layout, ReportLayout::NETSH_SHOW_CLIENTS);
/// assert_eq!(layout.expiration_offset, 56);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportLayout {
    /// Lines before the first data row: context change, blank, legend,
    /// separator, column header, separator.
    pub header_lines: usize,
    /// Lines after the last data row: blank, client count, completion message.
    pub footer_lines: usize,
    /// Byte offset where the lease-expiration column starts.
    pub expiration_offset: usize,
    /// Column delimiter used by the positional fields. The MAC address and
    /// type patterns always expect `-`.
    pub delimiter: char,
}

impl ReportLayout {
    /// Layout of `netsh dhcp server ... scope ... show clients 1`.
    pub const NETSH_SHOW_CLIENTS: Self = Self {
        header_lines: 6,
        footer_lines: 3,
        expiration_offset: 56,
        delimiter: '-',
    };
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self::NETSH_SHOW_CLIENTS
    }
}

/// A data row together with its 1-based line number in the full report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRow<'a> {
    pub line_number: usize,
    pub text: &'a str,
}

/// Drops the layout's header and footer lines and returns what remains.
///
/// Reports too short to hold both blocks yield no rows.
pub fn select_rows<'a>(lines: &[&'a str], layout: &ReportLayout) -> Vec<DataRow<'a>> {
    let start = layout.header_lines;
    let end = lines.len().saturating_sub(layout.footer_lines);
    if start >= end {
        debug!(
            total_lines = lines.len(),
            header = layout.header_lines,
            footer = layout.footer_lines,
            "Report has no room for data rows"
        );
        return Vec::new();
    }

    debug!(total_lines = lines.len(), rows = end - start, "Selected data rows");
    lines[start..end]
        .iter()
        .enumerate()
        .map(|(offset, &text)| DataRow {
            line_number: start + offset + 1,
            text,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(data: &[&'static str]) -> Vec<&'static str> {
        let mut lines = vec![
            "Changed the current scope context to 10.19.10.0 scope.",
            "",
            "Type : N - NONE, D - DHCP B - BOOTP, U - UNSPECIFIED, R - RESERVATION IP",
            "==========",
            "IP Address      - Subnet Mask    - Unique ID           - Lease Expires        -Type -Name",
            "==========",
        ];
        lines.extend_from_slice(data);
        lines.extend_from_slice(&[
            "",
            "No of Clients(version 4): 2 in the Scope : 10.19.10.0.",
            "Command completed successfully.",
        ]);
        lines
    }

    #[test]
    fn test_selects_rows_between_header_and_footer() {
        let lines = report(&["row one", "row two"]);
        let rows = select_rows(&lines, &ReportLayout::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], DataRow { line_number: 7, text: "row one" });
        assert_eq!(rows[1], DataRow { line_number: 8, text: "row two" });
    }

    #[test]
    fn test_empty_report_body_yields_no_rows() {
        let lines = report(&[]);
        assert!(select_rows(&lines, &ReportLayout::default()).is_empty());
    }

    #[test]
    fn test_short_report_does_not_panic() {
        let lines = vec!["The command needs a valid Scope IP Address."];
        assert!(select_rows(&lines, &ReportLayout::default()).is_empty());
        assert!(select_rows(&[], &ReportLayout::default()).is_empty());
    }

    #[test]
    fn test_selection_is_positional_not_content_based() {
        // One extra trailing line shifts the footer window by one.
        let mut lines = report(&["row one"]);
        lines.push("");
        let rows = select_rows(&lines, &ReportLayout::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].text, "");
    }

    #[test]
    fn test_custom_layout() {
        let layout = ReportLayout {
            header_lines: 1,
            footer_lines: 0,
            ..ReportLayout::default()
        };
        let rows = select_rows(&["header", "a", "b"], &layout);
        assert_eq!(rows.iter().map(|r| r.text).collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
