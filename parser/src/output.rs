//! Output formatting for lease records.

use serde::{Deserialize, Serialize};

use dhcp_lease_core::LeaseRecord;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
    Csv,
}

/// Records listed for one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeLeases {
    pub scope: String,
    pub leases: Vec<LeaseRecord>,
}

const COLUMNS: [&str; 6] = [
    "ip_address",
    "subnet_mask",
    "mac_address",
    "lease_expiration",
    "type",
    "name",
];

/// Formats a flat record list in the requested output format.
pub fn format_leases(records: &[LeaseRecord], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(records)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(records).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(to_markdown(None, records)),
        OutputFormat::Table => Ok(to_table(None, records)),
        OutputFormat::Csv => to_csv(false, records.iter().map(|r| CsvRow::new(None, r))),
    }
}

/// Formats per-scope results; tabular formats gain a leading scope column.
pub fn format_scopes(scopes: &[ScopeLeases], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(scopes)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(scopes).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(scopes
            .iter()
            .map(|s| to_markdown(Some(&s.scope), &s.leases))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Table => Ok(scopes
            .iter()
            .map(|s| to_table(Some(&s.scope), &s.leases))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Csv => {
            let rows = scopes.iter().flat_map(|s| {
                s.leases
                    .iter()
                    .map(move |record| CsvRow::new(Some(s.scope.as_str()), record))
            });
            to_csv(true, rows)
        }
    }
}

fn cells(record: &LeaseRecord) -> [String; 6] {
    [
        record.ip_address.clone(),
        record.subnet_mask.clone(),
        record.mac_address.clone(),
        record.lease_expiration.clone(),
        record.lease_type.code().to_string(),
        record.name.clone(),
    ]
}

fn to_markdown(scope: Option<&str>, records: &[LeaseRecord]) -> String {
    let mut out = String::new();

    if let Some(scope) = scope {
        out.push_str(&format!("## Scope {scope}\n\n"));
    }
    if records.is_empty() {
        out.push_str("_No leases._\n");
        return out;
    }

    out.push_str("| IP Address | Subnet Mask | MAC Address | Lease Expires | Type | Name |\n");
    out.push_str("|------------|-------------|-------------|---------------|------|------|\n");
    for record in records {
        let row = cells(record).map(|cell| cell.replace('|', "\\|"));
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }

    out
}

fn to_table(scope: Option<&str>, records: &[LeaseRecord]) -> String {
    let headers = ["IP Address", "Subnet Mask", "MAC Address", "Lease Expires", "Type", "Name"];
    let rows: Vec<[String; 6]> = records.iter().map(cells).collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = String::new();
    if let Some(scope) = scope {
        out.push_str(&format!("Scope: {scope}  Leases: {}\n", records.len()));
    }
    out.push_str(&render(&headers.map(String::from)));
    out.push_str(&render(&widths.map(|w| "-".repeat(w))));
    for row in &rows {
        out.push_str(&render(row));
    }
    out
}

/// One CSV record; `scope` is only present in per-scope output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
    ip_address: &'a str,
    subnet_mask: &'a str,
    mac_address: &'a str,
    lease_expiration: &'a str,
    #[serde(rename = "type")]
    lease_type: char,
    name: &'a str,
}

impl<'a> CsvRow<'a> {
    fn new(scope: Option<&'a str>, record: &'a LeaseRecord) -> Self {
        Self {
            scope,
            ip_address: &record.ip_address,
            subnet_mask: &record.subnet_mask,
            mac_address: &record.mac_address,
            lease_expiration: &record.lease_expiration,
            lease_type: record.lease_type.code(),
            name: &record.name,
        }
    }
}

/// Writes the header unconditionally so an empty result is still valid CSV.
fn to_csv<'a>(
    with_scope: bool,
    rows: impl IntoIterator<Item = CsvRow<'a>>,
) -> Result<String, String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    let scope_column = with_scope.then_some("scope");
    writer
        .write_record(scope_column.into_iter().chain(COLUMNS))
        .map_err(|e| format!("CSV serialization failed: {e}"))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| format!("CSV serialization failed: {e}"))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| format!("CSV serialization failed: {e}"))?;
    String::from_utf8(bytes).map_err(|e| format!("CSV output is not UTF-8: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dhcp_lease_core::LeaseType;

    fn sample() -> Vec<LeaseRecord> {
        vec![
            LeaseRecord::new(
                "10.19.10.8",
                "255.255.255.0",
                "00-23-24-11-92-30",
                "NEVER EXPIRES",
                LeaseType::Dhcp,
                "ComputerOne",
            ),
            LeaseRecord::new(
                "10.19.10.20",
                "255.255.255.0",
                "24-be-05-04-b5-a5",
                "3/5/2015 10:41:32 AM",
                LeaseType::Reservation,
                "lab, bench 2",
            ),
        ]
    }

    #[test]
    fn test_json_uses_type_letter() {
        let json = format_leases(&sample(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["type"], "D");
        assert_eq!(parsed[1]["type"], "R");
        assert_eq!(parsed[1]["lease_expiration"], "3/5/2015 10:41:32 AM");
    }

    #[test]
    fn test_csv_quotes_embedded_commas() {
        let csv = format_leases(&sample(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "ip_address,subnet_mask,mac_address,lease_expiration,type,name"
        );
        assert_eq!(
            lines[2],
            "10.19.10.20,255.255.255.0,24-be-05-04-b5-a5,3/5/2015 10:41:32 AM,R,\"lab, bench 2\""
        );
    }

    #[test]
    fn test_csv_quotes_line_breaks_and_quotes() {
        let records = vec![LeaseRecord::new(
            "10.19.10.8",
            "255.255.255.0",
            "00-23-24-11-92-30",
            "NEVER EXPIRES",
            LeaseType::Dhcp,
            "a\rb \"lab\"",
        )];
        let csv = format_leases(&records, OutputFormat::Csv).unwrap();
        assert!(csv.ends_with(",D,\"a\rb \"\"lab\"\"\"\n"), "unexpected CSV: {csv:?}");
    }

    #[test]
    fn test_csv_empty_list_keeps_header() {
        let csv = format_leases(&[], OutputFormat::Csv).unwrap();
        assert_eq!(
            csv,
            "ip_address,subnet_mask,mac_address,lease_expiration,type,name\n"
        );
    }

    #[test]
    fn test_table_aligns_columns() {
        let table = format_leases(&sample(), OutputFormat::Table).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        let mac_col = lines[0].find("MAC Address").unwrap();
        assert_eq!(lines[2].find("00-23-24-11-92-30"), Some(mac_col));
        assert_eq!(lines[3].find("24-be-05-04-b5-a5"), Some(mac_col));
    }

    #[test]
    fn test_markdown_empty_scope() {
        let scopes = vec![ScopeLeases {
            scope: "10.19.10.0".to_string(),
            leases: Vec::new(),
        }];
        let md = format_scopes(&scopes, OutputFormat::Markdown).unwrap();
        assert!(md.starts_with("## Scope 10.19.10.0"));
        assert!(md.contains("_No leases._"));
    }

    #[test]
    fn test_scoped_csv_has_scope_column() {
        let scopes = vec![ScopeLeases {
            scope: "10.19.10.0".to_string(),
            leases: sample(),
        }];
        let csv = format_scopes(&scopes, OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("scope,ip_address"));
        assert!(lines.next().unwrap().starts_with("10.19.10.0,10.19.10.8,"));
    }
}
