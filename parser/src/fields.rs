//! Per-line field extractors.
//!
//! Each extractor takes one data row and returns one field. IP address,
//! subnet mask, expiration, and name are positional (delimiter counts or a
//! fixed column offset). MAC address and type are located by pattern because
//! MAC addresses contain the delimiter themselves.
//!
//! Only the positional extractors follow [`ReportLayout::delimiter`]. The MAC
//! and type patterns always match the `-` netsh prints, whatever delimiter the
//! layout names. The expiration column also ends at the first delimiter, so a
//! date rendered with dashes (`2015-03-05 ...`) is cut after its year.
//!
//! A data row looks like:
//!
//! ```text
//! 10.19.10.8      - 255.255.255.0  - 00-23-24-11-92-30   -NEVER EXPIRES            -D-  ComputerOne
//! ```

use regex::Regex;
use std::sync::LazyLock;

use dhcp_lease_core::LeaseType;

use crate::error::LineError;
use crate::layout::ReportLayout;
use crate::util::{between, nth_index_of};

// SAFETY: These regexes are compile-time constants and are validated by tests.
static MAC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9A-Fa-f]{2}(?:[:-][0-9A-Fa-f]{2}){5}").expect("static regex must compile")
});
static TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-([A-Z])-").expect("static regex must compile"));

/// Text before the first delimiter.
pub fn extract_ip_address<'a>(line: &'a str, layout: &ReportLayout) -> Result<&'a str, LineError> {
    let end = nth_index_of(line, layout.delimiter, 1).ok_or(LineError::MissingDelimiter {
        field: "ip_address",
        delimiter: layout.delimiter,
    })?;
    Ok(line[..end].trim())
}

/// Text strictly between the first and second delimiters.
pub fn extract_subnet_mask<'a>(
    line: &'a str,
    layout: &ReportLayout,
) -> Result<&'a str, LineError> {
    let missing = LineError::MissingDelimiter {
        field: "subnet_mask",
        delimiter: layout.delimiter,
    };
    let first = nth_index_of(line, layout.delimiter, 1).ok_or(missing.clone())?;
    let second = nth_index_of(line, layout.delimiter, 2).ok_or(missing)?;
    Ok(between(line, first + layout.delimiter.len_utf8(), second))
}

/// The single hardware address on the line.
///
/// More than one candidate is an error rather than a guess.
pub fn extract_mac_address(line: &str) -> Result<&str, LineError> {
    single_match(&MAC_RE, line, 0, "mac_address")
}

/// Text from the layout's expiration offset up to the next delimiter.
///
/// Relies on the report padding every earlier column to a fixed width.
pub fn extract_lease_expiration<'a>(
    line: &'a str,
    layout: &ReportLayout,
) -> Result<&'a str, LineError> {
    let column = line
        .get(layout.expiration_offset..)
        .ok_or(LineError::OffsetOutOfRange {
            field: "lease_expiration",
            offset: layout.expiration_offset,
        })?;
    let end = column
        .find(layout.delimiter)
        .ok_or(LineError::MissingDelimiter {
            field: "lease_expiration",
            delimiter: layout.delimiter,
        })?;
    Ok(column[..end].trim())
}

/// The single uppercase letter enclosed by dashes.
///
/// The dashes are literal and do not follow the layout's delimiter.
pub fn extract_lease_type(line: &str) -> Result<LeaseType, LineError> {
    let letter = single_match(&TYPE_RE, line, 1, "type")?;
    letter
        .chars()
        .next()
        .map(LeaseType::from)
        .ok_or(LineError::MissingField { field: "type" })
}

/// Text after the last delimiter; empty when the line ends with one.
pub fn extract_name<'a>(line: &'a str, layout: &ReportLayout) -> Result<&'a str, LineError> {
    let last = line.rfind(layout.delimiter).ok_or(LineError::MissingDelimiter {
        field: "name",
        delimiter: layout.delimiter,
    })?;
    Ok(line[last + layout.delimiter.len_utf8()..].trim())
}

fn single_match<'a>(
    pattern: &Regex,
    line: &'a str,
    group: usize,
    field: &'static str,
) -> Result<&'a str, LineError> {
    let mut captures = pattern.captures_iter(line);
    let first = captures
        .next()
        .and_then(|caps| caps.get(group))
        .ok_or(LineError::MissingField { field })?;
    let extra = captures.count();
    if extra > 0 {
        return Err(LineError::AmbiguousMatch {
            field,
            count: extra + 1,
        });
    }
    Ok(first.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = "10.19.10.8      - 255.255.255.0  - 00-23-24-11-92-30   -NEVER EXPIRES            -D-  ComputerOne";
    const DATED_ROW: &str = "192.168.1.10    - 255.255.255.0  - 00:11:22:aa:bb:cc   -3/5/2015 10:41:32 AM     -R-  printer01";

    fn layout() -> ReportLayout {
        ReportLayout::default()
    }

    #[test]
    fn test_ip_ignores_dashes_inside_mac() {
        assert_eq!(extract_ip_address(ROW, &layout()), Ok("10.19.10.8"));
    }

    #[test]
    fn test_subnet_mask_ignores_dashes_inside_mac() {
        assert_eq!(extract_subnet_mask(ROW, &layout()), Ok("255.255.255.0"));
    }

    #[test]
    fn test_mac_dash_and_colon_forms() {
        assert_eq!(extract_mac_address(ROW), Ok("00-23-24-11-92-30"));
        assert_eq!(extract_mac_address(DATED_ROW), Ok("00:11:22:aa:bb:cc"));
    }

    #[test]
    fn test_expiration_sentinel_and_date() {
        assert_eq!(extract_lease_expiration(ROW, &layout()), Ok("NEVER EXPIRES"));
        assert_eq!(
            extract_lease_expiration(DATED_ROW, &layout()),
            Ok("3/5/2015 10:41:32 AM")
        );
    }

    #[test]
    fn test_type_letter() {
        assert_eq!(extract_lease_type(ROW), Ok(LeaseType::Dhcp));
        assert_eq!(extract_lease_type(DATED_ROW), Ok(LeaseType::Reservation));
    }

    #[test]
    fn test_name_after_last_dash() {
        assert_eq!(extract_name(ROW, &layout()), Ok("ComputerOne"));
        assert_eq!(extract_name(DATED_ROW, &layout()), Ok("printer01"));
    }

    #[test]
    fn test_name_empty_when_nothing_follows() {
        let row = "10.19.10.9      - 255.255.255.0  - 00-23-24-11-92-31   -NEVER EXPIRES            -D-";
        assert_eq!(extract_name(row, &layout()), Ok(""));
    }

    #[test]
    fn test_missing_delimiter_errors() {
        let line = "garbage without separators";
        assert_eq!(
            extract_ip_address(line, &layout()),
            Err(LineError::MissingDelimiter {
                field: "ip_address",
                delimiter: '-'
            })
        );
        assert!(matches!(
            extract_subnet_mask("10.0.0.1 - 255.0.0.0", &layout()),
            Err(LineError::MissingDelimiter { field: "subnet_mask", .. })
        ));
        assert!(matches!(
            extract_name(line, &layout()),
            Err(LineError::MissingDelimiter { field: "name", .. })
        ));
    }

    #[test]
    fn test_expiration_requires_offset_and_trailing_delimiter() {
        assert_eq!(
            extract_lease_expiration("10.0.0.1 - 255.0.0.0 - short", &layout()),
            Err(LineError::OffsetOutOfRange {
                field: "lease_expiration",
                offset: 56
            })
        );
        let no_tail = "10.19.10.8      - 255.255.255.0  - 00-23-24-11-92-30   -NEVER EXPIRES";
        assert!(matches!(
            extract_lease_expiration(no_tail, &layout()),
            Err(LineError::MissingDelimiter { field: "lease_expiration", .. })
        ));
    }

    #[test]
    fn test_custom_delimiter_only_moves_positional_fields() {
        let layout = ReportLayout {
            delimiter: '|',
            ..ReportLayout::default()
        };
        let row = "10.19.10.8 | 255.255.255.0 | 00-23-24-11-92-30 | -D- | ComputerOne";
        assert_eq!(extract_ip_address(row, &layout), Ok("10.19.10.8"));
        assert_eq!(extract_subnet_mask(row, &layout), Ok("255.255.255.0"));
        assert_eq!(extract_name(row, &layout), Ok("ComputerOne"));
        assert_eq!(extract_mac_address(row), Ok("00-23-24-11-92-30"));
        assert_eq!(extract_lease_type(row), Ok(LeaseType::Dhcp));
    }

    #[test]
    fn test_dashed_date_is_cut_at_first_delimiter() {
        let row = format!(
            "{:<16}- {:<15}- {:<20}-{:<25}-D-  host",
            "10.19.10.8", "255.255.255.0", "00-23-24-11-92-30", "2015-03-05 10:41:32"
        );
        assert_eq!(extract_lease_expiration(&row, &layout()), Ok("2015"));
    }

    #[test]
    fn test_two_macs_are_ambiguous() {
        let row = "10.19.10.8      - 255.255.255.0  - 00-23-24-11-92-30   -NEVER EXPIRES            -D-  aa:bb:cc:dd:ee:ff";
        assert_eq!(
            extract_mac_address(row),
            Err(LineError::AmbiguousMatch {
                field: "mac_address",
                count: 2
            })
        );
    }

    #[test]
    fn test_two_type_codes_are_ambiguous() {
        let row = "10.19.10.8      - 255.255.255.0  - 00-23-24-11-92-30   -NEVER EXPIRES            -D-  lab-X-host";
        assert_eq!(
            extract_lease_type(row),
            Err(LineError::AmbiguousMatch {
                field: "type",
                count: 2
            })
        );
    }

    #[test]
    fn test_missing_pattern_fields() {
        let row = "10.19.10.8      - 255.255.255.0  - unknown-client-id   -NEVER EXPIRES            -d-  x";
        assert_eq!(
            extract_mac_address(row),
            Err(LineError::MissingField { field: "mac_address" })
        );
        assert_eq!(
            extract_lease_type(row),
            Err(LineError::MissingField { field: "type" })
        );
    }

    #[test]
    fn test_fields_appear_in_column_order() {
        let layout = layout();
        let fields = [
            extract_ip_address(ROW, &layout).unwrap(),
            extract_subnet_mask(ROW, &layout).unwrap(),
            extract_mac_address(ROW).unwrap(),
            extract_lease_expiration(ROW, &layout).unwrap(),
            "-D-",
            extract_name(ROW, &layout).unwrap(),
        ];
        let mut cursor = 0;
        for field in fields {
            let at = ROW[cursor..].find(field).expect("field must appear after the previous one");
            cursor += at + field.len();
        }
        assert_eq!(cursor, ROW.len());
    }
}
