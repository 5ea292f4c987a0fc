use std::fs;
use std::path::PathBuf;

use dhcp_lease_core::{LeaseRecord, LeaseType};
use dhcp_lease_parser::{
    FailurePolicy, LeaseError, LineError, ReportLayout, StaticReport, parse_report, query_scope,
};

#[test]
fn test_sample_report_yields_three_records_in_order() {
    let report = fixture("show-clients-sample.txt");
    let leases = parse_report(&report, &ReportLayout::default())
        .into_records(FailurePolicy::FailFast)
        .expect("sample report should parse cleanly");

    let expected = vec![
        LeaseRecord::new(
            "10.19.10.8",
            "255.255.255.0",
            "00-23-24-11-92-30",
            "NEVER EXPIRES",
            LeaseType::Dhcp,
            "ComputerOne",
        ),
        LeaseRecord::new(
            "10.19.10.11",
            "255.255.255.0",
            "24-be-05-04-b5-a5",
            "NEVER EXPIRES",
            LeaseType::Dhcp,
            "ComputerTwo",
        ),
        LeaseRecord::new(
            "10.19.11.254",
            "255.255.255.0",
            "00-50-aa-26-a1-9c",
            "NEVER EXPIRES",
            LeaseType::Dhcp,
            "ComputerThree",
        ),
    ];
    assert_eq!(leases, expected);
}

#[test]
fn test_sample_report_summary_matches_rows() {
    let parse = parse_report(&fixture("show-clients-sample.txt"), &ReportLayout::default());
    let summary = parse.summary.as_ref().expect("summary line should be found");
    assert_eq!(summary.client_count, 3);
    assert_eq!(summary.scope, "10.19.10.0");
    assert!(parse.is_clean());
    assert_eq!(parse.skipped, 0);
}

#[test]
fn test_empty_scope_is_not_an_error() {
    let parse = parse_report(&fixture("show-clients-empty.txt"), &ReportLayout::default());
    assert_eq!(parse.summary.as_ref().map(|s| s.client_count), Some(0));

    let leases = parse
        .into_records(FailurePolicy::FailFast)
        .expect("empty scope should not fail");
    assert!(leases.is_empty());
}

#[test]
fn test_mixed_crlf_report() {
    let leases = parse_report(&fixture("show-clients-mixed-crlf.txt"), &ReportLayout::default())
        .into_records(FailurePolicy::FailFast)
        .expect("mixed report should parse cleanly");

    assert_eq!(leases.len(), 4);

    assert_eq!(leases[0].mac_address, "00:11:22:aa:bb:cc");
    assert_eq!(leases[0].name, "laptop01.corp.example");
    assert_eq!(
        leases[0].expires_at().map(|t| t.to_string()).as_deref(),
        Some("2015-03-05 10:41:32")
    );

    assert_eq!(leases[1].lease_type, LeaseType::Reservation);
    assert!(leases[1].is_inactive());

    assert_eq!(leases[2].lease_type, LeaseType::Bootp);
    assert_eq!(leases[2].name, "");
    assert!(leases[2].never_expires());

    assert_eq!(leases[3].lease_type, LeaseType::Unspecified);
    assert_eq!(leases[3].lease_expiration, "3/6/2015 8:00:00 PM");
    assert!(leases.iter().all(|l| l.subnet_mask == "255.255.255.0"));
}

#[test]
fn test_malformed_report_collects_failures() {
    let parse = parse_report(&fixture("show-clients-malformed.txt"), &ReportLayout::default());

    let names: Vec<&str> = parse.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["ComputerOne", "ComputerTwo", "ComputerThree"]);

    assert_eq!(parse.failures.len(), 2);
    assert_eq!(parse.failures[0].line_number, 8);
    assert_eq!(
        parse.failures[0].error,
        LineError::AmbiguousMatch {
            field: "mac_address",
            count: 2
        }
    );
    assert_eq!(parse.failures[1].line_number, 10);
    assert!(matches!(
        parse.failures[1].error,
        LineError::MissingDelimiter {
            field: "subnet_mask",
            ..
        }
    ));
}

#[test]
fn test_malformed_report_policies() {
    let report = fixture("show-clients-malformed.txt");

    let err = parse_report(&report, &ReportLayout::default())
        .into_records(FailurePolicy::FailFast)
        .unwrap_err();
    assert!(matches!(
        err,
        LeaseError::MalformedLine {
            line_number: 8,
            source: LineError::AmbiguousMatch { .. }
        }
    ));

    let leases = parse_report(&report, &ReportLayout::default())
        .into_records(FailurePolicy::SkipMalformed)
        .expect("skip policy should not fail");
    assert_eq!(leases.len(), 3);
}

#[test]
fn test_query_scope_uses_source_output() {
    let source = StaticReport::new(fixture("show-clients-sample.txt"));
    let parse = query_scope(&source, "dhcp01", "10.19.10.0", &ReportLayout::default())
        .expect("static source cannot fail");
    assert_eq!(parse.records.len(), 3);
    assert_eq!(parse.records[2].ip_address, "10.19.11.254");
}

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(path).expect("fixture file must be readable")
}
