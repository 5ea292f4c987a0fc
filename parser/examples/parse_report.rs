//! Offline report parsing example.
//!
//! Demonstrates how to use `parse_report()` on captured `netsh` output
//! without contacting a DHCP server.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p dhcp-lease-parser --example parse_report
//! ```

use dhcp_lease_parser::{FailurePolicy, ReportLayout, parse_report};

fn main() {
    let report = r#"Changed the current scope context to 10.19.10.0 scope.

Type : N - NONE, D - DHCP B - BOOTP, U - UNSPECIFIED, R - RESERVATION IP
============================================================================================================
IP Address      - Subnet Mask    - Unique ID           - Lease Expires        -Type -Name
============================================================================================================
10.19.10.8      - 255.255.255.0  - 00-23-24-11-92-30   -NEVER EXPIRES            -D-  ComputerOne
10.19.10.11     - 255.255.255.0  - 24-be-05-04-b5-a5   -NEVER EXPIRES            -D-  ComputerTwo
10.19.10.12     - 255.255.255.0
10.19.11.254    - 255.255.255.0  - 00-50-aa-26-a1-9c   -NEVER EXPIRES            -D-  ComputerThree

No of Clients(version 4): 4 in the Scope : 10.19.10.0.
Command completed successfully.
"#;

    let parse = parse_report(report, &ReportLayout::default());

    if let Some(summary) = &parse.summary {
        println!(
            "Server reports {} client(s) in scope {}",
            summary.client_count, summary.scope
        );
    }

    for failure in &parse.failures {
        println!("  line {}: {}", failure.line_number, failure.error);
    }

    match parse.into_records(FailurePolicy::SkipMalformed) {
        Ok(leases) => {
            println!("\nParsed {} lease(s):", leases.len());
            for lease in &leases {
                println!(
                    "  {:<15} {:<17} {} {}",
                    lease.ip_address, lease.mac_address, lease.lease_type, lease.name
                );
            }
        }
        Err(err) => eprintln!("error: {err}"),
    }
}
