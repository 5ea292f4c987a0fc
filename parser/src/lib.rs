//! DHCP lease report parsing.
//!
//! This crate turns the fixed-width report printed by
//! `netsh dhcp server \\<server> scope <scope> show clients 1` into
//! [`LeaseRecord`]s. The pipeline is a single pass:
//!
//! 1. [`layout::select_rows`] drops the fixed header and footer blocks.
//! 2. [`builder::build_records`] skips blank and zero-client rows and runs the
//!    [`fields`] extractors on every other row.
//! 3. The resulting [`ReportParse`] is collapsed with a [`FailurePolicy`].
//!
//! # Main entry points
//!
//! - [`parse_report`] - parse captured report text without running anything.
//! - [`query_scope`] - fetch one scope's report from a [`LeaseSource`] and
//!   parse it.
//! - [`list_leases`] - run `netsh` for one scope and return its leases,
//!   failing on the first malformed row.
//!
//! # Example
//!
//! ```
//! use dhcp_lease_parser::{FailurePolicy, ReportLayout, parse_report};
//!
//! let report = "\
//! Changed the current scope context to 10.19.10.0 scope.
//!
//! Type : N - NONE, D - DHCP B - BOOTP, U - UNSPECIFIED, R - RESERVATION IP
//! ===============================================================================
//! IP Address      - Subnet Mask    - Unique ID           - Lease Expires        -Type -Name
//! ===============================================================================
//! 10.19.10.11     - 255.255.255.0  - 24-be-05-04-b5-a5   -NEVER EXPIRES            -D-  ComputerTwo
//!
//! No of Clients(version 4): 1 in the Scope : 10.19.10.0.
//! Command completed successfully.
//! ";
//!
//! let leases = parse_report(report, &ReportLayout::default())
//!     .into_records(FailurePolicy::FailFast)
//!     .unwrap();
//! assert_eq!(leases[0].mac_address, "24-be-05-04-b5-a5");
//! ```
//!
//! # Crate type
//!
//! This is a **library-only crate**. The `dhcp-lease-cli` crate provides the
//! `lease-report` binary.
//!
//! [`LeaseRecord`]: dhcp_lease_core::LeaseRecord

pub mod builder;
pub mod config;
pub mod error;
pub mod fields;
pub mod layout;
pub mod netsh;
pub mod output;
pub mod summary;
pub mod util;

use tracing::info;

use dhcp_lease_core::LeaseRecord;

pub use builder::{FailurePolicy, LineFailure, ReportParse, parse_report};
pub use error::{LeaseError, LineError, Result};
pub use layout::ReportLayout;
pub use netsh::{LeaseSource, NetshCommand, StaticReport};

/// Fetches one scope's report from `source` and parses it.
///
/// The source is called exactly once.
///
/// # Examples
///
/// ```
/// use dhcp_lease_parser::{ReportLayout, StaticReport, query_scope};
///
/// let source = StaticReport::new("The command needs a valid Scope IP Address.\n");
/// let parse = query_scope(&source, "dhcp01", "10.19.10.0", &ReportLayout::default()).unwrap();
/// assert!(parse.records.is_empty());
/// ```
pub fn query_scope(
    source: &dyn LeaseSource,
    server: &str,
    scope: &str,
    layout: &ReportLayout,
) -> Result<ReportParse> {
    let report = source.fetch_report(server, scope)?;
    let parse = parse_report(&report, layout);
    info!(
        server,
        scope,
        leases = parse.records.len(),
        failures = parse.failures.len(),
        "Parsed scope lease report"
    );
    Ok(parse)
}

/// Lists the leases of `scope` on `server` by running `netsh`.
///
/// Uses the stock report layout, no timeout, and fails on the first row that
/// cannot be parsed.
///
/// # Errors
///
/// Returns a command error if `netsh` cannot be run or exits unsuccessfully,
/// and [`LeaseError::MalformedLine`] for the first unparseable row.
///
/// # Examples
///
/// ```no_run
/// let leases = dhcp_lease_parser::list_leases("dhcp01", "10.19.10.0").unwrap();
/// for lease in &leases {
///     println!("{} {} {}", lease.ip_address, lease.mac_address, lease.name);
/// }
/// ```
pub fn list_leases(server: &str, scope: &str) -> Result<Vec<LeaseRecord>> {
    query_scope(&NetshCommand::new(), server, scope, &ReportLayout::default())?
        .into_records(FailurePolicy::FailFast)
}
