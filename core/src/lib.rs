//! Core lease types for parsed DHCP server reports.
//!
//! This crate defines the value types produced when a DHCP server's
//! lease-listing report is parsed:
//!
//! - [`LeaseRecord`] - one client lease (address, mask, MAC, expiration,
//!   type, host name) exactly as printed by the server.
//! - [`LeaseType`] - the single-letter assignment type code.
//!
//! Parsing lives in the `dhcp-lease-parser` crate; this crate has no
//! knowledge of the report layout.
//!
//! # Example
//!
//! ```
//! use dhcp_lease_core::*;
//!
//! let lease = LeaseRecord::new(
//!     "10.19.10.11",
//!     "255.255.255.0",
//!     "24-be-05-04-b5-a5",
//!     NEVER_EXPIRES,
//!     LeaseType::Dhcp,
//!     "ComputerTwo",
//! );
//!
//! assert_eq!(lease.lease_type.code(), 'D');
//! assert!(lease.never_expires());
//! ```

mod types;

pub use types::*;
