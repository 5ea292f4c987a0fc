//! Lease record type definitions.
//!
//! This module defines the data model produced by the report parser. Every
//! field is kept as the text found in the report; nothing here validates
//! addresses or masks. The types serialize with [`serde`] so parsed leases can
//! be emitted as JSON, YAML, or CSV by downstream tooling.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Expiration text the DHCP server prints for leases that never expire.
pub const NEVER_EXPIRES: &str = "NEVER EXPIRES";

/// Expiration text the DHCP server prints for reservations with no active client.
pub const INACTIVE: &str = "INACTIVE";

/// Date/time layouts the lease-expiration column is known to use.
///
/// The report is rendered with the server's locale, so several are tried in
/// order. Dash-separated dates are absent: the column ends at the first `-`,
/// so they never reach this point whole.
const EXPIRATION_LAYOUTS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
];

/// How an address assignment was made.
///
/// Parsed from the single-letter type column of the report. Letters outside
/// the documented set are preserved as [`LeaseType::Other`] rather than
/// rejected.
///
/// # Examples
///
/// ```
/// use dhcp_lease_core::LeaseType;
///
/// assert_eq!(LeaseType::from('D'), LeaseType::Dhcp);
/// assert_eq!(LeaseType::Reservation.code(), 'R');
/// assert_eq!(LeaseType::from('X'), LeaseType::Other('X'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "char", into = "char")]
pub enum LeaseType {
    /// `N` - no type recorded.
    None,
    /// `D` - dynamically assigned by DHCP.
    Dhcp,
    /// `B` - assigned by BOOTP.
    Bootp,
    /// `U` - unspecified.
    Unspecified,
    /// `R` - reservation.
    Reservation,
    /// Any other letter found in the type column.
    Other(char),
}

impl LeaseType {
    /// Returns the single-letter code used in the report.
    pub fn code(self) -> char {
        match self {
            Self::None => 'N',
            Self::Dhcp => 'D',
            Self::Bootp => 'B',
            Self::Unspecified => 'U',
            Self::Reservation => 'R',
            Self::Other(ch) => ch,
        }
    }

    /// Returns the legend label the report uses for this code.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Dhcp => "DHCP",
            Self::Bootp => "BOOTP",
            Self::Unspecified => "UNSPECIFIED",
            Self::Reservation => "RESERVATION",
            Self::Other(_) => "OTHER",
        }
    }
}

impl From<char> for LeaseType {
    fn from(ch: char) -> Self {
        match ch {
            'N' => Self::None,
            'D' => Self::Dhcp,
            'B' => Self::Bootp,
            'U' => Self::Unspecified,
            'R' => Self::Reservation,
            other => Self::Other(other),
        }
    }
}

impl From<LeaseType> for char {
    fn from(kind: LeaseType) -> Self {
        kind.code()
    }
}

impl fmt::Display for LeaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(ch) => write!(f, "{ch}"),
            known => f.write_str(known.label()),
        }
    }
}

/// Error returned when a lease type code is not exactly one character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lease type code must be a single character, got '{0}'")]
pub struct ParseLeaseTypeError(pub String);

impl FromStr for LeaseType {
    type Err = ParseLeaseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(Self::from(ch)),
            _ => Err(ParseLeaseTypeError(s.to_string())),
        }
    }
}

/// One client lease as listed by the DHCP server.
///
/// All textual fields hold the value exactly as extracted (trimmed) from a
/// single report line.
///
/// # Examples
///
/// ```
/// use dhcp_lease_core::{LeaseRecord, LeaseType};
///
/// let lease = LeaseRecord::new(
///     "10.19.10.8",
///     "255.255.255.0",
///     "00-23-24-11-92-30",
///     "NEVER EXPIRES",
///     LeaseType::Dhcp,
///     "ComputerOne",
/// );
/// assert!(lease.never_expires());
/// assert_eq!(lease.expires_at(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaseRecord {
    /// Dotted-decimal client address.
    pub ip_address: String,
    /// Dotted-decimal subnet mask.
    pub subnet_mask: String,
    /// Client hardware address, separators and case as printed.
    pub mac_address: String,
    /// Expiration date/time text, or a sentinel such as [`NEVER_EXPIRES`].
    pub lease_expiration: String,
    /// Assignment type code.
    #[serde(rename = "type")]
    pub lease_type: LeaseType,
    /// Client host name; empty when the server has none.
    pub name: String,
}

impl LeaseRecord {
    pub fn new(
        ip_address: impl Into<String>,
        subnet_mask: impl Into<String>,
        mac_address: impl Into<String>,
        lease_expiration: impl Into<String>,
        lease_type: LeaseType,
        name: impl Into<String>,
    ) -> Self {
        Self {
            ip_address: ip_address.into(),
            subnet_mask: subnet_mask.into(),
            mac_address: mac_address.into(),
            lease_expiration: lease_expiration.into(),
            lease_type,
            name: name.into(),
        }
    }

    /// Returns `true` if the lease is listed as never expiring.
    pub fn never_expires(&self) -> bool {
        self.lease_expiration.eq_ignore_ascii_case(NEVER_EXPIRES)
    }

    /// Returns `true` if the lease is an inactive reservation.
    pub fn is_inactive(&self) -> bool {
        self.lease_expiration.eq_ignore_ascii_case(INACTIVE)
    }

    /// Interprets the expiration text as a local date/time.
    ///
    /// Returns `None` for sentinels and for layouts not in the known set.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhcp_lease_core::{LeaseRecord, LeaseType};
    ///
    /// let lease = LeaseRecord::new(
    ///     "10.0.0.5", "255.0.0.0", "aa-bb-cc-dd-ee-ff",
    ///     "3/5/2015 10:41:32 AM", LeaseType::Dhcp, "",
    /// );
    /// let at = lease.expires_at().unwrap();
    /// assert_eq!(at.to_string(), "2015-03-05 10:41:32");
    /// ```
    pub fn expires_at(&self) -> Option<NaiveDateTime> {
        if self.never_expires() || self.is_inactive() {
            return None;
        }
        let text = self.lease_expiration.trim();
        EXPIRATION_LAYOUTS
            .iter()
            .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
    }
}
