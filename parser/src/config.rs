//! Query configuration.
//!
//! Defines the YAML-serializable settings for querying one DHCP server: which
//! scopes to list, how to run `netsh`, and how to treat malformed rows.
//! Unknown keys are rejected, so a misspelled setting fails the load instead of
//! silently keeping its default.
//!
//! # Example YAML
//!
//! ```yaml
//! server: dhcp01.example.com
//! scopes:
//!   - 10.19.10.0
//!   - 10.19.11.0
//! netsh: netsh
//! timeout_secs: 30
//! jobs: 2
//! failure_policy: skip_malformed
//! layout:
//!   header_lines: 6
//!   footer_lines: 3
//!   expiration_offset: 56
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::builder::FailurePolicy;
use crate::error::{LeaseError, Result};
use crate::layout::ReportLayout;
use crate::netsh::{DEFAULT_NETSH, NetshCommand};

/// Settings for one server query run.
///
/// # Examples
///
/// ```
/// use dhcp_lease_parser::config::QueryConfig;
/// use dhcp_lease_parser::builder::FailurePolicy;
///
/// let config: QueryConfig = serde_yaml::from_str("server: dhcp01\nscopes: [10.19.10.0]\n").unwrap();
/// assert_eq!(config.netsh.to_str(), Some("netsh"));
/// assert_eq!(config.timeout_secs, None);
/// assert_eq!(config.failure_policy, FailurePolicy::FailFast);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    /// DHCP server host name or address.
    pub server: String,
    /// Scopes (network addresses) to list.
    pub scopes: Vec<String>,
    /// Program used to produce the report.
    #[serde(default = "default_netsh")]
    pub netsh: PathBuf,
    /// Seconds to wait for one report before killing the command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Scopes queried in parallel.
    #[serde(default = "default_jobs")]
    pub jobs: usize,
    /// What to do with rows that fail extraction.
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Positional constants of the report.
    #[serde(default)]
    pub layout: ReportLayout,
}

fn default_netsh() -> PathBuf {
    PathBuf::from(DEFAULT_NETSH)
}

fn default_jobs() -> usize {
    1
}

impl QueryConfig {
    /// Creates a config for `server` with defaults for everything else.
    pub fn new(server: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            server: server.into(),
            scopes,
            netsh: default_netsh(),
            timeout_secs: None,
            jobs: default_jobs(),
            failure_policy: FailurePolicy::default(),
            layout: ReportLayout::default(),
        }
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](LeaseError::Io) if the file cannot be read,
    /// [`Yaml`](LeaseError::Yaml) if parsing fails, or
    /// [`InvalidConfig`](LeaseError::InvalidConfig) if the values are unusable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            return Err(LeaseError::InvalidConfig("server must not be empty".into()));
        }
        if self.scopes.iter().any(|s| s.trim().is_empty()) {
            return Err(LeaseError::InvalidConfig("scopes must not contain empty entries".into()));
        }
        if self.jobs == 0 {
            return Err(LeaseError::InvalidConfig("jobs must be at least 1".into()));
        }
        if self.timeout_secs == Some(0) {
            return Err(LeaseError::InvalidConfig("timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    /// Builds the report command these settings describe.
    pub fn netsh_command(&self) -> NetshCommand {
        let command = NetshCommand::new().with_program(&self.netsh);
        match self.timeout_secs {
            Some(secs) => command.with_timeout(Duration::from_secs(secs)),
            None => command,
        }
    }
}
