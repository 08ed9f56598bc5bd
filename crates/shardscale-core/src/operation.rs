//! Stream operations whose metrics drive scaling.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;

/// Which stream operation's throughput is compared against the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MonitoredOperation {
    /// Write throughput.
    #[serde(rename = "PUT")]
    Put,
    /// Read throughput.
    #[serde(rename = "GET")]
    Get,
}

impl MonitoredOperation {
    pub const ALL: [MonitoredOperation; 2] = [MonitoredOperation::Put, MonitoredOperation::Get];

    pub fn as_str(&self) -> &'static str {
        match self {
            MonitoredOperation::Put => "PUT",
            MonitoredOperation::Get => "GET",
        }
    }
}

impl FromStr for MonitoredOperation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidOperationType(s.to_string()))
    }
}

impl fmt::Display for MonitoredOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
