//! Error types for autoscaling configuration assembly.

use thiserror::Error;

/// Result type alias for single-field validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A scalar value lies outside its permitted domain.
    #[error("{field} out of range: {value} ({expected})")]
    Range {
        field: &'static str,
        value: i64,
        expected: &'static str,
    },

    #[error("invalid operation type: {0:?} (expected one of PUT, GET)")]
    InvalidOperationType(String),

    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("min_shards ({min}) exceeds max_shards ({max})")]
    InconsistentBounds { min: u32, max: u32 },

    /// A direction policy was staged without any scaling amount.
    #[error("{direction} policy needs either scale_count or scale_pct")]
    AmbiguousAmount { direction: &'static str },

    #[error("scale-up and scale-down share the same threshold ({threshold_pct}%)")]
    DegenerateThresholds { threshold_pct: u8 },
}

/// Failure returned by [`AutoscalingConfigurationBuilder::build`].
///
/// Wraps exactly one [`ConfigError`]; no partially built configuration is
/// ever handed out alongside it.
///
/// [`AutoscalingConfigurationBuilder::build`]: crate::AutoscalingConfigurationBuilder::build
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to build autoscaling configuration: {kind}")]
pub struct ConfigurationBuildError {
    #[source]
    kind: ConfigError,
}

impl ConfigurationBuildError {
    /// The violated constraint.
    pub fn kind(&self) -> &ConfigError {
        &self.kind
    }

    pub fn into_kind(self) -> ConfigError {
        self.kind
    }
}

impl From<ConfigError> for ConfigurationBuildError {
    fn from(kind: ConfigError) -> Self {
        Self { kind }
    }
}
