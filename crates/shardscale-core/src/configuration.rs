//! The finalized autoscaling configuration for one stream.

use serde::Serialize;

use crate::builder::AutoscalingConfigurationBuilder;
use crate::error::{ConfigError, ConfigResult};
use crate::operation::MonitoredOperation;
use crate::policy::ScalingDirectionPolicy;

/// Region used when none is staged.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Shard-count refresh interval (minutes) used when none is staged.
pub const DEFAULT_REFRESH_SHARDS_MINS: u32 = 10;

/// Immutable, validated scaling parameters for one stream.
///
/// Only obtainable through [`AutoscalingConfigurationBuilder::build`], so
/// every instance satisfies:
///
/// - `stream_name` is non-empty;
/// - `min_shards <= max_shards` when both are set, and neither is zero;
/// - scale-up and scale-down thresholds differ when both policies exist;
/// - `refresh_shards_number_after_min > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoscalingConfiguration {
    pub(crate) stream_name: String,
    pub(crate) region: String,
    pub(crate) scale_on_operation: MonitoredOperation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) scale_up: Option<ScalingDirectionPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) scale_down: Option<ScalingDirectionPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) min_shards: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) max_shards: Option<u32>,
    pub(crate) refresh_shards_number_after_min: u32,
}

impl AutoscalingConfiguration {
    pub fn builder() -> AutoscalingConfigurationBuilder {
        AutoscalingConfigurationBuilder::new()
    }

    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn scale_on_operation(&self) -> MonitoredOperation {
        self.scale_on_operation
    }

    pub fn scale_up(&self) -> Option<&ScalingDirectionPolicy> {
        self.scale_up.as_ref()
    }

    pub fn scale_down(&self) -> Option<&ScalingDirectionPolicy> {
        self.scale_down.as_ref()
    }

    pub fn min_shards(&self) -> Option<u32> {
        self.min_shards
    }

    pub fn max_shards(&self) -> Option<u32> {
        self.max_shards
    }

    /// Minutes between re-reads of the stream's open shard count.
    pub fn refresh_shards_number_after_min(&self) -> u32 {
        self.refresh_shards_number_after_min
    }

    /// Checks the cross-field invariants over the assembled snapshot.
    pub(crate) fn check_invariants(&self) -> ConfigResult<()> {
        if self.stream_name.is_empty() {
            return Err(ConfigError::MissingRequiredField("stream_name"));
        }

        if self.refresh_shards_number_after_min == 0 {
            return Err(ConfigError::Range {
                field: "refresh_shards_number_after_min",
                value: 0,
                expected: "> 0",
            });
        }

        for (field, bound) in [("min_shards", self.min_shards), ("max_shards", self.max_shards)] {
            if bound == Some(0) {
                return Err(ConfigError::Range {
                    field,
                    value: 0,
                    expected: ">= 1",
                });
            }
        }

        if let (Some(min), Some(max)) = (self.min_shards, self.max_shards)
            && min > max
        {
            return Err(ConfigError::InconsistentBounds { min, max });
        }

        if let (Some(up), Some(down)) = (&self.scale_up, &self.scale_down)
            && up.scale_threshold_pct() == down.scale_threshold_pct()
        {
            return Err(ConfigError::DegenerateThresholds {
                threshold_pct: up.scale_threshold_pct(),
            });
        }

        Ok(())
    }
}
