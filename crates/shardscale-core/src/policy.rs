//! Per-direction scaling policy.
//!
//! A [`ScalingPolicyInput`] carries the raw values exactly as a caller (or a
//! config file) supplied them. [`ScalingDirectionPolicy::from_input`] turns it
//! into a validated policy; the builder does this once, at build time.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, ConfigResult};

/// Which way a policy resizes the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalingDirection {
    Up,
    Down,
}

impl ScalingDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalingDirection::Up => "scale-up",
            ScalingDirection::Down => "scale-down",
        }
    }
}

impl fmt::Display for ScalingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much to resize by when a policy triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingAmount {
    /// Absolute number of shards to add or remove.
    ScaleCount(u32),
    /// Percentage of the current shard count.
    ScalePct(u32),
}

/// Raw, unvalidated policy values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalingPolicyInput {
    /// Utilization percentage that triggers this direction.
    #[serde(alias = "scaleThresholdPct")]
    pub scale_threshold_pct: i64,
    /// Minutes the threshold must be sustained.
    #[serde(alias = "scaleAfterMins")]
    pub scale_after_mins: i64,
    /// Minimum minutes between two triggers of this direction.
    #[serde(alias = "coolOffMins")]
    pub cool_off_mins: i64,
    #[serde(default, alias = "scaleCount", skip_serializing_if = "Option::is_none")]
    pub scale_count: Option<i64>,
    #[serde(default, alias = "scalePct", skip_serializing_if = "Option::is_none")]
    pub scale_pct: Option<i64>,
    /// Opaque notification target (e.g. an SNS topic ARN).
    #[serde(default, alias = "notificationARN", skip_serializing_if = "Option::is_none")]
    pub notification_arn: Option<String>,
}

impl ScalingPolicyInput {
    pub fn new(scale_threshold_pct: i64, scale_after_mins: i64, cool_off_mins: i64) -> Self {
        Self {
            scale_threshold_pct,
            scale_after_mins,
            cool_off_mins,
            ..Self::default()
        }
    }

    pub fn with_scale_count(mut self, count: i64) -> Self {
        self.scale_count = Some(count);
        self
    }

    pub fn with_scale_pct(mut self, pct: i64) -> Self {
        self.scale_pct = Some(pct);
        self
    }

    pub fn with_notification_arn(mut self, arn: impl Into<String>) -> Self {
        self.notification_arn = Some(arn.into());
        self
    }
}

/// Validated rule set for one scaling direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScalingDirectionPolicy {
    scale_threshold_pct: u8,
    scale_after_mins: u32,
    cool_off_mins: u32,
    #[serde(flatten)]
    amount: ScalingAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    notification_arn: Option<String>,
}

impl ScalingDirectionPolicy {
    /// Validate raw values for `direction`.
    ///
    /// An absolute count wins over a percentage when both are present.
    pub fn from_input(
        direction: ScalingDirection,
        input: &ScalingPolicyInput,
    ) -> ConfigResult<Self> {
        let scale_threshold_pct = u8::try_from(input.scale_threshold_pct)
            .ok()
            .filter(|pct| *pct <= 100)
            .ok_or(ConfigError::Range {
                field: "scale_threshold_pct",
                value: input.scale_threshold_pct,
                expected: "0..=100",
            })?;
        let scale_after_mins = non_negative("scale_after_mins", input.scale_after_mins)?;
        let cool_off_mins = non_negative("cool_off_mins", input.cool_off_mins)?;

        let amount = match (input.scale_count, input.scale_pct) {
            (Some(count), pct) => {
                if let Some(pct) = pct {
                    warn!(
                        %direction,
                        scale_count = count,
                        scale_pct = pct,
                        "both scale_count and scale_pct set, ignoring scale_pct"
                    );
                }
                ScalingAmount::ScaleCount(positive("scale_count", count)?)
            }
            (None, Some(pct)) => ScalingAmount::ScalePct(positive("scale_pct", pct)?),
            (None, None) => {
                return Err(ConfigError::AmbiguousAmount {
                    direction: direction.as_str(),
                });
            }
        };

        Ok(Self {
            scale_threshold_pct,
            scale_after_mins,
            cool_off_mins,
            amount,
            notification_arn: input.notification_arn.clone(),
        })
    }

    pub fn scale_threshold_pct(&self) -> u8 {
        self.scale_threshold_pct
    }

    pub fn scale_after_mins(&self) -> u32 {
        self.scale_after_mins
    }

    pub fn cool_off_mins(&self) -> u32 {
        self.cool_off_mins
    }

    pub fn amount(&self) -> ScalingAmount {
        self.amount
    }

    pub fn scale_count(&self) -> Option<u32> {
        match self.amount {
            ScalingAmount::ScaleCount(count) => Some(count),
            ScalingAmount::ScalePct(_) => None,
        }
    }

    pub fn scale_pct(&self) -> Option<u32> {
        match self.amount {
            ScalingAmount::ScalePct(pct) => Some(pct),
            ScalingAmount::ScaleCount(_) => None,
        }
    }

    pub fn notification_arn(&self) -> Option<&str> {
        self.notification_arn.as_deref()
    }
}

fn non_negative(field: &'static str, value: i64) -> ConfigResult<u32> {
    u32::try_from(value).map_err(|_| ConfigError::Range {
        field,
        value,
        expected: ">= 0",
    })
}

fn positive(field: &'static str, value: i64) -> ConfigResult<u32> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::Range {
            field,
            value,
            expected: "> 0",
        }),
    }
}
