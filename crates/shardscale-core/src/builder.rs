//! Staged assembly of an [`AutoscalingConfiguration`].
//!
//! Setters only record values. Apart from the operation name, which is
//! parsed as soon as it is staged, all validation happens once in
//! [`AutoscalingConfigurationBuilder::build`].

use tracing::debug;

use crate::configuration::{AutoscalingConfiguration, DEFAULT_REFRESH_SHARDS_MINS, DEFAULT_REGION};
use crate::error::{ConfigError, ConfigResult, ConfigurationBuildError};
use crate::operation::MonitoredOperation;
use crate::policy::{ScalingDirection, ScalingDirectionPolicy, ScalingPolicyInput};

/// Builder for [`AutoscalingConfiguration`].
///
/// ```
/// use shardscale_core::{AutoscalingConfigurationBuilder, ScalingPolicyInput};
///
/// let config = AutoscalingConfigurationBuilder::new()
///     .with_stream_name("orders-stream")
///     .with_scale_on_operation("PUT")?
///     .with_scale_up(ScalingPolicyInput::new(75, 5, 15).with_scale_pct(100))
///     .with_min_shards(1)
///     .with_max_shards(10)
///     .build()?;
///
/// assert_eq!(config.region(), "us-east-1");
/// assert_eq!(config.refresh_shards_number_after_min(), 10);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutoscalingConfigurationBuilder {
    stream_name: Option<String>,
    region: Option<String>,
    scale_on_operation: Option<MonitoredOperation>,
    scale_up: Option<ScalingPolicyInput>,
    scale_down: Option<ScalingPolicyInput>,
    min_shards: Option<u32>,
    max_shards: Option<u32>,
    refresh_shards_number_after_min: Option<u32>,
}

impl AutoscalingConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stream_name(mut self, stream_name: impl Into<String>) -> Self {
        self.stream_name = Some(stream_name.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Stage the monitored operation by name (`"PUT"` or `"GET"`).
    ///
    /// Unknown names fail here rather than at build time. The builder is
    /// consumed either way, so a failed call drops everything staged so
    /// far. Callers that want to correct the name and retry should parse
    /// it themselves and stage it with [`with_operation`](Self::with_operation):
    ///
    /// ```
    /// use shardscale_core::{AutoscalingConfigurationBuilder, MonitoredOperation};
    ///
    /// let builder = AutoscalingConfigurationBuilder::new().with_stream_name("orders");
    /// let op = "put"
    ///     .parse::<MonitoredOperation>()
    ///     .or_else(|_| "PUT".parse())?;
    /// let config = builder.with_operation(op).build()?;
    /// assert_eq!(config.stream_name(), "orders");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_scale_on_operation(mut self, operation: &str) -> ConfigResult<Self> {
        self.scale_on_operation = Some(operation.parse()?);
        Ok(self)
    }

    pub fn with_operation(mut self, operation: MonitoredOperation) -> Self {
        self.scale_on_operation = Some(operation);
        self
    }

    pub fn with_scale_up(mut self, policy: ScalingPolicyInput) -> Self {
        self.scale_up = Some(policy);
        self
    }

    pub fn with_scale_down(mut self, policy: ScalingPolicyInput) -> Self {
        self.scale_down = Some(policy);
        self
    }

    pub fn with_min_shards(mut self, min_shards: u32) -> Self {
        self.min_shards = Some(min_shards);
        self
    }

    pub fn with_max_shards(mut self, max_shards: u32) -> Self {
        self.max_shards = Some(max_shards);
        self
    }

    pub fn with_refresh_shards_number_after_min(mut self, minutes: u32) -> Self {
        self.refresh_shards_number_after_min = Some(minutes);
        self
    }

    /// Validate everything staged and produce the configuration.
    pub fn build(self) -> Result<AutoscalingConfiguration, ConfigurationBuildError> {
        let stream_name = self
            .stream_name
            .ok_or(ConfigError::MissingRequiredField("stream_name"))?;
        let scale_on_operation = self
            .scale_on_operation
            .ok_or(ConfigError::MissingRequiredField("scale_on_operation"))?;

        let scale_up = self
            .scale_up
            .as_ref()
            .map(|input| ScalingDirectionPolicy::from_input(ScalingDirection::Up, input))
            .transpose()?;
        let scale_down = self
            .scale_down
            .as_ref()
            .map(|input| ScalingDirectionPolicy::from_input(ScalingDirection::Down, input))
            .transpose()?;

        let config = AutoscalingConfiguration {
            stream_name,
            region: self.region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
            scale_on_operation,
            scale_up,
            scale_down,
            min_shards: self.min_shards,
            max_shards: self.max_shards,
            refresh_shards_number_after_min: self
                .refresh_shards_number_after_min
                .unwrap_or(DEFAULT_REFRESH_SHARDS_MINS),
        };
        config.check_invariants()?;

        debug!(
            stream = %config.stream_name,
            region = %config.region,
            operation = %config.scale_on_operation,
            min_shards = ?config.min_shards,
            max_shards = ?config.max_shards,
            "autoscaling configuration built"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> AutoscalingConfigurationBuilder {
        AutoscalingConfigurationBuilder::new()
            .with_stream_name("s")
            .with_operation(MonitoredOperation::Get)
    }

    #[test]
    fn defaults_applied() {
        let config = minimal().build().unwrap();
        assert_eq!(config.region(), DEFAULT_REGION);
        assert_eq!(config.refresh_shards_number_after_min(), DEFAULT_REFRESH_SHARDS_MINS);
        assert_eq!(config.min_shards(), None);
        assert_eq!(config.max_shards(), None);
        assert!(config.scale_up().is_none());
        assert!(config.scale_down().is_none());
    }

    #[test]
    fn last_write_wins() {
        let config = minimal()
            .with_stream_name("first")
            .with_stream_name("second")
            .with_region("eu-west-1")
            .with_region("ap-southeast-2")
            .with_min_shards(4)
            .with_min_shards(2)
            .with_max_shards(3)
            .with_max_shards(8)
            .with_refresh_shards_number_after_min(5)
            .with_refresh_shards_number_after_min(15)
            .with_scale_on_operation("PUT")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.stream_name(), "second");
        assert_eq!(config.region(), "ap-southeast-2");
        assert_eq!(config.min_shards(), Some(2));
        assert_eq!(config.max_shards(), Some(8));
        assert_eq!(config.refresh_shards_number_after_min(), 15);
        assert_eq!(config.scale_on_operation(), MonitoredOperation::Put);
    }

    #[test]
    fn restaged_policy_replaces_previous() {
        let config = minimal()
            .with_scale_up(ScalingPolicyInput::new(90, 1, 1).with_scale_count(4))
            .with_scale_up(ScalingPolicyInput::new(60, 2, 2).with_scale_pct(25))
            .build()
            .unwrap();

        let up = config.scale_up().unwrap();
        assert_eq!(up.scale_threshold_pct(), 60);
        assert_eq!(up.scale_pct(), Some(25));
        assert_eq!(up.scale_count(), None);
    }

    #[test]
    fn missing_stream_name() {
        let err = AutoscalingConfigurationBuilder::new()
            .with_operation(MonitoredOperation::Put)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), &ConfigError::MissingRequiredField("stream_name"));
    }

    #[test]
    fn missing_operation() {
        let err = AutoscalingConfigurationBuilder::new()
            .with_stream_name("s")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), &ConfigError::MissingRequiredField("scale_on_operation"));
    }

    #[test]
    fn policy_errors_surface_at_build() {
        let builder = minimal().with_scale_down(ScalingPolicyInput::new(150, 1, 1).with_scale_pct(10));
        let err = builder.build().unwrap_err();
        assert!(matches!(
            err.kind(),
            ConfigError::Range { field: "scale_threshold_pct", value: 150, .. }
        ));
    }

    #[test]
    fn single_direction_is_enough() {
        let config = minimal()
            .with_scale_down(ScalingPolicyInput::new(25, 10, 30).with_scale_count(1))
            .build()
            .unwrap();
        assert!(config.scale_up().is_none());
        assert_eq!(config.scale_down().unwrap().scale_count(), Some(1));
    }

    #[test]
    fn corrected_operation_keeps_staged_values() {
        let builder = AutoscalingConfiguration::builder()
            .with_stream_name("orders")
            .with_min_shards(2)
            .with_max_shards(6);

        let err = "BOGUS".parse::<MonitoredOperation>().unwrap_err();
        assert_eq!(err, ConfigError::InvalidOperationType("BOGUS".to_string()));

        let op = "GET".parse::<MonitoredOperation>().unwrap();
        let config = builder.with_operation(op).build().unwrap();
        assert_eq!(config.stream_name(), "orders");
        assert_eq!(config.min_shards(), Some(2));
        assert_eq!(config.max_shards(), Some(6));
        assert_eq!(config.scale_on_operation(), MonitoredOperation::Get);
    }

    #[test]
    fn build_error_unwraps_to_kind() {
        let err = AutoscalingConfiguration::builder()
            .with_stream_name("s")
            .with_operation(MonitoredOperation::Put)
            .with_min_shards(9)
            .with_max_shards(3)
            .build()
            .unwrap_err();
        assert_eq!(err.into_kind(), ConfigError::InconsistentBounds { min: 9, max: 3 });
    }

    #[test]
    fn zero_refresh_rejected() {
        let err = minimal()
            .with_refresh_shards_number_after_min(0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            ConfigError::Range { field: "refresh_shards_number_after_min", .. }
        ));
    }

    #[test]
    fn cloned_builder_stages_independently() {
        let base = minimal().with_min_shards(1);
        let a = base.clone().with_max_shards(4).build().unwrap();
        let b = base.with_max_shards(16).build().unwrap();
        assert_eq!(a.max_shards(), Some(4));
        assert_eq!(b.max_shards(), Some(16));
        assert_eq!(a.min_shards(), b.min_shards());
    }
}
