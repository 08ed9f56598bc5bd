//! shardscale-core — validated autoscaling configuration for sharded streams.
//!
//! Callers stage values on an [`AutoscalingConfigurationBuilder`] and call
//! `build` once to obtain an immutable [`AutoscalingConfiguration`]. The
//! scaling engine that consumes it lives elsewhere; nothing here performs
//! network I/O or makes scaling decisions.
//!
//! # Validation
//!
//! ```text
//! with_scale_on_operation   -> InvalidOperationType (immediately)
//! build:
//!   stream_name / operation -> MissingRequiredField
//!   policy threshold/mins   -> Range
//!   policy without amount   -> AmbiguousAmount
//!   min_shards > max_shards -> InconsistentBounds
//!   up == down threshold    -> DegenerateThresholds
//! ```
//!
//! Every `build` failure is a [`ConfigurationBuildError`] wrapping one
//! [`ConfigError`] kind.

pub mod builder;
pub mod configuration;
pub mod error;
pub mod file;
pub mod operation;
pub mod policy;

pub use builder::AutoscalingConfigurationBuilder;
pub use configuration::{AutoscalingConfiguration, DEFAULT_REFRESH_SHARDS_MINS, DEFAULT_REGION};
pub use error::{ConfigError, ConfigResult, ConfigurationBuildError};
pub use file::{ConfigFile, LoadError, StreamEntry, load_configurations};
pub use operation::MonitoredOperation;
pub use policy::{ScalingAmount, ScalingDirection, ScalingDirectionPolicy, ScalingPolicyInput};
