//! Configuration file loading.
//!
//! A file holds one entry per stream. TOML files use a `[[stream]]` array of
//! tables; anything else is read as JSON, a top-level array of entries.
//! Every entry goes through [`AutoscalingConfigurationBuilder`], so files get
//! exactly the validation programmatic callers get.
//!
//! ```toml
//! [[stream]]
//! stream_name = "orders-stream"
//! scale_on_operation = "PUT"
//! min_shards = 1
//! max_shards = 10
//!
//! [stream.scale_up]
//! scale_threshold_pct = 75
//! scale_after_mins = 5
//! cool_off_mins = 15
//! scale_pct = 100
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::builder::AutoscalingConfigurationBuilder;
use crate::configuration::{AutoscalingConfiguration, DEFAULT_REGION};
use crate::error::ConfigurationBuildError;
use crate::policy::ScalingPolicyInput;

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stream entry {index} ({}): {source}", .stream.as_deref().unwrap_or("unnamed"))]
    InvalidEntry {
        index: usize,
        stream: Option<String>,
        #[source]
        source: ConfigurationBuildError,
    },
}

/// One stream's raw values as written in a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamEntry {
    #[serde(default, alias = "streamName", skip_serializing_if = "Option::is_none")]
    pub stream_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, alias = "scaleOnOperation", skip_serializing_if = "Option::is_none")]
    pub scale_on_operation: Option<String>,
    #[serde(default, alias = "minShards", skip_serializing_if = "Option::is_none")]
    pub min_shards: Option<u32>,
    #[serde(default, alias = "maxShards", skip_serializing_if = "Option::is_none")]
    pub max_shards: Option<u32>,
    #[serde(
        default,
        alias = "refreshShardsNumberAfterMin",
        skip_serializing_if = "Option::is_none"
    )]
    pub refresh_shards_number_after_min: Option<u32>,
    // Tables last so the TOML output keeps plain keys above them.
    #[serde(default, alias = "scaleUp", skip_serializing_if = "Option::is_none")]
    pub scale_up: Option<ScalingPolicyInput>,
    #[serde(default, alias = "scaleDown", skip_serializing_if = "Option::is_none")]
    pub scale_down: Option<ScalingPolicyInput>,
}

impl StreamEntry {
    /// Stage every present value into a fresh builder.
    pub fn to_builder(&self) -> Result<AutoscalingConfigurationBuilder, ConfigurationBuildError> {
        let mut builder = AutoscalingConfigurationBuilder::new();
        if let Some(name) = &self.stream_name {
            builder = builder.with_stream_name(name.as_str());
        }
        if let Some(region) = &self.region {
            builder = builder.with_region(region.as_str());
        }
        if let Some(op) = &self.scale_on_operation {
            builder = builder.with_scale_on_operation(op)?;
        }
        if let Some(up) = &self.scale_up {
            builder = builder.with_scale_up(up.clone());
        }
        if let Some(down) = &self.scale_down {
            builder = builder.with_scale_down(down.clone());
        }
        if let Some(min) = self.min_shards {
            builder = builder.with_min_shards(min);
        }
        if let Some(max) = self.max_shards {
            builder = builder.with_max_shards(max);
        }
        if let Some(refresh) = self.refresh_shards_number_after_min {
            builder = builder.with_refresh_shards_number_after_min(refresh);
        }
        Ok(builder)
    }

    pub fn build(&self) -> Result<AutoscalingConfiguration, ConfigurationBuildError> {
        self.to_builder()?.build()
    }
}

/// Parsed contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default, rename = "stream")]
    pub streams: Vec<StreamEntry>,
}

impl ConfigFile {
    /// Read and parse `path`. The extension picks the format.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        debug!(path = %path.display(), toml = is_toml, "parsing configuration file");

        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        let streams: Vec<StreamEntry> = serde_json::from_str(content)?;
        Ok(Self { streams })
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build every entry, stopping at the first invalid one.
    pub fn build_all(&self) -> Result<Vec<AutoscalingConfiguration>, LoadError> {
        self.streams
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry.build().map_err(|source| LoadError::InvalidEntry {
                    index,
                    stream: entry.stream_name.clone(),
                    source,
                })
            })
            .collect()
    }

    /// A single-stream file with both directions configured.
    pub fn scaffold(stream_name: &str) -> Self {
        ConfigFile {
            streams: vec![StreamEntry {
                stream_name: Some(stream_name.to_string()),
                region: Some(DEFAULT_REGION.to_string()),
                scale_on_operation: Some("PUT".to_string()),
                min_shards: Some(1),
                max_shards: Some(10),
                refresh_shards_number_after_min: Some(10),
                scale_up: Some(ScalingPolicyInput::new(75, 5, 15).with_scale_pct(100)),
                scale_down: Some(ScalingPolicyInput::new(25, 30, 60).with_scale_count(1)),
            }],
        }
    }
}

/// Load `path` and build every stream configuration in it.
pub fn load_configurations(path: &Path) -> Result<Vec<AutoscalingConfiguration>, LoadError> {
    let configs = ConfigFile::from_file(path)?.build_all()?;
    info!(path = %path.display(), streams = configs.len(), "loaded autoscaling configurations");
    Ok(configs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::operation::MonitoredOperation;

    #[test]
    fn scaffold_builds() {
        let file = ConfigFile::scaffold("orders-stream");
        let toml_str = file.to_toml_string().unwrap();
        assert!(toml_str.contains("[[stream]]"));
        assert!(toml_str.contains("orders-stream"));

        let reparsed = ConfigFile::from_toml_str(&toml_str).unwrap();
        assert_eq!(reparsed, file);

        let configs = reparsed.build_all().unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].scale_up().unwrap().scale_pct(), Some(100));
        assert_eq!(configs[0].scale_down().unwrap().scale_count(), Some(1));
    }

    #[test]
    fn parse_minimal_toml() {
        let toml_str = r#"
[[stream]]
stream_name = "clicks"
scale_on_operation = "GET"
"#;
        let configs = ConfigFile::from_toml_str(toml_str).unwrap().build_all().unwrap();
        assert_eq!(configs[0].stream_name(), "clicks");
        assert_eq!(configs[0].scale_on_operation(), MonitoredOperation::Get);
        assert_eq!(configs[0].region(), "us-east-1");
    }

    #[test]
    fn parse_camel_case_json() {
        let json = r#"[
            {
                "streamName": "orders",
                "region": "eu-west-1",
                "scaleOnOperation": "PUT",
                "minShards": 2,
                "maxShards": 20,
                "refreshShardsNumberAfterMin": 5,
                "scaleUp": {
                    "scaleThresholdPct": 80,
                    "scaleAfterMins": 1,
                    "coolOffMins": 5,
                    "scaleCount": 2
                }
            }
        ]"#;
        let configs = ConfigFile::from_json_str(json).unwrap().build_all().unwrap();
        let config = &configs[0];
        assert_eq!(config.region(), "eu-west-1");
        assert_eq!(config.min_shards(), Some(2));
        assert_eq!(config.refresh_shards_number_after_min(), 5);
        assert_eq!(config.scale_up().unwrap().scale_count(), Some(2));
    }

    #[test]
    fn invalid_entry_reports_index() {
        let toml_str = r#"
[[stream]]
stream_name = "good"
scale_on_operation = "PUT"

[[stream]]
stream_name = "bad"
scale_on_operation = "DELETE"
"#;
        let err = ConfigFile::from_toml_str(toml_str).unwrap().build_all().unwrap_err();
        match err {
            LoadError::InvalidEntry { index, stream, source } => {
                assert_eq!(index, 1);
                assert_eq!(stream.as_deref(), Some("bad"));
                assert_eq!(
                    source.kind(),
                    &ConfigError::InvalidOperationType("DELETE".to_string())
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn misspelled_keys_rejected() {
        let toml_str = r#"
[[stream]]
stream_name = "s"
scale_on_operation = "PUT"
min_shards = 10
max_shard = 5
"#;
        let err = ConfigFile::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, LoadError::Toml(_)), "got {err:?}");
        assert!(err.to_string().contains("max_shard"));

        let toml_str = r#"
[[stream]]
stream_name = "s"
scale_on_operation = "PUT"

[stream.scale_up]
scale_threshold_pct = 75
scale_after_mins = 5
cool_off_mins = 15
scale_pct = 100
notification_arm = "arn:x"
"#;
        assert!(matches!(
            ConfigFile::from_toml_str(toml_str),
            Err(LoadError::Toml(_))
        ));

        assert!(matches!(
            ConfigFile::from_toml_str("[[streams]]\nstream_name = \"s\"\n"),
            Err(LoadError::Toml(_))
        ));
    }

    #[test]
    fn misspelled_json_key_rejected() {
        let json = r#"[{"streamName": "s", "scaleOnOperation": "PUT", "maxShard": 5}]"#;
        assert!(matches!(
            ConfigFile::from_json_str(json),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            ConfigFile::from_json_str("{not json"),
            Err(LoadError::Json(_))
        ));
    }
}
