use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use shardscale_core::{AutoscalingConfiguration, ScalingAmount, ScalingDirectionPolicy};

pub fn validate(path: &str, format: &str) -> anyhow::Result<()> {
    let configs = shardscale_core::load_configurations(Path::new(path))
        .with_context(|| format!("invalid configuration file {path}"))?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&configs)?);
        }
        _ => {
            print!("{}", format_summary(&configs));
        }
    }

    Ok(())
}

/// Human-readable summary, one block per stream.
pub fn format_summary(configs: &[AutoscalingConfiguration]) -> String {
    let mut out = String::new();
    for config in configs {
        let bound = |b: Option<u32>| b.map_or_else(|| "-".to_string(), |v| v.to_string());
        let _ = writeln!(
            out,
            "✓ {} ({}) on {}, shards {}..{}, refresh every {}m",
            config.stream_name(),
            config.region(),
            config.scale_on_operation(),
            bound(config.min_shards()),
            bound(config.max_shards()),
            config.refresh_shards_number_after_min(),
        );
        if let Some(up) = config.scale_up() {
            let _ = writeln!(out, "    up:   {}", describe(up));
        }
        if let Some(down) = config.scale_down() {
            let _ = writeln!(out, "    down: {}", describe(down));
        }
    }
    let _ = writeln!(out, "{} stream(s) valid", configs.len());
    out
}

fn describe(policy: &ScalingDirectionPolicy) -> String {
    let amount = match policy.amount() {
        ScalingAmount::ScaleCount(n) => format!("{n} shard(s)"),
        ScalingAmount::ScalePct(p) => format!("{p}%"),
    };
    format!(
        "at {}% for {}m by {}, cool-off {}m",
        policy.scale_threshold_pct(),
        policy.scale_after_mins(),
        amount,
        policy.cool_off_mins(),
    )
}
