//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use skybox_config::{RigConfig, factory_rig, resolve_rig};
use skybox_core::{LoadedGroup, TimeSeriesDataset, load_record_group};
use skybox_io::read_record_group;
use std::path::Path;

/// Load a rig by name or path, or the factory rig when none is given.
pub fn load_rig(name: Option<&str>) -> anyhow::Result<RigConfig> {
    match name {
        None => Ok(factory_rig()),
        Some(name) => resolve_rig(name).with_context(|| {
            format!("Rig '{name}' not found. Use 'skybox catalog' to see the factory rig.")
        }),
    }
}

/// Read a recording file and normalize it with `rig`.
pub fn load_group(path: &Path, rig: &RigConfig) -> anyhow::Result<LoadedGroup> {
    let records = read_record_group(path)
        .with_context(|| format!("failed to read recording '{}'", path.display()))?;
    let loaded = load_record_group(&records, &rig.catalog(), &rig.layout())
        .with_context(|| format!("failed to normalize recording '{}'", path.display()))?;
    Ok(loaded)
}

/// The dataset stored under `block`.
pub fn dataset<'a>(group: &'a LoadedGroup, block: &str) -> anyhow::Result<&'a TimeSeriesDataset> {
    let entry = group.get(block).with_context(|| {
        let keys: Vec<&str> = group.keys().map(String::as_str).collect();
        format!("no block '{block}' (available: {})", keys.join(", "))
    })?;
    entry
        .as_dataset()
        .with_context(|| format!("block '{block}' is not a data block"))
}

/// Parse a `BLOCK:CHANNEL` string for clap's `value_parser`.
pub fn parse_block_channel(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((block, channel)) if !block.is_empty() && !channel.is_empty() => {
            Ok((block.to_string(), channel.to_string()))
        }
        _ => Err(format!(
            "Invalid channel reference: '{s}' (expected BLOCK:CHANNEL)"
        )),
    }
}

/// Sample rate to analyse `ds` at: the override, else the one implied by `Time`.
pub fn sample_rate(ds: &TimeSeriesDataset, rate: Option<f64>) -> anyhow::Result<f64> {
    rate.or_else(|| ds.sample_rate())
        .context("cannot derive a sample rate from Time; pass --rate")
}
