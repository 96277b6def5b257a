//! Human-readable summaries of loaded recordings.

use std::fmt::Write;

use crate::group::{LoadedEntry, LoadedGroup};
use crate::record::{ALL_ATTRIBUTES, CONVERTED_ATTRIBUTES, FlatRecord, UNCONVERTED_ATTRIBUTES};

/// Preferred display order of test-property keys.
pub const TEST_PROPERTY_ORDER: [&str; 14] = [
    "testName",
    "testType",
    "repeatType",
    "useTest",
    "fSampling",
    "calibrationFile",
    "depthAtWM",
    "depthAtMPL",
    "airGapAtMPL",
    "waveType",
    "waveAmplitude",
    "wavePeriod",
    "focusingLocation",
    "remarks",
];

const PROVENANCE: [&str; 3] = [ALL_ATTRIBUTES, CONVERTED_ATTRIBUTES, UNCONVERTED_ATTRIBUTES];

/// List the top-level entries of a group with their kinds and fields.
pub fn describe_group(group: &LoadedGroup) -> String {
    let mut out = String::new();
    let keys: Vec<&str> = group.keys().map(String::as_str).collect();
    let _ = writeln!(out, "Top-level keys: {}", keys.join(", "));

    for (name, entry) in group {
        match entry {
            LoadedEntry::Dataset(ds) => {
                let _ = writeln!(
                    out,
                    "\n{name} -> dataset ({} samples, {:.3} s)",
                    ds.len(),
                    ds.duration()
                );
                for channel in ds.channel_names() {
                    let _ = writeln!(out, "   - channel {channel}");
                }
                for attr in ds.attrs().keys().filter(|k| !PROVENANCE.contains(&k.as_str())) {
                    let _ = writeln!(out, "   - attr {attr}");
                }
            }
            LoadedEntry::Record(record) => {
                let _ = writeln!(out, "\n{name} -> record ({} attributes)", record.len());
                for attr in record.all_attributes() {
                    let _ = writeln!(out, "   - {attr}");
                }
            }
        }
    }
    out
}

/// List test properties, well-known keys first, skipping provenance lists.
pub fn describe_test_properties(props: &FlatRecord) -> String {
    let mut out = String::new();
    for key in TEST_PROPERTY_ORDER {
        if let Some(value) = props.get(key) {
            let _ = writeln!(out, "   - {key}: {value}");
        }
    }
    for (key, value) in props.iter() {
        if !TEST_PROPERTY_ORDER.contains(&key) && !PROVENANCE.contains(&key) {
            let _ = writeln!(out, "   - {key}: {value}");
        }
    }
    out
}
