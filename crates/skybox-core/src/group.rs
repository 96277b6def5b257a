//! Loading a whole recording file (a group of top-level records).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dataset::{ChannelCatalog, TimeSeriesDataset, build_dataset};
use crate::error::Result;
use crate::raw::{RecordEntry, RecordGroup};
use crate::record::{FlatRecord, flatten};

/// Which top-level entries hold time-series data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupLayout {
    /// Exact name of the primary data block.
    pub primary: String,
    /// Substring marking secondary (auxiliary) data blocks. Empty disables it.
    pub secondary_marker: String,
}

impl Default for GroupLayout {
    fn default() -> Self {
        Self {
            primary: "Data".to_string(),
            secondary_marker: "Aux".to_string(),
        }
    }
}

impl GroupLayout {
    /// Returns true if the entry called `name` should become a dataset.
    pub fn is_data_block(&self, name: &str) -> bool {
        name == self.primary
            || (!self.secondary_marker.is_empty() && name.contains(&self.secondary_marker))
    }
}

/// A normalized top-level entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoadedEntry {
    /// A data block promoted to a dataset.
    Dataset(TimeSeriesDataset),
    /// Any other block, kept as a flat record (e.g. test properties).
    Record(FlatRecord),
}

impl LoadedEntry {
    /// The dataset, for data blocks.
    pub fn as_dataset(&self) -> Option<&TimeSeriesDataset> {
        match self {
            LoadedEntry::Dataset(ds) => Some(ds),
            LoadedEntry::Record(_) => None,
        }
    }

    /// The flat record, for non-data blocks.
    pub fn as_record(&self) -> Option<&FlatRecord> {
        match self {
            LoadedEntry::Record(r) => Some(r),
            LoadedEntry::Dataset(_) => None,
        }
    }
}

/// All normalized entries of a recording file.
pub type LoadedGroup = BTreeMap<String, LoadedEntry>;

/// Normalize every entry of a recording file.
///
/// Structured entries are flattened; entries the `layout` marks as data
/// blocks are then promoted to datasets with `catalog`, the rest stay flat.
///
/// # Errors
///
/// The first flatten or dataset error encountered, see
/// [`flatten`] and [`build_dataset`].
pub fn load_record_group(
    records: &RecordGroup,
    catalog: &ChannelCatalog,
    layout: &GroupLayout,
) -> Result<LoadedGroup> {
    let mut loaded = LoadedGroup::new();

    for (name, entry) in records {
        let flat = match entry {
            RecordEntry::Struct(raw) => flatten(raw)?,
            RecordEntry::Flat(flat) => flat.clone(),
        };

        let normalized = if layout.is_data_block(name) {
            tracing::debug!(block = %name, "promoting block to dataset");
            LoadedEntry::Dataset(build_dataset(&flat, catalog)?)
        } else {
            LoadedEntry::Record(flat)
        };
        loaded.insert(name.clone(), normalized);
    }

    tracing::info!(entries = loaded.len(), "record group loaded");
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::raw::{RawArray, RawStruct};
    use crate::record::FlatValue;

    fn group() -> RecordGroup {
        let data = RawStruct::new()
            .with_field("Time", RawArray::numbers(vec![0.0, 0.5, 1.0]))
            .with_field("WG01", RawArray::numbers(vec![0.1, 0.2, 0.3]))
            .with_field("fSampling", RawArray::scalar(2.0));
        let aux = FlatRecord::new()
            .with("Time", FlatValue::Series(vec![0.0, 1.0]))
            .with("PS01", FlatValue::Series(vec![3.0, 4.0]));
        let props = RawStruct::new()
            .with_field("testName", RawArray::text("T7"))
            .with_field("waveAmplitude", RawArray::scalar(0.05));

        let mut group = RecordGroup::new();
        group.insert("Data".to_string(), RecordEntry::Struct(data));
        group.insert("MotionAux1".to_string(), RecordEntry::Flat(aux));
        group.insert("TestProperties".to_string(), RecordEntry::Struct(props));
        group
    }

    #[test]
    fn data_blocks_become_datasets() {
        let catalog = ChannelCatalog::new(["WG01", "PS01"]);
        let loaded = load_record_group(&group(), &catalog, &GroupLayout::default()).unwrap();

        let data = loaded["Data"].as_dataset().unwrap();
        assert_eq!(data.channel("WG01"), Some(&[0.1, 0.2, 0.3][..]));

        let aux = loaded["MotionAux1"].as_dataset().unwrap();
        assert_eq!(aux.channel("PS01"), Some(&[3.0, 4.0][..]));

        let props = loaded["TestProperties"].as_record().unwrap();
        assert_eq!(props.get("testName"), Some(&FlatValue::Text("T7".to_string())));
        assert_eq!(props.get("waveAmplitude"), Some(&FlatValue::Scalar(0.05)));
    }

    #[test]
    fn metadata_block_without_time_is_fine() {
        let catalog = ChannelCatalog::new(["WG01"]);
        let layout = GroupLayout {
            primary: "Data".to_string(),
            secondary_marker: String::new(),
        };
        let loaded = load_record_group(&group(), &catalog, &layout).unwrap();
        assert!(loaded["MotionAux1"].as_record().is_some());
    }

    #[test]
    fn data_block_without_time_fails() {
        let mut group = group();
        group.insert(
            "Data".to_string(),
            RecordEntry::Struct(RawStruct::new().with_field("WG01", RawArray::scalar(1.0))),
        );
        let result = load_record_group(&group, &ChannelCatalog::default(), &GroupLayout::default());
        assert_eq!(result, Err(Error::MissingTimeField));
    }
}
