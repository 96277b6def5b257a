//! SkyBox Core - normalization and calibration of test-rig recordings
//!
//! This crate turns the nested records written by the rig's recording
//! subsystems into typed, time-indexed datasets and calibrates them:
//!
//! - [`raw`] - Raw structured records as handed over by the file reader
//! - [`record`] - Flattening into [`FlatRecord`]s (text vs numeric attributes)
//! - [`dataset`] - [`TimeSeriesDataset`] and the [`ChannelCatalog`] partition
//! - [`group`] - Loading every top-level entry of a recording file
//! - [`timing`] - Timing-LED edge detection for coarse alignment
//! - [`tare`] - Baseline (tare) calibration with an append-only offset log
//! - [`summary`] - Header and test-property listings
//!
//! ## Example Workflow
//!
//! ```rust
//! use skybox_core::raw::{RawArray, RawStruct, RecordEntry, RecordGroup};
//! use skybox_core::{ChannelCatalog, GroupLayout, load_record_group, tare};
//! use skybox_core::timing::detect_timing_reference;
//!
//! let data = RawStruct::new()
//!     .with_field("Time", RawArray::numbers(vec![0.0, 0.1, 0.2, 0.3]))
//!     .with_field("WG01", RawArray::numbers(vec![1.0, 1.2, 0.8, 3.0]))
//!     .with_field("LED-chan100", RawArray::numbers(vec![0.0, 1.0, 1.0, 0.0]));
//!
//! let mut group = RecordGroup::new();
//! group.insert("Data".to_string(), RecordEntry::Struct(data));
//!
//! let catalog = ChannelCatalog::new(["WG01", "LED-chan100"]);
//! let loaded = load_record_group(&group, &catalog, &GroupLayout::default()).unwrap();
//! let mut ds = loaded["Data"].as_dataset().unwrap().clone();
//!
//! let led = detect_timing_reference(&mut ds, "LED-chan100").unwrap();
//! assert_eq!((led.rise_index, led.fall_index), (1, 2));
//!
//! let calibrated = tare(&ds, &["WG01"], 0.0, 0.2).unwrap();
//! assert!((calibrated.tare_values()["WG01"] - 1.0).abs() < 1e-12);
//! ```

pub mod dataset;
mod error;
pub mod group;
mod nan;
pub mod raw;
pub mod record;
pub mod summary;
pub mod tare;
pub mod timing;

pub use dataset::{AttrValue, ChannelCatalog, TIME, TimeSeriesDataset, build_dataset};
pub use error::{Error, Result};
pub use group::{GroupLayout, LoadedEntry, LoadedGroup, load_record_group};
pub use raw::{RawArray, RawStruct, RecordEntry, RecordGroup};
pub use record::{AttributeKind, FlatRecord, FlatValue, flatten};
pub use summary::{describe_group, describe_test_properties};
pub use tare::{TareEntry, tare, tare_all};
pub use timing::{TimingReference, detect_timing_reference};
