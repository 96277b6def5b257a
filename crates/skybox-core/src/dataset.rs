//! Time-indexed datasets built from flat records.
//!
//! A [`TimeSeriesDataset`] holds one recording: a monotonically
//! non-decreasing `Time` coordinate, the channels named in the rig's
//! [`ChannelCatalog`], and every other field of the source record as
//! metadata. Every channel has exactly as many samples as `Time`; the only
//! mutations after construction are attribute annotation and tare
//! subtraction, neither of which resizes `Time`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use crate::error::{Error, Result};
use crate::record::{
    ALL_ATTRIBUTES, CONVERTED_ATTRIBUTES, FlatRecord, FlatValue, UNCONVERTED_ATTRIBUTES,
};
use crate::tare::TareEntry;

/// Name of the time coordinate.
pub const TIME: &str = "Time";

/// Attribute key accumulating time shifts applied with [`TimeSeriesDataset::shifted`].
pub const TIME_SHIFT_ATTR: &str = "time_shift";

/// Ordered allow-list of channel names recognized on a rig.
///
/// Fields of a record whose names are in the catalog become channels; all
/// other fields become metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelCatalog {
    names: Vec<String>,
    lookup: HashSet<String>,
}

impl ChannelCatalog {
    /// Build a catalog, dropping repeated names (first occurrence wins).
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        for name in names {
            let name = name.into();
            if catalog.lookup.insert(name.clone()) {
                catalog.names.push(name);
            }
        }
        catalog
    }

    /// Returns true if `name` is a recognized channel.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    /// Channel names in catalog order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of channels in the catalog.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ChannelCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A dataset-level metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Text.
    Text(String),
    /// Numeric scalar.
    Scalar(#[serde(with = "crate::nan::scalar")] f64),
    /// Numeric sequence that is not a channel.
    Series(#[serde(with = "crate::nan::series")] Vec<f64>),
    /// A list of names (provenance lists).
    Names(Vec<String>),
}

impl AttrValue {
    /// The scalar, for scalar attributes.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            AttrValue::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    /// The string, for text attributes.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<FlatValue> for AttrValue {
    fn from(value: FlatValue) -> Self {
        match value {
            FlatValue::Text(s) => AttrValue::Text(s),
            FlatValue::Scalar(x) => AttrValue::Scalar(x),
            FlatValue::Series(v) => AttrValue::Series(v),
        }
    }
}

impl std::fmt::Display for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrValue::Text(s) => write!(f, "{s}"),
            AttrValue::Scalar(x) => write!(f, "{x}"),
            AttrValue::Series(v) => write!(f, "{}", FlatValue::Series(v.clone())),
            AttrValue::Names(n) => write!(f, "{}", n.join(", ")),
        }
    }
}

/// One physical recording: `Time`, its channels, and metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesDataset {
    pub(crate) time: Vec<f64>,
    pub(crate) channels: BTreeMap<String, Vec<f64>>,
    pub(crate) attrs: BTreeMap<String, AttrValue>,
    pub(crate) tare_log: Vec<TareEntry>,
}

impl TimeSeriesDataset {
    /// Create a dataset with no channels from a time coordinate.
    ///
    /// # Errors
    ///
    /// [`Error::NonMonotonicTime`] if `time` ever decreases (or holds NaN).
    pub fn new(time: Vec<f64>) -> Result<Self> {
        if let Some(index) = time
            .windows(2)
            .position(|w| matches!(w[1].partial_cmp(&w[0]), None | Some(Ordering::Less)))
        {
            return Err(Error::NonMonotonicTime { index: index + 1 });
        }
        Ok(Self {
            time,
            channels: BTreeMap::new(),
            attrs: BTreeMap::new(),
            tare_log: Vec::new(),
        })
    }

    /// Add (or replace) a channel.
    ///
    /// # Errors
    ///
    /// [`Error::ChannelLength`] if `values` is not as long as `Time`.
    pub fn insert_channel(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if values.len() != self.time.len() {
            return Err(Error::ChannelLength {
                channel: name,
                expected: self.time.len(),
                actual: values.len(),
            });
        }
        self.channels.insert(name, values);
        Ok(())
    }

    /// Builder form of [`insert_channel`](Self::insert_channel).
    pub fn with_channel(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        self.insert_channel(name, values)?;
        Ok(self)
    }

    /// Set a metadata attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: AttrValue) {
        self.attrs.insert(name.into(), value);
    }

    /// The `Time` coordinate in seconds.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Samples of a channel.
    pub fn channel(&self, name: &str) -> Option<&[f64]> {
        self.channels.get(name).map(Vec::as_slice)
    }

    /// Samples of a channel, or [`Error::UnknownChannel`].
    pub fn require_channel(&self, name: &str) -> Result<&[f64]> {
        self.channel(name)
            .ok_or_else(|| Error::UnknownChannel(name.to_string()))
    }

    /// Channel names in sorted order.
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    /// Look up a metadata attribute.
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// All metadata attributes.
    pub fn attrs(&self) -> &BTreeMap<String, AttrValue> {
        &self.attrs
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns true if the dataset has no samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Time spanned by the recording, `Time[last] - Time[0]`.
    pub fn duration(&self) -> f64 {
        match (self.time.first(), self.time.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// Mean sample rate estimated from `Time`, in Hz.
    ///
    /// `None` for fewer than two samples or a zero-length time span.
    pub fn sample_rate(&self) -> Option<f64> {
        let duration = self.duration();
        (self.time.len() >= 2 && duration > 0.0).then(|| (self.time.len() - 1) as f64 / duration)
    }

    /// A copy with `dt` added to every `Time` sample.
    ///
    /// The applied shift accumulates in the `time_shift` attribute.
    pub fn shifted(&self, dt: f64) -> Self {
        let mut out = self.clone();
        for t in &mut out.time {
            *t += dt;
        }
        let total = self
            .attr(TIME_SHIFT_ATTR)
            .and_then(AttrValue::as_scalar)
            .unwrap_or(0.0)
            + dt;
        out.set_attr(TIME_SHIFT_ATTR, AttrValue::Scalar(total));
        out
    }
}

/// Promote a flat record to a dataset.
///
/// `Time` becomes the coordinate, fields named in `catalog` become channels
/// and every remaining field is copied verbatim into the metadata together
/// with the record's three provenance name lists.
///
/// # Errors
///
/// - [`Error::MissingTimeField`] if the record has no `Time`.
/// - [`Error::TextChannel`] if `Time` or a catalog channel holds text.
/// - [`Error::NonMonotonicTime`] / [`Error::ChannelLength`] if the shape
///   invariants would be violated.
pub fn build_dataset(record: &FlatRecord, catalog: &ChannelCatalog) -> Result<TimeSeriesDataset> {
    let time = record
        .get(TIME)
        .ok_or(Error::MissingTimeField)?
        .to_numbers()
        .ok_or_else(|| Error::TextChannel(TIME.to_string()))?;

    let mut dataset = TimeSeriesDataset::new(time)?;

    for (name, value) in record.iter() {
        if name == TIME {
            continue;
        }
        if catalog.contains(name) {
            let values = value
                .to_numbers()
                .ok_or_else(|| Error::TextChannel(name.to_string()))?;
            dataset.insert_channel(name, values)?;
        } else {
            dataset.set_attr(name, value.clone().into());
        }
    }

    dataset.set_attr(ALL_ATTRIBUTES, AttrValue::Names(record.all_attributes().to_vec()));
    dataset.set_attr(
        CONVERTED_ATTRIBUTES,
        AttrValue::Names(record.converted_attributes().to_vec()),
    );
    dataset.set_attr(
        UNCONVERTED_ATTRIBUTES,
        AttrValue::Names(record.unconverted_attributes().to_vec()),
    );

    tracing::debug!(
        samples = dataset.len(),
        channels = dataset.channels.len(),
        attrs = dataset.attrs.len(),
        "built dataset"
    );

    Ok(dataset)
}
