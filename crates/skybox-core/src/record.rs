//! Flat records and the structured-record flattener.
//!
//! [`flatten`] turns one [`RawStruct`] into a [`FlatRecord`]: character grids
//! become strings, numeric arrays become 1-D sequences, and single-element
//! numeric arrays collapse to scalars. The record keeps three name lists for
//! provenance: every attribute, the ones converted to text, and the ones left
//! numeric.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::raw::{RawElements, RawStruct};

/// Metadata key of the list of all attribute names.
pub const ALL_ATTRIBUTES: &str = "allAttributes";
/// Metadata key of the list of attributes converted to text.
pub const CONVERTED_ATTRIBUTES: &str = "convertedAttributes";
/// Metadata key of the list of attributes left numeric.
pub const UNCONVERTED_ATTRIBUTES: &str = "unconvertedAttributes";

/// Kind of a flattened attribute, decided once at flatten time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Character grid collapsed into a string.
    Text,
    /// Numeric scalar or sequence.
    Numeric,
}

/// Value of one flattened attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlatValue {
    /// A string built from a character grid.
    Text(String),
    /// A numeric array that held exactly one element.
    Scalar(#[serde(with = "crate::nan::scalar")] f64),
    /// A numeric array flattened to one dimension.
    Series(#[serde(with = "crate::nan::series")] Vec<f64>),
}

impl FlatValue {
    /// Whether this value came from a text or a numeric field.
    pub fn kind(&self) -> AttributeKind {
        match self {
            FlatValue::Text(_) => AttributeKind::Text,
            FlatValue::Scalar(_) | FlatValue::Series(_) => AttributeKind::Numeric,
        }
    }

    /// The string, for text values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FlatValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The scalar, for single-element numeric values.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            FlatValue::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    /// Numeric values as a sequence; a scalar becomes a one-element sequence.
    pub fn to_numbers(&self) -> Option<Vec<f64>> {
        match self {
            FlatValue::Text(_) => None,
            FlatValue::Scalar(x) => Some(vec![*x]),
            FlatValue::Series(v) => Some(v.clone()),
        }
    }
}

impl std::fmt::Display for FlatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlatValue::Text(s) => write!(f, "{s}"),
            FlatValue::Scalar(x) => write!(f, "{x}"),
            FlatValue::Series(v) if v.len() <= 6 => write!(f, "{v:?}"),
            FlatValue::Series(v) => write!(
                f,
                "[{}, {}, {}, ..., {}] ({} values)",
                v[0],
                v[1],
                v[2],
                v[v.len() - 1],
                v.len()
            ),
        }
    }
}

/// A flat attribute mapping with provenance name lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "FlatRecordRepr")]
pub struct FlatRecord {
    values: BTreeMap<String, FlatValue>,
    #[serde(default, rename = "allAttributes")]
    all_attributes: Vec<String>,
    #[serde(default, rename = "convertedAttributes")]
    converted_attributes: Vec<String>,
    #[serde(default, rename = "unconvertedAttributes")]
    unconverted_attributes: Vec<String>,
}

/// Serialized form; the name lists are rebuilt from the values on load so
/// they always agree with the attribute kinds.
#[derive(Deserialize)]
struct FlatRecordRepr {
    #[serde(default)]
    values: BTreeMap<String, FlatValue>,
    #[serde(default, rename = "allAttributes")]
    all_attributes: Vec<String>,
}

impl From<FlatRecordRepr> for FlatRecord {
    fn from(mut repr: FlatRecordRepr) -> Self {
        let mut record = FlatRecord::new();
        for name in repr.all_attributes {
            if let Some(value) = repr.values.remove(&name) {
                record.insert(name, value);
            }
        }
        for (name, value) in repr.values {
            record.insert(name, value);
        }
        record
    }
}

impl FlatRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, recording its name in the provenance lists.
    ///
    /// Re-inserting an existing name replaces the value and moves the name
    /// to the list matching the new kind.
    pub fn insert(&mut self, name: impl Into<String>, value: FlatValue) {
        let name = name.into();
        if self.values.contains_key(&name) {
            self.converted_attributes.retain(|n| n != &name);
            self.unconverted_attributes.retain(|n| n != &name);
        } else {
            self.all_attributes.push(name.clone());
        }
        match value.kind() {
            AttributeKind::Text => self.converted_attributes.push(name.clone()),
            AttributeKind::Numeric => self.unconverted_attributes.push(name.clone()),
        }
        self.values.insert(name, value);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: FlatValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up an attribute.
    pub fn get(&self, name: &str) -> Option<&FlatValue> {
        self.values.get(name)
    }

    /// Returns true if the attribute exists.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate over attributes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlatValue)> {
        self.all_attributes
            .iter()
            .filter_map(|n| self.values.get(n).map(|v| (n.as_str(), v)))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Every attribute name, in declaration order.
    pub fn all_attributes(&self) -> &[String] {
        &self.all_attributes
    }

    /// Names of attributes converted from character grids to text.
    pub fn converted_attributes(&self) -> &[String] {
        &self.converted_attributes
    }

    /// Names of attributes left numeric.
    pub fn unconverted_attributes(&self) -> &[String] {
        &self.unconverted_attributes
    }
}

/// Flatten a structured record into a [`FlatRecord`].
///
/// Each field is classified by its element type: character fields are joined
/// (row-major) into one string, numeric fields are flattened to one dimension
/// and collapsed to a scalar when they hold exactly one element.
///
/// # Errors
///
/// - [`Error::MalformedRecord`] if the record has no field-name metadata, lists
///   a name twice, or lists a name with no data.
/// - [`Error::ShapeMismatch`] if a field's shape disagrees with its data.
pub fn flatten(record: &RawStruct) -> Result<FlatRecord> {
    let names = record
        .names()
        .ok_or_else(|| Error::MalformedRecord("record exposes no field names".to_string()))?;

    let mut flat = FlatRecord::new();
    for name in names {
        if flat.contains(name) {
            return Err(Error::MalformedRecord(format!("field '{name}' is declared twice")));
        }
        let array = record.fields.get(name).ok_or_else(|| {
            Error::MalformedRecord(format!("field '{name}' is declared but has no data"))
        })?;

        let value = match array.row_major(name)? {
            RawElements::Chars(chars) => FlatValue::Text(chars.into_iter().collect()),
            RawElements::Numbers(values) if values.len() == 1 => FlatValue::Scalar(values[0]),
            RawElements::Numbers(values) => FlatValue::Series(values),
        };
        flat.insert(name.clone(), value);
    }

    let undeclared = record.fields.keys().filter(|k| !flat.contains(k)).count();
    if undeclared > 0 {
        tracing::debug!(undeclared, "ignoring fields missing from the declared names");
    }

    Ok(flat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawArray;

    #[test]
    fn flatten_text_and_numbers() {
        let record = RawStruct::new()
            .with_field("a", RawArray::char_grid(&["hello"]))
            .with_field("b", RawArray::numbers(vec![1.0, 2.0, 3.0]));

        let flat = flatten(&record).unwrap();

        assert_eq!(flat.get("a"), Some(&FlatValue::Text("hello".to_string())));
        assert_eq!(flat.get("b"), Some(&FlatValue::Series(vec![1.0, 2.0, 3.0])));
        assert_eq!(flat.converted_attributes(), &["a".to_string()]);
        assert_eq!(flat.unconverted_attributes(), &["b".to_string()]);
        assert_eq!(flat.all_attributes(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn single_element_collapses_to_scalar() {
        let record = RawStruct::new().with_field("fSampling", RawArray::scalar(128.0));
        let flat = flatten(&record).unwrap();
        assert_eq!(flat.get("fSampling"), Some(&FlatValue::Scalar(128.0)));
    }

    #[test]
    fn multi_row_grid_joins_row_major() {
        let record = RawStruct::new().with_field("remarks", RawArray::char_grid(&["ab", "cd"]));
        let flat = flatten(&record).unwrap();
        assert_eq!(flat.get("remarks").and_then(FlatValue::as_text), Some("abcd"));
    }

    #[test]
    fn empty_arrays_keep_their_kind() {
        let record = RawStruct::new()
            .with_field("note", RawArray::text(""))
            .with_field("empty", RawArray::numbers(vec![]));
        let flat = flatten(&record).unwrap();
        assert_eq!(flat.get("note"), Some(&FlatValue::Text(String::new())));
        assert_eq!(flat.get("empty"), Some(&FlatValue::Series(vec![])));
    }

    #[test]
    fn missing_names_is_malformed() {
        let mut record = RawStruct::new().with_field("x", RawArray::scalar(1.0));
        record.names = None;
        assert!(matches!(flatten(&record), Err(Error::MalformedRecord(_))));
    }

    #[test]
    fn declared_without_data_is_malformed() {
        let mut record = RawStruct::new();
        record.names = Some(vec!["ghost".to_string()]);
        assert!(matches!(flatten(&record), Err(Error::MalformedRecord(_))));
    }

    #[test]
    fn insert_replacing_changes_kind_lists() {
        let mut record = FlatRecord::new().with("x", FlatValue::Scalar(1.0));
        record.insert("x", FlatValue::Text("one".to_string()));
        assert_eq!(record.all_attributes(), &["x".to_string()]);
        assert_eq!(record.converted_attributes(), &["x".to_string()]);
        assert!(record.unconverted_attributes().is_empty());
    }

    #[test]
    fn deserialize_rebuilds_name_lists() {
        let json = r#"{"values": {"b": [1.0, 2.0], "a": "x"}, "allAttributes": ["b"]}"#;
        let record: FlatRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.all_attributes(), &["b".to_string(), "a".to_string()]);
        assert_eq!(record.converted_attributes(), &["a".to_string()]);
        assert_eq!(record.unconverted_attributes(), &["b".to_string()]);
    }

    #[test]
    fn long_series_display_is_abbreviated() {
        let value = FlatValue::Series((0..10).map(f64::from).collect());
        assert_eq!(value.to_string(), "[0, 1, 2, ..., 9] (10 values)");
    }
}
