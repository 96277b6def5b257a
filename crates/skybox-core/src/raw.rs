//! Raw structured records as produced by the external record reader.
//!
//! A recording file is a set of named top-level entries. Each entry is either
//! a structured record (a struct of N-d arrays) or a record that
//! was already flattened upstream. Arrays are typed at the source: a field is
//! either a character grid or a numeric array, never a mix.
//!
//! ```rust
//! use skybox_core::raw::{RawArray, RawStruct};
//!
//! let record = RawStruct::new()
//!     .with_field("testName", RawArray::text("T042_regular"))
//!     .with_field("Time", RawArray::numbers(vec![0.0, 0.01, 0.02]));
//!
//! assert_eq!(record.names(), Some(&["testName".to_string(), "Time".to_string()][..]));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::record::FlatRecord;

/// Storage order of an N-d array's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// Last index varies fastest (C order).
    #[default]
    RowMajor,
    /// First index varies fastest (Fortran order, as the rig recorder writes).
    ColumnMajor,
}

/// Typed element storage of a raw array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum RawElements {
    /// One character per element (character grid).
    Chars(Vec<char>),
    /// Numeric elements; NaN marks a dropout.
    Numbers(#[serde(with = "crate::nan::series")] Vec<f64>),
}

impl RawElements {
    /// Number of stored elements.
    pub fn len(&self) -> usize {
        match self {
            RawElements::Chars(c) => c.len(),
            RawElements::Numbers(n) => n.len(),
        }
    }

    /// Returns true if no elements are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One field of a structured record: an N-d array with its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawArray {
    /// Extent of each dimension.
    pub shape: Vec<usize>,
    /// Storage order of `elements`.
    #[serde(default)]
    pub order: Order,
    /// The stored elements.
    pub elements: RawElements,
}

impl RawArray {
    /// A 1×N character row holding `s`.
    pub fn text(s: &str) -> Self {
        let chars: Vec<char> = s.chars().collect();
        Self {
            shape: vec![1, chars.len()],
            order: Order::RowMajor,
            elements: RawElements::Chars(chars),
        }
    }

    /// A 2-D character grid, one row per string. Rows are padded with
    /// spaces to the longest row.
    pub fn char_grid(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut chars = Vec::with_capacity(rows.len() * width);
        for row in rows {
            let start = chars.len();
            chars.extend(row.chars());
            chars.resize(start + width, ' ');
        }
        Self {
            shape: vec![rows.len(), width],
            order: Order::RowMajor,
            elements: RawElements::Chars(chars),
        }
    }

    /// A 1-D numeric array.
    pub fn numbers(values: Vec<f64>) -> Self {
        Self {
            shape: vec![values.len()],
            order: Order::RowMajor,
            elements: RawElements::Numbers(values),
        }
    }

    /// A 1×1 numeric array, the shape the recorder gives scalars.
    pub fn scalar(value: f64) -> Self {
        Self {
            shape: vec![1, 1],
            order: Order::RowMajor,
            elements: RawElements::Numbers(vec![value]),
        }
    }

    /// An array with explicit shape and storage order.
    pub fn with_shape(shape: Vec<usize>, order: Order, elements: RawElements) -> Self {
        Self {
            shape,
            order,
            elements,
        }
    }

    /// Number of elements implied by the shape.
    pub fn shape_len(&self) -> usize {
        self.shape.iter().product()
    }

    /// Elements flattened to row-major order.
    ///
    /// `field` only names the array in the error when the shape and the
    /// element count disagree.
    pub fn row_major(&self, field: &str) -> Result<RawElements> {
        let expected = self.shape_len();
        let actual = self.elements.len();
        if expected != actual {
            return Err(Error::ShapeMismatch {
                field: field.to_string(),
                expected,
                actual,
            });
        }

        if self.order == Order::RowMajor || self.shape.iter().filter(|&&d| d > 1).count() < 2 {
            return Ok(self.elements.clone());
        }

        let perm = column_to_row_major(&self.shape);
        Ok(match &self.elements {
            RawElements::Chars(c) => RawElements::Chars(perm.iter().map(|&i| c[i]).collect()),
            RawElements::Numbers(n) => RawElements::Numbers(perm.iter().map(|&i| n[i]).collect()),
        })
    }
}

/// Storage offsets of a column-major array, visited in row-major order.
fn column_to_row_major(shape: &[usize]) -> Vec<usize> {
    let total: usize = shape.iter().product();
    let mut strides = vec![1usize; shape.len()];
    for d in 1..shape.len() {
        strides[d] = strides[d - 1] * shape[d - 1];
    }

    let mut index = vec![0usize; shape.len()];
    let mut offsets = Vec::with_capacity(total);
    for _ in 0..total {
        offsets.push(index.iter().zip(&strides).map(|(i, s)| i * s).sum());
        for d in (0..shape.len()).rev() {
            index[d] += 1;
            if index[d] < shape[d] {
                break;
            }
            index[d] = 0;
        }
    }
    offsets
}

/// A structured record: named N-d array fields plus the field-name list.
///
/// `names` mirrors the `dtype.names` metadata of the source format. A record
/// without it cannot be classified and is rejected by
/// [`flatten`](crate::record::flatten).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawStruct {
    /// Declared field names, in declaration order.
    #[serde(default)]
    pub names: Option<Vec<String>>,
    /// Field data keyed by name.
    #[serde(default)]
    pub fields: BTreeMap<String, RawArray>,
}

impl RawStruct {
    /// An empty record with (empty) field-name metadata.
    pub fn new() -> Self {
        Self {
            names: Some(Vec::new()),
            fields: BTreeMap::new(),
        }
    }

    /// Add a field, appending its name to the declared names.
    pub fn with_field(mut self, name: impl Into<String>, array: RawArray) -> Self {
        let name = name.into();
        self.names.get_or_insert_with(Vec::new).push(name.clone());
        self.fields.insert(name, array);
        self
    }

    /// Declared field names, if the record has them.
    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }
}

/// One top-level entry of a recording file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordEntry {
    /// A structured record still to be flattened.
    Struct(RawStruct),
    /// A record that is already flat.
    Flat(FlatRecord),
}

/// All top-level entries of a recording file, keyed by entry name.
pub type RecordGroup = BTreeMap<String, RecordEntry>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_grid_pads_rows() {
        let grid = RawArray::char_grid(&["ab", "c"]);
        assert_eq!(grid.shape, vec![2, 2]);
        assert_eq!(grid.elements, RawElements::Chars(vec!['a', 'b', 'c', ' ']));
    }

    #[test]
    fn column_major_is_reordered() {
        // 2x3 matrix [[1,2,3],[4,5,6]] stored column by column.
        let array = RawArray::with_shape(
            vec![2, 3],
            Order::ColumnMajor,
            RawElements::Numbers(vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]),
        );
        assert_eq!(
            array.row_major("m").unwrap(),
            RawElements::Numbers(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        );
    }

    #[test]
    fn column_major_three_dims() {
        // shape [2, 2, 2], element (i, j, k) = 100i + 10j + k
        let mut stored = vec![0.0; 8];
        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    stored[i + 2 * j + 4 * k] = (100 * i + 10 * j + k) as f64;
                }
            }
        }
        let array = RawArray::with_shape(vec![2, 2, 2], Order::ColumnMajor, RawElements::Numbers(stored));
        assert_eq!(
            array.row_major("cube").unwrap(),
            RawElements::Numbers(vec![0.0, 1.0, 10.0, 11.0, 100.0, 101.0, 110.0, 111.0])
        );
    }

    #[test]
    fn column_vector_needs_no_reorder() {
        let array = RawArray::with_shape(
            vec![3, 1],
            Order::ColumnMajor,
            RawElements::Numbers(vec![1.0, 2.0, 3.0]),
        );
        assert_eq!(
            array.row_major("v").unwrap(),
            RawElements::Numbers(vec![1.0, 2.0, 3.0])
        );
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let array = RawArray::with_shape(vec![2, 2], Order::RowMajor, RawElements::Numbers(vec![1.0]));
        assert_eq!(
            array.row_major("bad"),
            Err(Error::ShapeMismatch {
                field: "bad".to_string(),
                expected: 4,
                actual: 1
            })
        );
    }

    #[test]
    fn entry_json_shape() {
        let entry = RecordEntry::Struct(RawStruct::new().with_field("x", RawArray::scalar(2.0)));
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"type\":\"struct\""), "got: {json}");
        let back: RecordEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
