//! Serde helpers for numeric samples that may be NaN.
//!
//! Recorders mark dropouts with NaN, which JSON cannot represent;
//! `serde_json` writes any non-finite float as `null`. These helpers write
//! the same `null` and read it back as NaN, so recordings with gaps survive
//! a round trip. Infinities also come back as NaN.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// `#[serde(with)]` module for a single `f64`.
pub(crate) mod scalar {
    use super::{Deserialize, Deserializer, Serialize, Serializer, finite};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        finite(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

/// `#[serde(with)]` module for a `Vec<f64>`.
pub(crate) mod series {
    use super::{Deserialize, Deserializer, Serializer, finite};

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|&v| finite(v)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let values = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}
