//! Tare (baseline) calibration.
//!
//! A tare subtracts the mean of a channel over a reference window, usually a
//! quiet stretch before the test starts, so the channel reads zero at rest.
//! Window bounds are matched to the nearest `Time` sample and both ends are
//! included.
//!
//! Every subtraction is appended to the dataset's tare log. Taring a channel
//! twice keeps both entries, and [`TimeSeriesDataset::tare_values`] reports
//! the sum of offsets per channel, i.e. the total removed from the raw signal.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::dataset::TimeSeriesDataset;
use crate::error::{Error, Result};

/// One applied tare offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TareEntry {
    /// Channel the offset was subtracted from.
    pub channel: String,
    /// Requested window start in seconds.
    pub start_time: f64,
    /// Requested window end in seconds.
    pub end_time: f64,
    /// First sample of the window (nearest to `start_time`).
    pub start_index: usize,
    /// Last sample of the window (nearest to `end_time`), inclusive.
    pub end_index: usize,
    /// Window mean that was subtracted.
    pub offset: f64,
}

impl TimeSeriesDataset {
    /// Every tare applied to this dataset, oldest first.
    pub fn tare_log(&self) -> &[TareEntry] {
        &self.tare_log
    }

    /// Total offset subtracted from each tared channel.
    pub fn tare_values(&self) -> BTreeMap<String, f64> {
        let mut values = BTreeMap::new();
        for entry in &self.tare_log {
            *values.entry(entry.channel.clone()).or_insert(0.0) += entry.offset;
        }
        values
    }
}

/// Index of the `Time` sample closest to `target` (first one on ties).
fn nearest_index(time: &[f64], target: f64) -> Option<usize> {
    time.iter()
        .map(|t| (t - target).abs())
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

/// Inclusive sample range covering `[start_time, end_time]`.
fn window(time: &[f64], start_time: f64, end_time: f64) -> Result<(usize, usize)> {
    let empty = || Error::EmptyCalibrationWindow {
        start_time,
        end_time,
    };

    if start_time.partial_cmp(&end_time).is_none_or(Ordering::is_gt) {
        return Err(empty());
    }
    let start = nearest_index(time, start_time).ok_or_else(empty)?;
    let end = nearest_index(time, end_time).ok_or_else(empty)?;
    if start > end {
        return Err(empty());
    }
    Ok((start, end))
}

/// Tare the named channels over `[start_time, end_time]`.
///
/// Returns a calibrated copy; `ds` is left untouched. Channels are processed
/// in the given order, so naming a channel twice tares it twice.
///
/// # Errors
///
/// - [`Error::UnknownChannel`] if any named channel is missing (checked
///   before anything is subtracted).
/// - [`Error::EmptyCalibrationWindow`] if `start_time > end_time` or the
///   dataset has no samples.
pub fn tare<S: AsRef<str>>(
    ds: &TimeSeriesDataset,
    channels: &[S],
    start_time: f64,
    end_time: f64,
) -> Result<TimeSeriesDataset> {
    for name in channels {
        ds.require_channel(name.as_ref())?;
    }
    let (start, end) = window(&ds.time, start_time, end_time)?;
    tracing::debug!(start, end, "tare window");

    let mut out = ds.clone();
    for name in channels {
        let name = name.as_ref();
        let Some(values) = out.channels.get_mut(name) else {
            return Err(Error::UnknownChannel(name.to_string()));
        };

        let span = &values[start..=end];
        let offset = span.iter().sum::<f64>() / span.len() as f64;
        for v in values.iter_mut() {
            *v -= offset;
        }

        tracing::debug!(channel = name, offset, "tare applied");
        out.tare_log.push(TareEntry {
            channel: name.to_string(),
            start_time,
            end_time,
            start_index: start,
            end_index: end,
            offset,
        });
    }

    Ok(out)
}

/// Tare every channel of the dataset over `[start_time, end_time]`.
pub fn tare_all(ds: &TimeSeriesDataset, start_time: f64, end_time: f64) -> Result<TimeSeriesDataset> {
    let names: Vec<String> = ds.channel_names().map(str::to_string).collect();
    tare(ds, names.as_slice(), start_time, end_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> TimeSeriesDataset {
        let time: Vec<f64> = (0..10).map(|i| i as f64 * 0.1).collect();
        let wg: Vec<f64> = (0..10).map(|i| 5.0 + i as f64).collect();
        let lc: Vec<f64> = vec![-2.0; 10];
        TimeSeriesDataset::new(time)
            .unwrap()
            .with_channel("WG01", wg)
            .unwrap()
            .with_channel("LC01", lc)
            .unwrap()
    }

    #[test]
    fn window_uses_nearest_samples_inclusive() {
        let ds = dataset();
        // 0.14 -> index 1 (0.1), 0.36 -> index 4 (0.4)
        let tared = tare(&ds, &["WG01"], 0.14, 0.36).unwrap();
        let entry = &tared.tare_log()[0];
        assert_eq!((entry.start_index, entry.end_index), (1, 4));
        // mean of 6, 7, 8, 9
        assert!((entry.offset - 7.5).abs() < 1e-12);
        assert!((tared.channel("WG01").unwrap()[0] - (5.0 - 7.5)).abs() < 1e-12);
    }

    #[test]
    fn original_dataset_is_untouched() {
        let ds = dataset();
        let _ = tare(&ds, &["WG01"], 0.0, 0.2).unwrap();
        assert_eq!(ds.channel("WG01").unwrap()[0], 5.0);
        assert!(ds.tare_log().is_empty());
    }

    #[test]
    fn single_sample_window() {
        let ds = dataset();
        let tared = tare(&ds, &["WG01"], 0.3, 0.3).unwrap();
        assert_eq!(tared.tare_values()["WG01"], 8.0);
        assert_eq!(tared.channel("WG01").unwrap()[3], 0.0);
    }

    #[test]
    fn reversed_window_is_empty() {
        let ds = dataset();
        assert_eq!(
            tare(&ds, &["WG01"], 0.5, 0.1),
            Err(Error::EmptyCalibrationWindow {
                start_time: 0.5,
                end_time: 0.1
            })
        );
    }

    #[test]
    fn dataset_without_samples_is_empty_window() {
        let ds = TimeSeriesDataset::new(vec![])
            .unwrap()
            .with_channel("WG01", vec![])
            .unwrap();
        assert!(matches!(
            tare(&ds, &["WG01"], 0.0, 1.0),
            Err(Error::EmptyCalibrationWindow { .. })
        ));
    }

    #[test]
    fn unknown_channel_fails_before_any_change() {
        let ds = dataset();
        assert_eq!(
            tare(&ds, &["WG01", "nope"], 0.0, 0.2),
            Err(Error::UnknownChannel("nope".to_string()))
        );
    }

    #[test]
    fn tare_all_covers_every_channel() {
        let ds = dataset();
        let tared = tare_all(&ds, 0.0, 0.9).unwrap();
        let values = tared.tare_values();
        assert_eq!(values.len(), 2);
        assert_eq!(values["LC01"], -2.0);
        assert!((values["WG01"] - 9.5).abs() < 1e-12);
        assert!(tared.channel("LC01").unwrap().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn repeated_tare_is_logged_and_summed() {
        let ds = dataset();
        let once = tare(&ds, &["WG01"], 0.0, 0.4).unwrap();
        let twice = tare(&once, &["WG01"], 0.5, 0.9).unwrap();

        assert_eq!(twice.tare_log().len(), 2);
        // first pass removes 7.0, second removes mean(10..=14) - 7.0 = 5.0
        assert!((twice.tare_log()[1].offset - 5.0).abs() < 1e-12);
        assert!((twice.tare_values()["WG01"] - 12.0).abs() < 1e-12);
        assert!((twice.channel("WG01").unwrap()[0] - (5.0 - 12.0)).abs() < 1e-12);
    }

    #[test]
    fn other_channels_keep_their_entries() {
        let ds = dataset();
        let a = tare(&ds, &["LC01"], 0.0, 0.2).unwrap();
        let b = tare(&a, &["WG01"], 0.0, 0.2).unwrap();
        let values = b.tare_values();
        assert_eq!(values["LC01"], -2.0);
        assert!((values["WG01"] - 6.0).abs() < 1e-12);
    }
}
