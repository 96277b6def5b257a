//! Property-based tests for skybox-core datasets and calibration.
//!
//! Verifies the dataset shape invariant and the tare zero-mean property
//! using proptest for randomized recordings.

use proptest::prelude::*;
use skybox_core::{ChannelCatalog, FlatRecord, FlatValue, build_dataset, tare, tare_all};

/// Strategy for a recording: sample count plus a few channels of that length.
fn recording() -> impl Strategy<Value = (Vec<f64>, Vec<Vec<f64>>)> {
    (2usize..200).prop_flat_map(|n| {
        let time = Just((0..n).map(|i| i as f64 * 0.01).collect::<Vec<f64>>());
        let channels = prop::collection::vec(prop::collection::vec(-100.0f64..100.0, n), 1..4);
        (time, channels)
    })
}

fn channel_name(i: usize) -> String {
    format!("WG{:02}", i + 1)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every channel of a built dataset is as long as `Time`.
    #[test]
    fn channels_match_time_length((time, channels) in recording()) {
        let mut record = FlatRecord::new().with("Time", FlatValue::Series(time.clone()));
        for (i, values) in channels.iter().enumerate() {
            record.insert(channel_name(i), FlatValue::Series(values.clone()));
        }
        record.insert("operator", FlatValue::Text("rig".to_string()));

        let catalog: ChannelCatalog = (0..channels.len()).map(channel_name).collect();
        let ds = build_dataset(&record, &catalog).unwrap();

        prop_assert_eq!(ds.channel_names().count(), channels.len());
        for name in ds.channel_names() {
            prop_assert_eq!(ds.channel(name).unwrap().len(), ds.time().len());
        }
        prop_assert!(ds.attr("operator").is_some());
    }

    /// After a tare the window mean is zero and the logged offset is the
    /// pre-subtraction window mean.
    #[test]
    fn tare_zeroes_window_mean(
        (time, channels) in recording(),
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
    ) {
        let mut record = FlatRecord::new().with("Time", FlatValue::Series(time.clone()));
        record.insert("WG01", FlatValue::Series(channels[0].clone()));
        let ds = build_dataset(&record, &ChannelCatalog::new(["WG01"])).unwrap();

        let span = time[time.len() - 1];
        let (t0, t1) = (a.min(b) * span, a.max(b) * span);
        let tared = tare(&ds, &["WG01"], t0, t1).unwrap();

        let entry = &tared.tare_log()[0];
        let window = entry.start_index..=entry.end_index;
        let raw = &ds.channel("WG01").unwrap()[window.clone()];
        let raw_mean = raw.iter().sum::<f64>() / raw.len() as f64;
        let after = &tared.channel("WG01").unwrap()[window];
        let after_mean = after.iter().sum::<f64>() / after.len() as f64;

        prop_assert!(after_mean.abs() < 1e-9, "window mean after tare = {}", after_mean);
        prop_assert!((tared.tare_values()["WG01"] - raw_mean).abs() < 1e-9);
        prop_assert_eq!(tared.time(), ds.time());
    }

    /// Taring every channel never changes the sample count.
    #[test]
    fn tare_all_preserves_shape((time, channels) in recording()) {
        let mut record = FlatRecord::new().with("Time", FlatValue::Series(time));
        for (i, values) in channels.iter().enumerate() {
            record.insert(channel_name(i), FlatValue::Series(values.clone()));
        }
        let catalog: ChannelCatalog = (0..channels.len()).map(channel_name).collect();
        let ds = build_dataset(&record, &catalog).unwrap();

        let tared = tare_all(&ds, 0.0, 0.05).unwrap();
        prop_assert_eq!(tared.tare_log().len(), channels.len());
        for name in tared.channel_names() {
            prop_assert_eq!(tared.channel(name).unwrap().len(), ds.len());
        }
    }
}
