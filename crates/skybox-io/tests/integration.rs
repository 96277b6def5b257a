//! Integration tests for skybox-io.
//!
//! Round-trips a recording file through disk, normalizes it and exports the
//! results in every supported format.

use skybox_analysis::{ResamplePolicy, Signal, estimate_shift, spectrum};
use skybox_core::raw::{RawArray, RawStruct, RecordEntry};
use skybox_core::{
    AttrValue, ChannelCatalog, FlatRecord, FlatValue, GroupLayout, RecordGroup, load_record_group,
    tare,
};
use skybox_io::{
    read_json, read_record_group, write_dataset_csv, write_json, write_record_group,
    write_spectrum_csv,
};
use tempfile::TempDir;

fn recording() -> RecordGroup {
    let time: Vec<f64> = (0..64).map(|i| f64::from(i) / 32.0).collect();
    let wg01: Vec<f64> = time
        .iter()
        .map(|t| 0.5 + (2.0 * std::f64::consts::PI * 4.0 * t).sin())
        .collect();
    let wg02: Vec<f64> = time
        .iter()
        .map(|t| 0.5 + (2.0 * std::f64::consts::PI * 4.0 * (t - 1.0 / 32.0)).sin())
        .collect();

    let data = RawStruct::new()
        .with_field("Time", RawArray::numbers(time))
        .with_field("WG01", RawArray::numbers(wg01))
        .with_field("WG02", RawArray::numbers(wg02))
        .with_field("operator", RawArray::text("basin crew"));

    let mut group = RecordGroup::new();
    group.insert("Data".to_string(), RecordEntry::Struct(data));
    group
}

#[test]
fn recording_file_round_trip_then_export() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("T001.json");
    write_record_group(&input, &recording()).unwrap();

    let group = read_record_group(&input).unwrap();
    let catalog = ChannelCatalog::new(["WG01", "WG02"]);
    let loaded = load_record_group(&group, &catalog, &GroupLayout::default()).unwrap();
    let data = loaded["Data"].as_dataset().unwrap();

    // tare and export the table
    let tared = tare(data, &["WG01", "WG02"], 0.0, 1.0).unwrap();
    let csv_path = dir.path().join("tared.csv");
    write_dataset_csv(&csv_path, &tared).unwrap();
    let text = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(text.lines().next(), Some("Time,WG01,WG02"));
    assert_eq!(text.lines().count(), 65);

    // full dataset, attributes included, as JSON
    let json_path = dir.path().join("tared.json");
    write_json(&json_path, &tared).unwrap();
    let value: serde_json::Value = read_json(&json_path).unwrap();
    assert_eq!(value["attrs"]["operator"], "basin crew");
    assert_eq!(value["tare_log"].as_array().map(Vec::len), Some(2));

    // spectrum of one channel
    let spec = spectrum(tared.channel("WG01").unwrap(), 32.0).unwrap();
    let spec_path = dir.path().join("WG01.csv");
    write_spectrum_csv(&spec_path, &spec).unwrap();
    let rows = std::fs::read_to_string(&spec_path).unwrap().lines().count();
    assert_eq!(rows, 1 + 33);

    // shift estimate as JSON
    let est = estimate_shift(
        &Signal::from_dataset(data, "WG01", Some(32.0)).unwrap(),
        &Signal::from_dataset(data, "WG02", Some(32.0)).unwrap(),
        ResamplePolicy::Downsample,
    )
    .unwrap();
    let shift_path = dir.path().join("shift.json");
    write_json(&shift_path, &est).unwrap();
    let value: serde_json::Value = read_json(&shift_path).unwrap();
    assert_eq!(value["common_len"], 64);
    assert!(value["all_peak_shifts"].is_array());
}

#[test]
fn dropout_samples_survive_the_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("T002.json");

    let data = RawStruct::new()
        .with_field("Time", RawArray::numbers(vec![0.0, 0.1, 0.2, 0.3]))
        .with_field("WG01", RawArray::numbers(vec![1.0, f64::NAN, 3.0, 4.0]))
        .with_field("gain", RawArray::scalar(f64::NAN));
    let props = FlatRecord::new()
        .with("depthAtWM", FlatValue::Scalar(f64::NAN))
        .with("calibration", FlatValue::Series(vec![0.5, f64::NAN]));
    let mut group = RecordGroup::new();
    group.insert("Data".to_string(), RecordEntry::Struct(data));
    group.insert("TestProperties".to_string(), RecordEntry::Flat(props));

    write_record_group(&path, &group).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("null"));

    let group = read_record_group(&path).unwrap();
    let catalog = ChannelCatalog::new(["WG01"]);
    let loaded = load_record_group(&group, &catalog, &GroupLayout::default()).unwrap();

    let data = loaded["Data"].as_dataset().unwrap();
    let wg01 = data.channel("WG01").unwrap();
    assert_eq!(wg01[0], 1.0);
    assert!(wg01[1].is_nan());
    assert_eq!(wg01[3], 4.0);
    assert!(data.attr("gain").and_then(AttrValue::as_scalar).unwrap().is_nan());

    let props = loaded["TestProperties"].as_record().unwrap();
    assert!(props.get("depthAtWM").and_then(FlatValue::as_scalar).unwrap().is_nan());
    let calibration = props.get("calibration").and_then(FlatValue::to_numbers).unwrap();
    assert_eq!(calibration[0], 0.5);
    assert!(calibration[1].is_nan());
}
