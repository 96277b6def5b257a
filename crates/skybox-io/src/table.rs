//! CSV export of spectra and datasets.
//!
//! Numbers are written with Rust's shortest round-trip formatting, so a
//! value read back parses to the same `f64`.

use skybox_analysis::SpectrumResult;
use skybox_core::{TIME, TimeSeriesDataset};
use std::path::Path;

use crate::Result;

/// Write a spectrum as `frequency_hz,amplitude,psd`, one row per bin.
pub fn write_spectrum_csv<P: AsRef<Path>>(path: P, spectrum: &SpectrumResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["frequency_hz", "amplitude", "psd"])?;

    for ((f, a), p) in spectrum
        .frequencies
        .iter()
        .zip(&spectrum.amplitude)
        .zip(&spectrum.psd)
    {
        writer.write_record([f.to_string(), a.to_string(), p.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a dataset with `Time` first, then every channel in name order.
///
/// Metadata attributes are not part of the table; use
/// [`write_json`](crate::write_json) to keep them.
pub fn write_dataset_csv<P: AsRef<Path>>(path: P, dataset: &TimeSeriesDataset) -> Result<()> {
    let names: Vec<&str> = dataset.channel_names().collect();
    let columns: Vec<&[f64]> = names
        .iter()
        .filter_map(|name| dataset.channel(name))
        .collect();

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(std::iter::once(TIME).chain(names.iter().copied()))?;

    for (i, t) in dataset.time().iter().enumerate() {
        let row = std::iter::once(t.to_string()).chain(columns.iter().map(|c| c[i].to_string()));
        writer.write_record(row)?;
    }

    writer.flush()?;
    tracing::debug!(rows = dataset.len(), columns = names.len() + 1, "wrote dataset csv");
    Ok(())
}
