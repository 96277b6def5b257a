//! File I/O layer for SkyBox recordings.
//!
//! This crate provides:
//!
//! - **Recording interchange**: [`read_record_group`] and [`write_record_group`]
//!   for the JSON form of a structured recording file
//! - **Result export**: [`write_spectrum_csv`], [`write_dataset_csv`] and
//!   [`write_json`] for spectra, calibrated datasets and shift estimates
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use skybox_core::{ChannelCatalog, GroupLayout, load_record_group};
//! use skybox_io::{read_record_group, write_spectrum_csv};
//!
//! let group = read_record_group("T042.json")?;
//! let loaded = load_record_group(&group, &ChannelCatalog::new(["WG01"]), &GroupLayout::default())?;
//!
//! let data = loaded["Data"].as_dataset().unwrap();
//! let spec = skybox_analysis::spectrum(data.require_channel("WG01")?, 100.0)?;
//! write_spectrum_csv("WG01_spectrum.csv", &spec)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod json;
mod table;

pub use json::{read_json, read_record_group, write_json, write_record_group};
pub use table::{write_dataset_csv, write_spectrum_csv};

/// Error types for recording I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// JSON encode/decode error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for recording I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
