//! SkyBox Analysis - spectra and time alignment for rig recordings
//!
//! - [`fft`] - FFT wrapper over rustfft
//! - [`spectrum`] - single-sided amplitude and power spectral density
//! - [`resample`] - bin-averaging and linear-interpolation rate conversion
//! - [`xcorr`] - full-lag cross-correlation and peak picking
//! - [`sync`] - time-shift estimation between two recordings
//!
//! ## Example
//!
//! ```rust
//! use skybox_analysis::{ResamplePolicy, Signal, estimate_shift, spectrum};
//!
//! let time: Vec<f64> = (0..200).map(|i| i as f64 / 50.0).collect();
//! let a: Vec<f64> = time.iter().map(|t| (-(t - 1.0) * (t - 1.0) * 100.0).exp()).collect();
//! let b: Vec<f64> = time.iter().map(|t| (-(t - 1.2) * (t - 1.2) * 100.0).exp()).collect();
//!
//! let est = estimate_shift(
//!     &Signal::new(&a, &time, 50.0),
//!     &Signal::new(&b, &time, 50.0),
//!     ResamplePolicy::Downsample,
//! )
//! .unwrap();
//! assert!((est.best_shift - 0.2).abs() < 1e-9);
//!
//! let spec = spectrum(&a, 50.0).unwrap();
//! assert_eq!(spec.len(), 101);
//! ```

pub mod error;
pub mod fft;
pub mod resample;
pub mod spectrum;
pub mod sync;
pub mod xcorr;

pub use error::{AnalysisError, Result};
pub use fft::Fft;
pub use resample::{RATE_TOLERANCE, ResamplePolicy, bin_average, linear_resample, rates_match};
pub use spectrum::{SpectrumResult, spectrum};
pub use sync::{ShiftEstimate, Signal, estimate_shift};
pub use xcorr::{xcorr_full, xcorr_normalized_full};
