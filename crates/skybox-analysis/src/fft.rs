//! FFT wrapper over rustfft for real-valued recordings

use rustfft::{FftPlanner, num_complex::Complex};
use std::sync::Arc;

/// Planned forward/inverse FFT pair of one size
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f64>>,
    ifft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);

        Self { fft, ifft, size }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Perform forward FFT on real input
    ///
    /// Input is zero-padded or truncated to the FFT size. Returns the
    /// non-negative frequency bins, DC to Nyquist (`size/2 + 1` bins).
    pub fn forward(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.size / 2 + 1);
        buffer
    }

    /// Perform forward FFT on complex input (in-place, unnormalized)
    pub fn forward_complex(&self, buffer: &mut [Complex<f64>]) {
        self.fft.process(buffer);
    }

    /// Perform inverse FFT on complex buffer (in-place, scaled by 1/size)
    pub fn inverse_complex(&self, buffer: &mut [Complex<f64>]) {
        self.ifft.process(buffer);

        let scale = 1.0 / self.size as f64;
        for c in buffer.iter_mut() {
            *c *= scale;
        }
    }
}
