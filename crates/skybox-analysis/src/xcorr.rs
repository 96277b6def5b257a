//! Full-lag cross-correlation and peak picking.
//!
//! # Definition
//!
//! ```text
//! R_xy(τ) = Σ_n x[n] · y[n + τ]          τ = -(lx-1) ..= ly-1
//! ```
//!
//! Entry `i` of a full correlation holds lag `τ = i - (lx - 1)`. If
//! `y[n] = x[n - D]` the correlation peaks at `τ = D`, so a positive lag means
//! `y` is delayed relative to `x`.
//!
//! The FFT path uses `R_xy = IFFT(conj(X) · Y)` with both inputs zero-padded
//! to a power of two at least `lx + ly - 1` long, which keeps the circular
//! result free of wrap-around.

use rustfft::num_complex::Complex;

use crate::fft::Fft;

/// Lag in samples of entry `index` of a full correlation where `x` had `x_len` samples.
pub fn lag_of(index: usize, x_len: usize) -> isize {
    index as isize - (x_len as isize - 1)
}

/// Direct O(lx · ly) full cross-correlation.
///
/// Output length is `lx + ly - 1`, or empty if either input is empty.
pub fn xcorr_direct(x: &[f64], y: &[f64]) -> Vec<f64> {
    if x.is_empty() || y.is_empty() {
        return Vec::new();
    }

    let len = x.len() + y.len() - 1;
    let mut result = vec![0.0; len];
    for (i, out) in result.iter_mut().enumerate() {
        let lag = lag_of(i, x.len());
        *out = x
            .iter()
            .enumerate()
            .filter_map(|(n, &xv)| {
                let m = n as isize + lag;
                (m >= 0 && (m as usize) < y.len()).then(|| xv * y[m as usize])
            })
            .sum();
    }
    result
}

/// FFT-based full cross-correlation, O(n log n).
///
/// Same layout as [`xcorr_direct`].
pub fn xcorr_full(x: &[f64], y: &[f64]) -> Vec<f64> {
    if x.is_empty() || y.is_empty() {
        return Vec::new();
    }

    let len = x.len() + y.len() - 1;
    let fft_size = len.next_power_of_two().max(2);
    let fft = Fft::new(fft_size);

    let mut buf_x: Vec<Complex<f64>> = x.iter().map(|&v| Complex::new(v, 0.0)).collect();
    buf_x.resize(fft_size, Complex::new(0.0, 0.0));
    let mut buf_y: Vec<Complex<f64>> = y.iter().map(|&v| Complex::new(v, 0.0)).collect();
    buf_y.resize(fft_size, Complex::new(0.0, 0.0));

    fft.forward_complex(&mut buf_x);
    fft.forward_complex(&mut buf_y);
    for (cx, cy) in buf_x.iter_mut().zip(&buf_y) {
        *cx = cx.conj() * cy;
    }
    fft.inverse_complex(&mut buf_x);

    // circular layout: lag τ ≥ 0 at index τ, lag τ < 0 at fft_size + τ
    (0..len)
        .map(|i| {
            let lag = lag_of(i, x.len());
            let idx = if lag >= 0 {
                lag as usize
            } else {
                (fft_size as isize + lag) as usize
            };
            buf_x[idx].re
        })
        .collect()
}

/// Full cross-correlation divided by `sqrt(Σx² · Σy²)`.
///
/// Returns `None` when the denominator is below `1e-12`, i.e. when either
/// input is (numerically) all zeros.
pub fn xcorr_normalized_full(x: &[f64], y: &[f64]) -> Option<Vec<f64>> {
    let energy_x: f64 = x.iter().map(|v| v * v).sum();
    let energy_y: f64 = y.iter().map(|v| v * v).sum();
    let denom = (energy_x * energy_y).sqrt();
    if denom.is_nan() || denom < 1e-12 {
        return None;
    }
    Some(xcorr_full(x, y).into_iter().map(|r| r / denom).collect())
}

/// Index and value of the largest entry. The first index wins on ties.
pub fn argmax(values: &[f64]) -> Option<(usize, f64)> {
    values.iter().copied().enumerate().fold(None, |best, (i, v)| match best {
        Some((_, b)) if v <= b => best,
        _ if v.is_nan() => best,
        _ => Some((i, v)),
    })
}

/// Indices of local maxima with height at least `min_height`.
///
/// A local maximum is an interior sample strictly greater than its left
/// neighbour and strictly greater than the first differing sample to its
/// right. Flat tops are reported once, at their middle sample (rounded
/// down). The first and last samples are never reported.
pub fn local_maxima(values: &[f64], min_height: f64) -> Vec<usize> {
    let mut peaks = Vec::new();
    if values.len() < 3 {
        return peaks;
    }

    let last = values.len() - 1;
    let mut i = 1;
    while i < last {
        if values[i - 1] < values[i] {
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                let mid = (i + ahead - 1) / 2;
                if values[mid] >= min_height {
                    peaks.push(mid);
                }
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    peaks
}
