//! Spectral transforms between a cyclic wave and its harmonic phasors.
//!
//! A [`SpectralTransform`] maps one period of a wave (`L` samples) to phasors
//! indexed by harmonic number `0..=L/2`, and maps phasors back to a wave of any
//! length `nsamp`. Two conventions are provided:
//!
//! - [`RfftTransform`] (`old`) is the plain real FFT normalized by `1/L`.
//!   Resampling just truncates or zero-pads the harmonic list.
//! - [`ZohTransform`] (`new`) treats the wave as the stair-step signal that
//!   wavetable hardware actually plays, where sample `j` is held for the slice
//!   `[j/L, (j+1)/L)` of the period. Its phasors are the Fourier-series
//!   coefficients of that stair-step:
//!
//! ```text
//! c_k = rfft(x)[k] / L · H_L(k),    H_L(k) = sinc(k/L) · e^{-iπk/L}
//! ```
//!
//! and the inverse divides by `H_nsamp(k)` so the resampled wave reproduces the
//! same harmonics when it is itself played back with a zero-order hold. The
//! Nyquist bin of an even-length wave is halved on the way in (it stands for a
//! ±k pair) and doubled on the way out. With `nsamp == L` every factor cancels
//! and the input comes back unchanged.

use crate::error::{MergeError, Result};
use crate::fft::Fft;
use rustfft::num_complex::Complex64;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Forward/inverse transform between a wave and its harmonic phasors.
pub trait SpectralTransform {
    /// Phasors for harmonics `0..=wave.len()/2`.
    fn forward(&self, wave: &[f64]) -> Result<Vec<Complex64>>;

    /// Rebuild a wave of `nsamp` samples. Harmonics at or above the Nyquist
    /// limit of `nsamp` are dropped; missing harmonics are zero.
    fn inverse(&self, spectrum: &[Complex64], nsamp: usize) -> Result<Vec<f64>>;
}

/// Legacy convention: real FFT with `1/L` normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RfftTransform;

impl SpectralTransform for RfftTransform {
    fn forward(&self, wave: &[f64]) -> Result<Vec<Complex64>> {
        if wave.is_empty() {
            return Err(MergeError::degenerate("cannot transform an empty wave"));
        }

        let len = wave.len();
        let scale = 1.0 / len as f64;
        Ok(Fft::new(len)
            .forward_real(wave)
            .into_iter()
            .map(|c| c * scale)
            .collect())
    }

    fn inverse(&self, spectrum: &[Complex64], nsamp: usize) -> Result<Vec<f64>> {
        check_inverse_args(spectrum, nsamp)?;

        let scale = nsamp as f64;
        Ok(Fft::new(nsamp)
            .inverse_real(spectrum)
            .into_iter()
            .map(|x| x * scale)
            .collect())
    }
}

/// Zero-order-hold convention (see the module docs).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZohTransform;

impl ZohTransform {
    /// Frequency response of holding each of `len` samples for `1/len` of a period.
    pub fn hold_response(harmonic: usize, len: usize) -> Complex64 {
        let t = harmonic as f64 / len as f64;
        Complex64::from_polar(sinc(t), -PI * t)
    }
}

impl SpectralTransform for ZohTransform {
    fn forward(&self, wave: &[f64]) -> Result<Vec<Complex64>> {
        let len = wave.len();
        let mut spectrum = RfftTransform.forward(wave)?;

        for (k, c) in spectrum.iter_mut().enumerate() {
            *c *= Self::hold_response(k, len);
        }
        if len % 2 == 0 {
            spectrum[len / 2] *= 0.5;
        }

        Ok(spectrum)
    }

    fn inverse(&self, spectrum: &[Complex64], nsamp: usize) -> Result<Vec<f64>> {
        check_inverse_args(spectrum, nsamp)?;

        let nyquist = nsamp / 2;
        let mut bins: Vec<Complex64> = spectrum
            .iter()
            .take(nyquist + 1)
            .enumerate()
            .map(|(k, &c)| c / Self::hold_response(k, nsamp))
            .collect();
        if nsamp % 2 == 0 && bins.len() > nyquist {
            bins[nyquist] *= 2.0;
        }

        RfftTransform.inverse(&bins, nsamp)
    }
}

fn check_inverse_args(spectrum: &[Complex64], nsamp: usize) -> Result<()> {
    if nsamp == 0 {
        return Err(MergeError::degenerate("output length nsamp must be positive"));
    }
    if spectrum.is_empty() {
        return Err(MergeError::degenerate("cannot invert an empty spectrum"));
    }
    Ok(())
}

/// Normalized sinc: `sin(πt) / (πt)`.
fn sinc(t: f64) -> f64 {
    if t.abs() < 1e-12 {
        1.0
    } else {
        (PI * t).sin() / (PI * t)
    }
}

/// Selects which [`SpectralTransform`] a merge uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TransformConvention {
    /// Zero-order-hold aware transform ([`ZohTransform`]).
    #[default]
    New,
    /// Legacy real FFT ([`RfftTransform`]).
    Old,
}

impl TransformConvention {
    /// Accepted names, in declaration order.
    pub const NAMES: [&'static str; 2] = ["new", "old"];

    /// Lowercase name of this convention.
    pub fn name(self) -> &'static str {
        match self {
            TransformConvention::New => "new",
            TransformConvention::Old => "old",
        }
    }
}

impl SpectralTransform for TransformConvention {
    fn forward(&self, wave: &[f64]) -> Result<Vec<Complex64>> {
        match self {
            TransformConvention::New => ZohTransform.forward(wave),
            TransformConvention::Old => RfftTransform.forward(wave),
        }
    }

    fn inverse(&self, spectrum: &[Complex64], nsamp: usize) -> Result<Vec<f64>> {
        match self {
            TransformConvention::New => ZohTransform.inverse(spectrum, nsamp),
            TransformConvention::Old => RfftTransform.inverse(spectrum, nsamp),
        }
    }
}

impl fmt::Display for TransformConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformConvention {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(TransformConvention::New),
            "old" => Ok(TransformConvention::Old),
            other => Err(MergeError::configuration(format!(
                "unknown transform convention '{other}' (expected one of: {})",
                Self::NAMES.join(", ")
            ))),
        }
    }
}
