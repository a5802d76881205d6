//! Per-harmonic weighting applied to merged phasors.

use rustfft::num_complex::Complex64;

/// Multiplicative weight for each harmonic of a merged spectrum.
///
/// Harmonic 0 is DC. Any `Fn(usize) -> Complex64` closure is a transfer
/// function too, which is handy for one-off filters in tests and scripts.
pub trait TransferFunction {
    /// Weight applied to harmonic `harmonic`.
    fn weight(&self, harmonic: usize) -> Complex64;
}

impl<F> TransferFunction for F
where
    F: Fn(usize) -> Complex64,
{
    fn weight(&self, harmonic: usize) -> Complex64 {
        self(harmonic)
    }
}

/// Identity weighting: every harmonic passes unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unity;

impl TransferFunction for Unity {
    fn weight(&self, _harmonic: usize) -> Complex64 {
        Complex64::new(1.0, 0.0)
    }
}

/// Spectral tilt `k^exponent`; DC passes unchanged.
///
/// Negative exponents darken the merged wave (`-1.0` turns a flat spectrum
/// into a saw-like `1/k` rolloff), positive ones brighten it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    /// Exponent applied to the harmonic number.
    pub exponent: f64,
}

impl PowerLaw {
    /// Create a tilt with the given exponent.
    pub fn new(exponent: f64) -> Self {
        Self { exponent }
    }
}

impl TransferFunction for PowerLaw {
    fn weight(&self, harmonic: usize) -> Complex64 {
        if harmonic == 0 {
            return Complex64::new(1.0, 0.0);
        }
        Complex64::new((harmonic as f64).powf(self.exponent), 0.0)
    }
}

/// Explicit real gain per harmonic.
///
/// Harmonics past the end of the table reuse the last gain; an empty table
/// behaves like [`Unity`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GainTable {
    gains: Vec<f64>,
}

impl GainTable {
    /// Create a table; `gains[k]` weights harmonic `k`.
    pub fn new(gains: Vec<f64>) -> Self {
        Self { gains }
    }

    /// The per-harmonic gains.
    pub fn gains(&self) -> &[f64] {
        &self.gains
    }
}

impl TransferFunction for GainTable {
    fn weight(&self, harmonic: usize) -> Complex64 {
        let gain = self
            .gains
            .get(harmonic)
            .or_else(|| self.gains.last())
            .copied()
            .unwrap_or(1.0);
        Complex64::new(gain, 0.0)
    }
}
