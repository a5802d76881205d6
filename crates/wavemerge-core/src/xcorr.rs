//! Circular cross-correlation and phase alignment of single-cycle waves.
//!
//! Two waves of one period each are compared under every cyclic shift:
//!
//! ```text
//! R[k] = Σ_n fixed[n + k] · sweep[n]        (indices mod N)
//!      = Re( IFFT( FFT(fixed) · conj(FFT(sweep)) ) )[k]
//! ```
//!
//! If `sweep` is `fixed` rotated right by `j` samples, `R` peaks at
//! `k = N - j`, and rotating `sweep` right by that `k` lines it back up
//! with `fixed`.

use crate::error::{MergeError, Result};
use crate::fft::Fft;
use rustfft::num_complex::Complex64;

/// Relative spread within which correlation values count as the same peak.
///
/// FFT rounding can split an exact tie by a few ulps; values this close are
/// treated as equal so the first lag wins, as it would in exact arithmetic.
const TIE_TOLERANCE: f64 = 1e-9;

/// Circular cross-correlation of two equal-length waves.
pub fn correlate(fixed: &[f64], sweep: &[f64]) -> Result<Vec<f64>> {
    if fixed.len() != sweep.len() {
        return Err(MergeError::shape("correlate", fixed.len(), sweep.len()));
    }
    if fixed.is_empty() {
        return Err(MergeError::degenerate("cannot correlate empty waves"));
    }

    let n = fixed.len();
    let fft = Fft::new(n);

    let mut buf_fixed: Vec<Complex64> = fixed.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    let mut buf_sweep: Vec<Complex64> = sweep.iter().map(|&v| Complex64::new(v, 0.0)).collect();

    fft.forward_complex(&mut buf_fixed);
    fft.forward_complex(&mut buf_sweep);

    for (f, s) in buf_fixed.iter_mut().zip(buf_sweep.iter()) {
        *f *= s.conj();
    }

    fft.inverse_complex(&mut buf_fixed);

    Ok(buf_fixed.iter().map(|c| c.re).collect())
}

/// Rotation (in samples) that best aligns `sweep` with `fixed`.
///
/// Returns the first offset of maximum signed correlation. Fails with
/// [`MergeError::PhaseInversion`] when the first offset of maximum
/// *absolute* correlation is a different lag: some rotation of the inverted
/// sweep matches at least as well, so rotation alone cannot settle the
/// alignment. This includes every wave whose negation is one of its own
/// rotations (squares, sines), correlated against its negation.
pub fn correlate_offset(fixed: &[f64], sweep: &[f64]) -> Result<usize> {
    let corrs = correlate(fixed, sweep)?;

    let signed_peak = first_peak(&corrs);
    let magnitudes: Vec<f64> = corrs.iter().map(|c| c.abs()).collect();
    let absolute_peak = first_peak(&magnitudes);

    if absolute_peak != signed_peak {
        return Err(MergeError::PhaseInversion {
            signed_peak,
            absolute_peak,
        });
    }

    Ok(signed_peak)
}

/// Greedily rotate every wave into best agreement with its aligned predecessor.
///
/// The first wave is the unrotated reference.
pub fn align_waves(waveseq: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let mut out: Vec<Vec<f64>> = Vec::with_capacity(waveseq.len());

    for wave in waveseq {
        let aligned = match out.last() {
            None => wave.clone(),
            Some(previous) => rotate(wave, correlate_offset(previous, wave)?),
        };
        out.push(aligned);
    }

    Ok(out)
}

/// Rotate right by `offset` samples: `out[(i + offset) % n] = wave[i]`.
pub fn rotate<T: Clone>(wave: &[T], offset: usize) -> Vec<T> {
    let mut out = wave.to_vec();
    if !out.is_empty() {
        let len = out.len();
        out.rotate_right(offset % len);
    }
    out
}

/// First index whose value reaches the maximum, up to [`TIE_TOLERANCE`].
fn first_peak(values: &[f64]) -> usize {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let scale = values.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    let floor = max - TIE_TOLERANCE * scale;
    values.iter().position(|&v| v >= floor).unwrap_or(0)
}
