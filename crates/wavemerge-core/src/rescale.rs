//! Quantization of real-valued waves into a bounded integer range.
//!
//! Each sample is scaled so the largest magnitude lands on `±maxrange`, then
//! rounded half away from zero:
//!
//! ```text
//! q = round(x · maxrange / max|x|)      q ∈ [-maxrange, maxrange]
//! ```
//!
//! The range is symmetric, so positive and negative peaks are treated alike.
//! With offset enabled the result is shifted into `[0, 2·maxrange]`, the
//! unsigned layout of hardware wave RAM.

use crate::error::{MergeError, Result};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Largest accepted `maxrange`; keeps offset output inside `i32`.
pub const MAX_RANGE_LIMIT: u32 = (i32::MAX / 2) as u32;

/// Whether merged waves are scaled one at a time or as a whole sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Scaling {
    /// Every frame uses the full range on its own.
    #[default]
    Local,
    /// One scale factor for the whole sequence; relative loudness is kept.
    Global,
}

impl Scaling {
    /// Accepted names, in declaration order.
    pub const NAMES: [&'static str; 2] = ["local", "global"];

    /// Lowercase name of this scope.
    pub fn name(self) -> &'static str {
        match self {
            Scaling::Local => "local",
            Scaling::Global => "global",
        }
    }
}

impl fmt::Display for Scaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scaling {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Scaling::Local),
            "global" => Ok(Scaling::Global),
            other => Err(MergeError::configuration(format!(
                "unknown scaling '{other}' (expected one of: {})",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

/// Maps real waves into `[-maxrange, maxrange]` (or `[0, 2·maxrange]` with offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rescaler {
    maxrange: u32,
    offset: bool,
}

impl Rescaler {
    /// Create a rescaler for a positive `maxrange`.
    pub fn new(maxrange: u32) -> Result<Self> {
        if maxrange == 0 || maxrange > MAX_RANGE_LIMIT {
            return Err(MergeError::configuration(format!(
                "maxrange must be in 1..={MAX_RANGE_LIMIT}, got {maxrange}"
            )));
        }
        Ok(Self {
            maxrange,
            offset: false,
        })
    }

    /// Shift output into the unsigned range `[0, 2·maxrange]`.
    pub fn with_offset(mut self, offset: bool) -> Self {
        self.offset = offset;
        self
    }

    /// Magnitude bound of the signed output.
    pub fn maxrange(&self) -> u32 {
        self.maxrange
    }

    /// Whether output is shifted to the unsigned range.
    pub fn offset(&self) -> bool {
        self.offset
    }

    /// Closed range every output sample falls in.
    pub fn range(&self) -> RangeInclusive<i32> {
        let r = self.maxrange as i32;
        if self.offset { 0..=2 * r } else { -r..=r }
    }

    /// Quantize one wave using its own peak.
    pub fn rescale(&self, wave: &[f64]) -> Result<Vec<i32>> {
        let scale = self.scale_for(peak(wave)?);
        Ok(self.quantize(wave, scale))
    }

    /// Quantize a whole sequence with one shared scale factor.
    pub fn rescale_seq(&self, waveseq: &[Vec<f64>]) -> Result<Vec<Vec<i32>>> {
        let mut shared_peak = 0.0f64;
        for wave in waveseq {
            shared_peak = shared_peak.max(peak(wave)?);
        }

        let scale = self.scale_for(shared_peak);
        Ok(waveseq
            .iter()
            .map(|wave| self.quantize(wave, scale))
            .collect())
    }

    fn scale_for(&self, peak: f64) -> f64 {
        if peak > 0.0 {
            self.maxrange as f64 / peak
        } else {
            0.0
        }
    }

    fn quantize(&self, wave: &[f64], scale: f64) -> Vec<i32> {
        let r = self.maxrange as i32;
        let shift = if self.offset { r } else { 0 };
        wave.iter()
            .map(|&x| ((x * scale).round() as i32).clamp(-r, r) + shift)
            .collect()
    }
}

/// Largest magnitude in a wave; rejects NaN and infinities.
fn peak(wave: &[f64]) -> Result<f64> {
    let mut peak = 0.0f64;
    for (i, &x) in wave.iter().enumerate() {
        if !x.is_finite() {
            return Err(MergeError::degenerate(format!(
                "sample {i} is not finite ({x})"
            )));
        }
        peak = peak.max(x.abs());
    }
    Ok(peak)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_maps_to_boundary() {
        let rescaler = Rescaler::new(16).unwrap();
        assert_eq!(rescaler.rescale(&[0.5, -1.0, 0.25]).unwrap(), vec![8, -16, 4]);
        assert_eq!(rescaler.rescale(&[2.0, -1.0, 0.0]).unwrap(), vec![16, -8, 0]);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let rescaler = Rescaler::new(4).unwrap();
        // scale = 4 / 8 = 0.5
        assert_eq!(
            rescaler.rescale(&[8.0, 1.0, -1.0, 3.0, -3.0]).unwrap(),
            vec![4, 1, -1, 2, -2]
        );
    }

    #[test]
    fn all_zero_stays_zero() {
        let rescaler = Rescaler::new(16).unwrap();
        assert_eq!(rescaler.rescale(&[0.0; 4]).unwrap(), vec![0; 4]);
        assert_eq!(
            rescaler.rescale_seq(&[vec![0.0; 3], vec![0.0; 3]]).unwrap(),
            vec![vec![0; 3], vec![0; 3]]
        );
        assert_eq!(
            rescaler.with_offset(true).rescale(&[0.0; 2]).unwrap(),
            vec![16, 16]
        );
    }

    #[test]
    fn global_scale_is_shared() {
        let rescaler = Rescaler::new(10).unwrap();
        let seq = vec![vec![1.0, -1.0], vec![5.0, -2.5]];

        assert_eq!(
            rescaler.rescale_seq(&seq).unwrap(),
            vec![vec![2, -2], vec![10, -5]]
        );
        assert_eq!(rescaler.rescale(&seq[0]).unwrap(), vec![10, -10]);
    }

    #[test]
    fn offset_shifts_to_unsigned_range() {
        let rescaler = Rescaler::new(8).unwrap().with_offset(true);
        assert_eq!(rescaler.range(), 0..=16);
        assert_eq!(rescaler.rescale(&[1.0, -1.0, 0.0]).unwrap(), vec![16, 0, 8]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(Rescaler::new(0), Err(MergeError::Configuration(_))));
        assert!(Rescaler::new(MAX_RANGE_LIMIT + 1).is_err());

        let rescaler = Rescaler::new(16).unwrap();
        assert!(matches!(
            rescaler.rescale(&[1.0, f64::NAN]),
            Err(MergeError::Degenerate(_))
        ));
    }

    #[test]
    fn scaling_parsing() {
        assert_eq!("Global".parse::<Scaling>().unwrap(), Scaling::Global);
        let err = "per-frame".parse::<Scaling>().unwrap_err();
        assert!(err.to_string().contains("local, global"));
    }
}
