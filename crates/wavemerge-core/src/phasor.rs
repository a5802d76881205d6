//! Reduction of same-harmonic phasors from several instruments into one.
//!
//! For a harmonic `k`, each instrument contributes one phasor `p_i` (zero when
//! its spectrum is too short to reach `k`). The merge strategies are:
//!
//! ```text
//! Sum:    mean(p)
//! Amp:    mean(|p|)          · e^{i·φ}
//! Power:  sqrt(mean(|p|²))   · e^{i·φ}
//! ```
//!
//! where the phase `φ` comes from [`PhaseMode`]. `Sum` lets opposite phases
//! cancel; `Amp` and `Power` keep the magnitude of each source.

use crate::error::{MergeError, Result};
use rustfft::num_complex::Complex64;
use std::fmt;
use std::str::FromStr;

/// How phasors of one harmonic are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum MergeStyle {
    /// RMS magnitude, shared phase.
    #[default]
    Power,
    /// Mean magnitude, shared phase.
    Amp,
    /// Plain complex mean.
    Sum,
}

impl MergeStyle {
    /// Accepted names, in declaration order.
    pub const NAMES: [&'static str; 3] = ["power", "amp", "sum"];

    /// Lowercase name of this style.
    pub fn name(self) -> &'static str {
        match self {
            MergeStyle::Power => "power",
            MergeStyle::Amp => "amp",
            MergeStyle::Sum => "sum",
        }
    }
}

impl fmt::Display for MergeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MergeStyle {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "power" => Ok(MergeStyle::Power),
            "amp" => Ok(MergeStyle::Amp),
            "sum" => Ok(MergeStyle::Sum),
            other => Err(MergeError::configuration(format!(
                "unknown merge style '{other}' (expected one of: {})",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

/// Where `Amp` and `Power` take their output phase from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PhaseMode {
    /// Angle of the mean phasor (louder sources pull harder).
    #[default]
    Mean,
    /// Angle of the mean of unit phasors (every non-silent source votes equally).
    Unit,
}

impl PhaseMode {
    /// Accepted names, in declaration order.
    pub const NAMES: [&'static str; 2] = ["mean", "unit"];

    /// Lowercase name of this mode.
    pub fn name(self) -> &'static str {
        match self {
            PhaseMode::Mean => "mean",
            PhaseMode::Unit => "unit",
        }
    }
}

impl fmt::Display for PhaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PhaseMode {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(PhaseMode::Mean),
            "unit" => Ok(PhaseMode::Unit),
            other => Err(MergeError::configuration(format!(
                "unknown phase mode '{other}' (expected one of: {})",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

/// A merge strategy resolved once and applied per harmonic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhasorMerger {
    style: MergeStyle,
    phase: PhaseMode,
}

impl PhasorMerger {
    /// Create a merger.
    pub fn new(style: MergeStyle, phase: PhaseMode) -> Self {
        Self { style, phase }
    }

    /// Merge style in use.
    pub fn style(&self) -> MergeStyle {
        self.style
    }

    /// Phase mode in use.
    pub fn phase(&self) -> PhaseMode {
        self.phase
    }

    /// Merge one harmonic's phasors. An empty set merges to zero.
    pub fn merge(&self, phasors: &[Complex64]) -> Complex64 {
        if phasors.is_empty() {
            return Complex64::new(0.0, 0.0);
        }
        let count = phasors.len() as f64;

        let magnitude = match self.style {
            MergeStyle::Sum => return mean(phasors),
            MergeStyle::Amp => phasors.iter().map(|p| p.norm()).sum::<f64>() / count,
            MergeStyle::Power => {
                (phasors.iter().map(|p| p.norm_sqr()).sum::<f64>() / count).sqrt()
            }
        };

        Complex64::from_polar(magnitude, self.reference_angle(phasors))
    }

    /// Phase of the merged phasor; 0 when the reference phasor vanishes.
    fn reference_angle(&self, phasors: &[Complex64]) -> f64 {
        let reference = match self.phase {
            PhaseMode::Mean => mean(phasors),
            PhaseMode::Unit => {
                let units: Vec<Complex64> = phasors
                    .iter()
                    .filter(|p| p.norm() > 0.0)
                    .map(|p| *p / p.norm())
                    .collect();
                mean(&units)
            }
        };

        if reference.norm() == 0.0 {
            0.0
        } else {
            reference.arg()
        }
    }
}

fn mean(phasors: &[Complex64]) -> Complex64 {
    if phasors.is_empty() {
        return Complex64::new(0.0, 0.0);
    }
    phasors.iter().sum::<Complex64>() / phasors.len() as f64
}
