//! Frame-by-frame spectral merge of several instruments into one wavetable.
//!
//! For every output frame `i` (up to the longest instrument):
//!
//! 1. Each instrument yields its wave at `i` (last wave held past its end),
//!    repeated `harmonic` times and scaled by its amplitude.
//! 2. Every contribution goes through the forward [`SpectralTransform`].
//! 3. Harmonic by harmonic, the phasors (zero where a spectrum is too short)
//!    are reduced by the [`PhasorMerger`] and weighted by the transfer function.
//! 4. The merged spectrum is inverted to `nsamp` samples.
//! 5. The [`Rescaler`] quantizes each frame (local scaling) or the whole
//!    sequence at once (global scaling).
//!
//! ```rust
//! use wavemerge_core::{Instrument, MergeConfig, MergeEngine, MergeStyle, Unity};
//!
//! let square = vec![vec![1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0]];
//! let saw = vec![vec![-4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0]];
//! let instruments = [
//!     Instrument::new(square, 1, 1.0).unwrap(),
//!     Instrument::new(saw, 2, 0.5).unwrap(),
//! ];
//!
//! let engine = MergeEngine::new(MergeConfig::new(16).with_style(MergeStyle::Power)).unwrap();
//! let merged = engine.merge(&instruments, 32, &Unity).unwrap();
//! assert_eq!(merged.len(), 1);
//! assert_eq!(merged[0].len(), 32);
//! ```

use crate::combine::{Combined, combine};
use crate::error::{MergeError, Result};
use crate::instrument::Instrument;
use crate::phasor::{MergeStyle, PhaseMode, PhasorMerger};
use crate::rescale::{Rescaler, Scaling};
use crate::transfer::{TransferFunction, Unity};
use crate::transform::{SpectralTransform, TransformConvention};
use rustfft::num_complex::Complex64;

/// Settings for one merge session. Fixed once an engine is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeConfig {
    /// Magnitude bound of quantized output samples.
    pub maxrange: u32,
    /// Phasor merge strategy.
    pub style: MergeStyle,
    /// Per-frame or whole-sequence quantization.
    pub scaling: Scaling,
    /// Transform convention.
    pub convention: TransformConvention,
    /// Phase source for `Amp` and `Power`.
    pub phase: PhaseMode,
    /// Shift output into `[0, 2·maxrange]`.
    pub offset: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self::new(16)
    }
}

impl MergeConfig {
    /// Default settings (power merge, local scaling, new transform) for `maxrange`.
    pub fn new(maxrange: u32) -> Self {
        Self {
            maxrange,
            style: MergeStyle::default(),
            scaling: Scaling::default(),
            convention: TransformConvention::default(),
            phase: PhaseMode::default(),
            offset: false,
        }
    }

    /// Set the merge style.
    pub fn with_style(mut self, style: MergeStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the scaling scope.
    pub fn with_scaling(mut self, scaling: Scaling) -> Self {
        self.scaling = scaling;
        self
    }

    /// Set the transform convention.
    pub fn with_convention(mut self, convention: TransformConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Set the phase mode.
    pub fn with_phase(mut self, phase: PhaseMode) -> Self {
        self.phase = phase;
        self
    }

    /// Enable or disable the unsigned output offset.
    pub fn with_offset(mut self, offset: bool) -> Self {
        self.offset = offset;
        self
    }
}

/// Merges instrument wave sequences into one quantized wavetable.
#[derive(Debug, Clone)]
pub struct MergeEngine {
    config: MergeConfig,
    merger: PhasorMerger,
    rescaler: Rescaler,
}

impl MergeEngine {
    /// Validate `config` and build an engine.
    pub fn new(config: MergeConfig) -> Result<Self> {
        let rescaler = Rescaler::new(config.maxrange)?.with_offset(config.offset);
        let merger = PhasorMerger::new(config.style, config.phase);

        Ok(Self {
            config,
            merger,
            rescaler,
        })
    }

    /// The settings this engine was built with.
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// The quantizer used for output.
    pub fn rescaler(&self) -> &Rescaler {
        &self.rescaler
    }

    /// Merge one frame's contributions into an unquantized wave of `nsamp` samples.
    ///
    /// Contributions may differ in length; shorter spectra are padded with
    /// zero phasors.
    pub fn merge_frame(
        &self,
        waves: &[Vec<f64>],
        nsamp: usize,
        transfer: &dyn TransferFunction,
    ) -> Result<Vec<f64>> {
        if waves.is_empty() {
            return Err(MergeError::degenerate("no waves to merge"));
        }
        if nsamp == 0 {
            return Err(MergeError::degenerate("output length nsamp must be positive"));
        }

        let convention = self.config.convention;
        let spectra = waves
            .iter()
            .map(|wave| convention.forward(wave))
            .collect::<Result<Vec<_>>>()?;

        let harmonics = spectra
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .min(nsamp / 2 + 1);

        let zero = Complex64::new(0.0, 0.0);
        let mut phasors = Vec::with_capacity(spectra.len());
        let merged: Vec<Complex64> = (0..harmonics)
            .map(|k| {
                phasors.clear();
                phasors.extend(spectra.iter().map(|s| s.get(k).copied().unwrap_or(zero)));
                self.merger.merge(&phasors) * transfer.weight(k)
            })
            .collect();

        convention.inverse(&merged, nsamp)
    }

    /// Merge instruments frame by frame and quantize the result.
    ///
    /// The output has as many frames as the longest instrument, each of
    /// exactly `nsamp` samples.
    pub fn merge(
        &self,
        instruments: &[Instrument],
        nsamp: usize,
        transfer: &dyn TransferFunction,
    ) -> Result<Vec<Vec<i32>>> {
        let Some(length) = instruments.iter().map(Instrument::len).max() else {
            return Err(MergeError::degenerate("no instruments to merge"));
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            instruments = instruments.len(),
            frames = length,
            nsamp,
            style = %self.config.style,
            scaling = %self.config.scaling,
            "merging instruments"
        );

        let mut frames = Vec::with_capacity(length);
        for i in 0..length {
            let harmonic_waves: Vec<Vec<f64>> = instruments
                .iter()
                .map(|instr| instr.get_wave_scaled(i))
                .collect();
            frames.push(self.merge_frame(&harmonic_waves, nsamp, transfer)?);
        }

        match self.config.scaling {
            Scaling::Local => frames
                .iter()
                .map(|frame| self.rescaler.rescale(frame))
                .collect(),
            Scaling::Global => self.rescaler.rescale_seq(&frames),
        }
    }

    /// [`merge`](Self::merge) with the [`Unity`] transfer function.
    pub fn merge_unity(&self, instruments: &[Instrument], nsamp: usize) -> Result<Vec<Vec<i32>>> {
        self.merge(instruments, nsamp, &Unity)
    }

    /// Merge, then deduplicate into unique waves and an index sequence.
    pub fn merge_combine(
        &self,
        instruments: &[Instrument],
        nsamp: usize,
        transfer: &dyn TransferFunction,
    ) -> Result<Combined<i32>> {
        let merged = self.merge(instruments, nsamp, transfer)?;
        Ok(combine(&merged))
    }
}
