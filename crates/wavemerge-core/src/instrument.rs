//! Instruments: one wave sequence plus its harmonic and amplitude.

use crate::error::{MergeError, Result};

/// A wavetable source feeding a merge.
///
/// Holds a sequence of equal-length single-cycle waves, the harmonic it
/// sounds at relative to the merge fundamental, and an amplitude scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    waveseq: Vec<Vec<f64>>,
    harmonic: usize,
    amplitude: f64,
}

impl Instrument {
    /// Create an instrument, validating the sequence and parameters.
    pub fn new(waveseq: Vec<Vec<f64>>, harmonic: usize, amplitude: f64) -> Result<Self> {
        let Some(first) = waveseq.first() else {
            return Err(MergeError::degenerate("instrument has no waves"));
        };
        let wave_len = first.len();
        if wave_len == 0 {
            return Err(MergeError::degenerate("instrument waves are empty"));
        }
        if let Some(bad) = waveseq.iter().find(|w| w.len() != wave_len) {
            return Err(MergeError::shape("instrument", wave_len, bad.len()));
        }
        if harmonic == 0 {
            return Err(MergeError::configuration("instrument harmonic must be at least 1"));
        }
        if !amplitude.is_finite() {
            return Err(MergeError::configuration(format!(
                "instrument amplitude must be finite, got {amplitude}"
            )));
        }

        Ok(Self {
            waveseq,
            harmonic,
            amplitude,
        })
    }

    /// Instrument at harmonic 1 with unit amplitude.
    pub fn from_waves(waveseq: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(waveseq, 1, 1.0)
    }

    /// The raw wave sequence.
    pub fn waveseq(&self) -> &[Vec<f64>] {
        &self.waveseq
    }

    /// Harmonic multiplier (at least 1).
    pub fn harmonic(&self) -> usize {
        self.harmonic
    }

    /// Amplitude scale.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.waveseq.len()
    }

    /// Always false; construction rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        self.waveseq.is_empty()
    }

    /// Samples per wave, before harmonic expansion.
    pub fn wave_len(&self) -> usize {
        self.waveseq[0].len()
    }

    /// Wave at `frame`, holding the last wave for frames past the end.
    pub fn get_wave(&self, frame: usize) -> &[f64] {
        let last = self.waveseq.len() - 1;
        &self.waveseq[frame.min(last)]
    }

    /// Contribution at `frame`: the held wave repeated `harmonic` times
    /// end-to-end and multiplied by the amplitude.
    pub fn get_wave_scaled(&self, frame: usize) -> Vec<f64> {
        let wave = self.get_wave(frame);
        let mut out = Vec::with_capacity(wave.len() * self.harmonic);
        for _ in 0..self.harmonic {
            out.extend(wave.iter().map(|&x| x * self.amplitude));
        }
        out
    }
}
