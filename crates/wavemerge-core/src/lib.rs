//! Wavemerge Core - spectral merging of chiptune wavetables
//!
//! This crate blends several harmonically related wave sequences into one
//! quantized wavetable, and provides the tools around it:
//!
//! - [`fft`] - Planned FFT wrapper for real waves
//! - [`transform`] - Wave ⇄ harmonic phasor transforms (`new` zero-order hold, `old` rfft)
//! - [`phasor`] - Per-harmonic phasor merging (`power`, `amp`, `sum`)
//! - [`rescale`] - Quantization into a bounded integer range (local or global)
//! - [`transfer`] - Per-harmonic weighting applied after merging
//! - [`instrument`] - Wave sequence + harmonic + amplitude
//! - [`engine`] - Frame-by-frame merge orchestration
//! - [`combine`] - Deduplication into unique waves plus an index sequence
//! - [`xcorr`] - Circular cross-correlation and phase alignment
//!
//! Everything here is pure computation over in-memory data. Enable the
//! `tracing` feature to get debug events from the merge engine, and `serde`
//! to (de)serialize the configuration enums.
//!
//! ## Example Workflow
//!
//! ```rust
//! use wavemerge_core::{Instrument, MergeConfig, MergeEngine, Scaling, align_waves, combine};
//!
//! let pulse = vec![
//!     vec![8.0, 8.0, 8.0, 8.0, -8.0, -8.0, -8.0, -8.0],
//!     vec![8.0, 8.0, -8.0, -8.0, -8.0, -8.0, -8.0, -8.0],
//! ];
//! let sine: Vec<Vec<f64>> = vec![(0..8)
//!     .map(|i| (std::f64::consts::TAU * i as f64 / 8.0).sin())
//!     .collect()];
//!
//! let instruments = [
//!     Instrument::new(pulse, 1, 1.0)?,
//!     Instrument::new(sine, 2, 4.0)?,
//! ];
//!
//! let engine = MergeEngine::new(MergeConfig::new(15).with_scaling(Scaling::Global))?;
//! let merged = engine.merge_unity(&instruments, 32)?;
//!
//! let table = combine(&merged);
//! assert_eq!(table.len(), 2);
//!
//! let real: Vec<Vec<f64>> = merged
//!     .iter()
//!     .map(|w| w.iter().map(|&x| x as f64).collect())
//!     .collect();
//! let _aligned = align_waves(&real);
//! # Ok::<(), wavemerge_core::MergeError>(())
//! ```

pub mod combine;
pub mod engine;
pub mod error;
pub mod fft;
pub mod instrument;
pub mod phasor;
pub mod rescale;
pub mod transfer;
pub mod transform;
pub mod xcorr;

// Re-export main types
pub use combine::{Combined, combine};
pub use engine::{MergeConfig, MergeEngine};
pub use error::{MergeError, Result};
pub use fft::Fft;
pub use instrument::Instrument;
pub use phasor::{MergeStyle, PhaseMode, PhasorMerger};
pub use rescale::{Rescaler, Scaling};
pub use transfer::{GainTable, PowerLaw, TransferFunction, Unity};
pub use transform::{RfftTransform, SpectralTransform, TransformConvention, ZohTransform};
pub use xcorr::{align_waves, correlate, correlate_offset, rotate};

/// Complex phasor type used throughout the crate.
pub use rustfft::num_complex::Complex64;
