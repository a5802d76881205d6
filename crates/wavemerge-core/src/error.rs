//! Error types for merge, transform, and alignment operations.

use thiserror::Error;

/// Errors raised by the wavetable core.
///
/// Every error is returned at the point of detection; no operation retries or
/// substitutes defaults for malformed input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MergeError {
    /// Unknown or out-of-range setting, reported at construction time.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Inputs that must share a length do not.
    #[error("shape mismatch in {context}: expected {expected} samples, found {found}")]
    ShapeMismatch {
        /// Operation that detected the mismatch.
        context: &'static str,
        /// Length of the reference input.
        expected: usize,
        /// Length of the offending input.
        found: usize,
    },

    /// The sweep wave correlates best when inverted, so rotation alone cannot align it.
    #[error(
        "sweep wave looks phase-inverted: signed correlation peaks at offset {signed_peak}, \
         absolute correlation peaks at offset {absolute_peak}"
    )]
    PhaseInversion {
        /// Offset of the maximum signed correlation.
        signed_peak: usize,
        /// Offset of the maximum absolute correlation.
        absolute_peak: usize,
    },

    /// Empty or otherwise unusable input.
    #[error("degenerate input: {0}")]
    Degenerate(String),
}

impl MergeError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        MergeError::Configuration(message.into())
    }

    /// Create a degenerate-input error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        MergeError::Degenerate(message.into())
    }

    /// Create a shape mismatch error.
    pub fn shape(context: &'static str, expected: usize, found: usize) -> Self {
        MergeError::ShapeMismatch {
            context,
            expected,
            found,
        }
    }
}

/// Convenience result type for core operations.
pub type Result<T> = std::result::Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_display() {
        let err = MergeError::shape("correlate", 32, 16);
        assert_eq!(
            err.to_string(),
            "shape mismatch in correlate: expected 32 samples, found 16"
        );
    }

    #[test]
    fn phase_inversion_display_names_both_peaks() {
        let err = MergeError::PhaseInversion {
            signed_peak: 3,
            absolute_peak: 0,
        };
        let msg = err.to_string();
        assert!(msg.contains("offset 3"), "got: {msg}");
        assert!(msg.contains("offset 0"), "got: {msg}");
    }

    #[test]
    fn configuration_display() {
        let err = MergeError::configuration("unknown merge style 'loud'");
        assert_eq!(
            err.to_string(),
            "invalid configuration: unknown merge style 'loud'"
        );
    }
}
