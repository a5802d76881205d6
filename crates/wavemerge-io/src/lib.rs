//! Wave-sequence I/O for wavemerge.
//!
//! This crate provides:
//!
//! - **Text format**: [`parse_waveseq`] / [`format_waveseq`] and the file
//!   wrappers [`read_waveseq`] / [`write_waveseq`]
//! - **MML helpers**: [`apply_mml`] remaps a sequence by an index string and
//!   weights it by a volume curve
//! - **Reports**: [`render_combined`] prints a deduplicated table
//!
//! A wave sequence is written as whitespace- or comma-separated numbers, one
//! wave per `;`-separated group:
//!
//! ```text
//! 0 4 8 4; 0 8 8 0;
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use wavemerge_io::{apply_mml, format_waveseq, parse_waveseq};
//!
//! let waves = parse_waveseq("0 1 2 3; 3 2 1 0")?;
//! let seq = apply_mml(&waves, Some("0 1 1"), Some("1 0.5"))?;
//! assert_eq!(format_waveseq(&seq), "0 1 2 3;\n1.5 1 0.5 0;\n1.5 1 0.5 0");
//! # Ok::<(), wavemerge_io::Error>(())
//! ```

mod mml;
mod report;
mod text;

use std::path::PathBuf;

pub use mml::{apply_mml, parse_curve, parse_indices};
pub use report::render_combined;
pub use text::{
    format_indices, format_wave, format_waveseq, parse_waveseq, read_waveseq, write_waveseq,
};

/// Error types for wave-sequence I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read or write a wave file.
    #[error("failed to access '{path}': {source}")]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A token could not be parsed as a number.
    #[error("invalid number '{token}' in group {group}")]
    Parse {
        /// Zero-based index of the `;`-separated group.
        group: usize,
        /// The offending token.
        token: String,
    },

    /// A wave's length differs from the first wave.
    #[error("wave {group} has {found} samples, expected {expected}")]
    RaggedSequence {
        /// Zero-based index of the wave.
        group: usize,
        /// Length of the first wave.
        expected: usize,
        /// Length of this wave.
        found: usize,
    },

    /// The input contained no waves (or no values).
    #[error("no waves found")]
    Empty,

    /// An MML index points past the end of the wave list.
    #[error("MML index {index} out of range for {len} waves")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of available waves.
        len: usize,
    },
}

impl Error {
    /// Create an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience result type for wave-sequence I/O.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io;

    #[test]
    fn io_error_keeps_path_and_source() {
        let err = Error::io(
            "/tmp/waves.txt",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/waves.txt"));
        assert!(msg.contains("gone"));
        assert!(err.source().is_some());
    }

    #[test]
    fn display_messages() {
        let err = Error::Parse {
            group: 2,
            token: "x1".into(),
        };
        assert_eq!(err.to_string(), "invalid number 'x1' in group 2");

        let err = Error::RaggedSequence {
            group: 1,
            expected: 32,
            found: 31,
        };
        assert_eq!(err.to_string(), "wave 1 has 31 samples, expected 32");

        let err = Error::IndexOutOfRange { index: 7, len: 3 };
        assert!(err.to_string().contains('7'));
        assert!(Error::Empty.source().is_none());
    }
}
