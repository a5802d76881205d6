//! Error types for session operations.

use std::path::PathBuf;
use thiserror::Error;
use wavemerge_core::MergeError;

/// Errors that can occur while loading, validating or running a session.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A session value is out of range or inconsistent
    #[error("invalid '{field}': {reason}")]
    Invalid {
        /// Dotted path of the offending field, e.g. `instruments[1].harmonic`.
        field: String,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// The merge itself failed
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// An instrument's waves could not be loaded
    #[error("wave data: {0}")]
    Wave(#[from] wavemerge_io::Error),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Create a validation error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    // --- factory methods ---

    #[test]
    fn read_file_factory_produces_correct_variant() {
        let err = ConfigError::read_file("/some/session.toml", mock_io_err());
        assert!(
            matches!(err, ConfigError::ReadFile { ref path, .. } if path == std::path::Path::new("/some/session.toml"))
        );
    }

    #[test]
    fn write_file_factory_produces_correct_variant() {
        let err = ConfigError::write_file("/out/session.toml", mock_io_err());
        assert!(
            matches!(err, ConfigError::WriteFile { ref path, .. } if path == std::path::Path::new("/out/session.toml"))
        );
    }

    #[test]
    fn invalid_factory_produces_correct_variant() {
        let err = ConfigError::invalid("nsamp", "must be at least 1");
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "nsamp"));
    }

    // --- Display formatting ---

    #[test]
    fn read_file_display() {
        let err = ConfigError::read_file("/a/b.toml", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to read file"), "got: {msg}");
        assert!(msg.contains("/a/b.toml"), "got: {msg}");
    }

    #[test]
    fn create_dir_display() {
        let err = ConfigError::create_dir("/a/b", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to create directory"), "got: {msg}");
        assert!(msg.contains("/a/b"), "got: {msg}");
    }

    #[test]
    fn invalid_display() {
        let err = ConfigError::invalid("instruments[1].harmonic", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid 'instruments[1].harmonic': must be at least 1"
        );
    }

    #[test]
    fn merge_error_is_transparent() {
        let inner = MergeError::configuration("maxrange must be positive");
        let expected = inner.to_string();
        let err = ConfigError::from(inner);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn wave_error_display() {
        let err = ConfigError::from(wavemerge_io::Error::Empty);
        assert_eq!(err.to_string(), "wave data: no waves found");
    }

    // --- Error::source() chain ---

    #[test]
    fn io_variants_expose_source() {
        assert!(ConfigError::read_file("/x", mock_io_err()).source().is_some());
        assert!(ConfigError::write_file("/x", mock_io_err()).source().is_some());
        assert!(ConfigError::create_dir("/x", mock_io_err()).source().is_some());
    }

    #[test]
    fn invalid_has_no_source() {
        assert!(ConfigError::invalid("x", "y").source().is_none());
    }

    #[test]
    fn toml_parse_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let err: ConfigError = toml_err.into();
        assert!(matches!(err, ConfigError::TomlParse(_)));
        assert!(err.to_string().contains("failed to parse TOML"));
    }
}
