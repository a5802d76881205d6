//! Merge session definition and file I/O.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wavemerge_core::rescale::MAX_RANGE_LIMIT;
use wavemerge_core::{
    Combined, GainTable, Instrument, MergeConfig, MergeEngine, MergeStyle, PhaseMode, PowerLaw,
    Scaling, TransferFunction, TransformConvention, Unity,
};
use wavemerge_io::{apply_mml, parse_waveseq, read_waveseq};

use crate::ConfigError;

/// Transfer function selection, tagged by `type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransferSpec {
    /// No weighting.
    #[default]
    Unity,
    /// `k^exponent` tilt.
    PowerLaw {
        /// Exponent applied to the harmonic number.
        exponent: f64,
    },
    /// Explicit per-harmonic gains; the last gain repeats.
    Table {
        /// Gain for harmonic `k` at index `k`.
        gains: Vec<f64>,
    },
}

impl TransferSpec {
    /// Build the described transfer function.
    pub fn build(&self) -> Box<dyn TransferFunction> {
        match self {
            TransferSpec::Unity => Box::new(Unity),
            TransferSpec::PowerLaw { exponent } => Box::new(PowerLaw::new(*exponent)),
            TransferSpec::Table { gains } => Box::new(GainTable::new(gains.clone())),
        }
    }
}

/// One instrument of a session.
///
/// Waves come either from `file` or inline from `waves`, in the
/// `;`-separated text format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstrumentConfig {
    /// Wave file, relative to the session file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Inline wave sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waves: Option<String>,

    /// Harmonic multiplier (1 = fundamental).
    #[serde(default = "default_harmonic")]
    pub harmonic: usize,

    /// Linear gain.
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,

    /// Optional index sequence remapping the waves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mml: Option<String>,

    /// Optional per-frame volume curve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
}

fn default_harmonic() -> usize {
    1
}

fn default_amplitude() -> f64 {
    1.0
}

impl InstrumentConfig {
    /// Instrument reading its waves from `file`.
    pub fn from_file(file: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(file.into()),
            waves: None,
            ..Self::inline("")
        }
    }

    /// Instrument with inline waves.
    pub fn inline(waves: impl Into<String>) -> Self {
        Self {
            file: None,
            waves: Some(waves.into()),
            harmonic: default_harmonic(),
            amplitude: default_amplitude(),
            mml: None,
            volume: None,
        }
    }

    /// Set the harmonic multiplier.
    pub fn with_harmonic(mut self, harmonic: usize) -> Self {
        self.harmonic = harmonic;
        self
    }

    /// Set the amplitude.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Set the MML index sequence.
    pub fn with_mml(mut self, mml: impl Into<String>) -> Self {
        self.mml = Some(mml.into());
        self
    }

    /// Set the volume curve.
    pub fn with_volume(mut self, volume: impl Into<String>) -> Self {
        self.volume = Some(volume.into());
        self
    }

    /// Load waves, apply the MML and volume curve, and build the instrument.
    pub fn load(&self, base_dir: &Path) -> Result<Instrument, ConfigError> {
        let waves = match (&self.file, &self.waves) {
            (Some(file), None) => read_waveseq(base_dir.join(file))?,
            (None, Some(inline)) => parse_waveseq(inline)?,
            _ => {
                return Err(ConfigError::invalid(
                    "instruments",
                    "exactly one of 'file' or 'waves' is required",
                ));
            }
        };
        let seq = apply_mml(&waves, self.mml.as_deref(), self.volume.as_deref())?;
        Ok(Instrument::new(seq, self.harmonic, self.amplitude)?)
    }
}

/// A complete merge session.
///
/// # TOML Format
///
/// ```toml
/// nsamp = 32
/// maxrange = 16
/// style = "power"
/// scaling = "local"
///
/// [transfer]
/// type = "power_law"
/// exponent = -0.5
///
/// [[instruments]]
/// file = "pulse.txt"
/// mml = "0 1 1 0"
///
/// [[instruments]]
/// waves = "0 4 8 4 0 -4 -8 -4"
/// harmonic = 2
/// amplitude = 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Session {
    /// Output samples per wave.
    pub nsamp: usize,

    /// Magnitude bound of quantized samples.
    pub maxrange: u32,

    /// Phasor merge strategy.
    pub style: MergeStyle,

    /// Per-frame or whole-sequence quantization.
    pub scaling: Scaling,

    /// Transform convention.
    pub transform: TransformConvention,

    /// Phase source for `amp` and `power`.
    pub phase: PhaseMode,

    /// Emit unsigned samples in `[0, 2·maxrange]`.
    pub offset: bool,

    /// Also report the deduplicated table.
    pub combine: bool,

    /// Weighting applied after merging.
    pub transfer: TransferSpec,

    /// Instruments to merge.
    pub instruments: Vec<InstrumentConfig>,
}

impl Default for Session {
    fn default() -> Self {
        let config = MergeConfig::default();
        Self {
            nsamp: 32,
            maxrange: config.maxrange,
            style: config.style,
            scaling: config.scaling,
            transform: config.convention,
            phase: config.phase,
            offset: config.offset,
            combine: true,
            transfer: TransferSpec::default(),
            instruments: Vec::new(),
        }
    }
}

impl Session {
    /// Load and validate a session from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let session = Self::from_toml(&content)?;
        tracing::info!(
            path = %path.display(),
            instruments = session.instruments.len(),
            nsamp = session.nsamp,
            "Loaded session"
        );
        Ok(session)
    }

    /// Parse and validate a session from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let session: Session = toml::from_str(toml_str)?;
        session.validate()?;
        Ok(session)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the session to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), "Saved session");
        Ok(())
    }

    /// Check ranges and consistency without touching the filesystem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nsamp == 0 {
            return Err(ConfigError::invalid("nsamp", "must be at least 1"));
        }
        if self.maxrange == 0 || self.maxrange > MAX_RANGE_LIMIT {
            return Err(ConfigError::invalid(
                "maxrange",
                format!("must be in 1..={MAX_RANGE_LIMIT}, got {}", self.maxrange),
            ));
        }

        match &self.transfer {
            TransferSpec::Unity => {}
            TransferSpec::PowerLaw { exponent } if !exponent.is_finite() => {
                return Err(ConfigError::invalid("transfer.exponent", "must be finite"));
            }
            TransferSpec::Table { gains } if gains.iter().any(|g| !g.is_finite()) => {
                return Err(ConfigError::invalid("transfer.gains", "must all be finite"));
            }
            TransferSpec::PowerLaw { .. } | TransferSpec::Table { .. } => {}
        }

        if self.instruments.is_empty() {
            return Err(ConfigError::invalid(
                "instruments",
                "at least one instrument is required",
            ));
        }
        for (i, instr) in self.instruments.iter().enumerate() {
            if instr.file.is_some() == instr.waves.is_some() {
                return Err(ConfigError::invalid(
                    format!("instruments[{i}]"),
                    "exactly one of 'file' or 'waves' is required",
                ));
            }
            if instr.harmonic == 0 {
                return Err(ConfigError::invalid(
                    format!("instruments[{i}].harmonic"),
                    "must be at least 1",
                ));
            }
            if !instr.amplitude.is_finite() {
                return Err(ConfigError::invalid(
                    format!("instruments[{i}].amplitude"),
                    "must be finite",
                ));
            }
        }
        Ok(())
    }

    /// Merge settings for [`MergeEngine`].
    pub fn merge_config(&self) -> MergeConfig {
        MergeConfig::new(self.maxrange)
            .with_style(self.style)
            .with_scaling(self.scaling)
            .with_convention(self.transform)
            .with_phase(self.phase)
            .with_offset(self.offset)
    }

    /// The session's transfer function.
    pub fn transfer(&self) -> Box<dyn TransferFunction> {
        self.transfer.build()
    }

    /// Load every instrument; relative `file` paths resolve against `base_dir`.
    pub fn instruments(&self, base_dir: &Path) -> Result<Vec<Instrument>, ConfigError> {
        self.instruments
            .iter()
            .enumerate()
            .map(|(i, config)| {
                let instr = config.load(base_dir)?;
                tracing::debug!(
                    index = i,
                    frames = instr.len(),
                    samples = instr.wave_len(),
                    harmonic = instr.harmonic(),
                    "Loaded instrument"
                );
                Ok(instr)
            })
            .collect()
    }

    /// Load the instruments and run the merge.
    pub fn merge(&self, base_dir: &Path) -> Result<Vec<Vec<i32>>, ConfigError> {
        let engine = MergeEngine::new(self.merge_config())?;
        let instruments = self.instruments(base_dir)?;
        Ok(engine.merge(&instruments, self.nsamp, self.transfer().as_ref())?)
    }

    /// Merge and deduplicate in one step.
    pub fn merge_combine(&self, base_dir: &Path) -> Result<Combined<i32>, ConfigError> {
        Ok(wavemerge_core::combine(&self.merge(base_dir)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavemerge_core::Complex64;

    fn minimal() -> Session {
        Session {
            instruments: vec![InstrumentConfig::inline("0 1 0 -1")],
            ..Session::default()
        }
    }

    #[test]
    fn defaults_fill_missing_keys() {
        let session = Session::from_toml(
            r#"
            [[instruments]]
            waves = "0 1 0 -1"
            "#,
        )
        .unwrap();

        assert_eq!(session.nsamp, 32);
        assert_eq!(session.maxrange, 16);
        assert_eq!(session.style, MergeStyle::Power);
        assert_eq!(session.scaling, Scaling::Local);
        assert_eq!(session.transform, TransformConvention::New);
        assert_eq!(session.phase, PhaseMode::Mean);
        assert!(!session.offset);
        assert!(session.combine);
        assert_eq!(session.transfer, TransferSpec::Unity);
        assert_eq!(session.instruments[0].harmonic, 1);
        assert_eq!(session.instruments[0].amplitude, 1.0);
    }

    #[test]
    fn full_session_parses() {
        let session = Session::from_toml(
            r#"
            nsamp = 64
            maxrange = 15
            style = "sum"
            scaling = "global"
            transform = "old"
            phase = "unit"
            offset = true
            combine = false

            [transfer]
            type = "table"
            gains = [1.0, 0.5]

            [[instruments]]
            file = "pulse.txt"
            mml = "0 1"
            volume = "1 0.5"

            [[instruments]]
            waves = "0 4 8 4"
            harmonic = 3
            amplitude = 0.25
            "#,
        )
        .unwrap();

        let config = session.merge_config();
        assert_eq!(config.maxrange, 15);
        assert_eq!(config.style, MergeStyle::Sum);
        assert_eq!(config.scaling, Scaling::Global);
        assert_eq!(config.convention, TransformConvention::Old);
        assert_eq!(config.phase, PhaseMode::Unit);
        assert!(config.offset);
        assert!(!session.combine);
        assert_eq!(session.instruments[0].file, Some(PathBuf::from("pulse.txt")));
        assert_eq!(session.instruments[1].harmonic, 3);
        assert_eq!(session.transfer().weight(5), Complex64::new(0.5, 0.0));
    }

    #[test]
    fn unknown_style_is_rejected() {
        let err = Session::from_toml(
            r#"
            style = "loudest"
            [[instruments]]
            waves = "0 1"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
        assert!(err.to_string().contains("loudest"), "got: {err}");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = Session::from_toml(
            r#"
            nsmap = 32
            [[instruments]]
            waves = "0 1"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn power_law_transfer() {
        let session = Session::from_toml(
            r#"
            [transfer]
            type = "power_law"
            exponent = -1.0
            [[instruments]]
            waves = "0 1"
            "#,
        )
        .unwrap();
        assert_eq!(session.transfer, TransferSpec::PowerLaw { exponent: -1.0 });
        assert_eq!(session.transfer().weight(4), Complex64::new(0.25, 0.0));
    }

    #[test]
    fn validation_failures_name_the_field() {
        let cases: Vec<(Session, &str)> = vec![
            (Session { nsamp: 0, ..minimal() }, "nsamp"),
            (Session { maxrange: 0, ..minimal() }, "maxrange"),
            (Session { maxrange: u32::MAX, ..minimal() }, "maxrange"),
            (Session { instruments: vec![], ..minimal() }, "instruments"),
            (
                Session {
                    instruments: vec![InstrumentConfig::inline("0 1").with_harmonic(0)],
                    ..minimal()
                },
                "instruments[0].harmonic",
            ),
            (
                Session {
                    instruments: vec![
                        InstrumentConfig::inline("0 1"),
                        InstrumentConfig::inline("0 1").with_amplitude(f64::NAN),
                    ],
                    ..minimal()
                },
                "instruments[1].amplitude",
            ),
            (
                Session {
                    instruments: vec![InstrumentConfig {
                        file: Some("a.txt".into()),
                        ..InstrumentConfig::inline("0 1")
                    }],
                    ..minimal()
                },
                "instruments[0]",
            ),
            (
                Session {
                    transfer: TransferSpec::PowerLaw {
                        exponent: f64::INFINITY,
                    },
                    ..minimal()
                },
                "transfer.exponent",
            ),
        ];

        for (session, expected) in cases {
            match session.validate() {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected Invalid for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn toml_roundtrip() {
        let session = Session {
            style: MergeStyle::Amp,
            transfer: TransferSpec::Table {
                gains: vec![1.0, 0.5, 0.25],
            },
            instruments: vec![
                InstrumentConfig::from_file("a.txt").with_mml("0 0 1"),
                InstrumentConfig::inline("0 1 0 -1")
                    .with_harmonic(2)
                    .with_volume("1 0.5"),
            ],
            ..Session::default()
        };
        let parsed = Session::from_toml(&session.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, session);
    }

    #[test]
    fn inline_instrument_loads_with_mml() {
        let config = InstrumentConfig::inline("1 -1; 2 -2")
            .with_mml("1 0 1")
            .with_harmonic(2)
            .with_amplitude(0.5);
        let instr = config.load(Path::new(".")).unwrap();
        assert_eq!(instr.len(), 3);
        assert_eq!(instr.harmonic(), 2);
        assert_eq!(instr.get_wave(0), &[2.0, -2.0][..]);
    }

    #[test]
    fn bad_inline_waves_surface_as_wave_error() {
        let session = Session {
            instruments: vec![InstrumentConfig::inline("0 1; 2")],
            ..minimal()
        };
        let err = session.instruments(Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::Wave(_)));
    }
}
