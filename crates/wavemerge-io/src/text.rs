//! Plain-text wave sequences.

use std::fmt::Display;
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Parse a `;`-separated list of waves.
///
/// Samples are separated by whitespace and/or commas. Empty groups are
/// skipped, so trailing semicolons and blank lines are harmless. Every wave
/// must have the same length as the first.
pub fn parse_waveseq(s: &str) -> Result<Vec<Vec<f64>>> {
    let mut waves: Vec<Vec<f64>> = Vec::new();

    for (group, chunk) in s.split(';').enumerate() {
        let wave = parse_numbers(chunk, group)?;
        if wave.is_empty() {
            continue;
        }
        let expected = waves.first().map_or(wave.len(), Vec::len);
        if wave.len() != expected {
            return Err(Error::RaggedSequence {
                group: waves.len(),
                expected,
                found: wave.len(),
            });
        }
        waves.push(wave);
    }

    if waves.is_empty() {
        return Err(Error::Empty);
    }
    Ok(waves)
}

/// Split on whitespace and commas, parsing each token as a finite number.
pub(crate) fn parse_numbers(s: &str, group: usize) -> Result<Vec<f64>> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|token| match token.parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(x),
            _ => Err(Error::Parse {
                group,
                token: token.to_string(),
            }),
        })
        .collect()
}

/// Format one wave as space-separated values.
pub fn format_wave<T: Display>(wave: &[T]) -> String {
    wave.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a sequence, one wave per line, separated by `;`.
pub fn format_waveseq<T: Display>(seq: &[Vec<T>]) -> String {
    seq.iter()
        .map(|w| format_wave(w))
        .collect::<Vec<_>>()
        .join(";\n")
}

/// Format an index sequence as space-separated values.
pub fn format_indices(indices: &[usize]) -> String {
    format_wave(indices)
}

/// Read and parse a wave file.
pub fn read_waveseq<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let waves = parse_waveseq(&content)?;
    tracing::debug!(
        path = %path.display(),
        waves = waves.len(),
        samples = waves[0].len(),
        "Read wave sequence"
    );
    Ok(waves)
}

/// Write a sequence in the format [`read_waveseq`] accepts.
pub fn write_waveseq<P: AsRef<Path>, T: Display>(path: P, seq: &[Vec<T>]) -> Result<()> {
    let path = path.as_ref();
    let mut content = format_waveseq(seq);
    content.push('\n');
    fs::write(path, content).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), waves = seq.len(), "Wrote wave sequence");
    Ok(())
}
