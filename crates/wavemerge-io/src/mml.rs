//! MML index remapping and volume curves.
//!
//! An instrument's waves are often written once and then sequenced by an
//! index string (`"0 1 1 2"`), with a volume envelope applied per frame.
//! [`apply_mml`] expands both into a plain wave sequence. When the index
//! sequence and the volume curve differ in length, the shorter one holds its
//! last element.

use crate::text::parse_numbers;
use crate::{Error, Result};

/// Parse a space- or comma-separated list of non-negative indices.
pub fn parse_indices(s: &str) -> Result<Vec<usize>> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|token| {
            token.parse::<usize>().map_err(|_| Error::Parse {
                group: 0,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse a space- or comma-separated list of gains.
pub fn parse_curve(s: &str) -> Result<Vec<f64>> {
    parse_numbers(s, 0)
}

/// Remap `waves` by an MML index string, then weight by a volume curve.
///
/// Either argument may be `None` (or blank) to skip that step. Returns
/// [`Error::IndexOutOfRange`] for an index past the end of `waves`, and
/// [`Error::Empty`] if the result would contain no waves.
pub fn apply_mml(
    waves: &[Vec<f64>],
    mml: Option<&str>,
    volume: Option<&str>,
) -> Result<Vec<Vec<f64>>> {
    let mml = mml.map(str::trim).filter(|s| !s.is_empty());
    let volume = volume.map(str::trim).filter(|s| !s.is_empty());

    let seq: Vec<Vec<f64>> = match mml {
        Some(mml) => parse_indices(mml)?
            .into_iter()
            .map(|index| {
                waves.get(index).cloned().ok_or(Error::IndexOutOfRange {
                    index,
                    len: waves.len(),
                })
            })
            .collect::<Result<_>>()?,
        None => waves.to_vec(),
    };
    if seq.is_empty() {
        return Err(Error::Empty);
    }

    let Some(volume) = volume else {
        return Ok(seq);
    };
    let curve = parse_curve(volume)?;
    if curve.is_empty() {
        return Ok(seq);
    }

    let count = seq.len().max(curve.len());
    Ok((0..count)
        .map(|i| {
            let wave = &seq[i.min(seq.len() - 1)];
            let gain = curve[i.min(curve.len() - 1)];
            wave.iter().map(|x| x * gain).collect()
        })
        .collect())
}
