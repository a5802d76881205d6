//! Plain-text report of a deduplicated wavetable.

use std::fmt::Display;

use wavemerge_core::Combined;

use crate::text::{format_indices, format_waveseq};

/// Render a deduplicated table as its unique waves, a blank line, and the
/// index sequence that replays the original frames.
pub fn render_combined<T: Display>(combined: &Combined<T>) -> String {
    format!(
        "{}\n\n{}\n",
        format_waveseq(&combined.waves),
        format_indices(&combined.indices)
    )
}
