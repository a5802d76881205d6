//! Phase-align consecutive waves of a file.

use std::path::PathBuf;

use clap::Args;
use wavemerge_core::align_waves;
use wavemerge_io::{format_waveseq, read_waveseq};

use super::common::emit;

/// Rotate each wave into phase with its predecessor.
#[derive(Args)]
pub struct AlignArgs {
    /// Wave file
    pub input: PathBuf,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the align command.
pub fn run(args: AlignArgs) -> anyhow::Result<()> {
    let waves = read_waveseq(&args.input)?;
    let aligned = align_waves(&waves)?;
    tracing::info!(frames = aligned.len(), "Aligned wave file");
    emit(args.output.as_deref(), &format_waveseq(&aligned))
}
