//! Deduplicate a wave file.

use std::path::PathBuf;

use clap::Args;
use wavemerge_core::combine;
use wavemerge_io::{read_waveseq, render_combined};

use super::common::emit;

/// Deduplicate the waves of a file.
#[derive(Args)]
pub struct CombineArgs {
    /// Wave file
    pub input: PathBuf,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the combine command.
pub fn run(args: CombineArgs) -> anyhow::Result<()> {
    let waves = read_waveseq(&args.input)?;
    let combined = combine(&waves);
    tracing::info!(
        frames = waves.len(),
        unique = combined.waves.len(),
        "Combined wave file"
    );
    emit(args.output.as_deref(), render_combined(&combined).trim_end())
}
