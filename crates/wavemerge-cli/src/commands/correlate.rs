//! Correlation offset between two frames of a wave file.

use std::path::PathBuf;

use clap::Args;
use wavemerge_core::correlate_offset;
use wavemerge_io::read_waveseq;

/// Find the rotation that best aligns one frame with another.
#[derive(Args)]
pub struct CorrelateArgs {
    /// Wave file
    pub input: PathBuf,

    /// Index of the reference frame
    pub fixed: usize,

    /// Index of the frame to rotate
    pub sweep: usize,
}

/// Run the correlate command.
pub fn run(args: CorrelateArgs) -> anyhow::Result<()> {
    let waves = read_waveseq(&args.input)?;
    let frame = |index: usize| {
        waves.get(index).ok_or_else(|| {
            anyhow::anyhow!("frame {index} out of range ({} frames)", waves.len())
        })
    };

    let offset = correlate_offset(frame(args.fixed)?, frame(args.sweep)?)?;
    println!("{offset}");
    Ok(())
}
