//! Merge the instruments of a session file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use wavemerge_config::Session;
use wavemerge_core::combine;
use wavemerge_io::{format_waveseq, render_combined};

use super::common::emit;

/// Merge a session file.
#[derive(Args)]
pub struct MergeArgs {
    /// Session file (TOML)
    pub session: PathBuf,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the deduplicated table even if the session enables it
    #[arg(long)]
    pub no_combine: bool,
}

/// Run the merge command.
pub fn run(args: MergeArgs) -> anyhow::Result<()> {
    let session = Session::load(&args.session)
        .with_context(|| format!("failed to load session '{}'", args.session.display()))?;
    let base_dir = args.session.parent().unwrap_or(Path::new("."));

    let merged = session.merge(base_dir)?;
    tracing::info!(frames = merged.len(), nsamp = session.nsamp, "Merged session");

    let mut text = format_waveseq(&merged);
    if session.combine && !args.no_combine {
        let combined = combine(&merged);
        tracing::info!(unique = combined.waves.len(), "Combined merged frames");
        text.push_str("\n\n");
        text.push_str(render_combined(&combined).trim_end());
    }

    emit(args.output.as_deref(), &text)
}
