//! Wavemerge CLI - merge, deduplicate and align chiptune wavetables.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "wavemerge")]
#[command(author, version, about = "Chiptune wavetable merger", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the instruments of a session file
    Merge(commands::merge::MergeArgs),

    /// Deduplicate a wave file into unique waves plus an index sequence
    Combine(commands::combine::CombineArgs),

    /// Rotate each wave into phase with the one before it
    Align(commands::align::AlignArgs),

    /// Print the circular correlation offset between two frames
    Correlate(commands::correlate::CorrelateArgs),
}

fn init_tracing(verbose: u8) {
    // Logs go to stderr; stdout carries only wave data.
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Merge(args) => commands::merge::run(args),
        Commands::Combine(args) => commands::combine::run(args),
        Commands::Align(args) => commands::align::run(args),
        Commands::Correlate(args) => commands::correlate::run(args),
    }
}
