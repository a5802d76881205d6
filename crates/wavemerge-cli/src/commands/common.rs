//! Shared CLI helpers used across multiple commands.

use std::path::Path;

use anyhow::Context;

/// Write `text` to `output`, or to stdout when no file is given.
pub fn emit(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote output");
        }
        None => println!("{text}"),
    }
    Ok(())
}
