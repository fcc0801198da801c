//! File reading example: print a text file.

use anyhow::{Context, Result};
use std::{fs, io::Write, path::Path};
use tracing::info;

pub fn run(path: &Path, out: &mut impl Write) -> Result<()> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "read file");

    out.write_all(contents.as_bytes())?;
    if !contents.is_empty() && !contents.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}
