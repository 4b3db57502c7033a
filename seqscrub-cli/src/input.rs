//! Input file loading
//!
//! The core engine consumes text that is already in memory; this module
//! is the file-facing collaborator. Gzipped inputs are decoded
//! transparently based on the `.gz` extension.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read an input file to text, decoding `.gz` transparently.
pub fn read_input(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    let mut text = String::new();
    if is_gzipped(path) {
        log::debug!("Decoding gzipped input: {}", path.display());
        GzDecoder::new(file)
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to decompress input file: {}", path.display()))?;
    } else {
        let mut file = file;
        file.read_to_string(&mut text)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    }

    Ok(text)
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}
