//! Shared helpers for the integration suite.

use std::fs;

use anyhow::Result;
use tempfile::TempDir;

/// Create a temporary pattern directory containing one file per entry.
///
/// File names must pass the loader's filename filter for the definitions
/// to be picked up; tests exercising the filter pass names that don't.
pub fn pattern_dir(files: &[(&str, &str)]) -> Result<TempDir> {
    let dir = TempDir::new()?;
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents)?;
    }
    Ok(dir)
}
