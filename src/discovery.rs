use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;

/// Finds `<identifier>-*.<extension>` files in `directory`, sorted by name.
pub fn find_parts(directory: &Path, identifier: &str, extension: &str) -> Result<Vec<PathBuf>> {
    let pattern = Regex::new(&format!(
        r"^{}-.*\.{}$",
        regex::escape(identifier),
        regex::escape(extension)
    ))
    .context("Invalid part pattern.")?;

    let entries = std::fs::read_dir(directory)
        .with_context(|| format!("Failed to read directory: '{}'", directory.display()))?;

    let mut parts = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read directory: '{}'", directory.display()))?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| pattern.is_match(name));
        if matches && path.is_file() {
            parts.push(path);
        }
    }
    parts.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(parts)
}
