//! JSON file helpers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Serializes data to a JSON string indented by two spaces.
pub fn to_json<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize to JSON")
}

/// Reads and parses a JSON file.
pub fn read_json_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read file: {}", path.as_ref().display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {}", path.as_ref().display()))
}

/// Writes a data structure to a JSON file, creating parent directories.
pub fn write_json_file<T: Serialize + ?Sized, P: AsRef<Path>>(data: &T, path: P) -> Result<()> {
    let json_content = to_json(data)?;
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, json_content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}
