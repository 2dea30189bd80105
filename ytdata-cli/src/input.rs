//! Identifier and keyword input.

use std::path::Path;

use anyhow::{Context, Result};

/// Parses a list file: one entry per line, surrounding whitespace
/// trimmed, blank lines and `#` comments skipped.
pub fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Command-line values followed by the entries of `file`, if given.
pub fn gather(inline: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut values: Vec<String> = inline
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();

    if let Some(path) = file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        values.extend(parse_list(&content));
    }

    Ok(values)
}
