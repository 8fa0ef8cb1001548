//! Infinitive extraction from a WordNet-style verb index.

use std::io::BufRead;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

/// `offset lex_filenum ss_type w_cnt word ...` at the start of a data line.
static VERB_ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{8}\s[0-9]{2}\s[a-z]\s[0-9]{2}\s([a-zA-Z]*)\s").unwrap()
});

/// Returns the infinitive named by one index line, if the line is an entry.
pub fn parse_verb_entry(line: &str) -> Option<&str> {
    VERB_ENTRY_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Collects the infinitives of every entry line, in input order.
pub fn extract_infinitives<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut infinitives = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read verb index")?;
        if let Some(word) = parse_verb_entry(&line) {
            infinitives.push(word.to_string());
        }
    }
    Ok(infinitives)
}
