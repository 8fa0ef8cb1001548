//! Infinitives command: extracts verbs from a WordNet-style index.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::SettingsArgs;
use crate::data::{extract_infinitives, write_word_list};

/// Infinitives command options.
#[derive(Parser)]
pub struct InfinitivesCommand {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Verb index file to read.
    #[arg(value_name = "VERBS_FILE")]
    pub verbs_file: PathBuf,

    /// Output file (defaults to processed/infinitives.txt).
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl InfinitivesCommand {
    /// Executes the infinitives command.
    pub fn execute(self) -> Result<()> {
        let output = match self.output {
            Some(output) => output,
            None => self.settings.load()?.infinitives_path(),
        };

        let file = File::open(&self.verbs_file).with_context(|| {
            format!("Failed to open verb index: {}", self.verbs_file.display())
        })?;
        let infinitives = extract_infinitives(BufReader::new(file))?;
        write_word_list(&output, &infinitives)?;

        println!(
            "Extracted {} infinitives to {}",
            infinitives.len(),
            output.display()
        );
        Ok(())
    }
}
