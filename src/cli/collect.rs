//! Collect command: turns a local repository's history into records.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::SettingsArgs;
use crate::git::GitRepository;

/// Collect command options.
#[derive(Parser)]
pub struct CollectCommand {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Repository to read commits from.
    #[arg(value_name = "REPO", default_value = ".")]
    pub repo: PathBuf,

    /// Record file to write (defaults to processed/commits.txt).
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Appends to the record file instead of replacing it.
    #[arg(long)]
    pub append: bool,
}

impl CollectCommand {
    /// Executes the collect command.
    pub fn execute(self) -> Result<()> {
        let settings = self.settings.load()?;
        let output = self.output.unwrap_or_else(|| settings.messages_path());

        let repo = GitRepository::open_at(&self.repo)?;
        let records = repo.collect_records(settings.max_message_length)?;

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(self.append)
            .truncate(!self.append)
            .open(&output)
            .with_context(|| format!("Failed to open record file: {}", output.display()))?;

        let mut writer = BufWriter::new(file);
        for record in &records {
            writeln!(writer, "{}", record.to_line())
                .with_context(|| format!("Failed to write record file: {}", output.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write record file: {}", output.display()))?;

        println!(
            "Collected {} commits from {} into {}",
            records.len(),
            repo.name(),
            output.display()
        );
        Ok(())
    }
}
