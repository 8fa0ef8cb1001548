//! Analyze command: runs the analyses over a record file.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::SettingsArgs;
use crate::analysis::default_analyses;
use crate::analyzer::{Analyzer, JsonDirSink, RunStats};
use crate::data::ReferenceData;

/// Analyze command options.
#[derive(Parser)]
pub struct AnalyzeCommand {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Record file to analyse (defaults to processed/commits.txt).
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory receiving one JSON file per analysis.
    #[arg(long, value_name = "DIR")]
    pub outputs: Option<PathBuf>,

    /// Maximum number of records analysed per author.
    #[arg(long)]
    pub quota: Option<u32>,
}

impl AnalyzeCommand {
    /// Executes the analyze command.
    pub fn execute(self) -> Result<()> {
        let stats = self.run()?;
        println!("Analyzed {}/{} commits", stats.accepted, stats.total_seen);
        Ok(())
    }

    /// Runs the analysis and returns its counters.
    pub fn run(self) -> Result<RunStats> {
        let mut settings = self.settings.load()?;
        if let Some(input) = self.input {
            settings.messages_file = Some(input);
        }
        if let Some(outputs) = self.outputs {
            settings.outputs_dir = outputs;
        }
        if let Some(quota) = self.quota {
            settings.author_quota = quota;
        }

        // Reference tables are required before the first record is read
        let reference = ReferenceData::load(&settings)?;

        let messages_path = settings.messages_path();
        let file = File::open(&messages_path).with_context(|| {
            format!("Failed to open record file: {}", messages_path.display())
        })?;

        let mut analyzer =
            Analyzer::new(settings.author_quota).with_analyses(default_analyses(&reference));
        let mut sink = JsonDirSink::new(&settings.outputs_dir);
        analyzer.run(BufReader::new(file), &mut sink)
    }
}
