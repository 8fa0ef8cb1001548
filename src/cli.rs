//! CLI interface for commit-grammar.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::Settings;

pub mod analyze;
pub mod collect;
pub mod conjugate;
pub mod infinitives;

pub use analyze::AnalyzeCommand;
pub use collect::CollectCommand;
pub use conjugate::ConjugateCommand;
pub use infinitives::InfinitivesCommand;

/// commit-grammar: statistics over commit message corpora.
#[derive(Parser)]
#[command(name = "commit-grammar")]
#[command(about = "Statistics over commit message corpora", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Runs every analysis over the record file and saves their states.
    Analyze(AnalyzeCommand),
    /// Generates the four word-form lists from the infinitive list.
    Conjugate(ConjugateCommand),
    /// Extracts infinitives from a WordNet-style verb index.
    Infinitives(InfinitivesCommand),
    /// Appends records for a local repository's history to the record file.
    Collect(CollectCommand),
}

/// Options shared by commands that read settings.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Settings file (defaults to ~/.commit-grammar/settings.yaml).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root of the reference data tree.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

impl SettingsArgs {
    /// Loads settings and applies the flags on top.
    pub fn load(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(dir) = &self.data_dir {
            settings.data_dir.clone_from(dir);
        }
        Ok(settings)
    }
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Analyze(analyze_cmd) => analyze_cmd.execute(),
            Commands::Conjugate(conjugate_cmd) => conjugate_cmd.execute(),
            Commands::Infinitives(infinitives_cmd) => infinitives_cmd.execute(),
            Commands::Collect(collect_cmd) => collect_cmd.execute(),
        }
    }
}
