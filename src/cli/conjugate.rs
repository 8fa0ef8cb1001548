//! Conjugate command: materializes the word-form lists.

use anyhow::{Context, Result};
use clap::Parser;

use super::SettingsArgs;
use crate::conjugation::{ConjugationGenerator, IrregularVerbs};
use crate::data::load_word_set;

/// Conjugate command options.
#[derive(Parser)]
pub struct ConjugateCommand {
    #[command(flatten)]
    pub settings: SettingsArgs,
}

impl ConjugateCommand {
    /// Executes the conjugate command.
    pub fn execute(self) -> Result<()> {
        let settings = self.settings.load()?;

        let irregular = IrregularVerbs::load_from_file(settings.irregular_verbs_path())?;
        let infinitives = load_word_set(settings.infinitives_path(), false)
            .context("Failed to load infinitives")?;

        let generator = ConjugationGenerator::new(irregular);
        let dir = settings.processed_dir();
        generator.write_form_lists(infinitives.iter().map(String::as_str), &dir)?;

        println!(
            "Wrote word lists for {} infinitives to {}",
            infinitives.len(),
            dir.display()
        );
        Ok(())
    }
}
