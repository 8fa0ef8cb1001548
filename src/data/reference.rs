//! Reference tables loaded once before a run.

use std::sync::Arc;

use anyhow::{Context, Result};

use super::{load_word_set, WordFormLists, WordSet};
use crate::config::Settings;

/// Immutable lookup tables shared by the analyses.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    /// Words ignored by the word frequency analysis.
    pub stopwords: WordSet,
    /// Conjugated word lists used for verb-form classification.
    pub word_forms: Arc<WordFormLists>,
}

impl ReferenceData {
    /// Loads every table named by `settings`. Any missing file is fatal.
    pub fn load(settings: &Settings) -> Result<Self> {
        let stopwords =
            load_word_set(settings.stopwords_path(), true).context("Failed to load stop words")?;
        let word_forms = WordFormLists::load(settings.processed_dir())
            .context("Failed to load word-form lists; run `commit-grammar conjugate` first")?;

        Ok(Self {
            stopwords,
            word_forms: Arc::new(word_forms),
        })
    }
}
