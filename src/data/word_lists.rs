//! One-word-per-line reference lists.

use std::collections::HashSet;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::conjugation::VerbForm;

/// Set of lower-case tokens.
pub type WordSet = HashSet<String>;

/// Loads a word list, one token per line.
///
/// Lines are trimmed and blank lines ignored. With `skip_header` the first
/// line is dropped before reading tokens.
pub fn load_word_set<P: AsRef<Path>>(path: P, skip_header: bool) -> Result<WordSet> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read word list: {}", path.display()))?;

    let words: WordSet = content
        .lines()
        .skip(usize::from(skip_header))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    info!(path = %path.display(), words = words.len(), "Loaded word list");
    Ok(words)
}

/// Writes words one per line, creating parent directories.
pub fn write_word_list<P, I, S>(path: P, words: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create word list: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for word in words {
        writeln!(writer, "{}", word.as_ref())
            .with_context(|| format!("Failed to write word list: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write word list: {}", path.display()))?;

    Ok(())
}

/// The four conjugated word lists used to classify opening verbs.
#[derive(Debug, Clone, Default)]
pub struct WordFormLists {
    imperative: WordSet,
    gerund: WordSet,
    third_person: WordSet,
    past_tense: WordSet,
}

impl WordFormLists {
    /// Builds the lists from in-memory sets.
    pub fn new(
        imperative: WordSet,
        gerund: WordSet,
        third_person: WordSet,
        past_tense: WordSet,
    ) -> Self {
        Self {
            imperative,
            gerund,
            third_person,
            past_tense,
        }
    }

    /// Loads `{form}.txt` for every form from `dir`. The files have no header.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let load = |form: VerbForm| {
            let path = dir.as_ref().join(format!("{form}.txt"));
            load_word_set(&path, false).with_context(|| format!("Missing {form} word list"))
        };

        Ok(Self {
            imperative: load(VerbForm::Imperative)?,
            gerund: load(VerbForm::Gerund)?,
            third_person: load(VerbForm::ThirdPerson)?,
            past_tense: load(VerbForm::PastTense)?,
        })
    }

    /// The list for a single form.
    pub fn get(&self, form: VerbForm) -> &WordSet {
        match form {
            VerbForm::Imperative => &self.imperative,
            VerbForm::Gerund => &self.gerund,
            VerbForm::ThirdPerson => &self.third_person,
            VerbForm::PastTense => &self.past_tense,
        }
    }

    /// First form, in priority order, whose list contains `word`.
    pub fn classify(&self, word: &str) -> Option<VerbForm> {
        VerbForm::ALL
            .into_iter()
            .find(|&form| self.get(form).contains(word))
    }
}
