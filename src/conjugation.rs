//! Derivation of verb forms from infinitives.
//!
//! The rules are plain English suffix heuristics. Irregular past tenses
//! come from an override table and take precedence over every rule.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::{read_json_file, write_word_list};

/// Grammatical form of an opening verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbForm {
    /// "fix"
    Imperative,
    /// "fixing"
    Gerund,
    /// "fixes"
    ThirdPerson,
    /// "fixed"
    PastTense,
}

impl VerbForm {
    /// All forms in classification priority order.
    pub const ALL: [Self; 4] = [
        Self::Imperative,
        Self::Gerund,
        Self::ThirdPerson,
        Self::PastTense,
    ];

    /// Snake-case name, used for word-list file names and output keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Imperative => "imperative",
            Self::Gerund => "gerund",
            Self::ThirdPerson => "third_person",
            Self::PastTense => "past_tense",
        }
    }
}

impl fmt::Display for VerbForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infinitive to past-tense overrides for irregular verbs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IrregularVerbs(HashMap<String, String>);

impl IrregularVerbs {
    /// Loads the table from a JSON object of `"infinitive": "past"` pairs.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let table: Self = read_json_file(&path).context("Failed to load irregular verb table")?;
        info!(
            path = %path.as_ref().display(),
            entries = table.0.len(),
            "Loaded irregular verbs"
        );
        Ok(table)
    }

    /// Returns the irregular past tense of `infinitive`, if any.
    pub fn past_tense(&self, infinitive: &str) -> Option<&str> {
        self.0.get(infinitive).map(String::as_str)
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no overrides.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for IrregularVerbs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Generates conjugated forms of lower-case infinitives.
#[derive(Debug, Clone, Default)]
pub struct ConjugationGenerator {
    irregular: IrregularVerbs,
}

impl ConjugationGenerator {
    /// Creates a generator using the given irregular overrides.
    pub fn new(irregular: IrregularVerbs) -> Self {
        Self { irregular }
    }

    /// Returns `infinitive` in the requested form.
    pub fn conjugate(&self, form: VerbForm, infinitive: &str) -> String {
        match form {
            VerbForm::Imperative => imperative(infinitive),
            VerbForm::Gerund => gerund(infinitive),
            VerbForm::ThirdPerson => third_person(infinitive),
            VerbForm::PastTense => self.past_tense(infinitive),
        }
    }

    /// Past tense, preferring the irregular table over the suffix rules.
    pub fn past_tense(&self, infinitive: &str) -> String {
        if let Some(past) = self.irregular.past_tense(infinitive) {
            return past.to_string();
        }
        if infinitive.ends_with('e') {
            return format!("{infinitive}d");
        }
        if doubles_final_consonant(infinitive) {
            return format!("{infinitive}{}ed", last_char(infinitive));
        }
        if ends_with_consonant_y(infinitive) {
            return format!("{}ied", drop_last(infinitive));
        }
        format!("{infinitive}ed")
    }

    /// Writes one `{form}.txt` list per verb form into `dir`.
    ///
    /// Infinitives are de-duplicated and emitted in sorted order.
    pub fn write_form_lists<'a, I, P>(&self, infinitives: I, dir: P) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
        P: AsRef<Path>,
    {
        let infinitives: BTreeSet<&str> = infinitives.into_iter().collect();
        for form in VerbForm::ALL {
            let path = dir.as_ref().join(format!("{form}.txt"));
            let words = infinitives.iter().map(|w| self.conjugate(form, w));
            write_word_list(&path, words)
                .with_context(|| format!("Failed to write {form} word list"))?;
            info!(form = %form, words = infinitives.len(), path = %path.display(), "Wrote word list");
        }
        Ok(())
    }
}

/// Imperative form; identical to the infinitive.
pub fn imperative(infinitive: &str) -> String {
    infinitive.to_string()
}

/// Third person singular present ("fixes", "carries", "adds").
pub fn third_person(infinitive: &str) -> String {
    if ends_with_consonant_y(infinitive) {
        return format!("{}ies", drop_last(infinitive));
    }
    if ["s", "z", "ch", "sh", "x", "o"]
        .iter()
        .any(|suffix| infinitive.ends_with(suffix))
    {
        return format!("{infinitive}es");
    }
    format!("{infinitive}s")
}

/// Present participle ("making", "stopping", "fixing").
pub fn gerund(infinitive: &str) -> String {
    if infinitive.ends_with('e') {
        return format!("{}ing", drop_last(infinitive));
    }
    if doubles_final_consonant(infinitive) {
        return format!("{infinitive}{}ing", last_char(infinitive));
    }
    format!("{infinitive}ing")
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

// Every lower-case letter except a, e, i, o and u; 'y' counts as both.
fn is_consonant(c: char) -> bool {
    c.is_ascii_lowercase() && !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Consonant-vowel-consonant ending, excluding words ending in "fix".
fn doubles_final_consonant(word: &str) -> bool {
    let mut tail = word.chars().rev();
    let (Some(c3), Some(v), Some(c1)) = (tail.next(), tail.next(), tail.next()) else {
        return false;
    };
    is_consonant(c1) && is_vowel(v) && is_consonant(c3) && !word.ends_with("fix")
}

fn ends_with_consonant_y(word: &str) -> bool {
    let mut tail = word.chars().rev();
    matches!((tail.next(), tail.next()), (Some('y'), Some(c)) if is_consonant(c))
}

fn last_char(word: &str) -> char {
    word.chars().next_back().unwrap_or_default()
}

fn drop_last(word: &str) -> &str {
    word.char_indices()
        .next_back()
        .map_or(word, |(idx, _)| &word[..idx])
}
