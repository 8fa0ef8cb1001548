//! Word and opening-word frequencies.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{observed_after_finalize, Analysis, AnalysisError};
use crate::data::WordSet;
use crate::record::Record;

/// One entry of a ranked frequency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    /// The counted word.
    pub word: String,
    /// Number of occurrences.
    pub count: u64,
}

/// Word counter that is ranked once counting is over.
#[derive(Debug, Clone)]
pub enum WordTally {
    /// Still accepting words.
    Counting(HashMap<String, u64>),
    /// Ranked by count descending, ties by word ascending.
    Ranked(Vec<WordCount>),
}

impl Default for WordTally {
    fn default() -> Self {
        Self::Counting(HashMap::new())
    }
}

impl WordTally {
    /// Counts one occurrence of `word`. Returns `false` once ranked.
    pub fn add(&mut self, word: &str) -> bool {
        match self {
            Self::Counting(counts) => {
                *counts.entry(word.to_string()).or_insert(0) += 1;
                true
            }
            Self::Ranked(_) => false,
        }
    }

    /// Converts the counts into a ranked list. No-op when already ranked.
    pub fn finalize(&mut self) {
        if let Self::Counting(counts) = self {
            let mut ranked: Vec<WordCount> = counts
                .drain()
                .map(|(word, count)| WordCount { word, count })
                .collect();
            ranked.sort_by(|a, b| {
                (Reverse(a.count), &a.word).cmp(&(Reverse(b.count), &b.word))
            });
            *self = Self::Ranked(ranked);
        }
    }

    /// The ranked list, if finalized.
    pub fn ranked(&self) -> Option<&[WordCount]> {
        match self {
            Self::Counting(_) => None,
            Self::Ranked(ranked) => Some(ranked),
        }
    }

    /// Occurrences of `word` so far.
    pub fn count(&self, word: &str) -> u64 {
        match self {
            Self::Counting(counts) => counts.get(word).copied().unwrap_or(0),
            Self::Ranked(ranked) => ranked
                .iter()
                .find(|entry| entry.word == word)
                .map_or(0, |entry| entry.count),
        }
    }

    /// Whether no word has been counted.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Counting(counts) => counts.is_empty(),
            Self::Ranked(ranked) => ranked.is_empty(),
        }
    }
}

/// Frequencies of every space-separated word, minus stop words.
#[derive(Debug, Clone, Default)]
pub struct WordFrequency {
    stopwords: WordSet,
    tally: WordTally,
}

impl WordFrequency {
    /// Creates the analysis, ignoring the given stop words.
    pub fn new(stopwords: WordSet) -> Self {
        Self {
            stopwords,
            tally: WordTally::default(),
        }
    }

    /// Accumulated counts.
    pub fn tally(&self) -> &WordTally {
        &self.tally
    }
}

impl Analysis for WordFrequency {
    fn name(&self) -> &'static str {
        "word_frequency"
    }

    fn observe(&mut self, record: &Record) {
        if matches!(self.tally, WordTally::Ranked(_)) {
            observed_after_finalize(self.name());
            return;
        }
        for word in record.message.split(' ') {
            let word = word.trim().to_lowercase();
            if word.is_empty() || self.stopwords.contains(&word) {
                continue;
            }
            self.tally.add(&word);
        }
    }

    fn finalize(&mut self) {
        self.tally.finalize();
    }

    fn state(&self) -> Result<Value, AnalysisError> {
        let ranked = self
            .tally
            .ranked()
            .ok_or(AnalysisError::NotFinalized(self.name()))?;
        Ok(json!(ranked))
    }
}

/// Frequencies of the opening word of each message.
///
/// No stop-word filtering; an empty opening word is counted under `""`.
#[derive(Debug, Clone, Default)]
pub struct FirstWordFrequency {
    tally: WordTally,
}

impl FirstWordFrequency {
    /// Creates an empty analysis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated counts.
    pub fn tally(&self) -> &WordTally {
        &self.tally
    }
}

impl Analysis for FirstWordFrequency {
    fn name(&self) -> &'static str {
        "first_word_frequency"
    }

    fn observe(&mut self, record: &Record) {
        let first = record.message.split(' ').next().unwrap_or_default();
        if !self.tally.add(&first.trim().to_lowercase()) {
            observed_after_finalize(self.name());
        }
    }

    fn finalize(&mut self) {
        self.tally.finalize();
    }

    fn state(&self) -> Result<Value, AnalysisError> {
        let ranked = self
            .tally
            .ranked()
            .ok_or(AnalysisError::NotFinalized(self.name()))?;
        Ok(json!(ranked))
    }
}
