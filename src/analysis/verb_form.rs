//! Grammatical form of the opening verb.
//!
//! Each message yields candidate tokens from an ordered cascade of
//! extraction strategies. The first candidate found in one of the four
//! word-form lists is attributed to that form; messages where no candidate
//! matches are counted as non-verbs.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::{observed_after_finalize, Analysis, AnalysisError, WordCount, WordTally};
use crate::conjugation::VerbForm;
use crate::data::WordFormLists;
use crate::record::Record;

/// Output key for messages without a recognised opening verb.
pub const NON_VERB: &str = "non_verb";

/// Conventional-commit style `type(scope): ` prefix, matched non-greedily.
static SCOPE_PREFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^.*?: ").unwrap());

/// Leading `[tag] `.
static BRACKET_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[.*?\] ").unwrap());

/// Ways of picking the token that should hold the opening verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateStrategy {
    /// The first token of the message as written.
    FirstToken,
    /// The first token after a leading `prefix: `.
    AfterScopePrefix,
    /// The first token after a leading `[tag] `.
    AfterBracketTag,
}

impl CandidateStrategy {
    /// Strategies in the order they are attempted.
    pub const CASCADE: [Self; 3] = [
        Self::FirstToken,
        Self::AfterScopePrefix,
        Self::AfterBracketTag,
    ];

    /// Lower-cased candidate token, or `None` when the strategy does not
    /// apply to `message`.
    pub fn candidate(self, message: &str) -> Option<String> {
        let rest = match self {
            Self::FirstToken => message,
            Self::AfterScopePrefix => strip_prefix(&SCOPE_PREFIX_PATTERN, message)?,
            Self::AfterBracketTag => strip_prefix(&BRACKET_TAG_PATTERN, message)?,
        };
        rest.split(' ').next().map(str::to_lowercase)
    }
}

fn strip_prefix<'a>(pattern: &Regex, message: &'a str) -> Option<&'a str> {
    pattern.find(message).map(|m| &message[m.end()..])
}

#[derive(Debug, Serialize)]
struct VerbFormState<'a> {
    total_counts: BTreeMap<&'static str, u64>,
    frequencies: BTreeMap<&'static str, &'a [WordCount]>,
}

/// Classifies each message's opening verb by grammatical form.
#[derive(Debug, Clone)]
pub struct VerbFormAnalysis {
    lists: Arc<WordFormLists>,
    totals: BTreeMap<VerbForm, u64>,
    frequencies: BTreeMap<VerbForm, WordTally>,
    non_verb: u64,
    finalized: bool,
}

impl VerbFormAnalysis {
    /// Creates the analysis over shared, immutable word-form lists.
    pub fn new(lists: Arc<WordFormLists>) -> Self {
        Self {
            lists,
            totals: VerbForm::ALL.into_iter().map(|form| (form, 0)).collect(),
            frequencies: VerbForm::ALL
                .into_iter()
                .map(|form| (form, WordTally::default()))
                .collect(),
            non_verb: 0,
            finalized: false,
        }
    }

    /// Finds the form and word of the opening verb, trying each strategy
    /// in cascade order.
    pub fn classify(&self, message: &str) -> Option<(VerbForm, String)> {
        CandidateStrategy::CASCADE.into_iter().find_map(|strategy| {
            let token = strategy.candidate(message)?;
            self.lists.classify(&token).map(|form| (form, token))
        })
    }

    /// Messages attributed to `form` so far.
    pub fn total(&self, form: VerbForm) -> u64 {
        self.totals.get(&form).copied().unwrap_or(0)
    }

    /// Messages without a recognised opening verb.
    pub fn non_verb(&self) -> u64 {
        self.non_verb
    }

    /// Per-word counts for `form`.
    pub fn frequencies(&self, form: VerbForm) -> Option<&WordTally> {
        self.frequencies.get(&form)
    }
}

impl Analysis for VerbFormAnalysis {
    fn name(&self) -> &'static str {
        "verb_form"
    }

    fn observe(&mut self, record: &Record) {
        if self.finalized {
            observed_after_finalize(self.name());
            return;
        }

        match self.classify(&record.message) {
            Some((form, word)) => {
                *self.totals.entry(form).or_insert(0) += 1;
                self.frequencies.entry(form).or_default().add(&word);
            }
            None => self.non_verb += 1,
        }
    }

    fn finalize(&mut self) {
        for tally in self.frequencies.values_mut() {
            tally.finalize();
        }
        self.finalized = true;
    }

    fn state(&self) -> Result<Value, AnalysisError> {
        if !self.finalized {
            return Err(AnalysisError::NotFinalized(self.name()));
        }

        let mut total_counts: BTreeMap<&'static str, u64> = self
            .totals
            .iter()
            .map(|(form, count)| (form.as_str(), *count))
            .collect();
        total_counts.insert(NON_VERB, self.non_verb);

        let frequencies = self
            .frequencies
            .iter()
            .map(|(form, tally)| (form.as_str(), tally.ranked().unwrap_or_default()))
            .collect();

        let state = VerbFormState {
            total_counts,
            frequencies,
        };
        Ok(serde_json::json!(state))
    }
}
