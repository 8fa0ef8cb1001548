//! Message shape histograms.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use super::{observed_after_finalize, Analysis, AnalysisError};
use crate::record::Record;

/// Counts per integer bucket, serialized with stringified keys.
pub type Histogram = BTreeMap<u64, u64>;

/// Histogram of first-line lengths, in characters.
#[derive(Debug, Clone, Default)]
pub struct MessageLength {
    lengths: Histogram,
    finalized: bool,
}

impl MessageLength {
    /// Creates an empty analysis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated histogram.
    pub fn histogram(&self) -> &Histogram {
        &self.lengths
    }
}

impl Analysis for MessageLength {
    fn name(&self) -> &'static str {
        "message_length"
    }

    fn observe(&mut self, record: &Record) {
        if self.finalized {
            observed_after_finalize(self.name());
            return;
        }
        let length = record.message.chars().count() as u64;
        *self.lengths.entry(length).or_insert(0) += 1;
    }

    fn finalize(&mut self) {
        self.finalized = true;
    }

    fn state(&self) -> Result<Value, AnalysisError> {
        Ok(json!(self.lengths))
    }
}

/// Histogram of original message line counts.
#[derive(Debug, Clone, Default)]
pub struct MessageLineCount {
    line_counts: Histogram,
    finalized: bool,
}

impl MessageLineCount {
    /// Creates an empty analysis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated histogram.
    pub fn histogram(&self) -> &Histogram {
        &self.line_counts
    }
}

impl Analysis for MessageLineCount {
    fn name(&self) -> &'static str {
        "message_line_count"
    }

    fn observe(&mut self, record: &Record) {
        if self.finalized {
            observed_after_finalize(self.name());
            return;
        }
        *self
            .line_counts
            .entry(u64::from(record.line_count))
            .or_insert(0) += 1;
    }

    fn finalize(&mut self) {
        self.finalized = true;
    }

    fn state(&self) -> Result<Value, AnalysisError> {
        Ok(json!(self.line_counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str, line_count: u32) -> Record {
        Record {
            author: "dev".to_string(),
            repository: "dev/repo".to_string(),
            line_count,
            message: message.to_string(),
        }
    }

    #[test]
    fn message_length_counts_characters() {
        let mut analysis = MessageLength::new();
        analysis.observe(&record("abc", 1));
        analysis.observe(&record("äöü", 1));
        analysis.observe(&record("", 1));

        assert_eq!(analysis.histogram().get(&3), Some(&2));
        assert_eq!(analysis.histogram().get(&0), Some(&1));
    }

    #[test]
    fn message_length_state_has_string_keys() {
        let mut analysis = MessageLength::new();
        analysis.observe(&record("fix", 1));
        analysis.finalize();
        assert_eq!(analysis.state().unwrap(), json!({"3": 1}));
    }

    #[test]
    fn line_count_uses_record_field() {
        let mut analysis = MessageLineCount::new();
        analysis.observe(&record("Add feature", 1));
        analysis.observe(&record("Add feature", 5));
        analysis.observe(&record("Fix", 1));

        assert_eq!(analysis.state().unwrap(), json!({"1": 2, "5": 1}));
    }

    #[test]
    fn finalize_keeps_histogram() {
        let mut analysis = MessageLineCount::new();
        analysis.observe(&record("Fix", 2));
        analysis.finalize();
        analysis.finalize();
        assert_eq!(analysis.state().unwrap(), json!({"2": 1}));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "after finalize")]
    fn message_length_observe_after_finalize_panics() {
        let mut analysis = MessageLength::new();
        analysis.finalize();
        analysis.observe(&record("late", 1));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "after finalize")]
    fn line_count_observe_after_finalize_panics() {
        let mut analysis = MessageLineCount::new();
        analysis.finalize();
        analysis.observe(&record("late", 1));
    }
}
