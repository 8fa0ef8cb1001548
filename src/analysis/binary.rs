//! Yes/no properties of commit messages.

use serde_json::{Map, Value};

use super::{observed_after_finalize, Analysis, AnalysisError};
use crate::record::Record;

/// A named test over a non-empty message.
#[derive(Clone, Copy)]
pub struct Predicate {
    /// Key of the predicate's counter.
    pub name: &'static str,
    /// Test applied to the message.
    pub test: fn(&str) -> bool,
}

/// Predicates evaluated for every non-empty message, in output order.
pub const PREDICATES: [Predicate; 5] = [
    Predicate {
        name: "total",
        test: always,
    },
    Predicate {
        name: "capital_letter",
        test: starts_with_uppercase,
    },
    Predicate {
        name: "full_stop",
        test: ends_with_full_stop,
    },
    Predicate {
        name: "capslock",
        test: is_all_uppercase,
    },
    Predicate {
        name: "non_ascii_chars",
        test: has_non_ascii,
    },
];

fn always(_: &str) -> bool {
    true
}

fn starts_with_uppercase(message: &str) -> bool {
    message.chars().next().is_some_and(char::is_uppercase)
}

fn ends_with_full_stop(message: &str) -> bool {
    message.ends_with('.')
}

// At least one cased character and no lower-case ones.
fn is_all_uppercase(message: &str) -> bool {
    message.chars().any(char::is_uppercase) && !message.chars().any(char::is_lowercase)
}

fn has_non_ascii(message: &str) -> bool {
    !message.is_ascii()
}

/// Counts how many messages satisfy each of [`PREDICATES`].
///
/// Empty messages are skipped entirely, including the `total` counter.
#[derive(Debug, Clone, Default)]
pub struct BinaryPredicates {
    counts: [u64; PREDICATES.len()],
    finalized: bool,
}

impl BinaryPredicates {
    /// Creates an analysis with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of the named counter.
    pub fn count(&self, name: &str) -> Option<u64> {
        PREDICATES
            .iter()
            .position(|predicate| predicate.name == name)
            .map(|idx| self.counts[idx])
    }
}

impl Analysis for BinaryPredicates {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn observe(&mut self, record: &Record) {
        if self.finalized {
            observed_after_finalize(self.name());
            return;
        }
        let message = record.message.as_str();
        if message.is_empty() {
            return;
        }
        for (count, predicate) in self.counts.iter_mut().zip(PREDICATES.iter()) {
            if (predicate.test)(message) {
                *count += 1;
            }
        }
    }

    fn finalize(&mut self) {
        self.finalized = true;
    }

    fn state(&self) -> Result<Value, AnalysisError> {
        let counts: Map<String, Value> = PREDICATES
            .iter()
            .zip(self.counts)
            .map(|(predicate, count)| (predicate.name.to_string(), Value::from(count)))
            .collect();
        Ok(Value::Object(counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn record(message: &str) -> Record {
        Record {
            author: "dev".to_string(),
            repository: "dev/repo".to_string(),
            line_count: 1,
            message: message.to_string(),
        }
    }

    fn observed(messages: &[&str]) -> BinaryPredicates {
        let mut analysis = BinaryPredicates::new();
        for message in messages {
            analysis.observe(&record(message));
        }
        analysis
    }

    #[test]
    fn empty_message_changes_nothing() {
        let analysis = observed(&[""]);
        assert_eq!(
            analysis.state().unwrap(),
            json!({
                "total": 0,
                "capital_letter": 0,
                "full_stop": 0,
                "capslock": 0,
                "non_ascii_chars": 0,
            })
        );
    }

    #[test]
    fn capital_letter_and_full_stop() {
        let analysis = observed(&["Fix the build.", "fix the build", "Fix"]);
        assert_eq!(analysis.count("total"), Some(3));
        assert_eq!(analysis.count("capital_letter"), Some(2));
        assert_eq!(analysis.count("full_stop"), Some(1));
    }

    #[test]
    fn capslock_requires_cased_characters() {
        let analysis = observed(&["WIP", "FIX BUG #12", "1234", "Fix"]);
        assert_eq!(analysis.count("capslock"), Some(2));
    }

    #[test]
    fn non_ascii_detection() {
        let analysis = observed(&["Añadir soporte", "plain ascii", "emoji 🚀"]);
        assert_eq!(analysis.count("non_ascii_chars"), Some(2));
    }

    #[test]
    fn unknown_counter_is_none() {
        assert_eq!(BinaryPredicates::new().count("exclamation"), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "after finalize")]
    fn observe_after_finalize_panics() {
        let mut analysis = observed(&["Fix"]);
        analysis.finalize();
        analysis.observe(&record("Late"));
    }

    proptest! {
        #[test]
        fn total_counts_every_non_empty_message(messages in prop::collection::vec(".*", 0..20)) {
            let mut analysis = BinaryPredicates::new();
            for message in &messages {
                analysis.observe(&record(message));
            }
            let non_empty = messages.iter().filter(|m| !m.is_empty()).count() as u64;
            prop_assert_eq!(analysis.count("total"), Some(non_empty));
            for predicate in PREDICATES {
                prop_assert!(analysis.count(predicate.name).unwrap_or(0) <= non_empty);
            }
        }
    }
}
