//! Streaming analyses over commit records.
//!
//! Every analysis owns its accumulator and sees each accepted record once,
//! in stream order. After the stream is exhausted it is finalized and its
//! state snapshotted for persistence.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::data::ReferenceData;
use crate::record::Record;

pub mod binary;
pub mod histogram;
pub mod verb_form;
pub mod word_frequency;

pub use binary::BinaryPredicates;
pub use histogram::{MessageLength, MessageLineCount};
pub use verb_form::{CandidateStrategy, VerbFormAnalysis, NON_VERB};
pub use word_frequency::{FirstWordFrequency, WordCount, WordFrequency, WordTally};

/// Errors raised when an analysis is driven out of order.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    /// The state was requested before the required finalize step.
    #[error("analysis '{0}' must be finalized before its state is read")]
    NotFinalized(&'static str),
}

/// A stateful accumulator computing one statistic over the record stream.
pub trait Analysis {
    /// Stable identifier, used as the persistence key.
    fn name(&self) -> &'static str;

    /// Folds one record into the accumulated state.
    ///
    /// Must not be called after [`Analysis::finalize`].
    fn observe(&mut self, record: &Record);

    /// One-time transform run after the last record. Calling it again is a
    /// no-op.
    fn finalize(&mut self) {}

    /// Serializable snapshot of the state.
    fn state(&self) -> Result<Value, AnalysisError>;
}

/// Handles a record that arrived after finalize: panics in debug builds,
/// drops the record otherwise.
pub(crate) fn observed_after_finalize(name: &'static str) {
    if cfg!(debug_assertions) {
        panic!("analysis '{name}' observed a record after finalize");
    }
    warn!(analysis = name, "Dropping record observed after finalize");
}

/// The full set of analyses, in their canonical order.
pub fn default_analyses(reference: &ReferenceData) -> Vec<Box<dyn Analysis>> {
    vec![
        Box::new(WordFrequency::new(reference.stopwords.clone())),
        Box::new(FirstWordFrequency::new()),
        Box::new(VerbFormAnalysis::new(Arc::clone(&reference.word_forms))),
        Box::new(MessageLength::new()),
        Box::new(MessageLineCount::new()),
        Box::new(BinaryPredicates::new()),
    ]
}
