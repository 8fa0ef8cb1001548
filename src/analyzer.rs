//! Fan-out of the record stream to every registered analysis.

use std::collections::{BTreeMap, HashMap};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::analysis::Analysis;
use crate::data::write_json_file;
use crate::record::Record;

/// Destination for finalized analysis states.
pub trait StateSink {
    /// Persists the state of the analysis called `name`.
    fn save(&mut self, name: &str, state: &Value) -> Result<()>;
}

/// Writes each state to `{dir}/{name}.json`.
#[derive(Debug, Clone)]
pub struct JsonDirSink {
    dir: PathBuf,
}

impl JsonDirSink {
    /// Creates a sink writing into `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Output path for the analysis called `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl StateSink for JsonDirSink {
    fn save(&mut self, name: &str, state: &Value) -> Result<()> {
        let path = self.path_for(name);
        write_json_file(state, &path)
            .with_context(|| format!("Failed to save state of analysis '{name}'"))?;
        info!(analysis = name, path = %path.display(), "Saved analysis state");
        Ok(())
    }
}

/// Keeps states in memory, keyed by analysis name.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Saved states.
    pub states: BTreeMap<String, Value>,
}

impl StateSink for MemorySink {
    fn save(&mut self, name: &str, state: &Value) -> Result<()> {
        self.states.insert(name.to_string(), state.clone());
        Ok(())
    }
}

/// Counters describing one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Records passed to the analyses.
    pub accepted: u64,
    /// Input lines seen, including malformed and over-quota ones.
    pub total_seen: u64,
}

/// Drives a set of analyses over a record stream, capping how many records
/// each author contributes.
pub struct Analyzer {
    analyses: Vec<Box<dyn Analysis>>,
    quota: u32,
    authors: HashMap<String, u32>,
    stats: RunStats,
}

impl Analyzer {
    /// Creates an analyzer accepting at most `quota` records per author.
    pub fn new(quota: u32) -> Self {
        Self {
            analyses: Vec::new(),
            quota,
            authors: HashMap::new(),
            stats: RunStats::default(),
        }
    }

    /// Registers an analysis. Analyses run in registration order.
    #[must_use]
    pub fn with_analysis<A: Analysis + 'static>(mut self, analysis: A) -> Self {
        self.analyses.push(Box::new(analysis));
        self
    }

    /// Registers already boxed analyses.
    #[must_use]
    pub fn with_analyses<I>(mut self, analyses: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Analysis>>,
    {
        self.analyses.extend(analyses);
        self
    }

    /// Registered analyses, in registration order.
    pub fn analyses(&self) -> &[Box<dyn Analysis>] {
        &self.analyses
    }

    /// Counters so far.
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Records accepted from `author` so far.
    pub fn author_count(&self, author: &str) -> u32 {
        self.authors.get(author).copied().unwrap_or(0)
    }

    /// Parses one input line and feeds it through the quota gate.
    ///
    /// Malformed lines only count towards `total_seen`. Returns whether
    /// the record reached the analyses.
    pub fn observe_line(&mut self, line: &str) -> bool {
        match Record::parse(line) {
            Ok(record) => self.observe_record(&record),
            Err(err) => {
                self.stats.total_seen += 1;
                debug!(line = self.stats.total_seen, error = %err, "Skipping malformed record");
                false
            }
        }
    }

    /// Feeds one record through the quota gate.
    pub fn observe_record(&mut self, record: &Record) -> bool {
        self.stats.total_seen += 1;

        let count = self.authors.entry(record.author.clone()).or_insert(0);
        if *count >= self.quota {
            return false;
        }

        for analysis in &mut self.analyses {
            analysis.observe(record);
        }
        *count += 1;
        self.stats.accepted += 1;

        if *count == self.quota {
            debug!(author = %record.author, quota = self.quota, "Author reached quota");
        }
        true
    }

    /// Reads every line of `reader` into the analyses.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn ingest<R: BufRead>(&mut self, reader: R) -> Result<RunStats> {
        for line in reader.split(b'\n') {
            let line = line.context("Failed to read record stream")?;
            self.observe_line(&String::from_utf8_lossy(&line));
        }
        Ok(self.stats)
    }

    /// Finalizes every analysis and saves its state, in registration order.
    pub fn finish(&mut self, sink: &mut dyn StateSink) -> Result<RunStats> {
        for analysis in &mut self.analyses {
            analysis.finalize();
            let state = analysis.state()?;
            sink.save(analysis.name(), &state)?;
        }

        info!(
            accepted = self.stats.accepted,
            total_seen = self.stats.total_seen,
            analyses = self.analyses.len(),
            "Analysis run complete"
        );
        Ok(self.stats)
    }

    /// Ingests `reader`, then finalizes and saves every analysis.
    pub fn run<R: BufRead>(&mut self, reader: R, sink: &mut dyn StateSink) -> Result<RunStats> {
        self.ingest(reader)?;
        self.finish(sink)
    }
}
