//! # commit-grammar
//!
//! Aggregate statistics over a corpus of commit messages: word and
//! opening-word frequencies, the grammatical form of the opening verb,
//! and the length, line count and other properties of each message.
//!
//! ## Quick Start
//!
//! ```rust
//! use commit_grammar::analysis::{FirstWordFrequency, MessageLength};
//! use commit_grammar::analyzer::{Analyzer, MemorySink};
//!
//! let mut analyzer = Analyzer::new(10)
//!     .with_analysis(FirstWordFrequency::new())
//!     .with_analysis(MessageLength::new());
//! let mut sink = MemorySink::default();
//!
//! let stats = analyzer
//!     .run("octocat::octo/repo::1::Fix typo\n".as_bytes(), &mut sink)
//!     .unwrap();
//! assert_eq!(stats.accepted, 1);
//! assert!(sink.states.contains_key("message_length"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod conjugation;
pub mod data;
pub mod git;
pub mod record;

pub use crate::cli::Cli;

/// The current version of commit-grammar.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
