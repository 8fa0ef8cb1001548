//! Commit records and the `::`-delimited line format they travel in.

use thiserror::Error;

/// Separator between the four fields of a record line.
pub const FIELD_DELIMITER: &str = "::";

/// Number of fields a record line splits into.
pub const FIELD_COUNT: usize = 4;

/// Errors produced while parsing a record line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    /// The line did not split into exactly four fields.
    #[error("expected 4 fields separated by '::', found {0}")]
    FieldCount(usize),

    /// The line count field is not a non-negative integer.
    #[error("invalid line count {0:?}")]
    LineCount(String),
}

/// One commit message with the metadata it was collected with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Author identifier, compared for equality only.
    pub author: String,
    /// Repository identifier, carried through untouched.
    pub repository: String,
    /// Number of lines in the original, untruncated message.
    pub line_count: u32,
    /// First line of the original message.
    pub message: String,
}

impl Record {
    /// Parses a record line.
    ///
    /// The split is bounded to four parts, so the message may itself
    /// contain the delimiter. Trailing whitespace and control characters
    /// are trimmed off the message.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.splitn(FIELD_COUNT, FIELD_DELIMITER).collect();
        let &[author, repository, line_count, message] = fields.as_slice() else {
            return Err(RecordError::FieldCount(fields.len()));
        };

        let line_count = line_count
            .trim()
            .parse()
            .map_err(|_| RecordError::LineCount(line_count.to_string()))?;

        Ok(Self {
            author: author.to_string(),
            repository: repository.to_string(),
            line_count,
            message: message
                .trim_end_matches(|c: char| c.is_whitespace() || c.is_control())
                .to_string(),
        })
    }

    /// Builds a record from a full, possibly multi-line commit message.
    ///
    /// One trailing newline, as git stores it, is not counted as a line.
    /// Returns `None` when the first line is longer than `max_len`
    /// characters, or when the author or repository contains
    /// [`FIELD_DELIMITER`]; such commits are left out of the corpus.
    pub fn from_commit(
        author: &str,
        repository: &str,
        full_message: &str,
        max_len: usize,
    ) -> Option<Self> {
        if author.contains(FIELD_DELIMITER) || repository.contains(FIELD_DELIMITER) {
            return None;
        }

        let body = full_message.strip_suffix('\n').unwrap_or(full_message);
        let mut lines = body.split('\n');
        let first_line = lines.next().unwrap_or_default().replace('\r', "");
        if first_line.chars().count() > max_len {
            return None;
        }
        let line_count = 1 + lines.count() as u32;

        Some(Self {
            author: author.to_string(),
            repository: repository.to_string(),
            line_count,
            message: first_line,
        })
    }

    /// Renders the record as a single line, without a trailing newline.
    pub fn to_line(&self) -> String {
        [
            self.author.as_str(),
            self.repository.as_str(),
            self.line_count.to_string().as_str(),
            self.message.as_str(),
        ]
        .join(FIELD_DELIMITER)
    }
}
