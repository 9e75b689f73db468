//! Core types for the poll extractor library
//!
//! This module defines the records the extractor emits when scanning a
//! transcript. The extractor is stateless and only outputs poll records - it
//! does not rank options or render anything.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result type for extractor operations
pub type Result<T> = std::result::Result<T, PollError>;

/// Option label -> vote count, in first-seen order
pub type PollOptions = IndexMap<String, u64>;

/// Errors that can occur while extracting polls
///
/// Text that does not look like a poll is never an error; only failing to get
/// the transcript into memory is.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Failed to read transcript {path:?}: {source}")]
    TranscriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single poll found in a transcript
///
/// Fields are set once by the extractor and only exposed through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollRecord {
    date: String,
    time: String,
    question: String,
    options: PollOptions,
}

impl PollRecord {
    /// Create a poll record
    ///
    /// `date` and `time` are kept exactly as they appeared in the message
    /// header (`DD/MM/YYYY` and `HH:MM:SS`).
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        question: impl Into<String>,
        options: PollOptions,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            question: question.into(),
            options,
        }
    }

    /// Header date, `DD/MM/YYYY`
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Header time, `HH:MM:SS`
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Question text with option lines removed
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Option labels and their vote counts, in the order first seen
    pub fn options(&self) -> &PollOptions {
        &self.options
    }

    /// Sum of all vote counts (0 when the poll has no options)
    ///
    /// Summed as `u128`: each count fits a `u64`, their total may not.
    pub fn total_votes(&self) -> u128 {
        self.options.values().map(|&votes| u128::from(votes)).sum()
    }
}
