//! Main extractor API
//!
//! This module provides the primary interface for the library. The
//! PollExtractor struct is the entry point for turning transcript text (or a
//! transcript file) into poll records.

use crate::config::ExtractorConfig;
use crate::poll_block::parse_poll_block;
use crate::transcript::{entries, MessageEntries};
use crate::types::{PollError, PollRecord, Result};
use std::path::Path;

/// The main extractor struct - entry point for all extraction operations
#[derive(Debug, Clone, Copy, Default)]
pub struct PollExtractor;

impl PollExtractor {
    /// Create a new extractor instance
    pub fn new() -> Self {
        Self
    }

    /// Read a transcript file and extract its polls
    ///
    /// The file is read fully into memory and must be valid UTF-8. A missing
    /// or unreadable file is the only error this returns.
    ///
    /// # Example
    /// ```no_run
    /// use chat_poll_extractor::{ExtractorConfig, PollExtractor};
    /// use std::path::Path;
    ///
    /// let extractor = PollExtractor::new();
    /// let config = ExtractorConfig::new().with_date_filter("05/05/2024");
    /// let polls = extractor.extract_file(Path::new("chat.txt"), &config).unwrap();
    /// println!("Found {} polls", polls.len());
    /// ```
    pub fn extract_file(&self, path: &Path, config: &ExtractorConfig) -> Result<Vec<PollRecord>> {
        log::info!("Reading transcript: {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|source| PollError::TranscriptRead {
            path: path.to_path_buf(),
            source,
        })?;

        let polls = self.extract_str(&content, config);
        log::info!("Extracted {} polls from {:?}", polls.len(), path);
        Ok(polls)
    }

    /// Extract all polls from transcript text, in order of appearance
    pub fn extract_str(&self, text: &str, config: &ExtractorConfig) -> Vec<PollRecord> {
        self.polls(text, config).collect()
    }

    /// Lazily extract polls from transcript text
    ///
    /// # Example
    /// ```
    /// use chat_poll_extractor::{ExtractorConfig, PollExtractor};
    ///
    /// let text = "[05/05/2024, 09:15:00] Dana: \u{200E}POLL:\nCoffee?\n\u{200E}OPTION: Yes (2 votes)\n";
    /// let config = ExtractorConfig::new();
    ///
    /// let mut polls = PollExtractor::new().polls(text, &config);
    /// let poll = polls.next().unwrap();
    /// assert_eq!(poll.question(), "Coffee?");
    /// assert_eq!(poll.options()["Yes"], 2);
    /// assert!(polls.next().is_none());
    /// ```
    pub fn polls<'a>(&self, text: &'a str, config: &'a ExtractorConfig) -> PollIterator<'a> {
        PollIterator::new(entries(text), config)
    }
}

/// Iterator that turns message entries into poll records
///
/// For each entry:
/// 1. Skip it unless it carries the poll marker
/// 2. Skip it if its date is filtered out
/// 3. Otherwise parse the poll block into a record
pub struct PollIterator<'a> {
    entries: MessageEntries<'a>,
    config: &'a ExtractorConfig,
}

impl<'a> PollIterator<'a> {
    fn new(entries: MessageEntries<'a>, config: &'a ExtractorConfig) -> Self {
        Self { entries, config }
    }
}

impl<'a> Iterator for PollIterator<'a> {
    type Item = PollRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = self.entries.next()?;

            let Some(content) = entry.poll_content() else {
                continue;
            };

            if !self.config.should_include(entry.date) {
                log::debug!("Skipping poll at {} {}: outside date filter", entry.date, entry.time);
                continue;
            }

            let parsed = parse_poll_block(content);
            log::debug!(
                "Poll at {} {} with {} options",
                entry.date,
                entry.time,
                parsed.options.len()
            );

            return Some(PollRecord::new(
                entry.date,
                entry.time,
                parsed.question.trim(),
                parsed.options,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "[05/05/2024, 09:00:00] Dana: morning all\n\
                          [05/05/2024, 09:15:00] Dana: \u{200E}POLL:\n\
                          Lunch?\n\
                          \u{200E}OPTION: A (3 votes)\n\
                          \u{200E}OPTION: B (7 votes)\n\
                          [06/05/2024, 11:00:00] Omer: \u{200E}POLL:\n\
                          Dinner?\n\
                          \u{200E}OPTION: C (1 vote)\n";

    #[test]
    fn test_extracts_in_order() {
        let polls = PollExtractor::new().extract_str(SAMPLE, &ExtractorConfig::new());

        assert_eq!(polls.len(), 2);
        assert_eq!(polls[0].question(), "Lunch?");
        assert_eq!(polls[0].time(), "09:15:00");
        assert_eq!(polls[1].question(), "Dinner?");
        assert_eq!(polls[1].date(), "06/05/2024");
    }

    #[test]
    fn test_poll_attributed_to_its_own_header() {
        // The non-poll message right before must not swallow the poll
        let polls = PollExtractor::new().extract_str(SAMPLE, &ExtractorConfig::new());
        assert_eq!(polls[0].date(), "05/05/2024");
        assert_eq!(polls[0].time(), "09:15:00");
    }

    #[test]
    fn test_date_filter() {
        let extractor = PollExtractor::new();

        let config = ExtractorConfig::new().with_date_filter("06/05/2024");
        let polls = extractor.extract_str(SAMPLE, &config);
        assert_eq!(polls.len(), 1);
        assert_eq!(polls[0].question(), "Dinner?");

        let config = ExtractorConfig::new().with_date_filter("07/05/2024");
        assert!(extractor.extract_str(SAMPLE, &config).is_empty());
    }

    #[test]
    fn test_no_polls() {
        let text = "[05/05/2024, 09:00:00] Dana: just chatting\n";
        let polls = PollExtractor::new().extract_str(text, &ExtractorConfig::new());
        assert!(polls.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let result = PollExtractor::new().extract_file(
            Path::new("/definitely/not/here/chat.txt"),
            &ExtractorConfig::new(),
        );
        assert!(matches!(result, Err(PollError::TranscriptRead { .. })));
    }
}
