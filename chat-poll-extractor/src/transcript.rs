//! Transcript segmentation
//!
//! Splits an exported chat transcript into message entries. Every entry starts
//! at a bracketed `[DD/MM/YYYY, HH:MM:SS]` header and runs until the next
//! header or the end of the text. Entries are then classified as poll blocks
//! by looking for the invisible poll marker.
//!
//! ## Marker convention
//! The exporting client tags structured content with U+200E (LEFT-TO-RIGHT
//! MARK) directly in front of a keyword. The visible keyword alone is not
//! enough: a user typing "POLL:" in a normal message must not count.

use regex::{CaptureMatches, Regex};
use std::iter::Peekable;
use std::sync::LazyLock;

/// Marks the start of a poll inside a message
pub const POLL_MARKER: &str = "\u{200E}POLL:";

/// Marks one option/vote-count record inside a poll
pub const OPTION_MARKER: &str = "\u{200E}OPTION:";

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d{2}/\d{2}/\d{4}), (\d{2}:\d{2}:\d{2})\]").expect("valid header regex")
});

/// One message of the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageEntry<'a> {
    /// Header date, `DD/MM/YYYY`
    pub date: &'a str,
    /// Header time, `HH:MM:SS`
    pub time: &'a str,
    /// Everything after the header up to the next header (sender included)
    pub body: &'a str,
}

impl<'a> MessageEntry<'a> {
    /// Check if this entry carries a poll
    pub fn is_poll(&self) -> bool {
        self.body.contains(POLL_MARKER)
    }

    /// Poll content: the text after the first poll marker, up to the end of
    /// the entry. `None` for ordinary messages.
    pub fn poll_content(&self) -> Option<&'a str> {
        self.body
            .find(POLL_MARKER)
            .map(|idx| &self.body[idx + POLL_MARKER.len()..])
    }
}

/// Split a transcript into message entries, in order of appearance
///
/// Text before the first header belongs to no entry and is dropped.
pub fn entries(text: &str) -> MessageEntries<'_> {
    MessageEntries {
        text,
        headers: HEADER_RE.captures_iter(text).peekable(),
    }
}

/// Iterator over the message entries of a transcript
pub struct MessageEntries<'a> {
    text: &'a str,
    headers: Peekable<CaptureMatches<'static, 'a>>,
}

impl<'a> Iterator for MessageEntries<'a> {
    type Item = MessageEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = self.headers.next()?;
        let header = caps.get(0)?;

        // The body stops where the next header begins
        let body_end = self
            .headers
            .peek()
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(self.text.len());

        let date = caps.get(1)?.as_str();
        let time = caps.get(2)?.as_str();
        log::trace!("Message entry at {} {}", date, time);

        Some(MessageEntry {
            date,
            time,
            body: &self.text[header.end()..body_end],
        })
    }
}
