//! JSON dump of the extracted records

use chat_poll_extractor::PollRecord;

/// Pretty-printed JSON array of poll records, in extraction order
pub fn format_json(polls: &[PollRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(polls)
}
