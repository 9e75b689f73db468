//! Poll block sub-parser
//!
//! Splits the content of a poll message into the question text and the
//! option/vote-count records. The two scans are independent: question lines
//! are found line by line, option records by scanning the whole block.

use crate::transcript::OPTION_MARKER;
use crate::types::PollOptions;
use regex::Regex;
use std::sync::LazyLock;

static OPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x{200E}OPTION: (.*?) \((\d+) votes?\)").expect("valid option regex")
});

static DECIMAL_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("valid digit regex"));

/// Question and options parsed from one poll block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPoll {
    pub question: String,
    pub options: PollOptions,
}

/// Parse the content of a poll block (the text after the poll marker)
///
/// Never fails: option records that do not match the expected shape are left
/// out, and a block without any options yields an empty map.
pub fn parse_poll_block(content: &str) -> ParsedPoll {
    ParsedPoll {
        question: parse_question(content),
        options: parse_options(content),
    }
}

/// Every non-blank line without an option marker, trimmed and rejoined
fn parse_question(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.contains(OPTION_MARKER))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// All `OPTION: <label> (<n> votes)` records in the block
///
/// A label seen twice keeps its first position but takes the later count.
fn parse_options(content: &str) -> PollOptions {
    let mut options = PollOptions::new();

    for caps in OPTION_RE.captures_iter(content) {
        let label = caps[1].trim();
        let Some(votes) = parse_vote_count(&caps[2]) else {
            log::trace!("Skipping option {:?}: vote count {:?} out of range", label, &caps[2]);
            continue;
        };

        if let Some(previous) = options.insert(label.to_string(), votes) {
            log::debug!(
                "Option {:?} repeated in poll, replacing {} votes with {}",
                label,
                previous,
                votes
            );
        }
    }

    options
}

/// Vote count written in any decimal script (ASCII, Arabic-Indic, ...)
///
/// `None` when the value does not fit a `u64`.
fn parse_vote_count(digits: &str) -> Option<u64> {
    digits
        .chars()
        .try_fold(0u64, |acc, c| acc.checked_mul(10)?.checked_add(digit_value(c)?))
}

/// Numeric value of a Unicode decimal digit
///
/// Every decimal script occupies contiguous 0..=9 runs, so the value is the
/// offset from the start of the run, modulo 10.
fn digit_value(c: char) -> Option<u64> {
    if let Some(value) = c.to_digit(10) {
        return Some(u64::from(value));
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    Some(u64::from((c as u32 - start) % 10))
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT_RE.is_match(c.encode_utf8(&mut buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: char = '\u{200E}';

    #[test]
    fn test_question_and_options() {
        let content = format!(
            "\nWhere should we eat?\n{M}OPTION: Pizza (3 votes)\n{M}OPTION: Sushi (7 votes)\n"
        );
        let parsed = parse_poll_block(&content);

        assert_eq!(parsed.question, "Where should we eat?");
        assert_eq!(parsed.options.len(), 2);
        assert_eq!(parsed.options["Pizza"], 3);
        assert_eq!(parsed.options["Sushi"], 7);
    }

    #[test]
    fn test_multiline_question() {
        let content = format!(
            "  First line  \n\n   Second line\n{M}OPTION: Yes (1 vote)\n"
        );
        let parsed = parse_poll_block(&content);

        assert_eq!(parsed.question, "First line\nSecond line");
        assert_eq!(parsed.options["Yes"], 1);
    }

    #[test]
    fn test_interleaved_option_and_question_lines() {
        let content = format!(
            "Pick one\n{M}OPTION: A (2 votes)\nnote in between\n{M}OPTION: B (0 votes)\n"
        );
        let parsed = parse_poll_block(&content);

        assert_eq!(parsed.question, "Pick one\nnote in between");
        let labels: Vec<_> = parsed.options.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["A", "B"]);
        assert_eq!(parsed.options["B"], 0);
    }

    #[test]
    fn test_no_options() {
        let parsed = parse_poll_block("\nJust a question?\n");
        assert_eq!(parsed.question, "Just a question?");
        assert!(parsed.options.is_empty());
    }

    #[test]
    fn test_repeated_label_last_write_wins() {
        let content = format!(
            "Q\n{M}OPTION: A (2 votes)\n{M}OPTION: B (5 votes)\n{M}OPTION: A (9 votes)\n"
        );
        let parsed = parse_poll_block(&content);

        let pairs: Vec<_> = parsed
            .options
            .iter()
            .map(|(label, votes)| (label.as_str(), *votes))
            .collect();
        assert_eq!(pairs, vec![("A", 9), ("B", 5)]);
    }

    #[test]
    fn test_label_is_trimmed() {
        let content = format!("Q\n{M}OPTION:   spaced out   (4 votes)\n");
        let parsed = parse_poll_block(&content);
        assert_eq!(parsed.options["spaced out"], 4);
    }

    #[test]
    fn test_malformed_options_are_skipped() {
        let content = format!(
            "Q\n\
             OPTION: no marker (3 votes)\n\
             {M}OPTION: no count (votes)\n\
             {M}OPTION: negative (-2 votes)\n\
             {M}OPTION: huge (99999999999999999999999 votes)\n\
             {M}OPTION: ok (1 vote)\n"
        );
        let parsed = parse_poll_block(&content);

        assert_eq!(parsed.options.len(), 1);
        assert_eq!(parsed.options["ok"], 1);
        // Lines without the invisible marker are ordinary question text
        assert!(parsed.question.contains("OPTION: no marker (3 votes)"));
    }

    #[test]
    fn test_arabic_indic_vote_counts() {
        let content = format!(
            "Q\n\
             {M}OPTION: A (\u{0663} votes)\n\
             {M}OPTION: B (\u{0661}\u{0662} votes)\n\
             {M}OPTION: C (\u{06F7} votes)\n"
        );
        let parsed = parse_poll_block(&content);

        assert_eq!(parsed.options.get("A"), Some(&3));
        assert_eq!(parsed.options.get("B"), Some(&12));
        assert_eq!(parsed.options.get("C"), Some(&7));
    }

    #[test]
    fn test_digit_values_across_scripts() {
        assert_eq!(parse_vote_count("42"), Some(42));
        assert_eq!(parse_vote_count("\u{0660}\u{0669}"), Some(9));
        assert_eq!(parse_vote_count("\u{FF11}\u{FF10}"), Some(10));
        assert_eq!(parse_vote_count("\u{1D7D9}"), Some(1));
        assert_eq!(parse_vote_count("18446744073709551616"), None);
        assert_eq!(digit_value('x'), None);
    }

    #[test]
    fn test_label_with_parentheses() {
        let content = format!("Q\n{M}OPTION: Tea (green) (6 votes)\n");
        let parsed = parse_poll_block(&content);
        assert_eq!(parsed.options["Tea (green)"], 6);
    }
}
