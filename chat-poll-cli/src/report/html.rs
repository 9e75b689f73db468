//! HTML summary document
//!
//! Produces one self-contained page: embedded stylesheet, a title reflecting
//! the date filter and one section per poll. Question and option text is set
//! right-to-left since the transcripts are written in an RTL script.

use chat_poll_extractor::{PollRecord, PollSummary};

const STYLESHEET: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; }
        .rtl { direction: rtl; text-align: right; }
        .poll { border: 1px solid #ccc; margin: 10px 0; padding: 15px; border-radius: 5px; }
        .winner { color: #2c7be5; font-weight: bold; }
        .options { margin-left: 20px; }
        .poll-time { font-size: 0.8em; color: #666; }
        .total-votes { font-style: italic; color: #666; margin-bottom: 10px; }
        h1 { color: #333; }
"#;

/// Render the full summary document
///
/// `date` is only used for the title; filtering already happened during
/// extraction.
pub fn format_html_summary(polls: &[PollRecord], date: Option<&str>, title: &str) -> String {
    let date_str = date
        .map(|d| format!(" for {}", escape_html(d)))
        .unwrap_or_default();
    let title = format!("{}{}", escape_html(title), date_str);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(&format!("    <title>{}</title>\n", title));
    html.push_str(&format!("    <style>{}    </style>\n", STYLESHEET));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("    <h1>{}</h1>\n", title));

    if polls.is_empty() {
        html.push_str("<p>No polls found.</p>\n");
    } else {
        for (i, poll) in polls.iter().enumerate() {
            html.push_str(&format_poll(i + 1, poll));
        }
    }

    html.push_str("</body>\n</html>");
    html
}

/// One `<div class="poll">` section
fn format_poll(index: usize, poll: &PollRecord) -> String {
    let summary = PollSummary::new(poll);
    let mut out = String::new();

    out.push_str("<div class=\"poll\">\n");
    out.push_str(&format!(
        "    <h2>Poll {} <span class=\"poll-time\">({})</span></h2>\n",
        index,
        escape_html(poll.time())
    ));
    out.push_str(&format!(
        "    <h2 class=\"rtl\">{}</h2>\n",
        escape_html(poll.question())
    ));
    out.push_str(&format!(
        "    <p class=\"total-votes\">Total votes: {}</p>\n",
        summary.total_votes()
    ));

    if let Some(winner) = summary.winner() {
        out.push_str(&format!(
            "    <p class=\"winner\">Winner: <span class=\"rtl\">{}</span> with {} votes</p>\n",
            escape_html(winner.label),
            winner.votes
        ));
    }

    out.push_str("    <h3>Options:</h3>\n");
    out.push_str("    <ul class=\"options\">\n");
    for option in summary.ranked() {
        out.push_str(&format!(
            "        <li><span class=\"rtl\">{}</span>: {} votes ({:.1}%)</li>\n",
            escape_html(option.label),
            option.votes,
            option.percentage
        ));
    }
    out.push_str("    </ul>\n");
    out.push_str("</div>\n");

    out
}

/// Escape text taken from the transcript before it goes into markup
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
