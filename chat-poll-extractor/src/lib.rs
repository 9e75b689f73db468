//! Chat Poll Extractor Library
//!
//! A stateless, reusable library for pulling poll results out of exported
//! chat transcripts.
//!
//! # Architecture
//!
//! Extraction is a three-step pipeline:
//! - Segment the transcript into messages at `[DD/MM/YYYY, HH:MM:SS]` headers
//! - Classify messages as polls by the invisible poll marker
//! - Parse each poll block into a question and option/vote-count pairs
//!
//! The library does NOT:
//! - Render documents (HTML, PDF)
//! - Parse dates into calendar values
//! - Read anything but the transcript it is pointed at
//!
//! Rendering lives in the application layer (chat-poll-cli). The
//! [`PollSummary`] tally is provided here so front ends rank options the
//! same way.
//!
//! # Example Usage
//!
//! ```no_run
//! use chat_poll_extractor::{ExtractorConfig, PollExtractor, PollSummary};
//! use std::path::Path;
//!
//! let extractor = PollExtractor::new();
//! let config = ExtractorConfig::new().with_date_filter("05/05/2024");
//!
//! let polls = extractor.extract_file(Path::new("chat.txt"), &config).unwrap();
//!
//! for poll in &polls {
//!     let summary = PollSummary::new(poll);
//!     if let Some(winner) = summary.winner() {
//!         println!("{}: {} ({:.1}%)", poll.question(), winner.label, winner.percentage);
//!     }
//! }
//! ```

// Public modules
pub mod config;
pub mod extractor;
pub mod poll_block;
pub mod summary;
pub mod transcript;
pub mod types;

// Re-export main types for convenience
pub use config::ExtractorConfig;
pub use extractor::{PollExtractor, PollIterator};
pub use summary::{PollSummary, RankedOption};
pub use transcript::{MessageEntry, OPTION_MARKER, POLL_MARKER};
pub use types::{PollError, PollOptions, PollRecord, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
