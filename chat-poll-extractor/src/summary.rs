//! Per-poll tally
//!
//! Ranks the options of a poll, computes percentages and picks the winner.
//! Front ends render from a `PollSummary` so every output format agrees on
//! ordering and rounding inputs.

use crate::types::PollRecord;

/// One option of a poll after ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RankedOption<'a> {
    /// Option label
    pub label: &'a str,
    /// Raw vote count
    pub votes: u64,
    /// Share of all votes, 0-100 (0.0 when nobody voted)
    pub percentage: f64,
}

/// Ranked view over a poll record
#[derive(Debug, Clone, PartialEq)]
pub struct PollSummary<'a> {
    total_votes: u128,
    ranked: Vec<RankedOption<'a>>,
}

impl<'a> PollSummary<'a> {
    /// Rank the options of `record`
    ///
    /// Options are ordered by descending vote count. The sort is stable, so
    /// options with equal counts keep the order they appeared in.
    pub fn new(record: &'a PollRecord) -> Self {
        let total_votes = record.total_votes();

        let mut ranked: Vec<RankedOption<'a>> = record
            .options()
            .iter()
            .map(|(label, &votes)| RankedOption {
                label: label.as_str(),
                votes,
                percentage: percentage(votes, total_votes),
            })
            .collect();
        ranked.sort_by(|a, b| b.votes.cmp(&a.votes));

        Self {
            total_votes,
            ranked,
        }
    }

    /// Sum of all option counts
    pub fn total_votes(&self) -> u128 {
        self.total_votes
    }

    /// Options, highest count first
    pub fn ranked(&self) -> &[RankedOption<'a>] {
        &self.ranked
    }

    /// The leading option, only defined once somebody voted
    pub fn winner(&self) -> Option<&RankedOption<'a>> {
        if self.total_votes == 0 {
            return None;
        }
        self.ranked.first()
    }
}

fn percentage(votes: u64, total: u128) -> f64 {
    if total == 0 {
        0.0
    } else {
        votes as f64 / total as f64 * 100.0
    }
}
