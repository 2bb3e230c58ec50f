/// Append-only, order-preserving log of votes.
use crate::types::{ItemId, Matchup};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchupLog {
    entries: Vec<Matchup>,
}

impl MatchupLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vote, stamping it with the next sequence index.
    ///
    /// The log does not know the item set; callers validate the vote first.
    pub fn append(&mut self, winner: ItemId, loser: ItemId) -> &Matchup {
        let sequence_index = self.entries.len();
        self.entries.push(Matchup {
            winner,
            loser,
            sequence_index,
        });
        &self.entries[sequence_index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[Matchup] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Matchup> {
        self.entries.iter()
    }
}

/// Scoring weight of the matchup at `sequence_index` in a log of `total` entries.
///
/// `total - sequence_index`: the first vote weighs `total`, the last weighs 1.
/// Earlier votes deliberately count more than later ones.
pub fn matchup_weight(total: usize, sequence_index: usize) -> f64 {
    total.saturating_sub(sequence_index) as f64
}
