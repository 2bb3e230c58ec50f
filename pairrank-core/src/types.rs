use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::constants::{DAMPING_FACTOR, POWER_ITERATIONS};
use crate::error::{InvalidVote, RankError, Result};
use crate::matchups::matchup_weight;

/// Caller-provided item identity. Unique within an active item set.
pub type ItemId = String;

/// An item being ranked (a song, in the original use case).
///
/// Only `id` matters to the algorithms; the rest is display metadata carried
/// through to the ranking output untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub artist: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub uri: Option<String>,
}

impl Item {
    /// Item with no artist or uri.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
            artist: None,
            uri: None,
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }
}

/// A 2-combination of item IDs.
///
/// `first`/`second` keep the order the pair was generated in (useful for
/// display), but equality and hashing ignore it: `(a, b) == (b, a)`.
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnorderedPair {
    pub first: ItemId,
    pub second: ItemId,
}

impl UnorderedPair {
    pub fn new(first: impl Into<ItemId>, second: impl Into<ItemId>) -> Self {
        UnorderedPair {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Both IDs, smallest first.
    fn canonical(&self) -> (&str, &str) {
        if self.first <= self.second {
            (&self.first, &self.second)
        } else {
            (&self.second, &self.first)
        }
    }
}

impl PartialEq for UnorderedPair {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Hash for UnorderedPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

/// One recorded vote. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matchup {
    pub winner: ItemId,
    pub loser: ItemId,
    /// 0-based position in the matchup log.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sequence_index: usize,
}

impl Matchup {
    pub fn pair(&self) -> UnorderedPair {
        UnorderedPair::new(self.winner.clone(), self.loser.clone())
    }
}

/// An item with its rank-centrality score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingItem {
    pub item: Item,
    pub score: f64,
}

/// How far through the pair universe the session is.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progress {
    /// Distinct pairs resolved by a vote.
    pub completed: usize,
    /// `n * (n - 1) / 2`.
    pub total: usize,
    pub remaining: usize,
    /// `completed / total`, in `[0, 1]`. `1.0` when there is nothing left to
    /// compare, including the degenerate `total == 0` case.
    pub fraction: f64,
}

/// Options for `run_scoring()`.
///
/// Sessions always score with `ScoringOptions::default()`; other values are
/// for analysis and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringOptions {
    /// Exact number of power-iteration steps.
    pub iterations: usize,
    /// Weight of the walk term; `1 - damping` goes to uniform teleportation.
    pub damping: f64,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        ScoringOptions {
            iterations: POWER_ITERATIONS,
            damping: DAMPING_FACTOR,
        }
    }
}

/// Internal indexed matchup: (winner index, loser index, weight).
pub(crate) type IndexedMatchup = (usize, usize, f64);

/// Maps between caller item IDs and internal 0..N indices.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdMap {
    ids: Vec<ItemId>,
    id_to_idx: HashMap<ItemId, usize>,
}

impl IdMap {
    pub fn from_items(items: &[Item]) -> Result<Self> {
        let mut id_to_idx = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if id_to_idx.insert(item.id.clone(), idx).is_some() {
                return Err(RankError::DuplicateItem(item.id.clone()));
            }
        }
        Ok(IdMap {
            ids: items.iter().map(|item| item.id.clone()).collect(),
            id_to_idx,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn to_idx(&self, id: &str) -> Option<usize> {
        self.id_to_idx.get(id).copied()
    }

    /// Resolve a vote's IDs to indices, rejecting self-votes and unknown IDs.
    pub fn resolve_vote(&self, winner: &str, loser: &str) -> Result<(usize, usize)> {
        if winner == loser {
            return Err(InvalidVote::SameItem(winner.to_string()).into());
        }
        let winner_idx = self
            .to_idx(winner)
            .ok_or_else(|| InvalidVote::UnknownItem(winner.to_string()))?;
        let loser_idx = self
            .to_idx(loser)
            .ok_or_else(|| InvalidVote::UnknownItem(loser.to_string()))?;
        Ok((winner_idx, loser_idx))
    }

    /// Convert a matchup log into indexed, weighted entries for the scorer.
    pub fn convert_matchups(&self, matchups: &[Matchup]) -> Result<Vec<IndexedMatchup>> {
        let total = matchups.len();
        matchups
            .iter()
            .map(|m| {
                let (winner, loser) = self.resolve_vote(&m.winner, &m.loser)?;
                Ok((winner, loser, matchup_weight(total, m.sequence_index)))
            })
            .collect()
    }
}
