/// Ranking session orchestrator.
///
/// Pure computation: no async, no HTTP, no IO. The caller shows the current
/// pair to the user and feeds the verdict back in.
///
/// `SessionState` is an immutable snapshot; every command is a transition
/// returning a new snapshot. `RankingSession` owns the current snapshot plus
/// the RNG used to pick the next pair, and exposes the command/query surface
/// the surrounding application talks to.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::display::DisplayState;
use crate::error::Result;
use crate::matchups::MatchupLog;
use crate::pairing::{all_pairs, next_pair_with, progress, PlayedSet};
use crate::scoring::run_scoring;
use crate::types::{IdMap, Item, ItemId, Matchup, Progress, RankingItem, ScoringOptions, UnorderedPair};

#[derive(Debug, Clone)]
pub struct SessionState {
    items: Vec<Item>,
    id_map: IdMap,
    all_pairs: Vec<UnorderedPair>,
    played: PlayedSet,
    log: MatchupLog,
    display: DisplayState,
    /// Scorer output, score-descending.
    base_ranking: Vec<RankingItem>,
    /// Base ranking with locks and manual order applied.
    ranking: Vec<RankingItem>,
}

impl SessionState {
    /// Fresh session over `items`: no votes, no locks, no manual order.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        let mut state = Self::unscored(items)?;
        state.rescore()?;
        Ok(state)
    }

    /// Rebuild a session from a saved vote sequence, validating every vote.
    ///
    /// The scorer runs once, after the last vote is logged; the result is
    /// identical to applying the votes one by one.
    pub fn replay(items: Vec<Item>, votes: &[(ItemId, ItemId)]) -> Result<Self> {
        let mut state = Self::unscored(items)?;
        for (winner, loser) in votes {
            state.record(winner, loser)?;
        }
        state.rescore()?;
        Ok(state)
    }

    /// Empty log and empty rankings; callers must `rescore` before exposing it.
    fn unscored(items: Vec<Item>) -> Result<Self> {
        let id_map = IdMap::from_items(&items)?;
        let all_pairs = all_pairs(&items);

        Ok(SessionState {
            items,
            id_map,
            all_pairs,
            played: PlayedSet::new(),
            log: MatchupLog::new(),
            display: DisplayState::new(),
            base_ranking: Vec::new(),
            ranking: Vec::new(),
        })
    }

    /// Replace the item set. All votes, locks and manual order are discarded.
    pub fn apply_items(&self, items: Vec<Item>) -> Result<Self> {
        Self::new(items)
    }

    /// Record `winner` beating `loser`.
    ///
    /// Rejected (and the snapshot left untouched) if the IDs are equal or
    /// either is not in the item set.
    pub fn apply_vote(&self, winner: &str, loser: &str) -> Result<Self> {
        let mut next = self.clone();
        next.record(winner, loser)?;
        next.rescore()?;
        Ok(next)
    }

    pub fn apply_toggle_lock(&self, id: &str) -> Self {
        let mut next = self.clone();
        if let Some(locked) = next.display.toggle_lock(id, &self.ranking) {
            debug!(item = %id, locked, "lock toggled");
            next.recompose();
        }
        next
    }

    pub fn apply_reorder(&self, from: usize, to: usize) -> Self {
        let mut next = self.clone();
        if next.display.reorder(from, to, &self.ranking) {
            debug!(from, to, "ranking reordered");
            next.recompose();
        }
        next
    }

    pub fn apply_swap(&self, i: usize, j: usize) -> Self {
        let mut next = self.clone();
        if next.display.swap(i, j, &self.ranking) {
            debug!(i, j, "ranking entries swapped");
            next.recompose();
        }
        next
    }

    fn record(&mut self, winner: &str, loser: &str) -> Result<()> {
        self.id_map.resolve_vote(winner, loser)?;

        let matchup = self.log.append(winner.to_string(), loser.to_string());
        let newly_played = self.played.mark(matchup.pair());
        debug!(
            winner = %winner,
            loser = %loser,
            sequence_index = matchup.sequence_index,
            newly_played,
            "vote recorded"
        );
        Ok(())
    }

    fn rescore(&mut self) -> Result<()> {
        self.base_ranking = run_scoring(&self.items, self.log.as_slice(), &ScoringOptions::default())?;
        self.recompose();
        Ok(())
    }

    fn recompose(&mut self) {
        self.ranking = self.display.compose(&self.base_ranking);
    }

    /// Sample an unplayed pair. `None` once every pair has a vote.
    pub fn next_pair_with(&self, rng: &mut impl Rng) -> Option<UnorderedPair> {
        next_pair_with(&self.all_pairs, &self.played, rng)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.id_map.to_idx(id).map(|idx| &self.items[idx])
    }

    pub fn all_pairs(&self) -> &[UnorderedPair] {
        &self.all_pairs
    }

    pub fn played(&self) -> &PlayedSet {
        &self.played
    }

    pub fn matchups(&self) -> &[Matchup] {
        self.log.as_slice()
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Pure score order, ignoring locks and manual order.
    pub fn base_ranking(&self) -> &[RankingItem] {
        &self.base_ranking
    }

    /// What the user sees: one entry per item, positions `0..n`.
    pub fn ranking_list(&self) -> &[RankingItem] {
        &self.ranking
    }

    pub fn progress(&self) -> Progress {
        progress(&self.played, &self.all_pairs)
    }

    pub fn is_locked(&self, id: &str) -> bool {
        self.display.is_locked(id)
    }
}

/// The single owner of a ranking session.
///
/// Commands must be serialized by whoever holds it; nothing here is shared.
pub struct RankingSession {
    state: SessionState,
    /// Drawn once per vote (or item replacement) and held until the next one.
    current_pair: Option<UnorderedPair>,
    rng: StdRng,
}

impl RankingSession {
    pub fn new(items: Vec<Item>) -> Result<Self> {
        Ok(Self::from_state(SessionState::new(items)?, StdRng::from_os_rng()))
    }

    /// Session with a deterministic pair sequence.
    pub fn with_seed(items: Vec<Item>, seed: u64) -> Result<Self> {
        Ok(Self::from_state(SessionState::new(items)?, StdRng::seed_from_u64(seed)))
    }

    /// Resume from an existing snapshot (e.g. one built with `SessionState::replay`).
    pub fn from_state(state: SessionState, rng: StdRng) -> Self {
        let mut session = RankingSession {
            state,
            current_pair: None,
            rng,
        };
        session.draw_pair();
        session
    }

    fn draw_pair(&mut self) {
        self.current_pair = self.state.next_pair_with(&mut self.rng);
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The pair awaiting a vote, as full items. `None` when ranking is complete.
    pub fn current_pair(&self) -> Option<(&Item, &Item)> {
        let pair = self.current_pair.as_ref()?;
        Some((self.state.item(&pair.first)?, self.state.item(&pair.second)?))
    }

    pub fn record_vote(&mut self, winner: &str, loser: &str) -> Result<()> {
        match self.state.apply_vote(winner, loser) {
            Ok(next) => {
                self.state = next;
                self.draw_pair();
                Ok(())
            }
            Err(e) => {
                debug!(winner = %winner, loser = %loser, error = %e, "vote rejected");
                Err(e)
            }
        }
    }

    /// Install a new item set, resetting votes, locks and manual order.
    pub fn replace_items(&mut self, items: Vec<Item>) -> Result<()> {
        self.state = self.state.apply_items(items)?;
        debug!(items = self.state.items().len(), "item set replaced");
        self.draw_pair();
        Ok(())
    }

    pub fn ranking_list(&self) -> &[RankingItem] {
        self.state.ranking_list()
    }

    pub fn progress(&self) -> Progress {
        self.state.progress()
    }

    pub fn is_complete(&self) -> bool {
        self.current_pair.is_none()
    }

    pub fn matchups(&self) -> &[Matchup] {
        self.state.matchups()
    }

    pub fn is_locked(&self, id: &str) -> bool {
        self.state.is_locked(id)
    }

    pub fn toggle_lock(&mut self, id: &str) {
        self.state = self.state.apply_toggle_lock(id);
    }

    pub fn reorder(&mut self, from: usize, to: usize) {
        self.state = self.state.apply_reorder(from, to);
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.state = self.state.apply_swap(i, j);
    }
}
