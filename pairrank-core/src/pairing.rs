/// Pair space: the universe of unordered candidate pairs and random selection
/// of the next unresolved one.
///
/// Selection is a pure sampling function over (universe, played set). It keeps
/// no cursor, so two calls on the same state may return different pairs.
use std::collections::HashSet;

use rand::Rng;

use crate::types::{Item, Progress, UnorderedPair};

/// Generate every 2-combination of the item set, in item order.
///
/// For `n` items this returns exactly `n * (n - 1) / 2` pairs with no
/// self-pairs and no duplicates (given unique item IDs).
pub fn all_pairs(items: &[Item]) -> Vec<UnorderedPair> {
    let n = items.len();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push(UnorderedPair::new(items[i].id.clone(), items[j].id.clone()));
        }
    }
    pairs
}

/// Pairs already resolved by a vote. Grows monotonically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayedSet {
    pairs: HashSet<UnorderedPair>,
}

impl PlayedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a pair as resolved. Returns `false` if it already was.
    pub fn mark(&mut self, pair: UnorderedPair) -> bool {
        self.pairs.insert(pair)
    }

    /// Order-independent membership test.
    pub fn contains(&self, pair: &UnorderedPair) -> bool {
        self.pairs.contains(pair)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Pick a uniformly random unplayed pair using the thread-local RNG.
/// Returns `None` once every pair has been played.
pub fn next_pair(all_pairs: &[UnorderedPair], played: &PlayedSet) -> Option<UnorderedPair> {
    let mut rng = rand::rng();
    next_pair_with(all_pairs, played, &mut rng)
}

/// Same as `next_pair`, drawing from a caller-supplied RNG.
pub fn next_pair_with(
    all_pairs: &[UnorderedPair],
    played: &PlayedSet,
    rng: &mut impl Rng,
) -> Option<UnorderedPair> {
    let unplayed: Vec<&UnorderedPair> = all_pairs
        .iter()
        .filter(|pair| !played.contains(pair))
        .collect();

    if unplayed.is_empty() {
        return None;
    }

    let pick = rng.random_range(0..unplayed.len());
    Some(unplayed[pick].clone())
}

/// Fraction of the pair universe resolved so far.
pub fn progress(played: &PlayedSet, all_pairs: &[UnorderedPair]) -> Progress {
    let total = all_pairs.len();
    let completed = played.len().min(total);
    let fraction = if total == 0 {
        1.0
    } else {
        completed as f64 / total as f64
    };

    Progress {
        completed,
        total,
        remaining: total - completed,
        fraction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_items(n: usize) -> Vec<Item> {
        (0..n).map(|i| Item::new(format!("s{i}"), format!("Song {i}"))).collect()
    }

    #[test]
    fn test_all_pairs_count_and_uniqueness() {
        for n in 0..10 {
            let pairs = all_pairs(&make_items(n));
            assert_eq!(pairs.len(), n * n.saturating_sub(1) / 2, "wrong pair count for n = {n}");

            let unique: HashSet<&UnorderedPair> = pairs.iter().collect();
            assert_eq!(unique.len(), pairs.len(), "duplicate pair for n = {n}");

            for pair in &pairs {
                assert_ne!(pair.first, pair.second, "self-pair for n = {n}");
            }
        }
    }

    #[test]
    fn test_next_pair_skips_played_in_either_order() {
        let items = make_items(3);
        let pairs = all_pairs(&items);
        let mut played = PlayedSet::new();
        played.mark(UnorderedPair::new("s1", "s0"));
        played.mark(UnorderedPair::new("s2", "s0"));

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let pair = next_pair_with(&pairs, &played, &mut rng).unwrap();
            assert_eq!(pair, UnorderedPair::new("s1", "s2"));
        }
    }

    #[test]
    fn test_next_pair_exhausted() {
        let items = make_items(4);
        let pairs = all_pairs(&items);
        let mut played = PlayedSet::new();
        for pair in &pairs {
            assert!(next_pair(&pairs, &played).is_some());
            played.mark(pair.clone());
        }
        assert!(next_pair(&pairs, &played).is_none());

        let p = progress(&played, &pairs);
        assert_eq!(p.completed, 6);
        assert_eq!(p.remaining, 0);
        assert_eq!(p.fraction, 1.0);
    }

    #[test]
    fn test_next_pair_eventually_samples_every_unplayed_pair() {
        let items = make_items(4);
        let pairs = all_pairs(&items);
        let played = PlayedSet::new();
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.insert(next_pair_with(&pairs, &played, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), pairs.len());
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut played = PlayedSet::new();
        assert!(played.mark(UnorderedPair::new("a", "b")));
        assert!(!played.mark(UnorderedPair::new("b", "a")));
        assert_eq!(played.len(), 1);
    }

    #[test]
    fn test_progress_partial_and_empty() {
        let items = make_items(5);
        let pairs = all_pairs(&items);
        let mut played = PlayedSet::new();
        played.mark(pairs[0].clone());
        played.mark(pairs[3].clone());

        let p = progress(&played, &pairs);
        assert_eq!(p.completed, 2);
        assert_eq!(p.total, 10);
        assert_eq!(p.remaining, 8);
        assert!((p.fraction - 0.2).abs() < 1e-12);

        let empty = progress(&PlayedSet::new(), &[]);
        assert_eq!(empty.total, 0);
        assert_eq!(empty.fraction, 1.0);
        assert!(next_pair(&[], &PlayedSet::new()).is_none());
    }
}
