/// Display composition: merges the score-ordered base ranking with user
/// overrides (locked slots and a manual relative order) into the sequence the
/// user actually sees.
///
/// Locks beat manual order, manual order beats scores. Items are tracked by
/// identity (their index in the base ranking), never by value, so items with
/// identical scores are still told apart.
use std::collections::{HashMap, HashSet};

use crate::types::{ItemId, RankingItem};

/// Locked items and their target slots, in insertion order.
///
/// Iteration order decides conflicts when two locks land on the same slot:
/// the most recently inserted lock wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockMap {
    entries: Vec<(ItemId, usize)>,
}

impl LockMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock `id` at `slot`. Re-locking an item moves it to the newest position.
    pub fn insert(&mut self, id: ItemId, slot: usize) {
        self.remove(&id);
        self.entries.push((id, slot));
    }

    /// Returns `true` if the item was locked.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(locked, _)| locked != id);
        self.entries.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(locked, _)| locked == id)
    }

    pub fn get(&self, id: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(locked, _)| locked == id)
            .map(|&(_, slot)| slot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(id, slot)| (id.as_str(), *slot))
    }
}

/// Produce the displayed sequence: `base.len()` entries, one per item.
///
/// 1. Intermediate order: `manual_order` first (unknown IDs skipped,
///    duplicates dropped), then every unmentioned item in base order.
///    Without a manual order this is just `base`.
/// 2. Each lock claims its slot, clamped to `[0, n - 1]`.
/// 3. Everything else fills the free slots left to right in intermediate order.
pub fn compose(
    base: &[RankingItem],
    locks: &LockMap,
    manual_order: Option<&[ItemId]>,
) -> Vec<RankingItem> {
    let n = base.len();
    if n == 0 {
        return Vec::new();
    }

    let index_of: HashMap<&str, usize> = base
        .iter()
        .enumerate()
        .map(|(idx, r)| (r.item.id.as_str(), idx))
        .collect();

    let intermediate: Vec<usize> = match manual_order {
        Some(order) => {
            let mut seen = HashSet::with_capacity(n);
            let mut sequence = Vec::with_capacity(n);
            for id in order {
                if let Some(&idx) = index_of.get(id.as_str()) {
                    if seen.insert(idx) {
                        sequence.push(idx);
                    }
                }
            }
            sequence.extend((0..n).filter(|idx| !seen.contains(idx)));
            sequence
        }
        None => (0..n).collect(),
    };

    let mut slots: Vec<Option<usize>> = vec![None; n];
    let mut placed: HashSet<usize> = HashSet::with_capacity(n);

    for (id, target) in locks.iter() {
        let Some(&idx) = index_of.get(id) else {
            continue;
        };
        let slot = target.min(n - 1);
        // Later locks evict earlier ones; the evicted item rejoins the fill pass.
        if let Some(evicted) = slots[slot].replace(idx) {
            placed.remove(&evicted);
        }
        placed.insert(idx);
    }

    let mut cursor = 0;
    for idx in intermediate {
        if placed.contains(&idx) {
            continue;
        }
        while cursor < n && slots[cursor].is_some() {
            cursor += 1;
        }
        if cursor == n {
            break;
        }
        slots[cursor] = Some(idx);
        placed.insert(idx);
    }

    slots
        .into_iter()
        .filter_map(|slot| slot.map(|idx| base[idx].clone()))
        .collect()
}

/// User overrides on top of the base ranking.
///
/// Every command takes the currently displayed sequence, since indices and
/// lock targets are always positions as the user sees them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    locks: LockMap,
    manual_order: Option<Vec<ItemId>>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locks(&self) -> &LockMap {
        &self.locks
    }

    pub fn manual_order(&self) -> Option<&[ItemId]> {
        self.manual_order.as_deref()
    }

    pub fn is_locked(&self, id: &str) -> bool {
        self.locks.contains(id)
    }

    /// Apply the overrides to a base ranking.
    pub fn compose(&self, base: &[RankingItem]) -> Vec<RankingItem> {
        compose(base, &self.locks, self.manual_order())
    }

    /// Unlock a locked item, or lock an unlocked one at its displayed index.
    ///
    /// Unlocking also drops the item from the manual order (and nothing else).
    /// Returns whether the item is locked afterwards, or `None` if nothing
    /// changed: an item that is not displayed cannot be locked.
    pub fn toggle_lock(&mut self, id: &str, displayed: &[RankingItem]) -> Option<bool> {
        if self.locks.remove(id) {
            if let Some(order) = self.manual_order.as_mut() {
                order.retain(|entry| entry != id);
            }
            return Some(false);
        }

        let index = displayed.iter().position(|r| r.item.id == id)?;
        self.locks.insert(id.to_string(), index);
        Some(true)
    }

    /// Move the displayed item at `from` to `to` (remove, then reinsert).
    ///
    /// Out-of-range indices are a no-op. Locks are untouched, so a locked item
    /// keeps its slot regardless. Refusing drops onto locked items is the
    /// caller's policy. Returns `true` if the manual order changed.
    pub fn reorder(&mut self, from: usize, to: usize, displayed: &[RankingItem]) -> bool {
        let n = displayed.len();
        if from >= n || to >= n {
            return false;
        }

        let mut order = displayed_ids(displayed);
        let moved = order.remove(from);
        order.insert(to, moved);
        self.manual_order = Some(order);
        true
    }

    /// Exchange the displayed items at `i` and `j`.
    ///
    /// No-op if either index is out of range or either item is locked.
    /// Returns `true` if the manual order changed.
    pub fn swap(&mut self, i: usize, j: usize, displayed: &[RankingItem]) -> bool {
        let n = displayed.len();
        if i >= n || j >= n {
            return false;
        }
        if self.is_locked(&displayed[i].item.id) || self.is_locked(&displayed[j].item.id) {
            return false;
        }

        let mut order = displayed_ids(displayed);
        order.swap(i, j);
        self.manual_order = Some(order);
        true
    }
}

/// Materialize a manual order from what is on screen.
///
/// Indices in `reorder`/`swap` are display positions, so the manual order is
/// always rebuilt from the displayed sequence before editing. For unlocked
/// items this is exactly the existing manual order's effect.
fn displayed_ids(displayed: &[RankingItem]) -> Vec<ItemId> {
    displayed.iter().map(|r| r.item.id.clone()).collect()
}
