//! Transposition table for caching search results.
//!
//! Open addressing over a power-of-two slot array: a key's home slot is
//! `key & mask` and collisions probe linearly. Removal shifts later chain
//! members back into the hole, so no tombstones are ever left behind.
//! The table doubles when it passes three-quarters load, unless a maximum
//! capacity is set and reached, in which case old entries are evicted.

use crate::board::Move;
use crate::error::ConfigError;

/// Smallest capacity a table may be built with.
pub const MIN_CAPACITY: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact, // Score is the exact value
    Lower, // Score is at least this value (failed high - score >= beta)
    Upper, // Score is at most this value (failed low - score <= alpha)
}

impl Bound {
    /// Whether a stored `score` with this bound settles a node searched
    /// with the window `(alpha, beta)`.
    #[inline]
    #[must_use]
    pub fn settles(self, score: i32, alpha: i32, beta: i32) -> bool {
        match self {
            Bound::Exact => true,
            Bound::Lower => score >= beta,
            Bound::Upper => score <= alpha,
        }
    }
}

/// A cached search result for one position.
///
/// `state` is a snapshot of the position the entry describes, compared on
/// lookup so that two positions sharing an identity never share a result.
/// Tables that only need the numbers use the default `S = ()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateInfo<S = ()> {
    pub key: u64,
    pub state: S,
    pub depth: i32,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

impl<S> StateInfo<S> {
    /// An entry with no search result recorded yet.
    #[must_use]
    pub fn new(key: u64, state: S) -> Self {
        StateInfo {
            key,
            state,
            depth: 0,
            score: 0,
            bound: Bound::Exact,
            best_move: None,
        }
    }
}

#[derive(Debug)]
pub struct TranspositionTable<S = ()> {
    slots: Vec<Option<StateInfo<S>>>,
    mask: usize,
    len: usize,
    max_capacity: Option<usize>,
    evictions: u64,
}

fn check_capacity(capacity: usize) -> Result<(), ConfigError> {
    if capacity < MIN_CAPACITY || !capacity.is_power_of_two() {
        return Err(ConfigError::TableCapacity {
            requested: capacity,
            minimum: MIN_CAPACITY,
        });
    }
    Ok(())
}

fn empty_slots<S>(capacity: usize) -> Vec<Option<StateInfo<S>>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

impl<S> TranspositionTable<S> {
    /// Create an empty table with `capacity` slots.
    ///
    /// The capacity must be a power of two no smaller than [`MIN_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity(capacity)?;
        Ok(TranspositionTable {
            slots: empty_slots(capacity),
            mask: capacity - 1,
            len: 0,
            max_capacity: None,
            evictions: 0,
        })
    }

    /// Stop growing once the table reaches `max_capacity` slots.
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Result<Self, ConfigError> {
        check_capacity(max_capacity)?;
        if max_capacity < self.capacity() {
            return Err(ConfigError::TableCapacity {
                requested: max_capacity,
                minimum: self.capacity(),
            });
        }
        self.max_capacity = Some(max_capacity);
        Ok(self)
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of entries dropped to stay within the maximum capacity.
    #[must_use]
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    #[inline]
    fn home(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    fn find_slot(&self, key: u64) -> Option<usize> {
        let mut idx = self.home(key);
        // Load stays below 1, so every probe sequence reaches an empty slot.
        loop {
            match &self.slots[idx] {
                None => return None,
                Some(entry) if entry.key == key => return Some(idx),
                Some(_) => idx = (idx + 1) & self.mask,
            }
        }
    }

    pub fn get(&self, key: u64) -> Option<&StateInfo<S>> {
        self.find_slot(key).and_then(|idx| self.slots[idx].as_ref())
    }

    pub fn get_mut(&mut self, key: u64) -> Option<&mut StateInfo<S>> {
        let idx = self.find_slot(key)?;
        self.slots[idx].as_mut()
    }

    /// Insert `entry`, overwriting any entry with the same key in place.
    pub fn put(&mut self, entry: StateInfo<S>) {
        if let Some(idx) = self.find_slot(entry.key) {
            self.slots[idx] = Some(entry);
            return;
        }

        if (self.len + 1) * 4 > self.capacity() * 3 {
            match self.max_capacity {
                Some(max) if self.capacity() >= max => self.evict_near(entry.key),
                _ => self.grow(),
            }
        }
        self.insert_new(entry);
    }

    /// Delete the entry for `key`, returning it if present.
    pub fn remove(&mut self, key: u64) -> Option<StateInfo<S>> {
        let idx = self.find_slot(key)?;
        let removed = self.take_slot(idx);
        debug_assert!(removed.is_some());
        removed
    }

    /// Drop every entry and reset the eviction count; the capacity is kept.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
        self.evictions = 0;
    }

    /// Entries in slot order.
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &StateInfo<S>> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    fn insert_new(&mut self, entry: StateInfo<S>) {
        let mut idx = self.home(entry.key);
        while self.slots[idx].is_some() {
            idx = (idx + 1) & self.mask;
        }
        self.slots[idx] = Some(entry);
        self.len += 1;
    }

    /// Empty slot `hole`, then walk the rest of its cluster moving back every
    /// entry whose home lies at or before the hole.
    fn take_slot(&mut self, mut hole: usize) -> Option<StateInfo<S>> {
        let removed = self.slots[hole].take();
        let mut idx = (hole + 1) & self.mask;
        while let Some(entry) = &self.slots[idx] {
            let home = self.home(entry.key);
            let from_home = idx.wrapping_sub(home) & self.mask;
            let from_hole = idx.wrapping_sub(hole) & self.mask;
            if from_home >= from_hole {
                self.slots[hole] = self.slots[idx].take();
                hole = idx;
            }
            idx = (idx + 1) & self.mask;
        }
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Make room for `key` without growing by dropping the entry in its home
    /// slot, or the first entry after it.
    fn evict_near(&mut self, key: u64) {
        let mut idx = self.home(key);
        while self.slots[idx].is_none() {
            idx = (idx + 1) & self.mask;
        }
        if self.take_slot(idx).is_some() {
            self.evictions += 1;
        }
    }

    fn grow(&mut self) {
        let new_capacity = self.capacity() * 2;
        let old = std::mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.mask = new_capacity - 1;
        self.len = 0;
        for entry in old.into_iter().flatten() {
            self.insert_new(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn entry(key: u64, score: i32) -> StateInfo {
        StateInfo {
            score,
            ..StateInfo::new(key, ())
        }
    }

    #[test]
    fn test_capacity_validation() {
        let table = TranspositionTable::<()>::with_capacity(8).unwrap();
        assert_eq!(table.capacity(), 8);
        assert!(table.is_empty());

        assert_eq!(
            TranspositionTable::<()>::with_capacity(4).unwrap_err(),
            ConfigError::TableCapacity {
                requested: 4,
                minimum: MIN_CAPACITY
            }
        );
        assert!(TranspositionTable::<()>::with_capacity(12).is_err());
        assert!(TranspositionTable::<()>::with_capacity(16)
            .unwrap()
            .with_max_capacity(8)
            .is_err());
    }

    #[test]
    fn test_put_get_update_in_place() {
        let mut table = TranspositionTable::with_capacity(8).unwrap();
        table.put(entry(42, 1));
        table.put(entry(42, 7));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(42).map(|e| e.score), Some(7));
        assert!(table.get(43).is_none());

        if let Some(e) = table.get_mut(42) {
            e.depth = 5;
        }
        assert_eq!(table.get(42).map(|e| e.depth), Some(5));
    }

    #[test]
    fn test_remove_middle_of_collision_chain() {
        let mut table = TranspositionTable::with_capacity(8).unwrap();
        let keys: Vec<u64> = (0..4).map(|k| (k << 32) | 13).collect();
        for (i, &key) in keys.iter().enumerate() {
            table.put(entry(key, i as i32));
        }
        assert_eq!(table.len(), 4);

        assert!(table.remove(keys[1]).is_some());
        assert_eq!(table.len(), 3);
        assert!(table.get(keys[1]).is_none());
        for (i, &key) in keys.iter().enumerate().filter(|&(i, _)| i != 1) {
            assert_eq!(table.get(key).map(|e| e.score), Some(i as i32));
        }

        assert!(table.remove(keys[1]).is_none());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_remove_with_overlapping_chains() {
        let mut table = TranspositionTable::with_capacity(8).unwrap();
        let a = 13;
        let b = (1 << 32) | 13;
        let c = 14;
        table.put(entry(a, 1));
        table.put(entry(b, 2));
        table.put(entry(c, 3));

        table.remove(a);
        assert_eq!(table.get(b).map(|e| e.score), Some(2));
        assert_eq!(table.get(c).map(|e| e.score), Some(3));

        table.remove(b);
        assert_eq!(table.get(c).map(|e| e.score), Some(3));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_wraps_around_end() {
        let mut table = TranspositionTable::with_capacity(8).unwrap();
        let keys = [7, (1 << 32) | 7, (2 << 32) | 7];
        for (i, &key) in keys.iter().enumerate() {
            table.put(entry(key, i as i32));
        }
        table.remove(keys[0]);
        assert_eq!(table.get(keys[1]).map(|e| e.score), Some(1));
        assert_eq!(table.get(keys[2]).map(|e| e.score), Some(2));
    }

    #[test]
    fn test_growth_keeps_every_entry() {
        let mut table = TranspositionTable::with_capacity(8).unwrap();
        let keys: Vec<u64> = (0..20u64).map(|i| ((i / 7) << 32) | (i % 7)).collect();
        for (i, &key) in keys.iter().enumerate() {
            table.put(entry(key, i as i32));
        }
        assert_eq!(table.len(), 20);
        assert_eq!(table.capacity(), 32);
        for (i, &key) in keys.iter().enumerate() {
            assert_eq!(table.get(key).map(|e| e.score), Some(i as i32));
        }
    }

    #[test]
    fn test_put_remove_loop_does_not_grow() {
        let mut table = TranspositionTable::with_capacity(8).unwrap();
        table.put(entry(1, 0));
        for i in 0..1000u64 {
            let key = (i << 8) | 2;
            table.put(entry(key, 0));
            table.remove(key);
            assert_eq!(table.len(), 1);
        }
        assert_eq!(table.capacity(), 8);
        assert!(table.get(1).is_some());
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut table = TranspositionTable::with_capacity(8).unwrap();
        for key in 0..30 {
            table.put(entry(key, 0));
        }
        let capacity = table.capacity();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
        assert!(table.get(3).is_none());
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_max_capacity_evicts_instead_of_growing() {
        let mut table = TranspositionTable::with_capacity(8)
            .unwrap()
            .with_max_capacity(8)
            .unwrap();
        for key in 0..100u64 {
            table.put(entry(key, key as i32));
            assert!(table.get(key).is_some());
        }
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.len(), 6);
        assert_eq!(table.evictions(), 94);
        assert_eq!(table.iter().count(), 6);

        table.clear();
        assert_eq!(table.evictions(), 0);
    }

    #[test]
    fn test_bound_settles_window() {
        assert!(Bound::Exact.settles(0, -10, 10));
        assert!(Bound::Lower.settles(10, -10, 10));
        assert!(!Bound::Lower.settles(5, -10, 10));
        assert!(Bound::Upper.settles(-10, -10, 10));
        assert!(!Bound::Upper.settles(-5, -10, 10));
    }

    #[derive(Clone, Debug)]
    enum Op {
        Put(u64, i32),
        Remove(u64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        // Few distinct low bits and high bits to force long collision chains
        let key = (0u64..4, 0u64..16).prop_map(|(hi, lo)| (hi << 40) | lo);
        prop_oneof![
            (key.clone(), any::<i32>()).prop_map(|(k, s)| Op::Put(k, s)),
            key.prop_map(Op::Remove),
        ]
    }

    proptest! {
        /// Property: the table behaves like a HashMap under any put/remove sequence
        #[test]
        fn prop_matches_hashmap_model(ops in prop::collection::vec(op_strategy(), 1..200)) {
            let mut table = TranspositionTable::with_capacity(8).unwrap();
            let mut model: HashMap<u64, i32> = HashMap::new();

            for op in ops {
                match op {
                    Op::Put(key, score) => {
                        table.put(entry(key, score));
                        model.insert(key, score);
                    }
                    Op::Remove(key) => {
                        let removed = table.remove(key).map(|e| e.score);
                        prop_assert_eq!(removed, model.remove(&key));
                    }
                }
                prop_assert_eq!(table.len(), model.len());
            }

            for (key, score) in &model {
                prop_assert_eq!(table.get(*key).map(|e| e.score), Some(*score));
            }
            prop_assert_eq!(table.iter().count(), model.len());
        }
    }
}
