//! An ordered map keyed by [`Decimal`], with rank access, a fixed
//! iteration direction, and optional bounded depth.
//!
//! Backed by a [`BTreeMap`], which already gives O(log n) insert,
//! update, and delete, and O(k) top-k reads by walking from either
//! end. `Direction::Desc` is realised by walking the map in reverse;
//! no separate sorted-keys cache is kept, since `BTreeMap` iteration
//! is itself the cache.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::error::OrderBookError;

/// Iteration / rank order of a [`SortedMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smallest key first.
    Asc,
    /// Largest key first.
    Desc,
}

/// An ordered map from [`Decimal`] to `V`, walked in a fixed
/// `direction`, optionally capped at `max_depth` entries.
///
/// - If `eager_truncate` is set, every [`SortedMap::set`] call that
///   pushes the map past `max_depth` immediately evicts the
///   worst-ranked entry, so the map never holds more than `max_depth`
///   entries at rest.
/// - If `eager_truncate` is not set but `max_depth > 0`, the map may
///   transiently hold more than `max_depth` entries, but every read
///   path (`len`, `keys`, `index`, `to_vec`, `to_index_map`, `iter`)
///   reports at most `max_depth` entries in directional order.
#[derive(Debug, Clone)]
pub struct SortedMap<V> {
    direction: Direction,
    max_depth: usize,
    eager_truncate: bool,
    entries: BTreeMap<Decimal, V>,
}

impl<V: Clone> SortedMap<V> {
    /// Creates a new, empty sorted map.
    ///
    /// Returns [`OrderBookError::Value`] if `eager_truncate` is `true`
    /// while `max_depth` is `0` — there would be nothing to truncate
    /// to.
    pub fn new(direction: Direction, max_depth: usize, eager_truncate: bool) -> Result<Self, OrderBookError> {
        if eager_truncate && max_depth == 0 {
            return Err(OrderBookError::value_error(
                "truncate=true requires max_depth > 0",
            ));
        }
        Ok(Self {
            direction,
            max_depth,
            eager_truncate,
            entries: BTreeMap::new(),
        })
    }

    /// The configured iteration direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The configured depth cap, or `0` for unbounded.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether eager (on-write) truncation is enabled.
    pub fn eager_truncate(&self) -> bool {
        self.eager_truncate
    }

    fn effective_len(&self) -> usize {
        if self.max_depth == 0 {
            self.entries.len()
        } else {
            self.entries.len().min(self.max_depth)
        }
    }

    /// Number of keys, capped by `max_depth` when it is set (I4).
    pub fn len(&self) -> usize {
        self.effective_len()
    }

    /// `true` if [`SortedMap::len`] is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the worst-ranked key under the current direction: the
    /// largest key for `Asc`, the smallest for `Desc`.
    fn worst_key(&self) -> Option<Decimal> {
        match self.direction {
            Direction::Asc => self.entries.keys().next_back().copied(),
            Direction::Desc => self.entries.keys().next().copied(),
        }
    }

    /// Inserts or replaces the value at `key`, returning the previous
    /// value if one was present.
    ///
    /// If eager truncation is enabled and the map now holds more than
    /// `max_depth` entries, the single worst-ranked entry is evicted —
    /// if the just-inserted key is itself the worst-ranked, it is the
    /// one evicted, so the map never grows past the cap.
    pub fn set(&mut self, key: Decimal, value: V) -> Option<V> {
        let previous = self.entries.insert(key, value);
        if self.eager_truncate && self.max_depth > 0 && self.entries.len() > self.max_depth {
            if let Some(worst) = self.worst_key() {
                self.entries.remove(&worst);
                log::debug!(
                    "sorted_map evicted worst-ranked key {worst} to respect max_depth={}",
                    self.max_depth
                );
            }
        }
        previous
    }

    /// Returns a reference to the value at `key`.
    pub fn get(&self, key: &Decimal) -> Result<&V, OrderBookError> {
        self.entries
            .get(key)
            .ok_or_else(|| OrderBookError::key_not_found(key.to_string()))
    }

    /// `true` if `key` is present.
    pub fn contains_key(&self, key: &Decimal) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes and returns the value at `key`.
    pub fn remove(&mut self, key: &Decimal) -> Result<V, OrderBookError> {
        self.entries
            .remove(key)
            .ok_or_else(|| OrderBookError::key_not_found(key.to_string()))
    }

    /// Removes every entry, regardless of configuration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keys in directional order, capped at `max_depth` when set.
    pub fn keys(&self) -> Vec<Decimal> {
        self.keys_iter().collect()
    }

    /// An iterator over keys in directional order, capped at
    /// `max_depth` when set. Every call starts a fresh iterator —
    /// there is no shared cursor to go stale between calls.
    pub fn keys_iter(&self) -> Box<dyn Iterator<Item = Decimal> + '_> {
        let take = self.effective_len();
        match self.direction {
            Direction::Asc => Box::new(self.entries.keys().take(take).copied()),
            Direction::Desc => Box::new(self.entries.keys().rev().take(take).copied()),
        }
    }

    /// An iterator over `(key, value)` pairs in directional order,
    /// capped at `max_depth` when set. Every call starts fresh.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (Decimal, &V)> + '_> {
        let take = self.effective_len();
        match self.direction {
            Direction::Asc => Box::new(self.entries.iter().take(take).map(|(k, v)| (*k, v))),
            Direction::Desc => Box::new(self.entries.iter().rev().take(take).map(|(k, v)| (*k, v))),
        }
    }

    /// Positional access in directional order. Negative `index`
    /// counts from the end (`-1` is the last entry).
    pub fn index(&self, index: isize) -> Result<(Decimal, V), OrderBookError> {
        let len = self.effective_len();
        let resolved = if index < 0 {
            index + len as isize
        } else {
            index
        };
        if resolved < 0 || resolved as usize >= len {
            return Err(OrderBookError::IndexOutOfRange { index, len });
        }
        let (key, value) = self
            .iter()
            .nth(resolved as usize)
            .expect("resolved index validated against effective_len");
        Ok((key, value.clone()))
    }

    /// An ordered `Vec` of `(key, value)` pairs, directional,
    /// capped at `max_depth` when set.
    pub fn to_vec(&self) -> Vec<(Decimal, V)> {
        self.iter().map(|(k, v)| (k, v.clone())).collect()
    }

    /// Like [`SortedMap::to_vec`], but maps each `(key, value)` pair
    /// through `f` first. This is the Rust-idiomatic stand-in for the
    /// host-binding `from_type`/`to_type` conversion parameters: the
    /// caller supplies the conversion as an ordinary closure instead
    /// of a runtime type match.
    pub fn to_vec_map<T>(&self, f: impl Fn(&Decimal, &V) -> T) -> Vec<T> {
        self.iter().map(|(k, v)| f(&k, v)).collect()
    }

    /// An [`IndexMap`] preserving directional order, capped at
    /// `max_depth` when set.
    pub fn to_index_map(&self) -> IndexMap<Decimal, V> {
        self.iter().map(|(k, v)| (k, v.clone())).collect()
    }

    /// Like [`SortedMap::to_index_map`], mapping each value through
    /// `f` first.
    pub fn to_index_map_map<T>(&self, f: impl Fn(&Decimal, &V) -> T) -> IndexMap<Decimal, T> {
        self.iter().map(|(k, v)| (k, f(&k, v))).collect()
    }

    /// Replaces the entire contents of the map with `entries`,
    /// inserted one at a time through [`SortedMap::set`] so the usual
    /// truncation rules apply.
    pub fn replace_all(&mut self, entries: impl IntoIterator<Item = (Decimal, V)>) {
        self.entries.clear();
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    /// Imperatively drops every entry beyond `max_depth` in the
    /// current direction. A no-op if `max_depth` is `0` or the map is
    /// already within the cap. Calling this twice in a row is
    /// idempotent: the second call always finds nothing left to drop.
    pub fn truncate(&mut self) {
        if self.max_depth == 0 || self.entries.len() <= self.max_depth {
            return;
        }
        let kept: Vec<Decimal> = self.keys_iter().collect();
        let dropped = self.entries.len() - kept.len();
        self.entries.retain(|key, _| kept.contains(key));
        log::debug!(
            "sorted_map manual truncate dropped {dropped} entries beyond max_depth={}",
            self.max_depth
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn map(direction: Direction) -> SortedMap<&'static str> {
        SortedMap::new(direction, 0, false).unwrap()
    }

    #[test]
    fn rejects_truncate_without_max_depth() {
        assert!(SortedMap::<i32>::new(Direction::Asc, 0, true).is_err());
    }

    #[test]
    fn s1_ascending_and_descending_basics() {
        let mut asc = map(Direction::Asc);
        asc.set(d("3"), "a");
        asc.set(d("2"), "b");
        asc.set(d("1"), "c");
        assert_eq!(asc.keys(), vec![d("1"), d("2"), d("3")]);

        let mut desc = map(Direction::Desc);
        desc.set(d("3"), "a");
        desc.set(d("2"), "b");
        desc.set(d("1"), "c");
        assert_eq!(desc.keys(), vec![d("3"), d("2"), d("1")]);
    }

    #[test]
    fn s2_index_with_negative_ranks() {
        let mut desc = map(Direction::Desc);
        desc.set(d("1"), "a");
        desc.set(d("3"), "b");
        desc.set(d("2"), "c");

        assert_eq!(desc.index(0).unwrap(), (d("3"), "b"));
        assert_eq!(desc.index(1).unwrap(), (d("2"), "c"));
        assert_eq!(desc.index(2).unwrap(), (d("1"), "a"));
        assert_eq!(desc.index(-1).unwrap(), (d("1"), "a"));
        assert!(desc.index(3).is_err());
    }

    #[test]
    fn s3_depth_without_eager_truncation_is_lazy() {
        let mut s = SortedMap::new(Direction::Asc, 10, false).unwrap();
        for i in 0..100 {
            s.set(Decimal::from(i), i);
        }
        assert_eq!(s.keys(), (0..10).map(Decimal::from).collect::<Vec<_>>());

        s.remove(&Decimal::from(5)).unwrap();
        let expected: Vec<Decimal> = [0, 1, 2, 3, 4, 6, 7, 8, 9, 10]
            .into_iter()
            .map(Decimal::from)
            .collect();
        assert_eq!(s.keys(), expected);
    }

    #[test]
    fn s4_depth_with_eager_truncation() {
        let mut s = SortedMap::new(Direction::Asc, 10, true).unwrap();
        for i in 0..100 {
            s.set(Decimal::from(i), i);
        }
        assert_eq!(s.keys(), (0..10).map(Decimal::from).collect::<Vec<_>>());

        s.remove(&Decimal::from(5)).unwrap();
        let expected: Vec<Decimal> = [0, 1, 2, 3, 4, 6, 7, 8, 9]
            .into_iter()
            .map(Decimal::from)
            .collect();
        assert_eq!(s.keys(), expected);

        s.set(d("1.1"), 0);
        s.set(d("1.2"), 0);
        s.set(d("1.3"), 0);
        let expected: Vec<Decimal> = vec![
            Decimal::from(0),
            Decimal::from(1),
            d("1.1"),
            d("1.2"),
            d("1.3"),
            Decimal::from(2),
            Decimal::from(3),
            Decimal::from(4),
            Decimal::from(6),
            Decimal::from(7),
        ];
        assert_eq!(s.keys(), expected);
    }

    #[test]
    fn to_dict_preserves_key_order_of_keys() {
        let mut s = SortedMap::new(Direction::Desc, 0, false).unwrap();
        s.set(d("1"), "a");
        s.set(d("3"), "b");
        s.set(d("2"), "c");

        let as_keys = s.keys();
        let as_vec_keys: Vec<Decimal> = s.to_vec().into_iter().map(|(k, _)| k).collect();
        let as_index_keys: Vec<Decimal> = s.to_index_map().into_keys().collect();
        assert_eq!(as_keys, as_vec_keys);
        assert_eq!(as_keys, as_index_keys);
    }

    #[test]
    fn truncate_is_idempotent() {
        let mut s = SortedMap::new(Direction::Asc, 3, false).unwrap();
        for i in 0..10 {
            s.set(Decimal::from(i), i);
        }
        s.truncate();
        let after_first = s.keys();
        s.truncate();
        assert_eq!(s.keys(), after_first);
        assert_eq!(after_first, vec![Decimal::from(0), Decimal::from(1), Decimal::from(2)]);
    }

    #[test]
    fn truncate_called_manually_with_truncate_off_still_trims_once() {
        let mut s = SortedMap::new(Direction::Asc, 3, false).unwrap();
        for i in 0..10 {
            s.set(Decimal::from(i), i);
        }
        assert_eq!(s.entries.len(), 10);
        s.truncate();
        assert_eq!(s.entries.len(), 3);
    }

    #[test]
    fn round_trip_through_to_vec_preserves_keys() {
        let mut s = SortedMap::new(Direction::Desc, 0, false).unwrap();
        s.set(d("1"), "a");
        s.set(d("3"), "b");
        s.set(d("2"), "c");

        let mut rebuilt = SortedMap::new(s.direction(), s.max_depth(), s.eager_truncate()).unwrap();
        rebuilt.replace_all(s.to_vec());
        assert_eq!(rebuilt.keys(), s.keys());
    }

    #[test]
    fn iteration_restarts_on_each_call() {
        let mut s = map(Direction::Desc);
        s.set(d("1"), "a");
        s.set(d("3"), "b");
        s.set(d("2"), "c");

        let first_pass: Vec<Decimal> = s.keys_iter().take(1).collect();
        let second_pass: Vec<Decimal> = s.keys_iter().collect();
        assert_eq!(first_pass, vec![d("3")]);
        assert_eq!(second_pass, vec![d("3"), d("2"), d("1")]);
    }

    #[test]
    fn get_and_remove_report_missing_keys() {
        let s = map(Direction::Asc);
        assert!(s.get(&d("1")).is_err());
        let mut s = map(Direction::Asc);
        assert!(s.remove(&d("1")).is_err());
    }
}
