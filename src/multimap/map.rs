//! The chunked multimap.

use crate::chunk::{FixedChunk, CHUNK_CAPACITY};
use crate::config::MultimapConfig;
use crate::error::{ChunkMapError, Result};
use crate::jobs::{release_after, JobHandle};
use rustc_hash::FxBuildHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

use super::address::{AddressKey, ChunkAddress, ValueLocation};

/// Maps each key to an ordered run of values stored in fixed-capacity chunks.
///
/// Chunk `i` of a key holds flat indices `i*C..(i+1)*C`. Every chunk but the
/// last is kept exactly full so a flat index splits into (chunk, offset) with
/// a division and nothing else.
///
/// Removing a value from a non-last chunk fills the hole with the key's very
/// last value. Removal stays O(C) regardless of how many values the key has,
/// at the price of value order across chunks.
#[derive(Clone)]
pub struct ChunkedMultimap<K, V, const C: usize = CHUNK_CAPACITY> {
    /// All chunks of all keys.
    chunks: HashMap<ChunkAddress<K>, FixedChunk<V, C>, FxBuildHasher>,

    /// Key -> index of its last chunk.
    last_chunks: HashMap<K, usize, FxBuildHasher>,
}

impl<K, V> ChunkedMultimap<K, V>
where
    K: Eq + Hash + Clone,
    V: Copy + Default,
{
    /// Create an empty multimap with the default chunk capacity.
    pub fn new() -> Self {
        Self::with_config(MultimapConfig::default())
    }

    /// Create a multimap pre-sized for `key_capacity` keys holding
    /// `value_capacity` values in total.
    pub fn with_capacity(key_capacity: usize, value_capacity: usize) -> Self {
        Self::with_config(MultimapConfig {
            key_capacity,
            value_capacity,
        })
    }
}

impl<K, V, const C: usize> ChunkedMultimap<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Copy + Default,
{
    const NONZERO_CAPACITY: () = assert!(C > 0, "chunk capacity must be non-zero");

    /// Create a multimap from a configuration. Works for any chunk capacity.
    pub fn with_config(config: MultimapConfig) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO_CAPACITY;

        Self {
            chunks: HashMap::with_capacity_and_hasher(config.chunk_hint(C), FxBuildHasher),
            last_chunks: HashMap::with_capacity_and_hasher(config.key_capacity, FxBuildHasher),
        }
    }

    // --- Getters ---

    /// Values per chunk.
    pub const fn chunk_capacity(&self) -> usize {
        C
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.last_chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_chunks.is_empty()
    }

    /// Number of values across all keys.
    pub fn total_value_count(&self) -> usize {
        self.chunks.values().map(FixedChunk::len).sum()
    }

    /// Number of values stored under `key`.
    pub fn value_count(&self, key: &K) -> Result<usize> {
        let last = self.last_index(key)?;
        Ok(last * C + self.chunk_at(key, last)?.len())
    }

    /// Number of chunks owned by `key`.
    pub fn chunk_count(&self, key: &K) -> Result<usize> {
        Ok(self.last_index(key)? + 1)
    }

    /// Chunk `chunk` of `key`.
    pub fn chunk(&self, key: &K, chunk: usize) -> Result<&FixedChunk<V, C>> {
        let last = self.last_index(key)?;
        if chunk > last {
            return Err(ChunkMapError::IndexOutOfBounds {
                index: chunk,
                len: last + 1,
            });
        }
        self.chunk_at(key, chunk)
    }

    /// Value at `flat_index` in `key`'s run.
    pub fn get_value(&self, key: &K, flat_index: usize) -> Result<&V> {
        let loc = self.locate(key, flat_index)?;
        self.chunk_at(key, loc.chunk)?.get(loc.offset)
    }

    /// Iterate `key`'s values in flat-index order. Empty if the key is absent.
    pub fn values<'a>(&'a self, key: &'a K) -> impl Iterator<Item = &'a V> + 'a {
        let chunk_count = self.last_chunks.get(key).map_or(0, |last| last + 1);
        (0..chunk_count)
            .filter_map(move |chunk| self.chunks.get(&(key, chunk) as &dyn AddressKey<K>))
            .flat_map(|chunk| chunk.iter())
    }

    /// Iterate the keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.last_chunks.keys()
    }

    // --- Lookups ---

    pub fn contains_key(&self, key: &K) -> bool {
        self.last_chunks.contains_key(key)
    }

    /// Location of the first occurrence of `value` under `key`.
    ///
    /// Chunks are scanned in index order and each chunk from offset 0, so
    /// with duplicates the lowest flat index wins.
    pub fn contains(&self, key: &K, value: &V) -> Option<ValueLocation>
    where
        V: PartialEq,
    {
        let last = *self.last_chunks.get(key)?;
        (0..=last).find_map(|chunk| {
            self.chunks
                .get(&(key, chunk) as &dyn AddressKey<K>)?
                .position(value)
                .map(|offset| ValueLocation::new(chunk, offset))
        })
    }

    // --- Modifiers ---

    /// Register `key` with an empty first chunk.
    ///
    /// Returns whether the key was new.
    pub fn add_key(&mut self, key: K) -> bool {
        if self.last_chunks.contains_key(&key) {
            return false;
        }

        self.chunks
            .insert(ChunkAddress::new(key.clone(), 0), FixedChunk::new());
        self.last_chunks.insert(key, 0);

        debug!(keys = self.last_chunks.len(), "registered key");
        true
    }

    /// Remove `key` and every chunk it owns.
    ///
    /// Returns whether the key existed.
    pub fn remove_key(&mut self, key: &K) -> bool {
        let Some(last) = self.last_chunks.remove(key) else {
            return false;
        };

        for chunk in 0..=last {
            self.chunks.remove(&(key, chunk) as &dyn AddressKey<K>);
        }

        debug!(chunks = last + 1, "removed key");
        true
    }

    /// Append `value` to `key`'s run, creating the key if needed.
    ///
    /// Returns `true` if a new chunk had to be opened.
    pub fn add(&mut self, key: K, value: V) -> bool {
        let last = match self.last_chunks.get(&key) {
            Some(&last) => last,
            None => {
                self.add_key(key.clone());
                0
            }
        };

        let tail = self
            .chunks
            .get_mut(&(&key, last) as &dyn AddressKey<K>)
            .expect("last chunk of a registered key should always exist");
        if !tail.is_full() {
            tail.push(value).expect("tail chunk has room");
            return false;
        }

        // Tail is full: open the next chunk
        let next = last + 1;
        self.chunks
            .insert(ChunkAddress::new(key.clone(), next), FixedChunk::with_value(value));
        self.last_chunks.insert(key, next);

        trace!(chunks = next + 1, "opened chunk");
        true
    }

    /// Overwrite the value at `flat_index`, returning the previous one.
    pub fn set_value(&mut self, key: &K, flat_index: usize, value: V) -> Result<V> {
        let loc = self.locate(key, flat_index)?;
        self.chunk_at_mut(key, loc.chunk)?.set(loc.offset, value)
    }

    /// Remove the first occurrence of `value` under `key`.
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        match self.contains(key, value) {
            Some(loc) => self.remove_at_location(key, loc).is_ok(),
            None => false,
        }
    }

    /// Remove the value at `flat_index`, returning it.
    ///
    /// See [`remove_at_location`](Self::remove_at_location) for ordering.
    pub fn remove_at(&mut self, key: &K, flat_index: usize) -> Result<V> {
        let loc = self.locate(key, flat_index)?;
        self.remove_at_location(key, loc)
    }

    /// Remove the value at `loc`, returning it.
    ///
    /// Inside the last chunk the removal shifts later values down and keeps
    /// order. Anywhere else the key's last value is moved into the hole, so
    /// order is not preserved.
    pub fn remove_at_location(&mut self, key: &K, loc: ValueLocation) -> Result<V> {
        let last = self.last_index(key)?;
        if loc.chunk > last {
            return Err(ChunkMapError::IndexOutOfBounds {
                index: loc.chunk,
                len: last + 1,
            });
        }

        if loc.chunk == last {
            let tail = self.chunk_at_mut(key, last)?;
            let removed = *tail.get(loc.offset)?;
            if tail.len() == 1 {
                self.shrink_key(key, last);
            } else {
                tail.remove(loc.offset)?;
            }
            return Ok(removed);
        }

        // Validate the target before touching the tail
        self.chunk_at(key, loc.chunk)?.get(loc.offset)?;

        let tail = self.chunk_at_mut(key, last)?;
        let tail_len = tail.len();
        let moved = *tail
            .as_slice()
            .last()
            .ok_or(ChunkMapError::Inconsistent { chunk: last })?;
        if tail_len == 1 {
            self.shrink_key(key, last);
        } else {
            tail.remove(tail_len - 1)?;
        }

        self.chunk_at_mut(key, loc.chunk)?.set(loc.offset, moved)
    }

    /// Remove every key and chunk.
    pub fn clear(&mut self) {
        let keys = self.last_chunks.len();
        self.chunks.clear();
        self.last_chunks.clear();
        debug!(keys, "cleared multimap");
    }

    // --- Disposal ---

    /// Release both tables now.
    pub fn dispose(self) {
        debug!(
            keys = self.last_chunks.len(),
            chunks = self.chunks.len(),
            "disposing multimap"
        );
        drop(self);
    }

    /// Release both tables once every handle in `deps` has completed.
    ///
    /// The returned handle completes when both tables are gone.
    pub fn dispose_after(self, deps: &[JobHandle]) -> Result<JobHandle>
    where
        K: Send + 'static,
        V: Send + 'static,
    {
        debug!(
            keys = self.last_chunks.len(),
            pending = deps.len(),
            "scheduling multimap disposal"
        );

        let Self {
            chunks,
            last_chunks,
        } = self;
        let chunks_released = release_after(chunks, deps, "chunks")?;
        let keys_released = release_after(last_chunks, deps, "keys")?;

        Ok(JobHandle::combine([chunks_released, keys_released]))
    }

    // --- Helpers ---

    fn last_index(&self, key: &K) -> Result<usize> {
        self.last_chunks
            .get(key)
            .copied()
            .ok_or(ChunkMapError::KeyNotFound)
    }

    /// Check `flat_index` against the key's value count and split it.
    fn locate(&self, key: &K, flat_index: usize) -> Result<ValueLocation> {
        let count = self.value_count(key)?;
        if flat_index >= count {
            return Err(ChunkMapError::IndexOutOfBounds {
                index: flat_index,
                len: count,
            });
        }
        Ok(ValueLocation::from_flat(flat_index, C))
    }

    fn chunk_at(&self, key: &K, chunk: usize) -> Result<&FixedChunk<V, C>> {
        self.chunks
            .get(&(key, chunk) as &dyn AddressKey<K>)
            .ok_or(ChunkMapError::Inconsistent { chunk })
    }

    fn chunk_at_mut(&mut self, key: &K, chunk: usize) -> Result<&mut FixedChunk<V, C>> {
        self.chunks
            .get_mut(&(key, chunk) as &dyn AddressKey<K>)
            .ok_or(ChunkMapError::Inconsistent { chunk })
    }

    /// Drop the key's last chunk. The previous chunk, which is full, becomes
    /// the new last chunk; dropping chunk 0 removes the key.
    fn shrink_key(&mut self, key: &K, last: usize) {
        self.chunks.remove(&(key, last) as &dyn AddressKey<K>);

        if last == 0 {
            self.last_chunks.remove(key);
            debug!(keys = self.last_chunks.len(), "removed key after last value");
            return;
        }

        if let Some(index) = self.last_chunks.get_mut(key) {
            *index = last - 1;
        }
        trace!(chunks = last, "dropped chunk");
    }
}

impl<K, V, const C: usize> Default for ChunkedMultimap<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Copy + Default,
{
    fn default() -> Self {
        Self::with_config(MultimapConfig::default())
    }
}

impl<K, V, const C: usize> FromIterator<(K, V)> for ChunkedMultimap<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Copy + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, const C: usize> Extend<(K, V)> for ChunkedMultimap<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Copy + Default,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K, V, const C: usize> fmt::Debug for ChunkedMultimap<K, V, C>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Copy + Default + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.keys()
                    .map(|key| (key, self.values(key).collect::<Vec<_>>())),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::Hasher;

    fn filled(key: &'static str, values: &[i32]) -> ChunkedMultimap<&'static str, i32> {
        let mut map = ChunkedMultimap::new();
        for &v in values {
            map.add(key, v);
        }
        map
    }

    fn chunk_values(map: &ChunkedMultimap<&'static str, i32>, key: &'static str, chunk: usize) -> Vec<i32> {
        map.chunk(&key, chunk).unwrap().as_slice().to_vec()
    }

    #[test]
    fn test_add_fills_before_growing() {
        let mut map = ChunkedMultimap::new();
        for i in 0..6 {
            assert!(!map.add("a", i));
        }
        assert_eq!(map.chunk_count(&"a").unwrap(), 1);
        assert_eq!(map.value_count(&"a").unwrap(), 6);

        assert!(map.add("a", 6));
        assert_eq!(map.chunk_count(&"a").unwrap(), 2);
        assert_eq!(map.value_count(&"a").unwrap(), 7);
    }

    #[test]
    fn test_get_value_decomposes_flat_index() {
        let map = filled("a", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(map.chunk_count(&"a").unwrap(), 3);
        for i in 0..13 {
            assert_eq!(*map.get_value(&"a", i).unwrap(), i as i32);
        }
        assert!(matches!(
            map.get_value(&"a", 13),
            Err(ChunkMapError::IndexOutOfBounds { index: 13, len: 13 })
        ));
    }

    #[test]
    fn test_counts_on_missing_key() {
        let map: ChunkedMultimap<&str, i32> = ChunkedMultimap::new();
        assert!(matches!(map.value_count(&"x"), Err(ChunkMapError::KeyNotFound)));
        assert!(matches!(map.chunk_count(&"x"), Err(ChunkMapError::KeyNotFound)));
        assert!(matches!(map.get_value(&"x", 0), Err(ChunkMapError::KeyNotFound)));
    }

    #[test]
    fn test_add_key_registers_empty_key() {
        let mut map: ChunkedMultimap<&str, i32> = ChunkedMultimap::new();
        assert!(map.add_key("a"));
        assert!(!map.add_key("a"));
        assert!(map.contains_key(&"a"));
        assert_eq!(map.key_count(), 1);
        assert_eq!(map.value_count(&"a").unwrap(), 0);
        assert_eq!(map.chunk_count(&"a").unwrap(), 1);

        // The first add lands in the registered chunk
        assert!(!map.add("a", 5));
        assert_eq!(map.chunk_count(&"a").unwrap(), 1);
        assert_eq!(*map.get_value(&"a", 0).unwrap(), 5);
    }

    #[test]
    fn test_remove_key_drops_all_chunks() {
        let mut map = filled("a", &[1, 2, 3, 4, 5, 6, 7, 8]);
        map.add("b", 1);

        assert!(map.remove_key(&"a"));
        assert!(!map.remove_key(&"a"));
        assert!(!map.contains_key(&"a"));
        assert_eq!(map.key_count(), 1);
        assert_eq!(map.chunks.len(), 1);
    }

    #[test]
    fn test_contains_reports_first_occurrence() {
        let map = filled("a", &[1, 2, 3, 4, 5, 6, 3, 7]);
        assert_eq!(map.contains(&"a", &3), Some(ValueLocation::new(0, 2)));
        assert_eq!(map.contains(&"a", &7), Some(ValueLocation::new(1, 1)));
        assert_eq!(map.contains(&"a", &9), None);
        assert_eq!(map.contains(&"b", &1), None);
    }

    #[test]
    fn test_remove_from_last_chunk_keeps_order() {
        let mut map = filled("a", &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(map.remove_at(&"a", 7).unwrap(), 8);
        assert_eq!(chunk_values(&map, "a", 0), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(chunk_values(&map, "a", 1), vec![7, 9]);
    }

    #[test]
    fn test_remove_from_inner_chunk_swaps_last_value() {
        let mut map = filled("a", &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(map.remove_at(&"a", 1).unwrap(), 2);
        assert_eq!(chunk_values(&map, "a", 0), vec![1, 8, 3, 4, 5, 6]);
        assert_eq!(chunk_values(&map, "a", 1), vec![7]);
        assert_eq!(map.value_count(&"a").unwrap(), 7);
    }

    #[test]
    fn test_worked_scenario() {
        let mut map = filled("A", &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(chunk_values(&map, "A", 0), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(chunk_values(&map, "A", 1), vec![7]);
        assert_eq!(map.value_count(&"A").unwrap(), 7);
        assert_eq!(map.chunk_count(&"A").unwrap(), 2);

        assert!(map.remove(&"A", &3));

        assert_eq!(map.chunk_count(&"A").unwrap(), 1);
        assert_eq!(map.value_count(&"A").unwrap(), 6);
        assert_eq!(chunk_values(&map, "A", 0), vec![1, 2, 7, 4, 5, 6]);
        assert!(map.chunk(&"A", 1).is_err());
    }

    #[test]
    fn test_removing_last_value_removes_key() {
        let mut map = filled("a", &[1]);
        map.add("b", 2);
        assert_eq!(map.key_count(), 2);

        assert!(map.remove(&"a", &1));
        assert!(!map.contains_key(&"a"));
        assert_eq!(map.key_count(), 1);
        assert!(!map.remove(&"a", &1));
    }

    #[test]
    fn test_remove_at_out_of_bounds() {
        let mut map = filled("a", &[1, 2, 3]);
        assert!(matches!(
            map.remove_at(&"a", 3),
            Err(ChunkMapError::IndexOutOfBounds { index: 3, len: 3 })
        ));
        assert!(matches!(
            map.remove_at_location(&"a", ValueLocation::new(1, 0)),
            Err(ChunkMapError::IndexOutOfBounds { index: 1, len: 1 })
        ));
        assert!(matches!(
            map.remove_at(&"b", 0),
            Err(ChunkMapError::KeyNotFound)
        ));
        assert_eq!(map.value_count(&"a").unwrap(), 3);
    }

    #[test]
    fn test_remove_at_on_registered_empty_key() {
        let mut map: ChunkedMultimap<&str, i32> = ChunkedMultimap::new();
        map.add_key("a");
        assert!(map.remove_at(&"a", 0).is_err());
        assert!(map.contains_key(&"a"));
    }

    #[test]
    fn test_bad_inner_offset_leaves_tail_untouched() {
        let mut map = filled("a", &[1, 2, 3, 4, 5, 6, 7]);
        map.remove_at_location(&"a", ValueLocation::new(0, 5)).unwrap();
        // Chunk 0 is full again, chunk 1 gone
        assert!(map
            .remove_at_location(&"a", ValueLocation::new(0, 6))
            .is_err());
        assert_eq!(map.value_count(&"a").unwrap(), 6);
    }

    #[test]
    fn test_set_value() {
        let mut map = filled("a", &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(map.set_value(&"a", 6, 70).unwrap(), 7);
        assert_eq!(*map.get_value(&"a", 6).unwrap(), 70);
        assert!(map.set_value(&"a", 7, 0).is_err());
    }

    #[test]
    fn test_values_iterates_flat_order() {
        let map = filled("a", &[1, 2, 3, 4, 5, 6, 7, 8]);
        let values: Vec<i32> = map.values(&"a").copied().collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(map.values(&"missing").count(), 0);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut map = ChunkedMultimap::new();
        for i in 0..20 {
            map.add(i % 3, i);
        }
        assert_eq!(map.key_count(), 3);
        assert_eq!(map.total_value_count(), 20);
        for key in 0..3 {
            assert!(map.values(&key).all(|v| v % 3 == key));
        }
    }

    /// A key whose hash is the same for every value.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Colliding(u32);

    impl Hash for Colliding {
        fn hash<H: Hasher>(&self, state: &mut H) {
            state.write_u32(0);
        }
    }

    #[test]
    fn test_colliding_keys_do_not_share_chunks() {
        let mut map = ChunkedMultimap::new();
        for i in 0..10 {
            map.add(Colliding(1), i);
            map.add(Colliding(2), 100 + i);
        }

        let first: Vec<i32> = map.values(&Colliding(1)).copied().collect();
        let second: Vec<i32> = map.values(&Colliding(2)).copied().collect();
        assert_eq!(first, (0..10).collect::<Vec<_>>());
        assert_eq!(second, (100..110).collect::<Vec<_>>());
    }

    #[test]
    fn test_custom_chunk_capacity() {
        let mut map: ChunkedMultimap<u8, u8, 2> = ChunkedMultimap::default();
        assert_eq!(map.chunk_capacity(), 2);
        for i in 0..5 {
            map.add(0, i);
        }
        assert_eq!(map.chunk_count(&0).unwrap(), 3);
        assert_eq!(map.remove_at(&0, 0).unwrap(), 0);
        assert_eq!(map.chunk_count(&0).unwrap(), 2);
        assert_eq!(*map.get_value(&0, 0).unwrap(), 4);
    }

    #[test]
    fn test_add_refills_tail_before_opening_chunk() {
        let mut map = filled("a", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        assert_eq!(map.remove_at(&"a", 11).unwrap(), 11);

        assert!(!map.add("a", 20));
        assert_eq!(map.chunk_count(&"a").unwrap(), 2);
        assert_eq!(chunk_values(&map, "a", 1), vec![6, 7, 8, 9, 10, 20]);

        assert!(map.add("a", 21));
        assert_eq!(chunk_values(&map, "a", 0), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(chunk_values(&map, "a", 2), vec![21]);
    }

    #[test]
    #[should_panic(expected = "last chunk of a registered key")]
    fn test_add_does_not_recreate_missing_tail() {
        let mut map = filled("a", &[1, 2]);
        map.chunks.remove(&(&"a", 0usize) as &dyn AddressKey<&str>);
        map.add("a", 3);
    }

    #[test]
    fn test_heap_keys_lookup_by_reference() {
        let mut map: ChunkedMultimap<String, u32> = ChunkedMultimap::new();
        for i in 0..20 {
            map.add(format!("cell-{}", i % 2), i);
        }

        let key = String::from("cell-1");
        assert_eq!(map.value_count(&key).unwrap(), 10);
        assert_eq!(*map.get_value(&key, 7).unwrap(), 15);
        assert_eq!(map.contains(&key, &19), Some(ValueLocation::new(1, 3)));
        assert!(map.remove(&key, &1));
        assert!(map.remove_key(&key));
        assert_eq!(map.key_count(), 1);
    }

    #[test]
    fn test_with_capacity_reserves() {
        let map: ChunkedMultimap<u32, u32> = ChunkedMultimap::with_capacity(10, 120);
        assert!(map.last_chunks.capacity() >= 10);
        assert!(map.chunks.capacity() >= 20);
        assert!(map.is_empty());
    }

    #[test]
    fn test_clear_and_from_iter() {
        let mut map: ChunkedMultimap<u32, u32> = [(1, 1), (1, 2), (2, 3)].into_iter().collect();
        assert_eq!(map.key_count(), 2);
        assert_eq!(map.value_count(&1).unwrap(), 2);

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.total_value_count(), 0);
    }

    #[test]
    fn test_debug_lists_values() {
        let map = filled("a", &[1, 2]);
        assert_eq!(format!("{:?}", map), r#"{"a": [1, 2]}"#);
    }
}
