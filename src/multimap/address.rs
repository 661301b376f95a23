//! Chunk addressing.
//!
//! Every chunk of every key lives in one flat table. A chunk's table key is
//! the pair (key, chunk index). The pair hashes to a single mixed integer but
//! compares structurally, so two distinct pairs can share a bucket and never
//! a slot.
//!
//! Lookups go through `AddressKey` trait objects built from a borrowed
//! `(&K, usize)` pair, so only inserting a chunk clones the key.

use rustc_hash::FxHasher;
use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

/// Combine a key hash and a chunk index into one address word.
///
/// Shift-and-xor mixing (`h * 33 ^ chunk`). Order-sensitive: swapping the
/// operands gives a different word.
#[inline]
pub fn mix_address(key_hash: u64, chunk: usize) -> u64 {
    ((key_hash << 5).wrapping_add(key_hash)) ^ chunk as u64
}

/// Hash a key the same way for every address derived from it.
#[inline]
pub fn key_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = FxHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Table key of one chunk: the owning key plus the chunk index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkAddress<K> {
    pub key: K,
    pub chunk: usize,
}

impl<K> ChunkAddress<K> {
    pub fn new(key: K, chunk: usize) -> Self {
        Self { key, chunk }
    }
}

impl<K: Hash> ChunkAddress<K> {
    /// The single-word address this pair hashes to.
    pub fn mixed(&self) -> u64 {
        mix_address(key_hash(&self.key), self.chunk)
    }
}

impl<K: Hash> Hash for ChunkAddress<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.mixed());
    }
}

/// A chunk address that may or may not own its key.
///
/// `ChunkAddress<K>` borrows as `dyn AddressKey<K>`, which hashes and compares
/// exactly like the owned address.
pub trait AddressKey<K> {
    fn key(&self) -> &K;
    fn chunk(&self) -> usize;
}

impl<K> AddressKey<K> for ChunkAddress<K> {
    fn key(&self) -> &K {
        &self.key
    }

    fn chunk(&self) -> usize {
        self.chunk
    }
}

impl<K> AddressKey<K> for (&K, usize) {
    fn key(&self) -> &K {
        self.0
    }

    fn chunk(&self) -> usize {
        self.1
    }
}

impl<'a, K: Hash> Hash for dyn AddressKey<K> + 'a {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(mix_address(key_hash(self.key()), self.chunk()));
    }
}

impl<'a, K: Eq> PartialEq for dyn AddressKey<K> + 'a {
    fn eq(&self, other: &Self) -> bool {
        self.chunk() == other.chunk() && self.key() == other.key()
    }
}

impl<'a, K: Eq> Eq for dyn AddressKey<K> + 'a {}

impl<'a, K: 'a> Borrow<dyn AddressKey<K> + 'a> for ChunkAddress<K> {
    fn borrow(&self) -> &(dyn AddressKey<K> + 'a) {
        self
    }
}

/// Position of a value inside one key's chunk run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueLocation {
    pub chunk: usize,
    pub offset: usize,
}

impl ValueLocation {
    pub fn new(chunk: usize, offset: usize) -> Self {
        Self { chunk, offset }
    }

    /// Split a flat index into chunk and offset for chunks of `capacity`.
    pub fn from_flat(flat_index: usize, capacity: usize) -> Self {
        Self {
            chunk: flat_index / capacity,
            offset: flat_index % capacity,
        }
    }

    /// Flat index of this location for chunks of `capacity`.
    pub fn flat_index(&self, capacity: usize) -> usize {
        self.chunk * capacity + self.offset
    }
}
