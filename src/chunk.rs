//! Fixed-capacity inline chunk.
//!
//! A chunk holds at most `C` values in an inline array with an explicit
//! length. Nothing here ever touches the heap, which is the point: a key that
//! owns a handful of values costs one small record rather than one `Vec`.

use crate::error::{ChunkMapError, Result};

/// Default number of values per chunk.
pub const CHUNK_CAPACITY: usize = 6;

/// An inline list of at most `C` values.
///
/// Slots at or past `len` hold stale data and are never read.
#[derive(Clone, Copy)]
pub struct FixedChunk<V, const C: usize = CHUNK_CAPACITY> {
    items: [V; C],
    len: usize,
}

impl<V: Copy + Default, const C: usize> FixedChunk<V, C> {
    /// Create an empty chunk.
    pub fn new() -> Self {
        Self {
            items: [V::default(); C],
            len: 0,
        }
    }

    /// Create a chunk holding just `value`.
    ///
    /// # Panics
    ///
    /// Panics if `C` is zero.
    pub fn with_value(value: V) -> Self {
        let mut chunk = Self::new();
        chunk.items[0] = value;
        chunk.len = 1;
        chunk
    }

    /// Append a value. Fails if the chunk is already full.
    pub fn push(&mut self, value: V) -> Result<()> {
        if self.len == C {
            return Err(ChunkMapError::CapacityExceeded { capacity: C });
        }
        self.items[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Get the value at `index`.
    pub fn get(&self, index: usize) -> Result<&V> {
        self.check_index(index)?;
        Ok(&self.items[index])
    }

    /// Overwrite the value at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: V) -> Result<V> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.items[index], value))
    }

    /// Remove the value at `index`, shifting later values down by one.
    ///
    /// Returns `true` if the chunk is empty afterwards.
    pub fn remove(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        self.items.copy_within(index + 1..self.len, index);
        self.len -= 1;
        Ok(self.len == 0)
    }

    /// Index of the first value equal to `value`.
    pub fn position(&self, value: &V) -> Option<usize>
    where
        V: PartialEq,
    {
        self.as_slice().iter().position(|v| v == value)
    }

    /// The meaningful prefix of the chunk.
    pub fn as_slice(&self) -> &[V] {
        &self.items[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == C
    }

    pub const fn capacity(&self) -> usize {
        C
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(ChunkMapError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(())
    }
}

impl<V: Copy + Default, const C: usize> Default for FixedChunk<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: std::fmt::Debug, const C: usize> std::fmt::Debug for FixedChunk<V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.items[..self.len]).finish()
    }
}

impl<V: PartialEq, const C: usize> PartialEq for FixedChunk<V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.items[..self.len] == other.items[..other.len]
    }
}

impl<'a, V: Copy + Default, const C: usize> IntoIterator for &'a FixedChunk<V, C> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
