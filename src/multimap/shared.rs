//! A multimap shared between concurrently scheduled tasks.

use crate::chunk::CHUNK_CAPACITY;
use crate::config::MultimapConfig;
use crate::error::{ChunkMapError, Result};
use crate::jobs::{release_after, JobHandle};
use parking_lot::RwLock;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

use super::map::ChunkedMultimap;

/// A cloneable, lock-protected `ChunkedMultimap`.
///
/// Clones share one map. Disposal releases the map for every clone at once;
/// access afterwards fails with `ChunkMapError::Disposed`.
pub struct SharedMultimap<K, V, const C: usize = CHUNK_CAPACITY> {
    inner: Arc<RwLock<Option<ChunkedMultimap<K, V, C>>>>,

    /// Set once a deferred disposal has been scheduled.
    scheduled: Arc<AtomicBool>,
}

impl<K, V, const C: usize> SharedMultimap<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Copy + Default,
{
    /// Wrap an existing multimap.
    pub fn new(map: ChunkedMultimap<K, V, C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(map))),
            scheduled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create an empty shared multimap from a configuration.
    pub fn with_config(config: MultimapConfig) -> Self {
        Self::new(ChunkedMultimap::with_config(config))
    }

    /// Run `f` with shared access to the map.
    pub fn read<R>(&self, f: impl FnOnce(&ChunkedMultimap<K, V, C>) -> R) -> Result<R> {
        let guard = self.inner.read();
        guard.as_ref().map(f).ok_or(ChunkMapError::Disposed)
    }

    /// Run `f` with exclusive access to the map.
    pub fn write<R>(&self, f: impl FnOnce(&mut ChunkedMultimap<K, V, C>) -> R) -> Result<R> {
        let mut guard = self.inner.write();
        guard.as_mut().map(f).ok_or(ChunkMapError::Disposed)
    }

    /// Shorthand for `write(|map| map.add(key, value))`.
    pub fn add(&self, key: K, value: V) -> Result<bool> {
        self.write(|map| map.add(key, value))
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.read().is_none()
    }

    /// Release the map now.
    ///
    /// Returns `false` if it was already disposed.
    pub fn dispose(&self) -> bool {
        let taken = self.inner.write().take();
        match taken {
            Some(map) => {
                map.dispose();
                true
            }
            None => false,
        }
    }

    /// Release the map once every handle in `deps` has completed.
    ///
    /// The map stays usable until then. Disposing twice, or scheduling a
    /// second release while one is pending, is an error.
    pub fn dispose_after(&self, deps: &[JobHandle]) -> Result<JobHandle>
    where
        K: Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        {
            // Claimed under the write lock so clones cannot both schedule
            let slot = self.inner.write();
            if slot.is_none() || self.scheduled.swap(true, Ordering::AcqRel) {
                return Err(ChunkMapError::Disposed);
            }
        }

        debug!(pending = deps.len(), "scheduling shared multimap disposal");

        // The slot is emptied when the worker drops this guard
        release_after(
            TakeOnDrop {
                inner: Arc::clone(&self.inner),
            },
            deps,
            "shared",
        )
    }
}

impl<K, V, const C: usize> Clone for SharedMultimap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            scheduled: Arc::clone(&self.scheduled),
        }
    }
}

impl<K, V, const C: usize> Default for SharedMultimap<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Copy + Default,
{
    fn default() -> Self {
        Self::new(ChunkedMultimap::default())
    }
}

/// Empties the shared slot when dropped.
struct TakeOnDrop<K, V, const C: usize> {
    inner: Arc<RwLock<Option<ChunkedMultimap<K, V, C>>>>,
}

impl<K, V, const C: usize> Drop for TakeOnDrop<K, V, C> {
    fn drop(&mut self) {
        let taken = self.inner.write().take();
        drop(taken);
    }
}
