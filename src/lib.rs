//! # chunkmap
//!
//! A key-to-multivalue map for workloads where each key owns only a handful
//! of values and a heap allocation per key would be too expensive.
//!
//! ## Core Concepts
//!
//! - **Chunks**: Inline, allocation-free lists of at most `C` values (6 by default)
//! - **Multimap**: Each key maps to a run of chunks; all but the last are full
//! - **Flat index**: A key's values are addressed as `chunk * C + offset`
//! - **Disposal**: Release can be deferred until in-flight jobs complete
//!
//! ## Example
//!
//! ```ignore
//! use chunkmap::{ChunkedMultimap, JobHandle};
//!
//! let mut map = ChunkedMultimap::new();
//! for v in 1..=7 {
//!     map.add("a", v);
//! }
//! assert_eq!(map.chunk_count(&"a")?, 2);
//!
//! // Removing from a full chunk pulls the last value into the hole
//! map.remove(&"a", &3);
//! assert_eq!(map.chunk(&"a", 0)?.as_slice(), &[1, 2, 7, 4, 5, 6]);
//!
//! // Release once a reader job is done
//! let (reader, done) = JobHandle::new();
//! let released = map.dispose_after(&[reader])?;
//! done.complete();
//! released.wait();
//! ```

pub mod chunk;
pub mod config;
pub mod error;
pub mod jobs;
pub mod multimap;

// Re-exports
pub use chunk::{FixedChunk, CHUNK_CAPACITY};
pub use config::MultimapConfig;
pub use error::{ChunkMapError, Result};
pub use jobs::{JobCompleter, JobHandle};
pub use multimap::{AddressKey, ChunkAddress, ChunkedMultimap, SharedMultimap, ValueLocation};
