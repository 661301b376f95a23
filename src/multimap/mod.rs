//! Chunked multimap.
//!
//! Each key owns a run of fixed-capacity chunks. All chunks of all keys sit
//! in one table keyed by `ChunkAddress` (key + chunk index), with a second
//! table holding each key's last chunk index.

mod address;
mod map;
mod shared;

pub use address::{key_hash, mix_address, AddressKey, ChunkAddress, ValueLocation};
pub use map::ChunkedMultimap;
pub use shared::SharedMultimap;
