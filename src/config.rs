//! Construction hints for the chunked multimap.

/// Multimap configuration.
///
/// Both fields are capacity hints only; the backing tables grow on demand.
#[derive(Clone, Debug, Default)]
pub struct MultimapConfig {
    /// Expected number of distinct keys.
    pub key_capacity: usize,

    /// Expected number of values across all keys.
    pub value_capacity: usize,
}

impl MultimapConfig {
    /// Number of chunk slots to reserve for chunks of `chunk_capacity` values.
    ///
    /// Every key owns at least one chunk, so the hint never drops below
    /// `key_capacity`.
    pub fn chunk_hint(&self, chunk_capacity: usize) -> usize {
        self.value_capacity
            .div_ceil(chunk_capacity.max(1))
            .max(self.key_capacity)
    }
}
