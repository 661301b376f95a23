//! Job handles and deferred disposal.
//!
//! The multimap does not schedule work itself. Code that runs jobs against
//! a map hands back `JobHandle`s, and disposal can be gated on them:
//!
//! ```ignore
//! let (reader, done) = JobHandle::new();
//! // ... give `done` to the job that reads the map ...
//! let released = map.dispose_after(&[reader])?;
//! released.wait();
//! ```

mod disposal;
mod handle;

pub use disposal::release_after;
pub use handle::{JobCompleter, JobHandle};
