//! Deferred release of owned resources.

use crate::error::Result;
use std::thread;
use tracing::debug;

use super::handle::JobHandle;

/// Release `resource` once every handle in `deps` has completed.
///
/// If nothing is pending the resource is dropped right away and a completed
/// handle is returned. Otherwise a worker thread waits on `deps`, drops the
/// resource and completes the returned handle.
pub fn release_after<T>(resource: T, deps: &[JobHandle], label: &'static str) -> Result<JobHandle>
where
    T: Send + 'static,
{
    let pending = JobHandle::combine(deps.iter().cloned());

    if pending.is_complete() {
        drop(resource);
        debug!(resource = label, "released immediately");
        return Ok(JobHandle::completed());
    }

    let (handle, completer) = JobHandle::new();

    thread::Builder::new()
        .name(format!("chunkmap-release-{label}"))
        .spawn(move || {
            pending.wait();
            drop(resource);
            debug!(resource = label, "released after dependencies");
            completer.complete();
        })?;

    Ok(handle)
}
