//! Completion handles for externally scheduled work.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::convert::Infallible;
use std::fmt;
use std::time::{Duration, Instant};

/// A cloneable token that becomes complete when its job finishes.
///
/// Completion is signalled by the job's `JobCompleter` going away: nothing is
/// ever sent on the channel, the sender is just dropped, which every cloned
/// receiver observes as a disconnect.
#[derive(Clone)]
pub struct JobHandle {
    signals: Vec<Receiver<Infallible>>,
}

/// The job side of a `JobHandle`. Completing or dropping it completes the handle.
pub struct JobCompleter {
    _signal: Sender<Infallible>,
}

impl JobCompleter {
    /// Mark the job as finished.
    pub fn complete(self) {}
}

impl JobHandle {
    /// Create a pending handle and the completer that finishes it.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (JobHandle, JobCompleter) {
        let (sender, receiver) = bounded(0);
        (
            JobHandle {
                signals: vec![receiver],
            },
            JobCompleter { _signal: sender },
        )
    }

    /// A handle with nothing to wait for.
    pub fn completed() -> Self {
        Self {
            signals: Vec::new(),
        }
    }

    /// A handle that completes once every handle in `handles` has completed.
    pub fn combine<I>(handles: I) -> Self
    where
        I: IntoIterator<Item = JobHandle>,
    {
        let mut signals = Vec::new();
        for handle in handles {
            signals.extend(handle.signals);
        }
        signals.retain(|s| !is_signalled(s));
        Self { signals }
    }

    /// Check completion without blocking.
    pub fn is_complete(&self) -> bool {
        self.signals.iter().all(is_signalled)
    }

    /// Block until the job has completed.
    pub fn wait(&self) {
        for signal in &self.signals {
            // Err(RecvError) is the completion signal
            let _ = signal.recv();
        }
    }

    /// Block for at most `timeout`. Returns whether the job completed.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        for signal in &self.signals {
            if let Err(RecvTimeoutError::Timeout) = signal.recv_deadline(deadline) {
                return false;
            }
        }
        true
    }
}

impl Default for JobHandle {
    fn default() -> Self {
        Self::completed()
    }
}

impl fmt::Debug for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobHandle")
            .field("complete", &self.is_complete())
            .finish()
    }
}

fn is_signalled(signal: &Receiver<Infallible>) -> bool {
    matches!(signal.try_recv(), Err(TryRecvError::Disconnected))
}
