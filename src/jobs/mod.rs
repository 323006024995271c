// src/jobs/mod.rs

//! Child-process bookkeeping.
//!
//! - [`registry`]: the set of background jobs and their liveness.
//! - [`foreground`]: the pid the execution side is blocked on, if any.
//! - [`reaper`]: turns "some child terminated" notifications into updates of
//!   the two above.

pub mod foreground;
pub mod reaper;
pub mod registry;

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tracing::{info, warn};

use crate::errors::Result;

pub use foreground::ForegroundToken;
pub use reaper::Reclaimed;
pub use registry::{Job, JobRegistry, Liveness, RegistryGuard};

/// Everything the launcher, the reaper and the `exit` built-in share.
#[derive(Debug, Default)]
pub struct JobControl {
    pub registry: JobRegistry,
    pub foreground: ForegroundToken,
}

impl JobControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill every tracked background job and forget all of them.
    ///
    /// Jobs already marked terminated have been reaped, so their pid may
    /// belong to an unrelated process by now; they are dropped without a
    /// signal. Returns the pids that were signalled.
    pub fn terminate_all(&self) -> Result<Vec<Pid>> {
        let jobs = self.registry.lock()?.take_all();
        let mut signalled = Vec::with_capacity(jobs.len());

        for job in jobs.iter().filter(|job| job.is_alive()) {
            match kill(job.pid(), Signal::SIGKILL) {
                Ok(()) | Err(Errno::ESRCH) => signalled.push(job.pid()),
                Err(errno) => {
                    warn!(pid = %job.pid(), error = %errno, "failed to kill background job")
                }
            }
        }

        info!(
            count = signalled.len(),
            dropped = jobs.len(),
            "terminated background jobs"
        );
        Ok(signalled)
    }
}
