// src/jobs/registry.rs

use std::sync::{Mutex, MutexGuard};

use nix::unistd::Pid;
use tracing::{debug, trace};

use crate::errors::Result;

/// Whether the OS has reported a background child's termination yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Alive,
    /// Reaped, but the `Finished` line has not been printed.
    Terminated,
}

/// Shell-side record of one background child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pid: Pid,
    liveness: Liveness,
}

impl Job {
    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness
    }

    pub fn is_alive(&self) -> bool {
        self.liveness == Liveness::Alive
    }
}

/// Unordered set of background jobs.
///
/// All access goes through [`JobRegistry::lock`]. The launcher keeps the
/// guard while it spawns and records a child, and the reaper keeps it while
/// it calls `waitpid`, which is what stops a fast-exiting child from being
/// reaped before anyone knows about it.
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: Mutex<Vec<Job>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> Result<RegistryGuard<'_>> {
        Ok(RegistryGuard {
            jobs: self.jobs.lock()?,
        })
    }
}

/// Exclusive view of the registry.
pub struct RegistryGuard<'a> {
    jobs: MutexGuard<'a, Vec<Job>>,
}

impl RegistryGuard<'_> {
    pub fn insert(&mut self, pid: Pid) {
        debug!(%pid, "tracking background job");
        self.jobs.push(Job {
            pid,
            liveness: Liveness::Alive,
        });
    }

    /// Flip a job to [`Liveness::Terminated`]. Returns `false` if the pid is
    /// not tracked.
    pub fn mark_terminated(&mut self, pid: Pid) -> bool {
        match self.jobs.iter_mut().find(|job| job.pid == pid) {
            Some(job) => {
                job.liveness = Liveness::Terminated;
                true
            }
            None => false,
        }
    }

    /// Pids of terminated jobs not reported yet.
    pub fn finished(&self) -> Vec<Pid> {
        self.jobs
            .iter()
            .filter(|job| !job.is_alive())
            .map(Job::pid)
            .collect()
    }

    /// Remove every terminated job and return their pids, in no particular
    /// order.
    pub fn drain_finished(&mut self) -> Vec<Pid> {
        let mut finished = Vec::new();
        let mut i = 0;
        while i < self.jobs.len() {
            if self.jobs[i].is_alive() {
                i += 1;
            } else {
                finished.push(self.jobs.swap_remove(i).pid);
            }
        }
        if !finished.is_empty() {
            trace!(?finished, "drained finished jobs");
        }
        finished
    }

    /// Empty the registry, handing back everything it held.
    pub fn take_all(&mut self) -> Vec<Job> {
        std::mem::take(&mut *self.jobs)
    }

    pub fn get(&self, pid: Pid) -> Option<&Job> {
        self.jobs.iter().find(|job| job.pid == pid)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
