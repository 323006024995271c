// src/jobs/foreground.rs

use std::sync::atomic::{AtomicI32, Ordering};

use nix::unistd::Pid;

/// No child can have pid 0, so it doubles as "nothing in the foreground".
const NONE: i32 = 0;

/// Pid of the child the execution side is currently waiting for.
///
/// Both the explicit foreground wait and the reaper may observe that child's
/// termination. [`ForegroundToken::reclaim`] is a compare-and-swap, so
/// exactly one of them gets credit for clearing the token.
#[derive(Debug)]
pub struct ForegroundToken {
    pid: AtomicI32,
}

impl ForegroundToken {
    pub const fn new() -> Self {
        Self {
            pid: AtomicI32::new(NONE),
        }
    }

    pub fn set(&self, pid: Pid) {
        self.pid.store(pid.as_raw(), Ordering::SeqCst);
    }

    pub fn current(&self) -> Option<Pid> {
        match self.pid.load(Ordering::SeqCst) {
            NONE => None,
            raw => Some(Pid::from_raw(raw)),
        }
    }

    /// Clear the token if it still holds `pid`. Returns whether this call
    /// did the clearing.
    pub fn reclaim(&self, pid: Pid) -> bool {
        self.pid
            .compare_exchange(pid.as_raw(), NONE, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

impl Default for ForegroundToken {
    fn default() -> Self {
        Self::new()
    }
}
