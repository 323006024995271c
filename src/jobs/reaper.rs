// src/jobs/reaper.rs

//! Termination reaper.
//!
//! Runs whenever a `SIGCHLD` notification arrives and collects *every*
//! child that has terminated since the last run: several children can exit
//! between two notifications, and notifications coalesce.

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use tracing::{debug, trace};

use crate::errors::{Result, ShellError};
use crate::jobs::{JobControl, RegistryGuard};

/// Who a reaped pid belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reclaimed {
    /// The awaited foreground child; the token was cleared.
    Foreground,
    /// A background job, now marked terminated.
    Background,
    /// Not tracked anywhere, e.g. a job already dropped by `exit`.
    Untracked,
}

impl JobControl {
    /// Book-keeping for one terminated child. The caller must hold the
    /// registry guard across both the `waitpid` that produced `pid` and this
    /// call.
    pub fn record_termination(&self, jobs: &mut RegistryGuard<'_>, pid: Pid) -> Reclaimed {
        if self.foreground.reclaim(pid) {
            debug!(%pid, "reaper reclaimed foreground child");
            return Reclaimed::Foreground;
        }
        if jobs.mark_terminated(pid) {
            debug!(%pid, "background job terminated");
            return Reclaimed::Background;
        }
        debug!(%pid, "reaped untracked child");
        Reclaimed::Untracked
    }

    /// Reap all terminated children without blocking.
    ///
    /// Returns the reaped pids with their classification.
    pub fn reap(&self) -> Result<Vec<(Pid, Reclaimed)>> {
        let mut jobs = self.registry.lock()?;
        let mut reaped = Vec::new();

        loop {
            match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::StillAlive) | Err(Errno::ECHILD) => break,
                Ok(WaitStatus::Exited(pid, code)) => {
                    trace!(%pid, code, "child exited");
                    reaped.push((pid, self.record_termination(&mut jobs, pid)));
                }
                Ok(WaitStatus::Signaled(pid, signal, _)) => {
                    trace!(%pid, ?signal, "child killed by signal");
                    reaped.push((pid, self.record_termination(&mut jobs, pid)));
                }
                Ok(other) => trace!(status = ?other, "ignoring non-terminal wait status"),
                Err(Errno::EINTR) => continue,
                Err(errno) => return Err(ShellError::Wait(errno)),
            }
        }

        Ok(reaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreground_pid_never_touches_registry() {
        let control = JobControl::new();
        let fg = Pid::from_raw(900);
        control.foreground.set(fg);

        let mut jobs = control.registry.lock().unwrap();
        jobs.insert(Pid::from_raw(901));

        assert_eq!(control.record_termination(&mut jobs, fg), Reclaimed::Foreground);
        assert_eq!(control.foreground.current(), None);
        assert!(jobs.drain_finished().is_empty());
    }

    #[test]
    fn background_pid_is_marked_not_removed() {
        let control = JobControl::new();
        let bg = Pid::from_raw(902);
        let mut jobs = control.registry.lock().unwrap();
        jobs.insert(bg);

        assert_eq!(control.record_termination(&mut jobs, bg), Reclaimed::Background);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs.drain_finished(), vec![bg]);
    }

    #[test]
    fn unknown_pid_is_untracked() {
        let control = JobControl::new();
        control.foreground.set(Pid::from_raw(1000));
        let mut jobs = control.registry.lock().unwrap();

        assert_eq!(
            control.record_termination(&mut jobs, Pid::from_raw(1001)),
            Reclaimed::Untracked
        );
        assert_eq!(control.foreground.current(), Some(Pid::from_raw(1000)));
    }

    /// Block until `pid` is a zombie, i.e. terminated but not yet waited for.
    fn wait_for_zombie(pid: Pid) {
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while std::time::Instant::now() < deadline {
            let stat = std::fs::read_to_string(format!("/proc/{pid}/stat")).unwrap();
            let state = stat[stat.rfind(')').unwrap() + 1..].trim_start().chars().next();
            if state == Some('Z') {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        panic!("child {pid} did not terminate in time");
    }

    #[test]
    fn one_activation_collects_every_terminated_child() {
        // The only test in this binary that creates children.
        let control = JobControl::new();
        let spawn = || {
            let child = std::process::Command::new("true").spawn().unwrap();
            Pid::from_raw(child.id() as i32)
        };
        let first = spawn();
        let second = spawn();
        {
            let mut jobs = control.registry.lock().unwrap();
            jobs.insert(first);
            jobs.insert(second);
        }
        wait_for_zombie(first);
        wait_for_zombie(second);

        let mut reaped = control.reap().unwrap();
        reaped.sort_by_key(|(pid, _)| pid.as_raw());
        let mut expected = vec![(first, Reclaimed::Background), (second, Reclaimed::Background)];
        expected.sort_by_key(|(pid, _)| pid.as_raw());
        assert_eq!(reaped, expected);

        let mut jobs = control.registry.lock().unwrap();
        assert_eq!(jobs.finished().len(), 2);
        assert_eq!(jobs.drain_finished().len(), 2);
    }
}
