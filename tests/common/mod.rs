#![allow(dead_code)]

pub use jobsh_test_utils::{builders, capture, fake_launcher, init_tracing, with_timeout};

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use jobsh::engine::ShellContext;
use jobsh::jobs::Reclaimed;
use nix::unistd::Pid;

static CHILDREN: Mutex<()> = Mutex::new(());

/// Serialise tests that spawn real children: the reaper waits on *any*
/// child of the test process.
pub fn serial() -> MutexGuard<'static, ()> {
    CHILDREN.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Drive the reaper by hand until `want` pids have been collected or five
/// seconds pass.
pub fn reap_until(ctx: &ShellContext, want: usize) -> Vec<(Pid, Reclaimed)> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut reaped = Vec::new();
    while reaped.len() < want && Instant::now() < deadline {
        reaped.extend(ctx.jobs.reap().expect("reap"));
        std::thread::sleep(Duration::from_millis(10));
    }
    reaped
}

/// Pid printed in a `[<pid>] <word>` notification line.
pub fn notification_pid(line: &str) -> i32 {
    let start = line.find('[').expect("notification has '['") + 1;
    let end = line.find(']').expect("notification has ']'");
    line[start..end].parse().expect("numeric pid")
}
