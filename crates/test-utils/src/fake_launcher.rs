use std::ffi::OsStr;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use jobsh::engine::ShellContext;
use jobsh::errors::Result;
use jobsh::exec::Launcher;
use jobsh::parse::Command;
use nix::unistd::Pid;

/// Fake pids start far above any real `pid_max`, so signalling them can only
/// ever fail with `ESRCH`.
pub const FIRST_FAKE_PID: i32 = 1 << 30;

/// What the fake launcher was asked to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRecord {
    pub args: Vec<String>,
    pub input: Option<String>,
    pub output: Option<String>,
    pub background: bool,
}

/// A launcher that:
/// - records every command it is handed
/// - "starts" background commands by registering a fake pid and printing
///   the usual `Started` line
/// - returns immediately for foreground commands
#[derive(Clone)]
pub struct FakeLauncher {
    launched: Arc<Mutex<Vec<LaunchRecord>>>,
    next_pid: Arc<AtomicI32>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self {
            launched: Arc::new(Mutex::new(Vec::new())),
            next_pid: Arc::new(AtomicI32::new(FIRST_FAKE_PID)),
        }
    }

    pub fn launched(&self) -> Vec<LaunchRecord> {
        self.launched.lock().unwrap().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.launched()
            .into_iter()
            .filter_map(|r| r.args.first().cloned())
            .collect()
    }
}

impl Default for FakeLauncher {
    fn default() -> Self {
        Self::new()
    }
}

fn lossy(token: &OsStr) -> String {
    token.to_string_lossy().into_owned()
}

impl Launcher for FakeLauncher {
    fn launch(&self, command: &Command<'_>, ctx: &ShellContext) -> Result<()> {
        self.launched.lock().unwrap().push(LaunchRecord {
            args: command.args().iter().map(|s| lossy(s)).collect(),
            input: command.input().map(lossy),
            output: command.output().map(lossy),
            background: command.is_background(),
        });

        if command.is_background() {
            let pid = Pid::from_raw(self.next_pid.fetch_add(1, Ordering::SeqCst));
            ctx.jobs.registry.lock()?.insert(pid);
            ctx.console.line(format_args!("[{pid}] Started"))?;
        }
        Ok(())
    }
}
