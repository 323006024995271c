// src/exec/os.rs

use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command as Process};

use nix::errno::Errno;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::unistd::Pid;
use tracing::{debug, info};

use crate::engine::ShellContext;
use crate::errors::{Result, ShellError};
use crate::exec::Launcher;
use crate::parse::Command;

/// Permission bits for a newly created output file (before the umask).
const OUTPUT_MODE: u32 = 0o666;

/// Starts real child processes, searching `PATH` for the program.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsLauncher;

impl OsLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Launcher for OsLauncher {
    fn launch(&self, command: &Command<'_>, ctx: &ShellContext) -> Result<()> {
        let mut process = build_process(command)?;

        if command.is_background() {
            launch_background(&mut process, command, ctx)
        } else {
            launch_foreground(&mut process, command, ctx)
        }
    }
}

/// Build the child description, opening redirection targets up front.
///
/// Output is opened before input, so a missing input file still leaves the
/// output file truncated.
fn build_process(command: &Command<'_>) -> Result<Process> {
    let program = command.program().unwrap_or_default();
    let mut process = Process::new(program);
    process.args(command.arguments());

    if let Some(path) = command.output() {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(OUTPUT_MODE)
            .open(path)
            .map_err(|source| redirect_error(path, source))?;
        process.stdout(file);
    }

    if let Some(path) = command.input() {
        let file = File::open(path).map_err(|source| redirect_error(path, source))?;
        process.stdin(file);
    }

    if command.is_background() {
        // SAFETY: `ignore_interrupts` only calls sigaction(2), which is
        // async-signal-safe, and does not allocate.
        unsafe {
            process.pre_exec(ignore_interrupts);
        }
    }

    Ok(process)
}

fn redirect_error(path: &OsStr, source: io::Error) -> ShellError {
    ShellError::Redirect {
        path: path.into(),
        source,
    }
}

/// Runs in the forked child: an ignored disposition survives `exec`, so the
/// background program never sees the user's Ctrl-C.
fn ignore_interrupts() -> io::Result<()> {
    let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
    // SAFETY: installing SIG_IGN does not run any handler code.
    unsafe { sigaction(Signal::SIGINT, &ignore) }
        .map(drop)
        .map_err(io::Error::from)
}

fn spawn(process: &mut Process, command: &Command<'_>) -> Result<Child> {
    process.spawn().map_err(|source| ShellError::Spawn {
        program: command.program().unwrap_or_default().to_string_lossy().into_owned(),
        source,
    })
}

fn child_pid(child: &Child) -> Pid {
    Pid::from_raw(child.id() as i32)
}

fn launch_foreground(process: &mut Process, command: &Command<'_>, ctx: &ShellContext) -> Result<()> {
    let mut child = {
        // The reaper cannot run while we hold the registry, so the child is
        // always in the token before anyone can reap it.
        let _jobs = ctx.jobs.registry.lock()?;
        let child = spawn(process, command)?;
        ctx.jobs.foreground.set(child_pid(&child));
        child
    };
    let pid = child_pid(&child);
    debug!(%pid, program = ?command.program(), "waiting for foreground child");

    match child.wait() {
        Ok(status) => {
            let credited = ctx.jobs.foreground.reclaim(pid);
            debug!(%pid, %status, credited, "foreground child finished");
            Ok(())
        }
        Err(err) if err.raw_os_error() == Some(Errno::ECHILD as i32) => {
            // Lost the race: the reaper collected the child and cleared the
            // token. That is a normal completion.
            ctx.jobs.foreground.reclaim(pid);
            debug!(%pid, "foreground child already reclaimed by reaper");
            Ok(())
        }
        Err(err) => {
            ctx.jobs.foreground.reclaim(pid);
            Err(ShellError::Io(err))
        }
    }
}

fn launch_background(process: &mut Process, command: &Command<'_>, ctx: &ShellContext) -> Result<()> {
    let mut jobs = ctx.jobs.registry.lock()?;
    let child = spawn(process, command)?;
    let pid = child_pid(&child);

    jobs.insert(pid);
    ctx.console.line_or_warn(format_args!("[{pid}] Started"))?;
    info!(%pid, program = ?command.program(), "background job started");

    // Dropping `Child` neither waits nor kills; the reaper owns it now.
    drop(child);
    Ok(())
}
