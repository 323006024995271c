// src/engine/signals.rs

//! Asynchronous notifications: `SIGCHLD` drives the reaper, `SIGINT` the
//! interactive interrupt policy.
//!
//! Both are delivered through `tokio::signal::unix` streams to a single task,
//! so neither handler runs in raw signal context and both may lock.

use std::sync::Arc;

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::engine::prompt::show_prompt;
use crate::engine::{fatal, ShellContext};
use crate::errors::{Result, ShellError};

/// What happened in response to an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// `SIGINT` was passed on to the foreground child.
    Forwarded(Pid),
    /// Nothing was running; the prompt was drawn again.
    Redrawn,
}

/// Interactive interrupt policy. The shell itself never dies from Ctrl-C.
pub fn on_interrupt(ctx: &ShellContext) -> Result<InterruptAction> {
    ctx.console.line_or_warn("")?;

    match ctx.jobs.foreground.current() {
        Some(pid) => {
            match kill(pid, Signal::SIGINT) {
                // The child may have exited in the meantime.
                Ok(()) | Err(Errno::ESRCH) => {}
                Err(errno) => return Err(ShellError::Signal(errno)),
            }
            debug!(%pid, "forwarded interrupt to foreground child");
            Ok(InterruptAction::Forwarded(pid))
        }
        None => {
            show_prompt(ctx)?;
            Ok(InterruptAction::Redrawn)
        }
    }
}

/// One reaper activation.
pub fn on_child_terminated(ctx: &ShellContext) -> Result<()> {
    let reaped = ctx.jobs.reap()?;
    debug!(count = reaped.len(), "reaper activation");
    Ok(())
}

/// Install the `SIGCHLD`/`SIGINT` listeners and spawn the task serving them.
///
/// Must be called from within a Tokio runtime, before the first child is
/// spawned.
pub fn spawn_signal_task(ctx: Arc<ShellContext>) -> Result<JoinHandle<()>> {
    let mut children = signal(SignalKind::child())?;
    let mut interrupts = signal(SignalKind::interrupt())?;

    Ok(tokio::spawn(async move {
        debug!("signal task started");
        loop {
            let result = tokio::select! {
                Some(()) = children.recv() => on_child_terminated(&ctx),
                Some(()) = interrupts.recv() => on_interrupt(&ctx).map(drop),
                else => break,
            };

            match result {
                Ok(()) => {}
                Err(err) if err.is_fatal() => fatal(&err),
                Err(err) => warn!(error = %err, "signal handling failed"),
            }
        }
        error!("signal streams closed");
    }))
}
