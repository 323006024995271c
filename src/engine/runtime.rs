// src/engine/runtime.rs

//! Wiring: the two handshake loops plus the signal task.

use std::io::BufRead;
use std::sync::Arc;

use anyhow::anyhow;
use tracing::{debug, info, warn};

use crate::config::ConfigFile;
use crate::console::Console;
use crate::engine::dispatch::execute_line;
use crate::engine::handshake::Handshake;
use crate::engine::prompt::show_prompt;
use crate::engine::signals::spawn_signal_task;
use crate::engine::{fatal, ShellContext};
use crate::errors::{Result, ShellError};
use crate::exec::Launcher;
use crate::input::LineSource;

/// The assembled shell.
pub struct Shell<L> {
    ctx: Arc<ShellContext>,
    handshake: Arc<Handshake>,
    launcher: Arc<L>,
}

impl<L: Launcher + 'static> Shell<L> {
    pub fn new(config: &ConfigFile, console: Console, launcher: L) -> Self {
        Self {
            ctx: Arc::new(ShellContext::new(config, console)),
            handshake: Arc::new(Handshake::new()),
            launcher: Arc::new(launcher),
        }
    }

    pub fn context(&self) -> &Arc<ShellContext> {
        &self.ctx
    }

    /// Run until `exit` (typed, or synthesized at end of input).
    ///
    /// The input side and the execution side each get a blocking thread;
    /// asynchronous notifications are served by a Tokio task.
    pub async fn run<R>(self, source: LineSource<R>) -> Result<()>
    where
        R: BufRead + Send + 'static,
    {
        let signals = spawn_signal_task(Arc::clone(&self.ctx))?;
        info!("shell started");

        let input = {
            let ctx = Arc::clone(&self.ctx);
            let handshake = Arc::clone(&self.handshake);
            tokio::task::spawn_blocking(move || input_loop(&ctx, &handshake, source))
        };
        let execution = {
            let ctx = Arc::clone(&self.ctx);
            let handshake = Arc::clone(&self.handshake);
            let launcher = Arc::clone(&self.launcher);
            tokio::task::spawn_blocking(move || execution_loop(&ctx, &handshake, &*launcher))
        };

        let (input, execution) = tokio::join!(input, execution);
        signals.abort();

        input.map_err(|e| anyhow!("input loop panicked: {e}"))?;
        execution.map_err(|e| anyhow!("execution loop panicked: {e}"))?;

        info!("shell finished");
        Ok(())
    }
}

/// Report a per-command error, or bail out on a fatal one.
fn report(ctx: &ShellContext, err: &ShellError) {
    if err.is_fatal() {
        fatal(err);
    }
    debug!(error = ?err, "command aborted");
    if let Err(console_err) = ctx.console.line(err) {
        warn!(error = %console_err, "failed to print diagnostic");
    }
}

/// Input side: prompt, read, hand over, wait, until interrupted.
pub fn input_loop<R: BufRead>(ctx: &ShellContext, handshake: &Handshake, mut source: LineSource<R>) {
    while !ctx.is_interrupted() {
        let cycle = handshake.submit(|line| {
            // A prompt that cannot be shown must not keep input from being read.
            match show_prompt(ctx) {
                Err(err) if !err.is_fatal() => warn!(error = %err, "failed to show prompt"),
                other => other?,
            }
            source.read_line(line, &ctx.console)
        });

        if let Err(err) = cycle {
            report(ctx, &err);
        }
    }

    if let Err(err) = handshake.close() {
        fatal(&err);
    }
    debug!("input loop finished");
}

/// Execution side: wait for a line, parse and run it, until interrupted.
pub fn execution_loop(ctx: &ShellContext, handshake: &Handshake, launcher: &dyn Launcher) {
    while !ctx.is_interrupted() {
        match handshake.serve(|line| execute_line(line, ctx, launcher)) {
            Ok(Some(Ok(dispatch))) => debug!(?dispatch, "command done"),
            Ok(Some(Err(err))) | Err(err) => report(ctx, &err),
            Ok(None) => break,
        }
    }
    debug!("execution loop finished");
}
