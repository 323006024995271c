// src/engine/dispatch.rs

//! What the execution side does with one input line.

use tracing::{debug, info};

use crate::engine::ShellContext;
use crate::errors::Result;
use crate::exec::Launcher;
use crate::parse::parse_command;

/// The only built-in. Trailing arguments are ignored.
pub const EXIT_COMMAND: &str = "exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Blank line, nothing ran.
    Empty,
    /// Handed to the launcher.
    Launched,
    /// `exit` ran; the shell is shutting down.
    Exit,
}

/// Parse `line` and run it.
pub fn execute_line<L>(line: &L, ctx: &ShellContext, launcher: &dyn Launcher) -> Result<Dispatch>
where
    L: AsRef<[u8]> + ?Sized,
{
    let command = parse_command(line)?;

    let Some(program) = command.program() else {
        return Ok(Dispatch::Empty);
    };

    if program == EXIT_COMMAND {
        exit_builtin(ctx)?;
        return Ok(Dispatch::Exit);
    }

    debug!(?program, background = command.is_background(), "launching command");
    launcher.launch(&command, ctx)?;
    Ok(Dispatch::Launched)
}

/// Kill all background jobs, empty the registry and ask both loops to stop.
pub fn exit_builtin(ctx: &ShellContext) -> Result<()> {
    let result = ctx.jobs.terminate_all();
    ctx.interrupt();
    let signalled = result?;
    info!(jobs = signalled.len(), "exit requested");
    Ok(())
}
