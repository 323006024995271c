// src/exec/launcher.rs

use crate::engine::ShellContext;
use crate::errors::Result;
use crate::parse::Command;

/// Trait abstracting how a parsed command becomes a running program.
///
/// Production code uses [`OsLauncher`](super::OsLauncher). An implementation
/// must:
/// - for a foreground command, return only once that child has terminated
///   (and leave the foreground token clear)
/// - for a background command, print `[<pid>] Started` and record the job in
///   the registry
///
/// The command is never empty and never the `exit` built-in; dispatch
/// handles both before calling this.
pub trait Launcher: Send + Sync {
    fn launch(&self, command: &Command<'_>, ctx: &ShellContext) -> Result<()>;
}
