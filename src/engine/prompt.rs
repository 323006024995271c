// src/engine/prompt.rs

use std::fmt::Write as _;

use crate::engine::ShellContext;
use crate::errors::Result;

/// Print `[<pid>] Finished` for every background job the reaper marked
/// terminated, then the prompt.
///
/// Jobs are removed only once the text is written. If the console fails,
/// they stay in the registry and are reported at the next prompt.
pub fn show_prompt(ctx: &ShellContext) -> Result<()> {
    let mut jobs = ctx.jobs.registry.lock()?;

    let mut text = String::new();
    for pid in jobs.finished() {
        let _ = writeln!(text, "[{pid}] Finished");
    }
    text.push_str(ctx.prompt());

    ctx.console.write_str(&text)?;
    jobs.drain_finished();
    Ok(())
}
