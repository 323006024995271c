// src/lib.rs

pub mod cli;
pub mod config;
pub mod console;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod input;
pub mod jobs;
pub mod logging;
pub mod parse;

use std::io::BufReader;

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::load_effective;
use crate::console::Console;
use crate::engine::Shell;
use crate::exec::OsLauncher;
use crate::input::LineSource;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file, env, `--prompt` override)
/// - the console on stdout and the line source on stdin
/// - the real process launcher
/// - the shell runtime (handshake loops + signal task)
pub async fn run(args: CliArgs) -> Result<()> {
    let mut config = load_effective(args.config.as_deref())?;
    if let Some(prompt) = args.prompt {
        config = config.with_prompt(prompt)?;
    }
    debug!(?config, "effective configuration");

    let source = LineSource::new(BufReader::new(std::io::stdin()), config.max_line_length());
    let shell = Shell::new(&config, Console::stdout(), OsLauncher::new());
    shell.run(source).await?;
    Ok(())
}
