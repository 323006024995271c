// src/engine/mod.rs

//! The shell's control core.
//!
//! - [`context`]: state shared by every part of the shell
//! - [`handshake`]: one command in flight between input and execution
//! - [`dispatch`]: parse + run one line, including the `exit` built-in
//! - [`prompt`]: `Finished` notifications and the prompt
//! - [`signals`]: reaper activations and the interrupt policy
//! - [`runtime`]: wires all of the above together

pub mod context;
pub mod dispatch;
pub mod handshake;
pub mod prompt;
pub mod runtime;
pub mod signals;

use tracing::error;

use crate::errors::ShellError;

pub use context::ShellContext;
pub use dispatch::{execute_line, exit_builtin, Dispatch, EXIT_COMMAND};
pub use handshake::Handshake;
pub use prompt::show_prompt;
pub use runtime::{execution_loop, input_loop, Shell};
pub use signals::{on_interrupt, InterruptAction};

/// Fail fast: shared state can no longer be trusted.
pub fn fatal(err: &ShellError) -> ! {
    error!(error = %err, "fatal error, terminating");
    eprintln!("jobsh: {err}");
    std::process::exit(1);
}
