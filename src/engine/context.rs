// src/engine/context.rs

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::ConfigFile;
use crate::console::Console;
use crate::jobs::JobControl;

/// Process-wide shell state shared by the input side, the execution side and
/// the signal task.
#[derive(Debug)]
pub struct ShellContext {
    pub jobs: JobControl,
    pub console: Console,
    prompt: String,
    interrupted: AtomicBool,
}

impl ShellContext {
    pub fn new(config: &ConfigFile, console: Console) -> Self {
        Self {
            jobs: JobControl::new(),
            console,
            prompt: config.prompt().to_string(),
            interrupted: AtomicBool::new(false),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Set once `exit` ran; both loops stop at their next check.
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }
}
