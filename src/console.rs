// src/console.rs

//! Serialised writer for everything the user sees from the shell itself:
//! the prompt, `Started`/`Finished` notifications and per-command
//! diagnostics.
//!
//! Several threads print (input side, execution side, signal task), so all
//! output goes through one mutex and is flushed after every write.

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::errors::Result;

#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(out))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    /// Write `text` verbatim and flush.
    pub fn write_str(&self, text: &str) -> Result<()> {
        let mut out = self.out.lock()?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Write `text` followed by a newline.
    pub fn line(&self, text: impl fmt::Display) -> Result<()> {
        self.write_str(&format!("{text}\n"))
    }

    /// Like [`Console::write_str`], but a failed write is logged and
    /// swallowed. Only fatal errors (a poisoned lock) are returned.
    ///
    /// Used for output the shell must not stall on, such as the prompt and
    /// echoes: a closed or full stdout must not stop input from being read.
    pub fn write_str_or_warn(&self, text: &str) -> Result<()> {
        match self.write_str(text) {
            Err(err) if !err.is_fatal() => {
                warn!(error = %err, "console write failed");
                Ok(())
            }
            other => other,
        }
    }

    /// [`Console::line`] with the error handling of
    /// [`Console::write_str_or_warn`].
    pub fn line_or_warn(&self, text: impl fmt::Display) -> Result<()> {
        self.write_str_or_warn(&format!("{text}\n"))
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}
