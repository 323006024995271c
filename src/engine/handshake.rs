// src/engine/handshake.rs

//! Single-command-in-flight rendezvous between the input side and the
//! execution side.
//!
//! The line buffer lives inside the mutex. The input side fills it and
//! blocks until the execution side is done with it; the execution side
//! only ever sees it through the guard, so a parsed command (which borrows
//! the buffer) cannot outlive its turn.

use std::sync::{Condvar, Mutex};

use tracing::trace;

use crate::errors::Result;

#[derive(Debug, Default)]
struct Slot {
    /// A line is waiting for, or being run by, the execution side.
    pending: bool,
    /// No more lines will be submitted.
    closed: bool,
    line: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct Handshake {
    slot: Mutex<Slot>,
    ready: Condvar,
}

impl Handshake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input side of one cycle.
    ///
    /// `read` fills the buffer while exclusive access is held. If it
    /// succeeds, the line is handed over and this call blocks until the
    /// execution side has finished with it. If it fails, nothing is handed
    /// over and the error is returned.
    pub fn submit<F, T>(&self, read: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<u8>) -> Result<T>,
    {
        let mut slot = self.slot.lock()?;
        let outcome = read(&mut slot.line)?;

        slot.pending = true;
        trace!(line = %String::from_utf8_lossy(&slot.line), "command pending");
        self.ready.notify_one();

        let _slot = self.ready.wait_while(slot, |s| s.pending)?;
        Ok(outcome)
    }

    /// Execution side of one cycle.
    ///
    /// Blocks until a line is pending, runs `exec` on it, then releases the
    /// input side. Returns `None` once the handshake is closed.
    pub fn serve<F, T>(&self, exec: F) -> Result<Option<T>>
    where
        F: FnOnce(&[u8]) -> T,
    {
        let slot = self.slot.lock()?;
        let mut slot = self.ready.wait_while(slot, |s| !s.pending && !s.closed)?;

        if !slot.pending {
            return Ok(None);
        }

        let out = exec(slot.line.as_slice());

        slot.pending = false;
        trace!("command done");
        self.ready.notify_one();
        Ok(Some(out))
    }

    /// Wake a waiting execution side for good.
    pub fn close(&self) -> Result<()> {
        let mut slot = self.slot.lock()?;
        slot.closed = true;
        self.ready.notify_all();
        Ok(())
    }
}
