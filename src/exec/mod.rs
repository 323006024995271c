// src/exec/mod.rs

//! Process launching.
//!
//! - [`launcher`] defines the [`Launcher`] seam the execution side talks to.
//! - [`os`] is the production implementation that starts real child
//!   processes and wires them into job control.
//!
//! Tests can swap in their own `Launcher` that records commands instead of
//! spawning anything.

pub mod launcher;
pub mod os;

pub use launcher::Launcher;
pub use os::OsLauncher;
