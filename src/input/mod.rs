// src/input/mod.rs

//! Input acquisition: one raw line per shell cycle.

pub mod line_source;

pub use line_source::{LineSource, ReadOutcome};
