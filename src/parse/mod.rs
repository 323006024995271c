// src/parse/mod.rs

//! Command-line parsing.
//!
//! Grammar (one command per line):
//!
//! ```text
//! name [args...] [< infile] [> outfile] [&]
//! ```
//!
//! Markers may appear anywhere relative to the arguments.

pub mod command;

pub use command::{parse_command, Command, BACKGROUND, REDIRECT_IN, REDIRECT_OUT};
