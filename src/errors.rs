// src/errors.rs

//! Crate-wide error type.
//!
//! Almost every variant is a *per-command* failure: it is reported on the
//! console, the current cycle is abandoned and the shell keeps going. Only
//! [`ShellError::Sync`] is fatal, see [`ShellError::is_fatal`].

use std::path::PathBuf;

use nix::errno::Errno;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Input is too long. Maximum length is {max}")]
    LineTooLong { max: usize },

    #[error("failed to allocate argument storage")]
    ArgsAlloc,

    #[error("Couldn't open file '{}'.", path.display())]
    Redirect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("waitpid: {0}")]
    Wait(Errno),

    #[error("kill: {0}")]
    Signal(Errno),

    #[error("synchronization failure: {0}")]
    Sync(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShellError {
    /// Whether the error leaves shared state in a condition the shell cannot
    /// continue from. Fatal errors terminate the whole process.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Sync(_))
    }
}

impl<T> From<std::sync::PoisonError<T>> for ShellError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        ShellError::Sync(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_sync_failures_are_fatal() {
        assert!(ShellError::Sync("mutex".into()).is_fatal());
        assert!(!ShellError::LineTooLong { max: 512 }.is_fatal());
        assert!(!ShellError::Wait(Errno::EINVAL).is_fatal());
    }

    #[test]
    fn diagnostics_match_console_texts() {
        let err = ShellError::LineTooLong { max: 512 };
        assert_eq!(err.to_string(), "Input is too long. Maximum length is 512");

        let err = ShellError::Redirect {
            path: "missing.txt".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.to_string(), "Couldn't open file 'missing.txt'.");
    }
}
