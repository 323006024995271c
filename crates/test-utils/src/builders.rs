#![allow(dead_code)]

use std::io::Cursor;

use jobsh::config::{ConfigFile, RawConfigFile, ShellSection};
use jobsh::input::LineSource;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ShellConfigBuilder {
    config: RawConfigFile,
}

impl ShellConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                shell: ShellSection::default(),
            },
        }
    }

    pub fn prompt(mut self, prompt: &str) -> Self {
        self.config.shell.prompt = prompt.to_string();
        self
    }

    pub fn max_line_length(mut self, len: usize) -> Self {
        self.config.shell.max_line_length = len;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ShellConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A line source reading a fixed script, as if typed.
pub fn scripted_input(script: &str, config: &ConfigFile) -> LineSource<Cursor<Vec<u8>>> {
    LineSource::new(Cursor::new(script.as_bytes().to_vec()), config.max_line_length())
}
