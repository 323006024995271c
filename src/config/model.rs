// src/config/model.rs

use serde::Deserialize;

/// Default prompt, printed before every input line.
pub const DEFAULT_PROMPT: &str = "$ ";

/// Default maximum number of bytes in one input line, newline included.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 512;

/// Configuration exactly as deserialized from TOML, before validation.
///
/// ```toml
/// [shell]
/// prompt = "$ "
/// max_line_length = 512
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub shell: ShellSection,
}

/// `[shell]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShellSection {
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Longer lines are rejected and discarded.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}

impl Default for ShellSection {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            max_line_length: default_max_line_length(),
        }
    }
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`
/// (see `validate.rs`) or [`ConfigFile::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    shell: ShellSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(shell: ShellSection) -> Self {
        Self { shell }
    }

    pub fn prompt(&self) -> &str {
        &self.shell.prompt
    }

    pub fn max_line_length(&self) -> usize {
        self.shell.max_line_length
    }

    /// Replace the prompt, e.g. from `--prompt`. Runs the same check as the
    /// file loader.
    pub fn with_prompt(self, prompt: impl Into<String>) -> crate::errors::Result<Self> {
        let raw = RawConfigFile {
            shell: ShellSection {
                prompt: prompt.into(),
                ..self.shell
            },
        };
        ConfigFile::try_from(raw)
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(ShellSection::default())
    }
}
