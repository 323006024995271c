// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, ShellError};

/// Upper bound accepted for `[shell].max_line_length`.
pub const MAX_LINE_LENGTH_LIMIT: usize = 64 * 1024;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ShellError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.shell))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_line_length(cfg)?;
    validate_prompt(cfg)?;
    Ok(())
}

fn validate_line_length(cfg: &RawConfigFile) -> Result<()> {
    let len = cfg.shell.max_line_length;
    if len == 0 || len > MAX_LINE_LENGTH_LIMIT {
        return Err(ShellError::Config(format!(
            "[shell].max_line_length must be between 1 and {} (got {})",
            MAX_LINE_LENGTH_LIMIT, len
        )));
    }
    Ok(())
}

fn validate_prompt(cfg: &RawConfigFile) -> Result<()> {
    if cfg.shell.prompt.contains('\n') {
        return Err(ShellError::Config(
            "[shell].prompt must not contain a newline".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::ShellSection;

    fn raw(prompt: &str, max_line_length: usize) -> RawConfigFile {
        RawConfigFile {
            shell: ShellSection {
                prompt: prompt.to_string(),
                max_line_length,
            },
        }
    }

    #[test]
    fn accepts_defaults() {
        let cfg = ConfigFile::try_from(RawConfigFile::default()).unwrap();
        assert_eq!(cfg.prompt(), "$ ");
        assert_eq!(cfg.max_line_length(), 512);
    }

    #[test]
    fn rejects_zero_line_length() {
        match ConfigFile::try_from(raw("$ ", 0)) {
            Err(ShellError::Config(msg)) => assert!(msg.contains("max_line_length")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_multiline_prompt() {
        assert!(matches!(
            ConfigFile::try_from(raw("a\nb", 512)),
            Err(ShellError::Config(_))
        ));
    }

    #[test]
    fn prompt_override_is_validated() {
        let cfg = ConfigFile::default().with_prompt("jobsh> ").unwrap();
        assert_eq!(cfg.prompt(), "jobsh> ");
        assert!(ConfigFile::default().with_prompt("x\n").is_err());
    }
}
