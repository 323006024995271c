// src/parse/command.rs

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;

use tracing::trace;

use crate::errors::{Result, ShellError};

pub const BACKGROUND: u8 = b'&';
pub const REDIRECT_OUT: u8 = b'>';
pub const REDIRECT_IN: u8 = b'<';

/// Initial argument capacity; `Vec` doubles it as needed.
const INITIAL_ARGS: usize = 4;

/// One parsed input line.
///
/// Every token is a sub-slice of the line it was parsed from, so a
/// `Command<'a>` cannot outlive (or observe a rewrite of) that buffer.
/// Tokens are raw bytes: file names need not be UTF-8.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Command<'a> {
    args: Vec<&'a OsStr>,
    output: Option<&'a OsStr>,
    input: Option<&'a OsStr>,
    background: bool,
}

/// Where the next token goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Argument,
    Output,
    Input,
}

impl<'a> Command<'a> {
    /// Full argument vector, program name first.
    pub fn args(&self) -> &[&'a OsStr] {
        &self.args
    }

    pub fn program(&self) -> Option<&'a OsStr> {
        self.args.first().copied()
    }

    /// Arguments after the program name.
    pub fn arguments(&self) -> &[&'a OsStr] {
        self.args.get(1..).unwrap_or(&[])
    }

    pub fn output(&self) -> Option<&'a OsStr> {
        self.output
    }

    pub fn input(&self) -> Option<&'a OsStr> {
        self.input
    }

    pub fn is_background(&self) -> bool {
        self.background
    }

    /// A command without a program name is a no-op.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    fn push_token(&mut self, token: &'a OsStr, target: Target) -> Result<()> {
        match target {
            Target::Output => self.output = Some(token),
            Target::Input => self.input = Some(token),
            Target::Argument => {
                self.args
                    .try_reserve(1)
                    .map_err(|_| ShellError::ArgsAlloc)?;
                self.args.push(token);
            }
        }
        Ok(())
    }
}

/// Separators end the current token. Matches C `isspace` plus NUL.
fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r' | b'\0')
}

/// Parse a raw line in a single pass, without copying it.
///
/// - whitespace ends the current token
/// - `&` ends the current token and marks the command as background
/// - `>` / `<` end the current token; the *next* token becomes the
///   output / input target instead of an argument
/// - anything else extends the current token
pub fn parse_command<L>(line: &L) -> Result<Command<'_>>
where
    L: AsRef<[u8]> + ?Sized,
{
    let line = line.as_ref();
    let mut command = Command::default();
    command
        .args
        .try_reserve(INITIAL_ARGS)
        .map_err(|_| ShellError::ArgsAlloc)?;

    let mut target = Target::Argument;
    let mut start: Option<usize> = None;

    for (i, &byte) in line.iter().enumerate() {
        let marker = match byte {
            BACKGROUND => Some(Target::Argument),
            REDIRECT_OUT => Some(Target::Output),
            REDIRECT_IN => Some(Target::Input),
            _ => None,
        };

        if marker.is_none() && !is_separator(byte) {
            start.get_or_insert(i);
            continue;
        }

        if let Some(begin) = start.take() {
            command.push_token(OsStr::from_bytes(&line[begin..i]), target)?;
            target = Target::Argument;
        }

        if let Some(next) = marker {
            if byte == BACKGROUND {
                command.background = true;
            }
            target = next;
        }
    }

    if let Some(begin) = start {
        command.push_token(OsStr::from_bytes(&line[begin..]), target)?;
    }

    trace!(?command, "parsed command line");
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(s: &str) -> Option<&OsStr> {
        Some(OsStr::new(s))
    }

    #[test]
    fn output_redirect_is_not_an_argument() {
        let cmd = parse_command("echo hi > out.txt").unwrap();
        assert_eq!(cmd.args(), ["echo", "hi"]);
        assert_eq!(cmd.output(), os("out.txt"));
        assert_eq!(cmd.input(), None);
        assert!(!cmd.is_background());
    }

    #[test]
    fn trailing_ampersand_sets_background() {
        let cmd = parse_command("sleep 5 &").unwrap();
        assert_eq!(cmd.args(), ["sleep", "5"]);
        assert!(cmd.is_background());
    }

    #[test]
    fn blank_lines_are_empty() {
        for line in ["", "   ", "\t \r", "\0\0"] {
            let cmd = parse_command(line).unwrap();
            assert!(cmd.is_empty(), "{line:?}");
            assert_eq!(cmd.program(), None);
        }
    }

    #[test]
    fn markers_need_no_surrounding_whitespace() {
        let cmd = parse_command("sort<in.txt>out.txt&").unwrap();
        assert_eq!(cmd.args(), ["sort"]);
        assert_eq!(cmd.input(), os("in.txt"));
        assert_eq!(cmd.output(), os("out.txt"));
        assert!(cmd.is_background());
    }

    #[test]
    fn markers_may_come_first() {
        let cmd = parse_command("> out < in & cat -n").unwrap();
        assert_eq!(cmd.args(), ["cat", "-n"]);
        assert_eq!(cmd.program(), os("cat"));
        assert_eq!(cmd.arguments(), ["-n"]);
        assert_eq!(cmd.output(), os("out"));
        assert_eq!(cmd.input(), os("in"));
    }

    #[test]
    fn only_the_token_right_after_a_marker_is_a_target() {
        let cmd = parse_command("echo > a b").unwrap();
        assert_eq!(cmd.args(), ["echo", "b"]);
        assert_eq!(cmd.output(), os("a"));
    }

    #[test]
    fn later_redirect_replaces_earlier_one() {
        let cmd = parse_command("echo > a > b").unwrap();
        assert_eq!(cmd.output(), os("b"));
        assert_eq!(cmd.args(), ["echo"]);
    }

    #[test]
    fn dangling_marker_sets_no_target() {
        let cmd = parse_command("ls >").unwrap();
        assert_eq!(cmd.args(), ["ls"]);
        assert_eq!(cmd.output(), None);
    }

    #[test]
    fn argument_storage_grows_past_initial_capacity() {
        let line = (0..40).map(|i| format!("a{i}")).collect::<Vec<_>>().join(" ");
        let cmd = parse_command(&line).unwrap();
        assert_eq!(cmd.args().len(), 40);
        assert_eq!(cmd.args()[39], "a39");
    }

    #[test]
    fn non_ascii_tokens_are_kept_whole() {
        let cmd = parse_command("echo héllo wörld>ünï").unwrap();
        assert_eq!(cmd.args(), ["echo", "héllo", "wörld"]);
        assert_eq!(cmd.output(), os("ünï"));
    }

    #[test]
    fn tokens_need_not_be_utf8() {
        let cmd = parse_command(b"cat \xff\xfe.txt > out-\x80").unwrap();
        assert_eq!(cmd.program(), Some(OsStr::new("cat")));
        assert_eq!(cmd.arguments()[0].as_bytes(), b"\xff\xfe.txt");
        assert_eq!(cmd.output().map(OsStr::as_bytes), Some(&b"out-\x80"[..]));
    }
}
