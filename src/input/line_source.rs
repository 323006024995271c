// src/input/line_source.rs

use std::io::{BufRead, Read};

use tracing::{debug, warn};

use crate::console::Console;
use crate::engine::dispatch::EXIT_COMMAND;
use crate::errors::{Result, ShellError};

/// What a successful [`LineSource::read_line`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line typed by the user.
    Line,
    /// Input ended; the buffer holds a synthesized `exit`.
    EndOfInput,
}

/// Reads bounded lines from any `BufRead` (stdin in production).
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
    max_line_length: usize,
}

impl<R: BufRead> LineSource<R> {
    /// `max_line_length` counts the trailing newline.
    pub fn new(reader: R, max_line_length: usize) -> Self {
        Self {
            reader,
            max_line_length,
        }
    }

    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Replace the contents of `buf` with the next input line, as raw bytes.
    ///
    /// - end of input: `buf` becomes `exit`, which is echoed as if typed
    /// - a trailing newline is stripped; a last line without one gets a
    ///   newline echoed so the next output starts on a fresh line
    /// - more than `max_line_length` bytes: the rest of the physical line is
    ///   discarded and [`ShellError::LineTooLong`] is returned
    ///
    /// Echo failures are logged, never returned: the line is still handed
    /// back.
    pub fn read_line(&mut self, buf: &mut Vec<u8>, console: &Console) -> Result<ReadOutcome> {
        buf.clear();

        let limit = self.max_line_length as u64 + 1;
        let read = match (&mut self.reader).take(limit).read_until(b'\n', buf) {
            Ok(n) => n,
            Err(err) => {
                warn!(error = %err, "reading input failed; treating as end of input");
                0
            }
        };

        if read == 0 {
            debug!("end of input");
            buf.clear();
            buf.extend_from_slice(EXIT_COMMAND.as_bytes());
            console.line_or_warn(EXIT_COMMAND)?;
            return Ok(ReadOutcome::EndOfInput);
        }

        let terminated = buf.last() == Some(&b'\n');

        if read > self.max_line_length {
            if !terminated {
                let skipped = self.reader.skip_until(b'\n')?;
                debug!(skipped, "discarded remainder of oversized line");
            }
            buf.clear();
            return Err(ShellError::LineTooLong {
                max: self.max_line_length,
            });
        }

        if terminated {
            buf.pop();
        } else {
            console.line_or_warn("")?;
        }

        Ok(ReadOutcome::Line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Sink {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn source(input: &str, max: usize) -> (LineSource<Cursor<Vec<u8>>>, Console, Sink) {
        let sink = Sink::default();
        let console = Console::new(sink.clone());
        (LineSource::new(Cursor::new(input.as_bytes().to_vec()), max), console, sink)
    }

    #[test]
    fn strips_newline_and_echoes_nothing() {
        let (mut src, console, sink) = source("ls -l\n", 512);
        let mut buf = b"stale bytes from before".to_vec();

        assert_eq!(src.read_line(&mut buf, &console).unwrap(), ReadOutcome::Line);
        assert_eq!(buf, b"ls -l");
        assert_eq!(sink.text(), "");
    }

    #[test]
    fn end_of_input_becomes_exit() {
        let (mut src, console, sink) = source("", 512);
        let mut buf = Vec::new();

        assert_eq!(
            src.read_line(&mut buf, &console).unwrap(),
            ReadOutcome::EndOfInput
        );
        assert_eq!(buf, b"exit");
        assert_eq!(sink.text(), "exit\n");
    }

    #[test]
    fn unterminated_last_line_gets_a_newline_echo() {
        let (mut src, console, sink) = source("pwd", 512);
        let mut buf = Vec::new();

        src.read_line(&mut buf, &console).unwrap();
        assert_eq!(buf, b"pwd");
        assert_eq!(sink.text(), "\n");
    }

    #[test]
    fn oversized_line_is_rejected_and_drained() {
        let long = "x".repeat(20);
        let (mut src, console, _sink) = source(&format!("{long}\necho ok\n"), 8);
        let mut buf = Vec::new();

        match src.read_line(&mut buf, &console) {
            Err(ShellError::LineTooLong { max }) => assert_eq!(max, 8),
            other => panic!("expected LineTooLong, got {other:?}"),
        }

        src.read_line(&mut buf, &console).unwrap();
        assert_eq!(buf, b"echo ok");
    }

    #[test]
    fn limit_counts_the_newline() {
        let (mut src, console, _sink) = source("1234567\n12345678\nnext\n", 8);
        let mut buf = Vec::new();

        src.read_line(&mut buf, &console).unwrap();
        assert_eq!(buf, b"1234567");

        assert!(matches!(
            src.read_line(&mut buf, &console),
            Err(ShellError::LineTooLong { .. })
        ));

        src.read_line(&mut buf, &console).unwrap();
        assert_eq!(buf, b"next");
    }

    #[test]
    fn non_utf8_bytes_pass_through() {
        let sink = Sink::default();
        let console = Console::new(sink);
        let mut src = LineSource::new(Cursor::new(b"cat \xff\xfe\nok\n".to_vec()), 512);
        let mut buf = Vec::new();

        assert_eq!(src.read_line(&mut buf, &console).unwrap(), ReadOutcome::Line);
        assert_eq!(buf, b"cat \xff\xfe");
        src.read_line(&mut buf, &console).unwrap();
        assert_eq!(buf, b"ok");
    }

    #[derive(Clone, Copy)]
    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closed_console_still_yields_lines_and_exit() {
        let console = Console::new(Closed);
        let mut src = LineSource::new(Cursor::new(b"pwd".to_vec()), 512);
        let mut buf = Vec::new();

        assert_eq!(src.read_line(&mut buf, &console).unwrap(), ReadOutcome::Line);
        assert_eq!(buf, b"pwd");
        assert_eq!(
            src.read_line(&mut buf, &console).unwrap(),
            ReadOutcome::EndOfInput
        );
        assert_eq!(buf, b"exit");
    }
}
