//! Pluggable program input and output.
//!
//! The interpreter writes `print` output to, and reads `input` lines from,
//! an [`Io`] pair. Standard streams are the default; tests swap in a
//! [`SharedOutput`] and an in-memory reader.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, BufRead, BufReader, Write};
use std::rc::Rc;

/// Output and input streams of a running program.
pub struct Io {
    output: Box<dyn Write>,
    input: Box<dyn BufRead>,
}

impl fmt::Debug for Io {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Io").finish_non_exhaustive()
    }
}

impl Io {
    /// Uses the given streams.
    #[must_use]
    pub fn new(output: Box<dyn Write>, input: Box<dyn BufRead>) -> Self {
        Self { output, input }
    }

    /// Uses standard output and standard input.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(BufReader::new(io::stdin())))
    }

    /// Writes `text` without a newline.
    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())
    }

    /// Writes `text` followed by a newline.
    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Flushes buffered output.
    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }

    /// Reads one line with its line ending removed.
    ///
    /// Returns `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

/// An in-memory writer whose contents stay readable after it is handed to
/// the interpreter.
///
/// ```
/// use sable_interpreter::SharedOutput;
/// use std::io::Write;
///
/// let output = SharedOutput::new();
/// let mut writer = output.clone();
/// writeln!(writer, "hello").unwrap();
/// assert_eq!(output.contents(), "hello\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_strips_endings() {
        let input = Cursor::new("first\r\nsecond\nlast");
        let mut io = Io::new(Box::new(io::sink()), Box::new(input));
        assert_eq!(io.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(io.read_line().unwrap().as_deref(), Some("second"));
        assert_eq!(io.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(io.read_line().unwrap(), None);
    }

    #[test]
    fn test_shared_output_captures_writes() {
        let output = SharedOutput::new();
        let mut io = Io::new(Box::new(output.clone()), Box::new(io::empty()));
        io.write_str("a ").unwrap();
        io.write_line("b").unwrap();
        assert_eq!(output.contents(), "a b\n");
        output.clear();
        assert_eq!(output.contents(), "");
    }
}
