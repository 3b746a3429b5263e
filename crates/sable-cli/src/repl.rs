//! Interactive read-eval-print loop.
//!
//! Lines are read through the session's program input, so `input()` calls
//! and the prompt share a single reader. Definitions persist between lines.

use crate::driver::{RenderOptions, Session};
use sable_log::debug;
use std::io;

/// Printed once when the loop starts.
pub const BANNER: &str = "Sable REPL (type 'exit' to quit)";

/// Printed before every line.
pub const PROMPT: &str = "> ";

/// Runs the loop until `exit`, `quit` or end of input.
///
/// Reports are written to the program output after each line.
pub fn run(session: &mut Session, options: &RenderOptions) -> io::Result<()> {
    session.io_mut().write_line(BANNER)?;

    loop {
        let io = session.io_mut();
        io.write_str(PROMPT)?;
        io.flush()?;

        let Some(line) = io.read_line()? else {
            io.write_line("")?;
            break;
        };
        let line = line.trim();
        if matches!(line, "exit" | "quit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        debug!("repl line: {line}");
        let report = session.run(line);
        let rendered = report.render(options);
        let io = session.io_mut();
        io.write_str(&rendered)?;
        io.flush()?;
    }
    Ok(())
}
