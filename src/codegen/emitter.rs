use std::io::{self, Write};

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// Line writer with an indentation cursor. Knows nothing about the generated
/// language; every call is an immediate append to the sink.
///
/// One emitter per translated test. It is not meant to be shared.
pub struct Emitter<W: Write> {
    sink: W,
    level: usize,
}

impl<W: Write> Emitter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, level: 0 }
    }

    /// Write `text` prefixed by the current indentation, followed by a newline.
    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        let indent = " ".repeat(INDENT_WIDTH * self.level);
        writeln!(self.sink, "{}{}", indent, text)
    }

    /// Write an empty line. No indentation is emitted for it.
    pub fn blank_line(&mut self) -> io::Result<()> {
        writeln!(self.sink)
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Panics when the cursor is already at column zero: that is a bug in the
    /// caller, not a property of the input.
    pub fn dedent(&mut self) {
        assert!(self.level > 0, "dedent below indentation level 0");
        self.level -= 1;
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Write `header`, then run `body` one level deeper.
    pub fn block<E, F>(&mut self, header: &str, body: F) -> Result<(), E>
    where
        E: From<io::Error>,
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        self.write_line(header)?;
        self.indent();
        let result = body(self);
        self.dedent();
        result
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
