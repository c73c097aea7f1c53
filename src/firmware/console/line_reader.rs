use crate::firmware::config::CONSOLE_LINE_MAX;

pub enum LineReadEvent<'a> {
    None,
    Complete(&'a [u8]),
    Overflow,
}

/// Assembles console bytes into lines. A line longer than
/// [`CONSOLE_LINE_MAX`] is reported once as [`LineReadEvent::Overflow`] and
/// the rest of it is dropped up to the next terminator.
pub struct ConsoleLineReader {
    line_buf: [u8; CONSOLE_LINE_MAX],
    line_len: usize,
    overflowed: bool,
}

impl ConsoleLineReader {
    pub const fn new() -> Self {
        Self {
            line_buf: [0; CONSOLE_LINE_MAX],
            line_len: 0,
            overflowed: false,
        }
    }

    pub fn push_byte(&mut self, byte: u8) -> LineReadEvent<'_> {
        if byte == b'\r' || byte == b'\n' {
            if self.overflowed {
                self.overflowed = false;
                return LineReadEvent::None;
            }
            if self.line_len == 0 {
                return LineReadEvent::None;
            }
            let complete_len = self.line_len;
            self.line_len = 0;
            return LineReadEvent::Complete(&self.line_buf[..complete_len]);
        }

        if self.overflowed {
            return LineReadEvent::None;
        }

        // Backspace from interactive terminals.
        if byte == 0x08 || byte == 0x7f {
            self.line_len = self.line_len.saturating_sub(1);
            return LineReadEvent::None;
        }

        if self.line_len < self.line_buf.len() {
            self.line_buf[self.line_len] = byte;
            self.line_len += 1;
            return LineReadEvent::None;
        }

        self.line_len = 0;
        self.overflowed = true;
        LineReadEvent::Overflow
    }
}

impl Default for ConsoleLineReader {
    fn default() -> Self {
        Self::new()
    }
}
