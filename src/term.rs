use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveToColumn, MoveToPreviousLine, Show},
    queue,
    style::Print,
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType},
};

/// Low-level output a prompt draws its frames on.
///
/// A frame is written with [`write`](Terminal::write) and erased on the next
/// cycle with [`clear`](Terminal::clear). The cursor stays at the end of the
/// last written row; no trailing newline is written.
pub trait Terminal {
    /// Acquires the terminal for an interactive session.
    fn begin(&mut self) -> io::Result<()>;

    /// Releases the terminal for good and moves below the last frame.
    fn end(&mut self) -> io::Result<()>;

    /// Width of the terminal, used to count wrapped rows.
    fn columns(&self) -> usize;

    /// Erases the last `rows` rows, leaving the cursor at the start of the
    /// first erased row.
    fn clear(&mut self, rows: usize) -> io::Result<()>;

    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Flushes the frame and puts the terminal back into input mode.
    fn restore(&mut self) -> io::Result<()>;

    /// Signals an invalid action to the user.
    fn alert(&mut self) -> io::Result<()>;
}

/// A [`Terminal`] on top of crossterm, writing to any [`Write`].
pub struct CrosstermTerminal<W: Write> {
    out: W,
    raw: bool,
}

impl<W: Write> CrosstermTerminal<W> {
    pub fn new(out: W) -> Self {
        Self { out, raw: false }
    }

    fn leave_raw(&mut self) -> io::Result<()> {
        if self.raw {
            disable_raw_mode()?;
            self.raw = false;
        }
        Ok(())
    }
}

impl<W: Write> Terminal for CrosstermTerminal<W> {
    fn begin(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)?;
        self.out.flush()?;
        if let Err(e) = enable_raw_mode() {
            queue!(self.out, Show)?;
            self.out.flush()?;
            return Err(e);
        }
        self.raw = true;
        Ok(())
    }

    fn end(&mut self) -> io::Result<()> {
        self.leave_raw()?;
        queue!(self.out, Print("\n"), Show)?;
        self.out.flush()
    }

    fn columns(&self) -> usize {
        terminal::size().map_or(80, |(width, _)| width as usize)
    }

    fn clear(&mut self, rows: usize) -> io::Result<()> {
        self.leave_raw()?;
        match rows {
            0 => Ok(()),
            1 => queue!(self.out, MoveToColumn(0), Clear(ClearType::FromCursorDown)),
            _ => queue!(
                self.out,
                MoveToPreviousLine((rows - 1) as u16),
                Clear(ClearType::FromCursorDown),
            ),
        }
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.leave_raw()?;
        queue!(self.out, Print(text))
    }

    fn restore(&mut self) -> io::Result<()> {
        self.out.flush()?;
        if !self.raw {
            enable_raw_mode()?;
            self.raw = true;
        }
        Ok(())
    }

    fn alert(&mut self) -> io::Result<()> {
        queue!(self.out, Print('\x07'))?;
        self.out.flush()
    }
}

/// One call made on a [`MemoryTerminal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermOp {
    Begin,
    Clear(usize),
    Write(String),
    Restore,
    Alert,
    End,
}

/// A headless [`Terminal`] recording every call, for scripted sessions.
#[derive(Debug, Clone)]
pub struct MemoryTerminal {
    columns: usize,
    ops: Vec<TermOp>,
}

impl Default for MemoryTerminal {
    fn default() -> Self {
        Self::new(80)
    }
}

impl MemoryTerminal {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[TermOp] {
        &self.ops
    }

    /// Every frame written so far, oldest first.
    pub fn frames(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                TermOp::Write(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.frames().last().copied()
    }

    /// Row counts passed to every `clear`, oldest first.
    pub fn cleared(&self) -> Vec<usize> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                TermOp::Clear(rows) => Some(*rows),
                _ => None,
            })
            .collect()
    }

    pub fn alerts(&self) -> usize {
        self.ops.iter().filter(|op| **op == TermOp::Alert).count()
    }
}

impl Terminal for MemoryTerminal {
    fn begin(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::Begin);
        Ok(())
    }

    fn end(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::End);
        Ok(())
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn clear(&mut self, rows: usize) -> io::Result<()> {
        self.ops.push(TermOp::Clear(rows));
        Ok(())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.ops.push(TermOp::Write(text.to_string()));
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::Restore);
        Ok(())
    }

    fn alert(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::Alert);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn drawn(draw: impl FnOnce(&mut CrosstermTerminal<Vec<u8>>) -> io::Result<()>) -> String {
        let mut term = CrosstermTerminal::new(Vec::new());
        draw(&mut term).unwrap();
        String::from_utf8(term.out).unwrap()
    }

    #[test]
    fn clear_nothing_emits_nothing() {
        assert_eq!(drawn(|t| t.clear(0)), "");
    }

    #[test]
    fn clear_one_row_stays_on_the_line() {
        assert_eq!(drawn(|t| t.clear(1)), "\x1b[1G\x1b[J");
    }

    #[test]
    fn clear_rows_moves_up_to_the_first_one() {
        assert_eq!(drawn(|t| t.clear(3)), "\x1b[2F\x1b[J");
        assert_eq!(drawn(|t| t.clear(2)), "\x1b[1F\x1b[J");
    }

    #[test]
    fn write_prints_frame_verbatim() {
        assert_eq!(drawn(|t| t.write("? Pick\n❯ a")), "? Pick\n❯ a");
    }

    #[test]
    fn redraw_erases_then_writes() {
        let out = drawn(|t| {
            t.write("a\nb\nc")?;
            t.clear(3)?;
            t.write("d")
        });
        assert_eq!(out, "a\nb\nc\x1b[2F\x1b[Jd");
    }

    #[test]
    fn end_moves_below_frame_and_shows_cursor() {
        assert_eq!(drawn(|t| t.end()), "\n\x1b[?25h");
    }

    #[test]
    fn alert_rings_the_bell() {
        assert_eq!(drawn(|t| t.alert()), "\x07");
    }

    #[test]
    fn failed_begin_shows_cursor_again() {
        let mut term = CrosstermTerminal::new(Vec::new());
        match term.begin() {
            Err(_) => {
                let out = String::from_utf8(term.out).unwrap();
                assert_eq!(out, "\x1b[?25l\x1b[?25h");
            }
            // Attached to a real terminal: leave it as it was.
            Ok(()) => term.end().unwrap(),
        }
    }
}
