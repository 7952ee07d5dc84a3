//! Terminal output for the game view.
//!
//! Each presented frame is compared against the one on screen row by row.
//! A changed row is rewritten from its first to its last differing column,
//! which keeps a tile growing or vibrating (and the ticking clock in the side
//! panel) to a few short writes per frame. A missing or differently sized
//! previous frame forces a clear and full repaint.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Owns the terminal while a session is on screen: raw mode, the alternate
/// screen and mouse capture for pointer selection.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    on_screen: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            on_screen: None,
            bytes: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        self.bytes
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?
            .queue(event::EnableMouseCapture)?;
        self.flush()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes
            .queue(event::DisableMouseCapture)?
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next `present` (terminal resized).
    pub fn invalidate(&mut self) {
        self.on_screen = None;
    }

    /// Show `frame`, then hand back the previously shown buffer in its place
    /// so the caller can render the next frame into it.
    pub fn present(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();
        encode_frame(self.on_screen.as_ref(), frame, &mut self.bytes)?;
        self.flush()?;

        let mut shown = self
            .on_screen
            .take()
            .unwrap_or_else(|| FrameBuffer::new(frame.width(), frame.height()));
        shown.resize(frame.width(), frame.height());
        std::mem::swap(&mut shown, frame);
        self.on_screen = Some(shown);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.bytes)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the commands that turn `prev` into `next` on screen.
///
/// With no usable `prev` the screen is cleared and every row is written.
/// Returns the number of rows written.
pub fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<u16> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut pen = Pen::default();
    let mut rows = 0;
    for y in 0..next.height() {
        let span = match prev {
            Some(prev) => dirty_span(prev.row(y), next.row(y)),
            None => Some((0, next.width())),
        };
        let Some((start, end)) = span else { continue };

        out.queue(cursor::MoveTo(start, y))?;
        for cell in &next.row(y)[start as usize..end as usize] {
            pen.draw(out, *cell)?;
        }
        rows += 1;
    }

    if rows > 0 {
        out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(rows)
}

/// Half-open column range `[first, last + 1)` where two rows differ.
pub fn dirty_span(prev: &[Cell], next: &[Cell]) -> Option<(u16, u16)> {
    let first = prev.iter().zip(next).position(|(a, b)| a != b)?;
    let last = prev.iter().zip(next).rposition(|(a, b)| a != b)?;
    Some((first as u16, last as u16 + 1))
}

/// Current terminal style; only the parts that change are re-sent.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn draw(&mut self, out: &mut Vec<u8>, cell: Cell) -> Result<()> {
        self.apply(out, cell.style)?;
        out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.style.replace(style);
        let attrs_changed =
            !matches!(prev, Some(p) if p.bold == style.bold && p.dim == style.dim);

        if attrs_changed {
            // Attribute reset also drops colors, so both are re-sent.
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if attrs_changed || prev.is_some_and(|p| p.fg != style.fg) {
            out.queue(SetForegroundColor(color(style.fg)))?;
        }
        if attrs_changed || prev.is_some_and(|p| p.bg != style.bg) {
            out.queue(SetBackgroundColor(color(style.bg)))?;
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
