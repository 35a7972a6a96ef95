//! # Console Output
//!
//! The extraction engine talks to the user through [`Console`]. Messages are
//! markup strings (see [`crate::markup`]) plus a [`LineEnd`] telling the sink
//! whether to finish the line or return to column zero for an in-place redraw.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand,
    style::{Print, ResetColor, SetForegroundColor},
};
use tracing::debug;

use crate::constants::FALLBACK_CONSOLE_WIDTH;
use crate::markup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    Newline,
    /// Carriage return; the next message overwrites this one.
    InPlace,
}

pub trait Console {
    fn message(&mut self, markup: &str, end: LineEnd);
}

/// Colored stdout console.
pub struct TerminalConsole<W: Write = io::Stdout> {
    out: W,
    color: bool,
}

impl TerminalConsole {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalConsole<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_message(&mut self, markup_text: &str, end: LineEnd) -> io::Result<()> {
        for segment in markup::parse(markup_text) {
            if self.color {
                match segment.color {
                    Some(color) => self.out.queue(SetForegroundColor(color))?,
                    None => self.out.queue(ResetColor)?,
                };
            }
            self.out.queue(Print(segment.text))?;
        }
        if self.color {
            self.out.queue(ResetColor)?;
        }
        let terminator = match end {
            LineEnd::Newline => "\n",
            LineEnd::InPlace => "\r",
        };
        self.out.queue(Print(terminator))?;
        self.out.flush()
    }
}

impl<W: Write> Console for TerminalConsole<W> {
    fn message(&mut self, markup_text: &str, end: LineEnd) {
        if let Err(err) = self.write_message(markup_text, end) {
            debug!("console write failed: {err}");
        }
    }
}

/// One recorded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub markup: String,
    pub end: LineEnd,
}

impl ConsoleLine {
    pub fn text(&self) -> String {
        markup::strip(&self.markup)
    }
}

/// In-memory console that keeps every message.
#[derive(Debug, Default)]
pub struct CapturedConsole {
    pub lines: Vec<ConsoleLine>,
}

impl CapturedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages meant to be redrawn in place.
    pub fn in_place(&self) -> impl Iterator<Item = &ConsoleLine> {
        self.lines.iter().filter(|l| l.end == LineEnd::InPlace)
    }

    pub fn plain_text(&self) -> Vec<String> {
        self.lines.iter().map(ConsoleLine::text).collect()
    }
}

impl Console for CapturedConsole {
    fn message(&mut self, markup: &str, end: LineEnd) {
        self.lines.push(ConsoleLine {
            markup: markup.to_string(),
            end,
        });
    }
}

/// Current terminal width, or a fixed fallback when not attached to one.
pub fn console_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .ok()
        .filter(|cols| *cols > 0)
        .unwrap_or(FALLBACK_CONSOLE_WIDTH)
}
