//! Dropdown renderer for the terminal prompt
//!
//! Draws the match list below the input line and moves the cursor back up,
//! so the prompt keeps owning the line the user types on. Only a window of
//! `visible_rows` entries is drawn; the window follows the highlight.

use std::io::Write;

use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use nu_ansi_term::{Color, Style};

use crate::config::DisplayConfig;
use crate::engine::{ListRenderer, ListView};
use crate::error::Result;

/// Renders a [`ListView`] as lines under the cursor
pub struct TerminalListRenderer<W: Write> {
    out: W,
    color: bool,
    visible_rows: usize,
    not_found_text: String,
    /// First entry of the drawn window
    offset: usize,
    highlight_style: Style,
    dim_style: Style,
}

impl<W: Write> TerminalListRenderer<W> {
    /// Create a renderer writing to `out`
    pub fn new(out: W, display: &DisplayConfig) -> Self {
        Self {
            out,
            color: display.color_output,
            visible_rows: display.visible_rows.max(1),
            not_found_text: display.not_found_text.clone(),
            offset: 0,
            highlight_style: Style::new().bold().fg(Color::Cyan),
            dim_style: Style::new().italic().fg(Color::DarkGray),
        }
    }

    /// Lines to draw for `view`, without cursor movement
    pub fn lines<T>(&mut self, view: &ListView<'_, T>) -> Vec<String> {
        if view.is_empty() {
            self.offset = 0;
            if view.visible && view.loading {
                return vec![self.paint(self.dim_style, "  searching...")];
            }
            return Vec::new();
        }

        let len = view.items.len();
        self.scroll_to(view.highlighted, len);
        let end = (self.offset + self.visible_rows).min(len);

        let mut lines = Vec::with_capacity(end - self.offset + 2);
        for (index, item) in view.items[self.offset..end].iter().enumerate() {
            let index = index + self.offset;
            let text = view.text(item);
            if view.highlighted == Some(index) {
                lines.push(self.paint(self.highlight_style, &format!("> {text}")));
            } else {
                lines.push(format!("  {text}"));
            }
        }

        if len > self.visible_rows {
            let position = view.highlighted.map_or(0, |i| i + 1);
            lines.push(self.paint(self.dim_style, &format!("  ({position}/{len})")));
        }
        if view.loading {
            lines.push(self.paint(self.dim_style, "  searching..."));
        }
        if view.not_found_visible {
            lines.push(self.paint(self.dim_style, &format!("  {}", self.not_found_text)));
        }

        lines
    }

    fn scroll_to(&mut self, highlighted: Option<usize>, len: usize) {
        match highlighted {
            Some(index) if index < self.offset => self.offset = index,
            Some(index) if index >= self.offset + self.visible_rows => {
                self.offset = index + 1 - self.visible_rows;
            }
            Some(_) => {}
            None => self.offset = 0,
        }
        self.offset = self.offset.min(len.saturating_sub(self.visible_rows));
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write, T> ListRenderer<T> for TerminalListRenderer<W> {
    fn render(&mut self, view: &ListView<'_, T>) -> Result<()> {
        let lines = self.lines(view);

        queue!(self.out, Clear(ClearType::FromCursorDown))?;
        for line in &lines {
            queue!(self.out, Print("\r\n"), Print(line))?;
        }
        if !lines.is_empty() {
            queue!(self.out, cursor::MoveUp(lines.len() as u16))?;
        }
        self.out.flush()?;

        Ok(())
    }
}
