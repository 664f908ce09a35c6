//! Vim-style command bar: a single-line overlay at the bottom of the screen.
//!
//! Opened with `:` from anywhere except the query bar. `Enter` parses and
//! runs the command (see [`crate::commands::Command`]); `Escape` cancels.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::query_bar::{next_boundary, prev_boundary};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

#[derive(Debug, Default)]
pub struct CommandBarState {
    /// The text typed after the `:` prefix.
    pub input: String,
    pub cursor: usize,
    /// Error from the last failed command, cleared on the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
        self.error = None;
    }

    /// Apply an editing event while the bar is focused.
    pub fn handle(&mut self, event: &AppEvent) {
        self.error = None;

        match event {
            AppEvent::Char(c) => {
                self.input.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
            }
            AppEvent::Backspace if self.cursor > 0 => {
                let prev = prev_boundary(&self.input, self.cursor);
                self.input.remove(prev);
                self.cursor = prev;
            }
            AppEvent::Nav(Direction::Left) => self.cursor = prev_boundary(&self.input, self.cursor),
            AppEvent::Nav(Direction::Right) => self.cursor = next_boundary(&self.input, self.cursor),
            _ => {}
        }
    }

    /// Absolute terminal column of the text cursor; `:` occupies column 0.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        let col = 1 + self.input[..self.cursor].chars().count() as u16;
        (area.x + col).min(area.right().saturating_sub(1))
    }
}

/// Single-row overlay. The caller passes a 1-row `Rect`.
pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = match &self.state.error {
            Some(err) => Line::from(Span::styled(format!("E  {err}"), self.theme.error)),
            None => Line::from(vec![
                Span::styled(":", self.theme.border_command_bar.add_modifier(Modifier::BOLD)),
                Span::styled(self.state.input.as_str(), Style::default()),
            ]),
        };
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
