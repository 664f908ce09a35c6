//! Query bar widget: the search input at the bottom of the screen.
//!
//! On the activity tab the query narrows events by player, details, or text;
//! on the members tab it narrows rows by name or rank. `←` / `→` move the
//! cursor while the bar is focused.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

#[derive(Debug, Default)]
pub struct QueryBarState {
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
}

impl QueryBarState {
    /// Apply an editing event. Returns true when the query text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(query = %self.query, "query: char inserted");
                true
            }
            AppEvent::Backspace if self.cursor > 0 => {
                let prev = prev_boundary(&self.query, self.cursor);
                self.query.remove(prev);
                self.cursor = prev;
                tracing::debug!(query = %self.query, "query: backspace");
                true
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = prev_boundary(&self.query, self.cursor);
                false
            }
            AppEvent::Nav(Direction::Right) => {
                self.cursor = next_boundary(&self.query, self.cursor);
                false
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }
}

pub(crate) fn prev_boundary(s: &str, cursor: usize) -> usize {
    s[..cursor].char_indices().last().map_or(0, |(i, _)| i)
}

pub(crate) fn next_boundary(s: &str, cursor: usize) -> usize {
    s[cursor..].char_indices().nth(1).map_or(s.len(), |(i, _)| cursor + i)
}

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    focused: bool,
    placeholder: &'a str,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(state: &'a QueryBarState, focused: bool, placeholder: &'a str, theme: &'a Theme) -> Self {
        Self { state, focused, placeholder, theme }
    }

    /// Absolute terminal position of the text cursor. Pass to
    /// `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = self.state.query[..self.state.cursor].chars().count() as u16;
        ((area.x + 1 + col).min(area.right().saturating_sub(1)), area.y + 1)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style =
            if self.focused { self.theme.border_focused } else { self.theme.border_unfocused };
        let block = Block::bordered().title("Search").border_style(border_style);

        let line = if self.state.query.is_empty() && !self.focused {
            Line::from(Span::styled(self.placeholder, self.theme.muted))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(line).block(block).render(area, buf);
    }
}
