//! Cursor and scroll window shared by the activity list and members table.
//!
//! `cursor` is an absolute row index; `offset` is the first visible row. The
//! cursor is always kept inside the visible window; moving it past either
//! edge drags the window with it.

use crate::event::{AppEvent, Direction};
use std::cell::Cell;

#[derive(Debug)]
pub struct ListCursor {
    pub cursor: usize,
    pub offset: usize,
    /// Cached from the last render so `handle()` can page by screenfuls.
    last_height: Cell<usize>,
}

impl Default for ListCursor {
    fn default() -> Self {
        Self { cursor: 0, offset: 0, last_height: Cell::new(20) }
    }
}

impl ListCursor {
    pub fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    /// Record the number of rows the last render could show.
    pub fn set_height(&self, height: usize) {
        self.last_height.set(height);
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    /// Pull the cursor back inside `0..len` after the underlying rows change.
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.offset = self.offset.min(len.saturating_sub(self.height())).min(self.cursor);
    }

    /// Move the cursor in response to a navigation event over `len` rows.
    pub fn handle(&mut self, event: &AppEvent, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        let last = len - 1;
        let page = self.height();

        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::ScrollUp => self.cursor = self.cursor.saturating_sub(page),
            AppEvent::ScrollDown => self.cursor = (self.cursor + page).min(last),
            AppEvent::ScrollToTop => self.cursor = 0,
            AppEvent::ScrollToBottom => self.cursor = last,
            _ => return,
        }

        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + page {
            self.offset = self.cursor + 1 - page;
        }
        tracing::debug!(cursor = self.cursor, offset = self.offset, "list: cursor moved");
    }

    /// Visible `(start, end)` for a viewport of `height` rows over `len` rows.
    pub fn window(&self, len: usize, height: usize) -> (usize, usize) {
        let height = height.max(1);
        let mut start = self.offset.min(len.saturating_sub(1));
        if self.cursor < start {
            start = self.cursor;
        } else if self.cursor >= start + height {
            start = self.cursor + 1 - height;
        }
        (start, (start + height).min(len))
    }
}
