//! Activity tab: the category filter strip above the merged clan feed.
//!
//! # Navigation (when the list is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k`, `↓` / `j` | Move the cursor |
//! | `PageUp` / `PageDown` | Move a screenful |
//! | `g` / `G` | Jump to newest / oldest |
//! | `]` / `[` | Next / previous category filter |
//! | `Enter` | Open the selected player's stats |
//!
//! The visible [`FeedView`] is re-derived from [`ViewState`] whenever the
//! filter, query, limit, or underlying load changes, never at render time.

use crate::{
    event::AppEvent,
    loader::LoadStatus,
    theme::Theme,
    widgets::list_cursor::ListCursor,
};
use clanwatch_core::{
    format::format_activity_text, ActivityCategory, ActivityEvent, CategoryFilter, FeedError,
    FeedLoad, FeedView, ViewState,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
        Wrap,
    },
};

pub const LOADING_MSG: &str = "Loading clan activity...";
pub const EMPTY_MSG: &str = "No activity found. Members may have private profiles.";
pub const FAILED_MSG: &str = "Unable to load clan activity. The RuneScape API may be unavailable.";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct ActivityFeedState {
    pub status: LoadStatus<FeedLoad>,
    view_state: ViewState,
    view: FeedView,
    pub cursor: ListCursor,
    pub show_dates: bool,
}

impl ActivityFeedState {
    pub fn new(limit: usize, show_dates: bool) -> Self {
        let view_state = ViewState::with_limit(limit);
        let view = view_state.view(&[]);
        Self {
            status: LoadStatus::Loading(0),
            view_state,
            view,
            cursor: ListCursor::default(),
            show_dates,
        }
    }

    pub fn view(&self) -> &FeedView {
        &self.view
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn begin_load(&mut self, id: u64) {
        self.status = LoadStatus::Loading(id);
        self.refresh();
        self.cursor.reset();
    }

    pub fn finish_load(&mut self, id: u64, result: Result<FeedLoad, FeedError>) {
        if self.status.settle(id, result) {
            self.refresh();
        }
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        tracing::debug!(filter = filter.label(), "feed: filter changed");
        self.view_state.filter = filter;
        self.refresh();
        self.cursor.reset();
    }

    pub fn set_query(&mut self, query: &str) {
        if self.view_state.query != query {
            self.view_state.query = query.to_string();
            self.refresh();
            self.cursor.reset();
        }
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.view_state.limit = limit;
        self.refresh();
    }

    fn refresh(&mut self) {
        let events = self.status.ready().map(FeedLoad::events).unwrap_or(&[]);
        self.view = self.view_state.view(events);
        self.cursor.clamp(self.view.events.len());
    }

    pub fn selected(&self) -> Option<&ActivityEvent> {
        self.view.events.get(self.cursor.cursor)
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::FilterNext => self.set_filter(self.view_state.filter.next()),
            AppEvent::FilterPrev => self.set_filter(self.view_state.filter.prev()),
            other => self.cursor.handle(other, self.view.events.len()),
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ActivityFeed<'a> {
    state: &'a ActivityFeedState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ActivityFeed<'a> {
    pub fn new(state: &'a ActivityFeedState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for ActivityFeed<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(LayoutDir::Vertical)
            .constraints([Constraint::Length(1), Constraint::Fill(1)])
            .split(area);

        render_filter_strip(self.state.view(), self.theme, rows[0], buf);

        let border_style =
            if self.focused { self.theme.border_focused } else { self.theme.border_unfocused };
        let view = self.state.view();
        let title = format!(" Recent activity ({} of {}) ", view.events.len(), view.matched);
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(rows[1]);
        block.render(rows[1], buf);

        let notice = match &self.state.status {
            LoadStatus::Loading(_) => Some((LOADING_MSG, self.theme.muted)),
            LoadStatus::Failed(_) => Some((FAILED_MSG, self.theme.error)),
            LoadStatus::Ready(FeedLoad::NoActivity { .. }) => Some((EMPTY_MSG, self.theme.muted)),
            LoadStatus::Ready(FeedLoad::Activity(_)) if view.events.is_empty() => {
                Some(("No events match the current filter.", self.theme.muted))
            }
            LoadStatus::Ready(FeedLoad::Activity(_)) => None,
        };
        if let Some((msg, style)) = notice {
            Paragraph::new(Line::from(Span::styled(msg, style)))
                .wrap(Wrap { trim: true })
                .render(inner, buf);
            return;
        }

        let height = inner.height as usize;
        self.state.cursor.set_height(height);
        let total = view.events.len();
        let (start, end) = self.state.cursor.window(total, height);

        let lines: Vec<Line> = view.events[start..end]
            .iter()
            .enumerate()
            .map(|(row, event)| {
                let line = render_event(event, self.state.show_dates, self.theme);
                if self.focused && start + row == self.state.cursor.cursor {
                    line.patch_style(self.theme.selected)
                } else {
                    line
                }
            })
            .collect();

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect { x: inner.right().saturating_sub(1), width: 1, ..inner };
        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state =
            ScrollbarState::new(total).position(start).viewport_content_length(height);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight).begin_symbol(None).end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

/// `All (42)  Drops (10)  Pets (1) ...` with the active filter highlighted.
/// Empty categories are left out unless they are the active filter.
fn render_filter_strip(view: &FeedView, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let filters = std::iter::once(CategoryFilter::All)
        .chain(ActivityCategory::ALL.into_iter().map(CategoryFilter::Only))
        .filter(|&f| f == CategoryFilter::All || f == view.filter || view.counts.get(f) > 0);

    let mut spans = Vec::new();
    for filter in filters {
        let label = format!(" {} ({}) ", filter.label(), view.counts.get(filter));
        let style = if filter == view.filter {
            theme.highlight
        } else {
            match filter {
                CategoryFilter::All => Style::default(),
                CategoryFilter::Only(c) => theme.category_style(c),
            }
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    buf.set_line(area.x, area.y, &Line::from(spans), area.width);
}

fn render_event(event: &ActivityEvent, show_dates: bool, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();

    spans.push(Span::styled(
        format!("{:<6} ", event.category.label()),
        theme.category_style(event.category),
    ));
    spans.push(Span::styled(format!("{:<12} ", event.player), theme.player_style(&event.player)));
    spans.push(Span::styled("│ ".to_string(), theme.muted));
    spans.push(Span::raw(format_activity_text(event.display_text())));

    if show_dates && !event.date.is_empty() {
        spans.push(Span::styled(format!("  {}", event.date), theme.muted));
    }
    Line::from(spans)
}
