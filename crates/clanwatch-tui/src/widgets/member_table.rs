//! Members tab: the clan roster as a sortable, searchable table.
//!
//! `s` moves the sort to the next column, `o` flips its direction, and the
//! query bar narrows rows by name or rank. `Enter` opens the selected
//! member's stats.

use crate::{event::AppEvent, loader::LoadStatus, theme::Theme, widgets::list_cursor::ListCursor};
use clanwatch_core::{
    format::group_thousands,
    members::{filter_members, sort_members, MemberColumn, MemberSort},
    ClanMember, FeedError,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table, Widget},
};

pub const LOADING_MSG: &str = "Loading clan members...";
pub const FAILED_MSG: &str = "Unable to load clan members. The RuneScape API may be unavailable.";

pub struct MemberTableState {
    pub status: LoadStatus<Vec<ClanMember>>,
    pub sort: MemberSort,
    query: String,
    rows: Vec<ClanMember>,
    pub cursor: ListCursor,
}

impl Default for MemberTableState {
    fn default() -> Self {
        Self {
            status: LoadStatus::Loading(0),
            sort: MemberSort::default(),
            query: String::new(),
            rows: Vec::new(),
            cursor: ListCursor::default(),
        }
    }
}

impl MemberTableState {
    pub fn rows(&self) -> &[ClanMember] {
        &self.rows
    }

    pub fn begin_load(&mut self, id: u64) {
        self.status = LoadStatus::Loading(id);
        self.refresh();
    }

    pub fn finish_load(&mut self, id: u64, result: Result<Vec<ClanMember>, FeedError>) {
        if self.status.settle(id, result) {
            self.refresh();
        }
    }

    pub fn set_query(&mut self, query: &str) {
        if self.query != query {
            self.query = query.to_string();
            self.refresh();
            self.cursor.reset();
        }
    }

    pub fn select_column(&mut self, column: MemberColumn) {
        self.sort = self.sort.select(column);
        tracing::debug!(column = column.label(), ascending = self.sort.ascending, "members: sort");
        self.refresh();
    }

    fn refresh(&mut self) {
        let members = self.status.ready().map(Vec::as_slice).unwrap_or(&[]);
        self.rows = filter_members(members, &self.query);
        sort_members(&mut self.rows, self.sort);
        self.cursor.clamp(self.rows.len());
    }

    pub fn selected(&self) -> Option<&ClanMember> {
        self.rows.get(self.cursor.cursor)
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::SortNext => self.select_column(self.sort.column.next()),
            AppEvent::SortToggle => self.select_column(self.sort.column),
            other => self.cursor.handle(other, self.rows.len()),
        }
    }
}

pub struct MemberTable<'a> {
    state: &'a MemberTableState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> MemberTable<'a> {
    pub fn new(state: &'a MemberTableState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for MemberTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style =
            if self.focused { self.theme.border_focused } else { self.theme.border_unfocused };
        let total = self.state.status.ready().map_or(0, Vec::len);
        let title = format!(" Members ({} of {}) ", self.state.rows.len(), total);
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let notice = match &self.state.status {
            LoadStatus::Loading(_) => Some((LOADING_MSG, self.theme.muted)),
            LoadStatus::Failed(_) => Some((FAILED_MSG, self.theme.error)),
            LoadStatus::Ready(_) if self.state.rows.is_empty() => {
                Some(("No members match the current search.", self.theme.muted))
            }
            LoadStatus::Ready(_) => None,
        };
        if let Some((msg, style)) = notice {
            Paragraph::new(Line::from(Span::styled(msg, style))).render(inner, buf);
            return;
        }

        let header = Row::new(MemberColumn::ALL.map(|col| {
            let arrow = match (col == self.state.sort.column, self.state.sort.ascending) {
                (true, true) => " ▲",
                (true, false) => " ▼",
                (false, _) => "",
            };
            Cell::from(format!("{}{arrow}", col.label()))
        }))
        .style(self.theme.highlight);

        // One row for the header.
        let height = (inner.height as usize).saturating_sub(1);
        self.state.cursor.set_height(height);
        let (start, end) = self.state.cursor.window(self.state.rows.len(), height);

        let rows = self.state.rows[start..end].iter().enumerate().map(|(i, m)| {
            let row = Row::new(vec![
                Cell::from(m.name.clone()).style(self.theme.player_style(&m.name)),
                Cell::from(m.rank.clone()).style(self.theme.rank_style(&m.rank)),
                Cell::from(group_thousands(m.total_xp)),
                Cell::from(group_thousands(m.kills)),
            ]);
            if self.focused && start + i == self.state.cursor.cursor {
                row.style(self.theme.selected)
            } else {
                row
            }
        });

        Table::new(
            rows,
            [
                Constraint::Fill(2),
                Constraint::Fill(2),
                Constraint::Length(16),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, rank: &str, total_xp: u64) -> ClanMember {
        ClanMember { name: name.into(), rank: rank.into(), total_xp, kills: 0 }
    }

    fn loaded() -> MemberTableState {
        let mut state = MemberTableState::default();
        state.begin_load(3);
        state.finish_load(
            3,
            Ok(vec![
                member("alpha", "Recruit", 10),
                member("Bravo", "Owner", 300),
                member("charlie", "General", 20),
            ]),
        );
        state
    }

    fn names(state: &MemberTableState) -> Vec<&str> {
        state.rows().iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn default_sort_is_total_xp_descending() {
        assert_eq!(names(&loaded()), ["Bravo", "charlie", "alpha"]);
    }

    #[test]
    fn sort_next_then_toggle() {
        let mut state = loaded();
        // TotalXp -> Kills -> Name
        state.handle(&AppEvent::SortNext);
        state.handle(&AppEvent::SortNext);
        assert_eq!(state.sort.column, MemberColumn::Name);
        assert_eq!(names(&state), ["alpha", "Bravo", "charlie"]);

        state.handle(&AppEvent::SortToggle);
        assert_eq!(names(&state), ["charlie", "Bravo", "alpha"]);
    }

    #[test]
    fn query_matches_rank() {
        let mut state = loaded();
        state.set_query("own");
        assert_eq!(names(&state), ["Bravo"]);
        assert_eq!(state.selected().map(|m| m.name.as_str()), Some("Bravo"));
    }
}
