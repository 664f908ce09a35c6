//! Player stats tab: summary header, skills table, and recent activity.

use crate::{event::AppEvent, loader::LoadStatus, theme::Theme, widgets::list_cursor::ListCursor};
use clanwatch_core::{
    classify::classify,
    format::{format_activity_text, format_number, group_thousands},
    stats::PlayerStats,
    FeedError,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table, Widget, Wrap},
};

pub struct StatsPanelState {
    pub player: String,
    pub avatar_url: String,
    pub status: LoadStatus<PlayerStats>,
    pub cursor: ListCursor,
}

impl StatsPanelState {
    pub fn new(player: impl Into<String>, avatar_url: String) -> Self {
        Self {
            player: player.into(),
            avatar_url,
            status: LoadStatus::Loading(0),
            cursor: ListCursor::default(),
        }
    }

    pub fn begin_load(&mut self, id: u64) {
        self.status = LoadStatus::Loading(id);
        self.cursor.reset();
    }

    pub fn finish_load(&mut self, id: u64, result: Result<PlayerStats, FeedError>) -> bool {
        self.status.settle(id, result)
    }

    pub fn is_loading(&self, id: u64) -> bool {
        self.status == LoadStatus::Loading(id)
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let skills = self.status.ready().map_or(0, |s| s.skills.len());
        self.cursor.handle(event, skills);
    }
}

pub struct StatsPanel<'a> {
    state: &'a StatsPanelState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> StatsPanel<'a> {
    pub fn new(state: &'a StatsPanelState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style =
            if self.focused { self.theme.border_focused } else { self.theme.border_unfocused };

        let stats = match &self.state.status {
            LoadStatus::Ready(stats) => stats,
            LoadStatus::Loading(_) => {
                let msg = format!("Loading stats for {}...", self.state.player);
                notice(&msg, self.theme.muted, border_style, area, buf);
                return;
            }
            LoadStatus::Failed(FeedError::PlayerNotFound { player }) => {
                let msg = format!("Player \"{player}\" not found. Check the spelling and try again.");
                notice(&msg, self.theme.error, border_style, area, buf);
                return;
            }
            LoadStatus::Failed(err) => {
                let msg = format!("Unable to load stats for {}: {err}", self.state.player);
                notice(&msg, self.theme.error, border_style, area, buf);
                return;
            }
        };

        let rows = Layout::default()
            .direction(LayoutDir::Vertical)
            .constraints([Constraint::Length(5), Constraint::Fill(1)])
            .split(area);
        let cols = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Fill(1)])
            .split(rows[1]);

        render_summary(stats, &self.state.avatar_url, self.theme, border_style, rows[0], buf);
        render_skills(self.state, stats, self.theme, border_style, cols[0], buf);
        render_recent(stats, self.theme, cols[1], buf);
    }
}

fn notice(msg: &str, style: Style, border_style: Style, area: Rect, buf: &mut Buffer) {
    let block = Block::bordered().title(" Player stats ").border_style(border_style);
    Paragraph::new(Line::from(Span::styled(msg.to_string(), style)))
        .wrap(Wrap { trim: true })
        .block(block)
        .render(area, buf);
}

fn render_summary(
    stats: &PlayerStats,
    avatar_url: &str,
    theme: &Theme,
    border_style: Style,
    area: Rect,
    buf: &mut Buffer,
) {
    let opt = |v: Option<u32>| v.map_or_else(|| "-".to_string(), |n| n.to_string());
    let rank = stats.overall_rank.map_or_else(|| "-".to_string(), group_thousands);

    let lines = vec![
        Line::from(vec![
            Span::styled("Total level ", theme.muted),
            Span::raw(group_thousands(u64::from(stats.total_level))),
            Span::styled("   Total XP ", theme.muted),
            Span::raw(format_number(stats.total_xp)),
            Span::styled("   Combat ", theme.muted),
            Span::raw(opt(stats.combat_level)),
        ]),
        Line::from(vec![
            Span::styled("Quests ", theme.muted),
            Span::raw(opt(stats.quests_complete)),
            Span::styled("   Overall rank ", theme.muted),
            Span::raw(rank),
        ]),
        Line::from(Span::styled(avatar_url.to_string(), theme.muted)),
    ];

    let block = Block::bordered()
        .title(Span::styled(format!(" {} ", stats.display_name), theme.player_style(&stats.display_name)))
        .border_style(border_style);
    Paragraph::new(lines).block(block).render(area, buf);
}

fn render_skills(
    state: &StatsPanelState,
    stats: &PlayerStats,
    theme: &Theme,
    border_style: Style,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::bordered().title(" Skills ").border_style(border_style);
    let inner = block.inner(area);
    block.render(area, buf);

    let height = (inner.height as usize).saturating_sub(1);
    state.cursor.set_height(height);
    let (start, end) = state.cursor.window(stats.skills.len(), height);

    let rows = stats.skills[start..end].iter().enumerate().map(|(i, skill)| {
        let row = Row::new(vec![
            Cell::from(skill.name.clone()),
            Cell::from(skill.level.to_string()),
            Cell::from(group_thousands(skill.xp)),
            Cell::from(skill.rank.map_or_else(|| "-".to_string(), group_thousands)),
        ]);
        if start + i == state.cursor.cursor {
            row.style(theme.selected)
        } else {
            row
        }
    });

    Table::new(
        rows,
        [Constraint::Fill(1), Constraint::Length(6), Constraint::Length(13), Constraint::Length(11)],
    )
    .header(Row::new(["Skill", "Level", "XP", "Rank"]).style(theme.highlight))
    .render(inner, buf);
}

fn render_recent(stats: &PlayerStats, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let block = Block::bordered().title(" Recent activity ").border_style(theme.border_unfocused);

    if stats.recent.is_empty() {
        Paragraph::new(Span::styled("No recent activity (the profile may be private).", theme.muted))
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
        return;
    }

    let lines: Vec<Line> = stats
        .recent
        .iter()
        .flat_map(|activity| {
            let style = classify(&activity.details, &activity.text)
                .map_or(Style::default(), |c| theme.category_style(c));
            [
                Line::from(Span::styled(format_activity_text(&activity.text), style)),
                Line::from(Span::styled(format!("  {}", activity.date), theme.muted)),
            ]
        })
        .collect();
    Paragraph::new(lines).block(block).render(area, buf);
}
