//! Tab bar widget: the strip of open tabs at the top of the screen.

use crate::app::TabState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Tabs, Widget},
};

/// Renders the 1-line tab strip. A `…` suffix marks tabs still loading; the
/// clan name and keybinding hints are right-aligned in the same row.
pub struct TabBar<'a> {
    tabs: &'a [TabState],
    active: usize,
    clan: &'a str,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(tabs: &'a [TabState], active: usize, clan: &'a str, theme: &'a Theme) -> Self {
        Self { tabs, active, clan, theme }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels: Vec<Line> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let busy = if tab.is_loading() { " …" } else { "" };
                Line::from(format!(" {}:{}{} ", i + 1, tab.label(), busy))
            })
            .collect();

        Tabs::new(labels)
            .select(self.active)
            .highlight_style(self.theme.highlight)
            .divider("")
            .render(area, buf);

        let hint = format!(" {}  q:quit  ?:help ", self.clan);
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(hint_x, area.y, hint, self.theme.muted);
    }
}
