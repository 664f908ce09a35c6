//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit / close stats tab"),
    ("1-9  /  ← h  → l", "Switch tab"),
    ("Tab", "Toggle focus: list ↔ search"),
    ("/", "Focus search"),
    ("Escape", "Leave search"),
    ("↑ k  /  ↓ j", "Move cursor"),
    ("PageUp / PageDown", "Move a screenful"),
    ("g  /  G", "Jump to top / bottom"),
    ("]  /  [", "Next / previous activity filter"),
    ("s  /  o", "Sort members by next column / flip order"),
    ("Enter", "Open stats for the selected player"),
    ("r", "Reload the current tab"),
    (":", "Command line (:help, :stats <name>, :filter <cat>, ...)"),
    ("?", "Toggle this help popup"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(84, BINDINGS.len() as u16 + 2, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" clanwatch keybindings (? to close) ")
            .border_style(self.theme.border_focused.add_modifier(Modifier::BOLD));

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("  {key:<22}"), self.theme.highlight),
                    Span::raw(format!(" {desc}")),
                ])
            })
            .collect();

        Paragraph::new(lines).block(block).render(popup, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect { x, y, width: width.min(area.width), height: height.min(area.height) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect(84, 16, area);
        assert_eq!(r, Rect::new(0, 0, 40, 10));
        let r = centered_rect(20, 4, area);
        assert_eq!(r, Rect::new(10, 3, 20, 4));
    }
}
