//! Colour theme for the clanwatch TUI.
//!
//! Themes are TOML files embedded in the binary via [`include_str!`], so the
//! application works without any files on disk. The `[ui] theme` config key
//! picks one by name; `:theme` cycles through them at runtime.
//!
//! # Player colours
//!
//! Player names are hashed to a stable index into the palette so the same
//! player always gets the same colour, whichever order the feed arrives in.

use clanwatch_core::{members::RankTier, ActivityCategory};
use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

/// Names accepted by [`Theme::by_name`], in `:theme` cycling order.
pub const THEME_NAMES: [&str; 2] = ["default", "gruvbox_dark"];

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawCategories {
    drop: RawStyle,
    pet: RawStyle,
    kill: RawStyle,
    level: RawStyle,
    quest: RawStyle,
    xp: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawRanks {
    owner: RawStyle,
    deputy_owner: RawStyle,
    overseer: RawStyle,
    coordinator: RawStyle,
    organiser: RawStyle,
    admin: RawStyle,
    general: RawStyle,
    other: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawText {
    muted: RawStyle,
    error: RawStyle,
    selected: RawStyle,
    highlight: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawPlayers {
    palette: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    categories: RawCategories,
    ranks: RawRanks,
    borders: RawBorders,
    text: RawText,
    players: RawPlayers,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme with every style pre-resolved.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    /// Indexed by [`ActivityCategory::index`].
    categories: [Style; ActivityCategory::ALL.len()],
    ranks: [Style; 8],

    pub border_focused: Style,
    pub border_command_bar: Style,
    pub border_unfocused: Style,

    /// Dates, hints, and the "no activity" notice.
    pub muted: Style,
    pub error: Style,
    /// The cursor row in lists and tables.
    pub selected: Style,
    /// Active filter chip and column headers.
    pub highlight: Style,

    player_palette: Vec<Color>,
}

impl Theme {
    /// Load the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str("default", DEFAULT_THEME_SRC)
            .expect("embedded default theme must be valid TOML")
    }

    /// Load the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str("gruvbox_dark", GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Look up an embedded theme by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::load_default()),
            "gruvbox_dark" | "gruvbox" => Some(Self::load_gruvbox_dark()),
            _ => None,
        }
    }

    /// The embedded theme after this one in [`THEME_NAMES`].
    pub fn next(&self) -> Self {
        let pos = THEME_NAMES.iter().position(|n| *n == self.name).unwrap_or(0);
        let name = THEME_NAMES[(pos + 1) % THEME_NAMES.len()];
        Self::by_name(name).unwrap_or_else(Self::load_default)
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(name: &str, src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        let c = raw.categories;
        let r = raw.ranks;
        Ok(Self {
            name: name.to_string(),
            categories: [
                c.drop.into_style(),
                c.pet.into_style(),
                c.kill.into_style(),
                c.level.into_style(),
                c.quest.into_style(),
                c.xp.into_style(),
            ],
            ranks: [
                r.owner.into_style(),
                r.deputy_owner.into_style(),
                r.overseer.into_style(),
                r.coordinator.into_style(),
                r.organiser.into_style(),
                r.admin.into_style(),
                r.general.into_style(),
                r.other.into_style(),
            ],
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            muted: raw.text.muted.into_style(),
            error: raw.text.error.into_style(),
            selected: raw.text.selected.into_style(),
            highlight: raw.text.highlight.into_style(),
            player_palette: raw.players.palette.iter().filter_map(|s| parse_color(s)).collect(),
        })
    }

    pub fn category_style(&self, category: ActivityCategory) -> Style {
        self.categories[category.index()]
    }

    pub fn rank_style(&self, rank: &str) -> Style {
        let idx = match RankTier::from_rank(rank) {
            RankTier::Owner => 0,
            RankTier::DeputyOwner => 1,
            RankTier::Overseer => 2,
            RankTier::Coordinator => 3,
            RankTier::Organiser => 4,
            RankTier::Admin => 5,
            RankTier::General => 6,
            RankTier::Other => 7,
        };
        self.ranks[idx]
    }

    /// Stable colour for a player name.
    pub fn player_style(&self, player: &str) -> Style {
        if self.player_palette.is_empty() {
            return Style::default();
        }
        let idx = stable_hash(&player.to_lowercase()) % self.player_palette.len();
        Style::default().fg(self.player_palette[idx])
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// djb2-style hash, stable across Rust versions and process restarts.
fn stable_hash(s: &str) -> usize {
    s.bytes().fold(5381usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts named terminal colours (`red`, `dark_gray`, ..), hex `#rrggbb`,
/// and 256-colour `indexed:N`.
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_themes_load() {
        for name in THEME_NAMES {
            let theme = Theme::by_name(name).unwrap();
            assert_eq!(theme.name, name);
            assert_ne!(theme.border_focused, Style::default());
            assert_ne!(theme.category_style(ActivityCategory::Drop), Style::default());
            assert!(!theme.player_palette.is_empty());
        }
    }

    #[test]
    fn next_cycles_back_to_default() {
        let theme = Theme::load_default().next();
        assert_eq!(theme.name, "gruvbox_dark");
        assert_eq!(theme.next().name, "default");
    }

    #[test]
    fn unknown_theme_name() {
        assert!(Theme::by_name("solarized").is_none());
    }

    #[test]
    fn rank_styles_follow_tiers() {
        let theme = Theme::load_default();
        assert_eq!(theme.rank_style("Deputy Owner"), theme.rank_style("deputy_owner"));
        assert_eq!(theme.rank_style("Recruit"), theme.rank_style("Corporal"));
        assert_ne!(theme.rank_style("Owner"), theme.rank_style("Recruit"));
    }

    #[test]
    fn player_style_ignores_case() {
        let theme = Theme::load_default();
        assert_eq!(theme.player_style("Zezima"), theme.player_style("zezima"));
    }

    #[test]
    fn parse_hex_and_indexed() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
        assert_eq!(parse_color("indexed:42"), Some(Color::Indexed(42)));
        assert_eq!(parse_color("chartreuse"), None);
    }
}
