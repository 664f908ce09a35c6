//! `:` commands.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Close the stats tab, or quit from the activity/members tabs |
//! | `q!`, `quit!` | Quit from anywhere |
//! | `help` | Toggle the help popup |
//! | `theme [name]` | Switch theme, or cycle when no name is given |
//! | `dates` | Toggle activity dates |
//! | `reload` | Reload the current tab |
//! | `stats <name>` | Open a stats tab for a player |
//! | `filter <category>` | Set the activity filter (`all`, `drops`, `pets`, ...) |
//! | `limit <n>` | Show at most `n` activity events |
//! | `sort <column>` | Sort members by `name`, `rank`, `xp`, or `kills` |

use crate::{app::AppState, theme::Theme};
use clanwatch_core::{members::MemberColumn, CategoryFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Exit,
    Help,
    Theme(Option<String>),
    Dates,
    Reload,
    Stats(String),
    Filter(CategoryFilter),
    Limit(usize),
    Sort(MemberColumn),
}

impl Command {
    /// Parse the text after the `:` prefix.
    ///
    /// An empty string returns `Err("")`, meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "q!" | "quit!" => Ok(Command::Exit),
            "help" => Ok(Command::Help),
            "dates" => Ok(Command::Dates),
            "reload" => Ok(Command::Reload),
            "theme" if rest.is_empty() => Ok(Command::Theme(None)),
            "theme" => Ok(Command::Theme(Some(rest.to_ascii_lowercase()))),
            "stats" if rest.is_empty() => Err("usage: stats <player name>".to_string()),
            "stats" => Ok(Command::Stats(rest.to_string())),
            "filter" => rest
                .parse()
                .map(Command::Filter)
                .map_err(|_| format!("unknown category: {rest}")),
            "limit" => match rest.parse::<usize>() {
                Ok(n) if n > 0 => Ok(Command::Limit(n)),
                _ => Err("usage: limit <n>, n ≥ 1".to_string()),
            },
            "sort" => rest.parse().map(Command::Sort),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`]. An `Err` is shown in the command bar.
pub fn execute_command(s: &mut AppState, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Quit => s.close_or_quit(),
        Command::Exit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Theme(None) => s.theme = s.theme.next(),
        Command::Theme(Some(name)) => {
            s.theme = Theme::by_name(&name).ok_or_else(|| format!("unknown theme: {name}"))?;
        }
        Command::Dates => {
            let feed = s.activity_mut();
            feed.show_dates = !feed.show_dates;
        }
        Command::Reload => s.reload_active(),
        Command::Stats(player) => s.open_stats(&player),
        Command::Filter(filter) => {
            s.activity_mut().set_filter(filter);
            s.active_tab = AppState::ACTIVITY_TAB;
        }
        Command::Limit(n) => s.activity_mut().set_limit(n),
        Command::Sort(column) => {
            s.members_mut().select_column(column);
            s.select_tab(AppState::MEMBERS_TAB);
        }
    }
    Ok(())
}
