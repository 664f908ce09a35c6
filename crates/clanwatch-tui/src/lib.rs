//! clanwatch TUI: ratatui application shell.
//!
//! Three kinds of tab: the sampled clan activity feed, the members table,
//! and one stats tab per player opened from either list or with `:stats`.

pub mod app;
pub mod commands;
pub mod event;
pub mod loader;
pub mod theme;
pub mod widgets;

pub use app::App;

use clanwatch_core::config::Config;
use clanwatch_feeds::ClanClient;

/// Run the TUI until the user quits. Loads run on `runtime`.
pub fn run(config: &Config, client: ClanClient, runtime: tokio::runtime::Handle) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.ui.theme, "unknown theme, using default");
        theme::Theme::load_default()
    });
    let state = app::AppState::new(config, theme);
    let loader = loader::Loader::new(runtime, client);
    App::new(state, loader).run()
}
