//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Loads never block the
//! loop: [`AppState`] queues [`LoadRequest`]s, the loop hands them to the
//! [`Loader`], and finished results are applied once per frame.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction},
    loader::{LoadRequest, LoadResult, Loader},
    theme::Theme,
    widgets::{
        activity_feed::{ActivityFeed, ActivityFeedState},
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        member_table::{MemberTable, MemberTableState},
        query_bar::{QueryBar, QueryBarState},
        stats_panel::{StatsPanel, StatsPanelState},
        tab_bar::TabBar,
    },
};
use clanwatch_core::config::Config;
use clanwatch_feeds::endpoints::Endpoints;
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Focus + tab types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

pub enum TabKind {
    Activity(ActivityFeedState),
    Members(MemberTableState),
    Stats(StatsPanelState),
}

pub struct TabState {
    pub kind: TabKind,
    pub query: QueryBarState,
}

impl TabState {
    fn new(kind: TabKind) -> Self {
        Self { kind, query: QueryBarState::default() }
    }

    pub fn label(&self) -> &str {
        match &self.kind {
            TabKind::Activity(_) => "Activity",
            TabKind::Members(_) => "Members",
            TabKind::Stats(s) => &s.player,
        }
    }

    pub fn is_loading(&self) -> bool {
        use crate::loader::LoadStatus::Loading;
        match &self.kind {
            TabKind::Activity(s) => matches!(s.status, Loading(_)),
            TabKind::Members(s) => matches!(s.status, Loading(_)),
            TabKind::Stats(s) => matches!(s.status, Loading(_)),
        }
    }

    fn searchable(&self) -> bool {
        !matches!(self.kind, TabKind::Stats(_))
    }

    fn handle_list(&mut self, event: &AppEvent) {
        match &mut self.kind {
            TabKind::Activity(s) => s.handle(event),
            TabKind::Members(s) => s.handle(event),
            TabKind::Stats(s) => s.handle(event),
        }
    }

    fn sync_query(&mut self) {
        match &mut self.kind {
            TabKind::Activity(s) => s.set_query(&self.query.query),
            TabKind::Members(s) => s.set_query(&self.query.query),
            TabKind::Stats(_) => {}
        }
    }

    fn selected_player(&self) -> Option<String> {
        match &self.kind {
            TabKind::Activity(s) => s.selected().map(|e| e.player.clone()),
            TabKind::Members(s) => s.selected().map(|m| m.name.clone()),
            TabKind::Stats(_) => None,
        }
    }

    fn reload_request(&self) -> LoadRequest {
        match &self.kind {
            TabKind::Activity(_) => LoadRequest::Feed,
            TabKind::Members(_) => LoadRequest::Roster,
            TabKind::Stats(s) => LoadRequest::Stats(s.player.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    /// Activity and members first, then one tab per opened player.
    pub tabs: Vec<TabState>,
    pub active_tab: usize,
    pub focus: Focus,
    /// Focus before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub clan: String,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
    endpoints: Endpoints,
    /// Loads requested since the event loop last spawned them.
    pending: Vec<LoadRequest>,
}

impl AppState {
    pub const ACTIVITY_TAB: usize = 0;
    pub const MEMBERS_TAB: usize = 1;

    pub fn new(config: &Config, theme: Theme) -> Self {
        let activity = ActivityFeedState::new(config.feed.limit, config.ui.show_dates);
        Self {
            tabs: vec![
                TabState::new(TabKind::Activity(activity)),
                TabState::new(TabKind::Members(MemberTableState::default())),
            ],
            active_tab: Self::ACTIVITY_TAB,
            focus: Focus::List,
            prev_focus: Focus::List,
            theme,
            clan: config.clan.name.clone(),
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
            endpoints: Endpoints::from_config(config),
            pending: vec![LoadRequest::Feed],
        }
    }

    pub fn activity_mut(&mut self) -> &mut ActivityFeedState {
        match &mut self.tabs[Self::ACTIVITY_TAB].kind {
            TabKind::Activity(s) => s,
            _ => unreachable!("tab 0 is always the activity tab"),
        }
    }

    pub fn members_mut(&mut self) -> &mut MemberTableState {
        match &mut self.tabs[Self::MEMBERS_TAB].kind {
            TabKind::Members(s) => s,
            _ => unreachable!("tab 1 is always the members tab"),
        }
    }

    fn stats_tabs_mut(&mut self) -> impl Iterator<Item = &mut StatsPanelState> {
        self.tabs.iter_mut().filter_map(|t| match &mut t.kind {
            TabKind::Stats(s) => Some(s),
            _ => None,
        })
    }

    /// Loads queued since the last call, emptied.
    pub fn take_requests(&mut self) -> Vec<LoadRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Point the pane owning `request` at load `id`.
    pub fn begin(&mut self, request: &LoadRequest, id: u64) {
        match request {
            LoadRequest::Feed => self.activity_mut().begin_load(id),
            LoadRequest::Roster => self.members_mut().begin_load(id),
            LoadRequest::Stats(player) => {
                if let Some(tab) = self.stats_tabs_mut().find(|s| s.player.eq_ignore_ascii_case(player)) {
                    tab.begin_load(id);
                }
            }
        }
    }

    pub fn apply(&mut self, result: LoadResult) {
        match result {
            LoadResult::Feed { id, result } => self.activity_mut().finish_load(id, result),
            LoadResult::Roster { id, result } => self.members_mut().finish_load(id, result),
            LoadResult::Stats { id, result } => {
                if let Some(tab) = self.stats_tabs_mut().find(|s| s.is_loading(id)) {
                    tab.finish_load(id, result);
                }
            }
        }
    }

    pub fn select_tab(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.active_tab = index;
            if !self.tabs[index].searchable() && self.focus == Focus::QueryBar {
                self.focus = Focus::List;
            }
            // The roster loads the first time its tab is shown.
            if index == Self::MEMBERS_TAB
                && matches!(self.members_mut().status, crate::loader::LoadStatus::Loading(0))
            {
                self.pending.push(LoadRequest::Roster);
            }
        }
    }

    pub fn reload_active(&mut self) {
        let request = self.tabs[self.active_tab].reload_request();
        tracing::info!(?request, "reload");
        self.pending.push(request);
    }

    /// Switch to the player's stats tab, opening and loading it if needed.
    pub fn open_stats(&mut self, player: &str) {
        let player = player.trim();
        let existing = self.tabs.iter().position(|t| match &t.kind {
            TabKind::Stats(s) => s.player.eq_ignore_ascii_case(player),
            _ => false,
        });
        match existing {
            Some(index) => self.select_tab(index),
            None => {
                let panel = StatsPanelState::new(player, self.endpoints.avatar(player));
                self.tabs.push(TabState::new(TabKind::Stats(panel)));
                self.pending.push(LoadRequest::Stats(player.to_string()));
                self.select_tab(self.tabs.len() - 1);
            }
        }
    }

    /// Close a stats tab, or quit when on one of the two fixed tabs.
    pub fn close_or_quit(&mut self) {
        if self.active_tab > Self::MEMBERS_TAB {
            tracing::debug!(tab = self.active_tab, "closing tab");
            self.tabs.remove(self.active_tab);
            self.active_tab -= 1;
        } else {
            tracing::debug!("quit");
            self.quit = true;
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                self.show_help = false;
            }
            return;
        }

        if self.focus == Focus::Command {
            self.handle_command(event);
            return;
        }

        if self.focus == Focus::QueryBar {
            match event {
                AppEvent::Quit => self.quit = true,
                AppEvent::Escape | AppEvent::Enter | AppEvent::FocusNext => self.focus = Focus::List,
                other => {
                    let tab = &mut self.tabs[self.active_tab];
                    if tab.query.handle(&other) {
                        tab.sync_query();
                    }
                }
            }
            return;
        }

        match event {
            AppEvent::Char('?') => self.show_help = true,
            AppEvent::Char(':') => {
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }
            AppEvent::Char(c @ '1'..='9') => {
                self.select_tab(c as usize - '1' as usize);
            }
            AppEvent::Quit => self.close_or_quit(),
            AppEvent::FocusNext | AppEvent::QueryFocus => {
                if self.tabs[self.active_tab].searchable() {
                    self.focus = Focus::QueryBar;
                }
            }
            AppEvent::Nav(Direction::Left) => {
                let n = self.tabs.len();
                self.select_tab((self.active_tab + n - 1) % n);
            }
            AppEvent::Nav(Direction::Right) => {
                self.select_tab((self.active_tab + 1) % self.tabs.len());
            }
            AppEvent::Reload => self.reload_active(),
            AppEvent::Enter => {
                if let Some(player) = self.tabs[self.active_tab].selected_player() {
                    self.open_stats(&player);
                }
            }
            AppEvent::Escape | AppEvent::Resize(_, _) => {}
            other => self.tabs[self.active_tab].handle_list(&other),
        }
    }

    fn handle_command(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => match Command::parse(&self.command_bar.input) {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                    if let Err(msg) = execute_command(self, cmd) {
                        self.command_bar.error = Some(msg);
                        self.focus = Focus::Command;
                    }
                }
                Err(msg) if msg.is_empty() => {
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                Err(msg) => self.command_bar.error = Some(msg),
            },
            other => self.command_bar.handle(&other),
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    loader: Loader,
}

impl App {
    pub fn new(state: AppState, loader: Loader) -> Self {
        Self { state, loader }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore the terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            for request in self.state.take_requests() {
                let id = self.loader.spawn(request.clone());
                self.state.begin(&request, id);
            }
            for result in self.loader.drain() {
                self.state.apply(result);
            }

            terminal.draw(|frame| draw(frame, &self.state))?;

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                let raw = ct_event::read()?;
                if let Event::Key(key) = &raw {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                }
                // Insert-mode mapping when a text widget is focused
                let app_event = if matches!(self.state.focus, Focus::QueryBar | Focus::Command) {
                    event::to_app_event_insert(raw)
                } else {
                    event::to_app_event(raw)
                };
                if let Some(ev) = app_event {
                    tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                    self.state.handle(ev);
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let tab = &state.tabs[state.active_tab];
    let search = tab.searchable();

    // 1-line tab bar | body | 3-line search bar (list tabs only)
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(if search { 3 } else { 0 }),
        ])
        .split(area);

    frame.render_widget(TabBar::new(&state.tabs, state.active_tab, &state.clan, &state.theme), vert[0]);

    let list_focused = state.focus == Focus::List;
    match &tab.kind {
        TabKind::Activity(s) => {
            frame.render_widget(ActivityFeed::new(s, list_focused, &state.theme), vert[1])
        }
        TabKind::Members(s) => {
            frame.render_widget(MemberTable::new(s, list_focused, &state.theme), vert[1])
        }
        TabKind::Stats(s) => {
            frame.render_widget(StatsPanel::new(s, list_focused, &state.theme), vert[1])
        }
    }

    let placeholder = match tab.kind {
        TabKind::Members(_) => "press / to search members by name or rank",
        _ => "press / to search by player or activity",
    };
    let query_bar = QueryBar::new(&tab.query, state.focus == Focus::QueryBar, placeholder, &state.theme);
    if search {
        if state.focus == Focus::QueryBar {
            frame.set_cursor_position(query_bar.cursor_position(vert[2]));
        }
        frame.render_widget(query_bar, vert[2]);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        frame.set_cursor_position((state.command_bar.cursor_col(cmd_area), cmd_area.y));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}
