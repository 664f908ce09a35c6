//! Ratatui widgets for the clanwatch TUI.

pub mod activity_feed;
pub mod command_bar;
pub mod help;
pub mod list_cursor;
pub mod member_table;
pub mod query_bar;
pub mod stats_panel;
pub mod tab_bar;
