//! clanwatch: RuneScape clan dashboard for the terminal.
//!
//! The binary either launches the TUI or, with a subcommand, prints one
//! report and exits. This crate holds the plain-text renderers behind those
//! subcommands so integration tests can import them directly.
//!
//! # Architecture
//!
//! ```text
//! clanwatch-feeds (relay ──► roster / activity / stats)
//!        │
//!        ▼
//! clanwatch-core (classify ──► filter) ──► clanwatch-tui | report
//! ```

pub mod report;
