//! clanwatch-core: clanwatch core library.
//!
//! Pure data model and pipeline logic with no network access, so every layer
//! can be unit-tested against literal payloads.
//!
//! # Architecture
//!
//! ```text
//! roster ──► (feeds: sample + fetch) ──► activity ──► classify ──► filter ──► UI
//!                                           │
//!                                           └──► stats
//! ```

pub mod activity;
pub mod classify;
pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod members;
pub mod roster;
pub mod stats;
pub mod types;

pub use error::FeedError;
pub use filter::{CategoryFilter, FeedView, ViewState};
pub use types::{ActivityCategory, ActivityEvent, ClanMember, FeedLoad};
