//! clanwatch-feeds: network side of clanwatch.
//!
//! Every request reaches the game APIs through the [`relay::RelayClient`]
//! chain. [`client::ClanClient`] bundles the relay, endpoint templates, and
//! feed settings behind the three loads the app performs: roster, activity
//! feed, and player stats.

pub mod aggregate;
pub mod client;
pub mod endpoints;
pub mod relay;

pub use aggregate::ActivitySource;
pub use client::ClanClient;
pub use relay::RelayClient;
