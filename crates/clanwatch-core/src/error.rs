//! Error taxonomy for clan and player loads.
//!
//! Per-player activity failures never appear here: the fetcher absorbs them
//! into an empty result. An empty feed is not an error either, see
//! [`FeedLoad::NoActivity`](crate::FeedLoad::NoActivity).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// Every configured relay rejected or errored on one logical request.
    #[error("all relays failed: {last}")]
    AllRelaysFailed { last: String },

    /// The roster endpoint answered with an HTML page instead of tabular text.
    #[error("roster payload is an HTML page, not tabular data")]
    MalformedRoster,

    /// Neither the hiscores nor the RuneMetrics profile knew the player.
    #[error("player not found: {player}")]
    PlayerNotFound { player: String },
}
