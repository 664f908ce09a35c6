//! [`ClanClient`]: one handle for every RuneScape request the app makes.
//!
//! Every request goes through the shared [`RelayClient`]. Roster and stats
//! failures surface as [`FeedError`]; per-player activity failures are
//! absorbed into an empty list.

use crate::{
    aggregate::{aggregate_feed, ActivitySource},
    endpoints::Endpoints,
    relay::RelayClient,
};
use clanwatch_core::{
    activity::RuneMetricsProfile,
    config::{Config, FeedConfig},
    roster::{decode_latin1, parse_roster_with, RosterColumns},
    stats::{parse_hiscores, PlayerStats, SkillLevel},
    ActivityEvent, ClanMember, FeedError, FeedLoad,
};
use std::future::Future;

#[derive(Debug, Clone)]
pub struct ClanClient {
    relay: RelayClient,
    endpoints: Endpoints,
    feed: FeedConfig,
    clan: String,
}

impl ClanClient {
    pub fn new(relay: RelayClient, endpoints: Endpoints, feed: FeedConfig, clan: String) -> Self {
        Self { relay, endpoints, feed, clan }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            RelayClient::new(config.relays.clone())?,
            Endpoints::from_config(config),
            config.feed.clone(),
            config.clan.name.clone(),
        ))
    }

    async fn roster_with(&self, columns: RosterColumns) -> Result<Vec<ClanMember>, FeedError> {
        let url = self.endpoints.clan_members(&self.clan);
        let body = self.relay.fetch(&url).await?;
        parse_roster_with(&decode_latin1(&body), columns)
    }

    /// Full roster with rank, XP and kills.
    pub async fn roster(&self) -> Result<Vec<ClanMember>, FeedError> {
        let members = self.roster_with(RosterColumns::Full).await?;
        tracing::info!(clan = %self.clan, members = members.len(), "roster loaded");
        Ok(members)
    }

    /// Load the roster, sample it, and aggregate the sample's activity.
    pub async fn load_feed(&self) -> Result<FeedLoad, FeedError> {
        let roster = self.roster_with(RosterColumns::NamesOnly).await?;
        Ok(aggregate_feed(self, &roster, self.feed.sample_size, self.feed.batch_size).await)
    }

    /// RuneMetrics profile, or `None` when it cannot be fetched or decoded.
    async fn profile(&self, player: &str) -> Option<RuneMetricsProfile> {
        let body = match self.relay.fetch_text(&self.endpoints.runemetrics(player)).await {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(player, error = %err, "profile fetch failed");
                return None;
            }
        };
        match RuneMetricsProfile::from_json(&body) {
            Ok(profile) => Some(profile),
            Err(err) => {
                tracing::debug!(player, error = %err, "profile is not valid JSON");
                None
            }
        }
    }

    async fn hiscores(&self, player: &str) -> Option<Vec<SkillLevel>> {
        match self.relay.fetch_text(&self.endpoints.hiscores(player)).await {
            Ok(body) => parse_hiscores(&body),
            Err(err) => {
                tracing::debug!(player, error = %err, "hiscores fetch failed");
                None
            }
        }
    }

    /// Hiscores and RuneMetrics for one player, fetched concurrently.
    pub async fn player_stats(&self, player: &str) -> Result<PlayerStats, FeedError> {
        let player = player.trim();
        let (hiscores, profile) = tokio::join!(self.hiscores(player), self.profile(player));
        PlayerStats::combine(player, hiscores, profile)
    }
}

impl ActivitySource for ClanClient {
    fn player_activity(&self, player: &str) -> impl Future<Output = Vec<ActivityEvent>> + Send {
        async move {
            match self.profile(player).await {
                Some(profile) => profile.into_events(player),
                None => Vec::new(),
            }
        }
    }
}
