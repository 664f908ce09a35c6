//! Feed aggregator: samples the roster and merges per-player activity.
//!
//! The sample is fetched in sequential batches; every player inside a batch
//! is fetched concurrently and the batch completes when all of them have
//! answered (or failed to empty). At most `batch_size` activity requests are
//! ever in flight.

use clanwatch_core::{ActivityEvent, ClanMember, FeedLoad};
use futures::future::join_all;
use rand::{seq::SliceRandom, Rng};
use std::future::Future;

pub const DEFAULT_SAMPLE_SIZE: usize = 30;
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Anything that can produce one player's classified activity.
///
/// Implementations never fail: a player whose feed cannot be read yields an
/// empty list so one private profile cannot abort a batch.
pub trait ActivitySource {
    fn player_activity(&self, player: &str) -> impl Future<Output = Vec<ActivityEvent>> + Send;
}

/// Uniformly shuffle the roster and keep the first `sample_size` names.
pub fn sample_players<R: Rng + ?Sized>(
    roster: &[ClanMember],
    sample_size: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut names: Vec<String> = roster.iter().map(|m| m.name.clone()).collect();
    names.shuffle(rng);
    names.truncate(sample_size);
    names
}

/// Fetch activity for `players` in batches of `batch_size` (0 is treated as
/// 1) and merge it newest first. Ties keep the order in which events were
/// encountered.
pub async fn aggregate_sample<S>(source: &S, players: &[String], batch_size: usize) -> FeedLoad
where
    S: ActivitySource + Sync,
{
    let mut events = Vec::new();

    for (i, batch) in players.chunks(batch_size.max(1)).enumerate() {
        tracing::debug!(batch = i, players = batch.len(), "fetching activity batch");
        let results = join_all(batch.iter().map(|p| source.player_activity(p))).await;
        events.extend(results.into_iter().flatten());
    }

    sort_newest_first(&mut events);
    tracing::info!(sampled = players.len(), events = events.len(), "feed aggregated");
    FeedLoad::from_events(events, players.len())
}

/// Sample `sample_size` members at random and aggregate their activity.
pub async fn aggregate_feed<S>(
    source: &S,
    roster: &[ClanMember],
    sample_size: usize,
    batch_size: usize,
) -> FeedLoad
where
    S: ActivitySource + Sync,
{
    let players = sample_players(roster, sample_size, &mut rand::thread_rng());
    aggregate_sample(source, &players, batch_size).await
}

/// Stable sort by timestamp, descending.
pub fn sort_newest_first(events: &mut [ActivityEvent]) {
    events.sort_by(|a, b| b.timestamp_millis.cmp(&a.timestamp_millis));
}
