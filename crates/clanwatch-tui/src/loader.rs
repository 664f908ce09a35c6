//! Background loads.
//!
//! The render loop never awaits. Each load runs as a task on the tokio
//! runtime and posts its outcome to an unbounded channel, which the event
//! loop drains with `try_recv` once per frame. Every load is stamped with an
//! id from a monotonically increasing counter; the receiving pane keeps only
//! the result whose id matches its latest request, so a reload supersedes
//! whatever was still in flight.

use clanwatch_core::{stats::PlayerStats, ClanMember, FeedError, FeedLoad};
use clanwatch_feeds::ClanClient;
use std::sync::Arc;
use tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
};

/// A load the UI wants started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    Feed,
    Roster,
    Stats(String),
}

/// A finished load, tagged with the id it was started under.
#[derive(Debug)]
pub enum LoadResult {
    Feed { id: u64, result: Result<FeedLoad, FeedError> },
    Roster { id: u64, result: Result<Vec<ClanMember>, FeedError> },
    Stats { id: u64, result: Result<PlayerStats, FeedError> },
}

/// Where a pane's data currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus<T> {
    /// Waiting for the load with this id.
    Loading(u64),
    Ready(T),
    Failed(FeedError),
}

impl<T> LoadStatus<T> {
    /// Accept `result` only if it answers the load currently awaited.
    pub fn settle(&mut self, id: u64, result: Result<T, FeedError>) -> bool {
        match self {
            LoadStatus::Loading(pending) if *pending == id => {
                *self = match result {
                    Ok(value) => LoadStatus::Ready(value),
                    Err(err) => LoadStatus::Failed(err),
                };
                true
            }
            _ => {
                tracing::debug!(id, "stale load result dropped");
                false
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadStatus::Ready(value) => Some(value),
            _ => None,
        }
    }
}

pub struct Loader {
    runtime: Handle,
    client: Arc<ClanClient>,
    tx: UnboundedSender<LoadResult>,
    rx: UnboundedReceiver<LoadResult>,
    next_id: u64,
}

impl Loader {
    pub fn new(runtime: Handle, client: ClanClient) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { runtime, client: Arc::new(client), tx, rx, next_id: 0 }
    }

    /// Start `request` in the background and return its load id.
    pub fn spawn(&mut self, request: LoadRequest) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tracing::debug!(id, ?request, "load started");

        self.runtime.spawn(async move {
            let msg = match request {
                LoadRequest::Feed => LoadResult::Feed { id, result: client.load_feed().await },
                LoadRequest::Roster => LoadResult::Roster { id, result: client.roster().await },
                LoadRequest::Stats(player) => {
                    LoadResult::Stats { id, result: client.player_stats(&player).await }
                }
            };
            // The receiver only goes away when the app is shutting down.
            let _ = tx.send(msg);
        });
        id
    }

    /// Every result that has arrived since the last call.
    pub fn drain(&mut self) -> Vec<LoadResult> {
        let mut out = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            out.push(msg);
        }
        out
    }
}
