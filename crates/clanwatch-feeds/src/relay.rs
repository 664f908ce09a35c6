//! Relay client: reaches the game APIs through an ordered chain of CORS relays.
//!
//! Each relay is tried once, in configuration order. The first attempt that
//! answers with a 2xx status and a readable body wins; anything else is
//! remembered as the last error and the next relay is tried. Attempts are
//! strictly sequential, so a dead relay adds latency but never extra load.

use clanwatch_core::{config::RelayConfig, FeedError};

const USER_AGENT: &str = concat!("clanwatch/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    relays: Vec<RelayConfig>,
}

impl RelayClient {
    /// Build a client with its own connection pool.
    pub fn new(relays: Vec<RelayConfig>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_http(http, relays))
    }

    /// Build a client on top of an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, relays: Vec<RelayConfig>) -> Self {
        Self { http, relays }
    }

    pub fn relays(&self) -> &[RelayConfig] {
        &self.relays
    }

    /// Relay URL for `target`: the prefix followed by the target, encoded
    /// as a URI component when the relay asks for it.
    pub fn relay_url(relay: &RelayConfig, target: &str) -> String {
        if relay.encode {
            format!("{}{}", relay.prefix, urlencoding::encode(target))
        } else {
            format!("{}{}", relay.prefix, target)
        }
    }

    /// Fetch `target` through the relay chain and return the response body.
    pub async fn fetch(&self, target: &str) -> Result<Vec<u8>, FeedError> {
        let mut last = String::from("no relays configured");

        for (i, relay) in self.relays.iter().enumerate() {
            let url = Self::relay_url(relay, target);
            tracing::debug!(relay = i, %url, "relay attempt");

            match self.attempt(&url).await {
                Ok(body) => {
                    tracing::debug!(relay = i, bytes = body.len(), "relay succeeded");
                    return Ok(body);
                }
                Err(err) => {
                    tracing::debug!(relay = i, error = %err, "relay failed");
                    last = err;
                }
            }
        }

        tracing::warn!(target, error = %last, "all relays failed");
        Err(FeedError::AllRelaysFailed { last })
    }

    /// [`fetch`](Self::fetch), decoded as UTF-8 (lossy).
    pub async fn fetch_text(&self, target: &str) -> Result<String, FeedError> {
        let body = self.fetch(target).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    async fn attempt(&self, url: &str) -> Result<Vec<u8>, String> {
        let resp = self.http.get(url).send().await.map_err(|e| e.to_string())?;
        let status = resp.status();
        if !status.is_success() {
            return Err(format!("relay returned {status}"));
        }
        let body = resp.bytes().await.map_err(|e| e.to_string())?;
        Ok(body.to_vec())
    }
}
