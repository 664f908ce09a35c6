//! Fake RuneScape APIs behind fake relays, for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves two relay routes:
//! - `GET /relay?url=<target>`: decodes `target` and answers it as the game
//!   APIs would, forwarding their status code
//! - `GET /down?url=<target>`: always `503 Service Unavailable`
//!
//! Targets are dispatched on their path:
//! - `.../members_lite.ws?clanName=`: the configured roster bytes
//! - `.../profile?user=&activities=`: a RuneMetrics profile, or
//!   `{"error":"NO_PROFILE"}` for unknown players
//! - `.../index_lite.ws?player=`: hiscores CSV, or `404` for unknown players
//!
//! The target host is never contacted, so [`FakeRuneScape::config`] points
//! the API templates at a placeholder host and the relays at this server.
//!
//! # Example
//!
//! ```rust,no_run
//! let rs = FakeRuneScape::gielinor_elite().await.unwrap();
//! let client = ClanClient::from_config(&rs.config()).unwrap();
//! let roster = client.roster().await.unwrap();
//! assert_eq!(rs.hits("down").await, 1);
//! ```

use super::fixtures::*;
use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use bytes::Bytes;
use clanwatch_core::config::{Config, RelayConfig};
use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::Mutex};

/// Clan served by [`FakeRuneScape::gielinor_elite`].
pub const CLAN: &str = "Gielinor Elite";

/// Placeholder host in the API templates; only its paths matter.
const API_HOST: &str = "https://runescape.test";

type Shared = Arc<Mutex<ServerState>>;

/// State shared between the router and test code.
#[derive(Default)]
struct ServerState {
    /// `None` answers the roster with 404.
    roster: Option<Bytes>,
    /// Lower-cased player name → profile JSON.
    profiles: HashMap<String, String>,
    /// Lower-cased player name → hiscores CSV.
    hiscores: HashMap<String, String>,
    /// Requests per route: `relay`, `down`, `roster`, `profile`, `hiscores`.
    hits: HashMap<&'static str, usize>,
    /// `clanName` values the roster endpoint was asked for.
    clans: Vec<String>,
    /// Delay before every profile answer, so overlapping requests are visible.
    profile_delay: Option<Duration>,
    profiles_in_flight: usize,
    max_profiles_in_flight: usize,
}

impl ServerState {
    fn hit(&mut self, route: &'static str) {
        *self.hits.entry(route).or_default() += 1;
    }
}

/// Handle to the running fake server.
pub struct FakeRuneScape {
    addr: SocketAddr,
    state: Shared,
}

impl FakeRuneScape {
    /// Start an empty server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Shared::default();

        let app = Router::new()
            .route("/relay", get(relay))
            .route("/down", get(down))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// A server preloaded with the [`CLAN`] roster, profiles, and Zezima's
    /// hiscores. Iron Man's profile is private.
    pub async fn gielinor_elite() -> std::io::Result<Self> {
        let rs = Self::start().await?;
        rs.set_roster(ROSTER_LATIN1).await;
        rs.set_profile("Zezima", ZEZIMA_PROFILE).await;
        rs.set_profile("Lynx Titan", LYNX_TITAN_PROFILE).await;
        rs.set_profile("Iron Man", PRIVATE_PROFILE).await;
        rs.set_profile("René", RENE_PROFILE).await;
        rs.set_hiscores("Zezima", &maxed_hiscores(56_803)).await;
        rs.set_hiscores("Iron Man", &maxed_hiscores(900_000)).await;
        Ok(rs)
    }

    /// Base URL (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The working relay, encoding its target.
    pub fn relay(&self) -> RelayConfig {
        RelayConfig { prefix: format!("{}/relay?url=", self.base_url()), encode: true }
    }

    /// A relay that always answers 503.
    pub fn down_relay(&self) -> RelayConfig {
        RelayConfig { prefix: format!("{}/down?url=", self.base_url()), encode: true }
    }

    pub async fn set_roster(&self, body: &[u8]) {
        self.state.lock().await.roster = Some(Bytes::copy_from_slice(body));
    }

    pub async fn clear_roster(&self) {
        self.state.lock().await.roster = None;
    }

    pub async fn set_profile(&self, player: &str, json: &str) {
        self.state.lock().await.profiles.insert(player.to_lowercase(), json.to_string());
    }

    pub async fn set_hiscores(&self, player: &str, csv: &str) {
        self.state.lock().await.hiscores.insert(player.to_lowercase(), csv.to_string());
    }

    pub async fn set_profile_delay(&self, delay: Duration) {
        self.state.lock().await.profile_delay = Some(delay);
    }

    /// Number of requests a route has served.
    pub async fn hits(&self, route: &str) -> usize {
        self.state.lock().await.hits.get(route).copied().unwrap_or(0)
    }

    pub async fn requested_clans(&self) -> Vec<String> {
        self.state.lock().await.clans.clone()
    }

    /// Highest number of profile requests that were being answered at once.
    pub async fn max_profiles_in_flight(&self) -> usize {
        self.state.lock().await.max_profiles_in_flight
    }

    /// Default config with the API templates on the placeholder host and the
    /// relay chain `[down, relay]`.
    pub fn config(&self) -> Config {
        let mut config = Config::defaults();
        config.clan.name = CLAN.to_string();
        config.api.clan_members =
            format!("{API_HOST}/m=clan-hiscores/members_lite.ws?clanName={{clan}}");
        config.api.runemetrics =
            format!("{API_HOST}/runemetrics/profile/profile?user={{player}}&activities={{count}}");
        config.api.hiscores = format!("{API_HOST}/m=hiscore/index_lite.ws?player={{player}}");
        config.api.avatar = format!("{API_HOST}/m=avatar-rs/{{player}}/chat.png");
        config.relays = vec![self.down_relay(), self.relay()];
        config
    }

    /// [`config`](Self::config) as a `config.toml` document.
    pub fn config_toml(&self) -> String {
        let config = self.config();
        let relays: String = config
            .relays
            .iter()
            .map(|r| format!("\n[[relays]]\nprefix = \"{}\"\nencode = {}\n", r.prefix, r.encode))
            .collect();
        format!(
            "[clan]\nname = \"{}\"\n\n[api]\nclan_members = \"{}\"\nrunemetrics = \"{}\"\n\
             hiscores = \"{}\"\navatar = \"{}\"\n{relays}",
            config.clan.name,
            config.api.clan_members,
            config.api.runemetrics,
            config.api.hiscores,
            config.api.avatar,
        )
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn down(State(state): State<Shared>) -> StatusCode {
    state.lock().await.hit("down");
    StatusCode::SERVICE_UNAVAILABLE
}

async fn relay(State(state): State<Shared>, Query(params): Query<HashMap<String, String>>) -> Response {
    state.lock().await.hit("relay");

    let Some(uri) = params.get("url").and_then(|url| url.parse::<Uri>().ok()) else {
        return (StatusCode::BAD_REQUEST, "missing or invalid url").into_response();
    };
    let query: HashMap<String, String> =
        Query::try_from_uri(&uri).map(|Query(q)| q).unwrap_or_default();
    let param = |key: &str| query.get(key).cloned().unwrap_or_default();

    let path = uri.path();
    if path.ends_with("/members_lite.ws") {
        roster(&state, param("clanName")).await
    } else if path.ends_with("/profile") {
        profile(&state, param("user")).await
    } else if path.ends_with("/index_lite.ws") {
        hiscores(&state, param("player")).await
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn roster(state: &Shared, clan: String) -> Response {
    let mut st = state.lock().await;
    st.hit("roster");
    st.clans.push(clan);
    match &st.roster {
        Some(body) => body.clone().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn profile(state: &Shared, player: String) -> Response {
    let delay = {
        let mut st = state.lock().await;
        st.hit("profile");
        st.profiles_in_flight += 1;
        st.max_profiles_in_flight = st.max_profiles_in_flight.max(st.profiles_in_flight);
        st.profile_delay
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let mut st = state.lock().await;
    st.profiles_in_flight -= 1;
    let body = st.profiles.get(&player.to_lowercase()).cloned().unwrap_or_else(|| NO_PROFILE.to_string());
    ([("content-type", "application/json")], body).into_response()
}

async fn hiscores(state: &Shared, player: String) -> Response {
    let mut st = state.lock().await;
    st.hit("hiscores");
    match st.hiscores.get(&player.to_lowercase()) {
        Some(csv) => csv.clone().into_response(),
        None => (StatusCode::NOT_FOUND, ERROR_PAGE).into_response(),
    }
}
