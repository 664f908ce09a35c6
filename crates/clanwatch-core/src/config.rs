//! Configuration types for clanwatch.
//!
//! [`Config::load`] reads `~/.config/clanwatch/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] reads an
//! explicit file. [`Config::defaults`] returns the same defaults without
//! touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[clan]
name = "Statuesque"

[feed]
sample_size           = 30
batch_size            = 10
limit                 = 50
activities_per_player = 20

[ui]
show_dates = true
theme      = "default"

[api]
clan_members = "https://secure.runescape.com/m=clan-hiscores/members_lite.ws?clanName={clan}"
runemetrics  = "https://apps.runescape.com/runemetrics/profile/profile?user={player}&activities={count}"
hiscores     = "https://secure.runescape.com/m=hiscore/index_lite.ws?player={player}"
avatar       = "https://secure.runescape.com/m=avatar-rs/{player}/chat.png"

[[relays]]
prefix = "https://api.allorigins.win/raw?url="
encode = true

[[relays]]
prefix = "https://corsproxy.io/?"
encode = true

[[relays]]
prefix = "https://api.codetabs.com/v1/proxy?quest="
encode = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/clanwatch/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub clan: ClanConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub api: ApiConfig,
    /// Ordered relay chain; the first relay that answers with a success
    /// status wins.
    #[serde(default)]
    pub relays: Vec<RelayConfig>,
}

/// `[clan]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClanConfig {
    #[serde(default = "default_clan_name")]
    pub name: String,
}

fn default_clan_name() -> String { "Statuesque".to_string() }

impl Default for ClanConfig {
    fn default() -> Self {
        Self { name: default_clan_name() }
    }
}

/// `[feed]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// How many roster members are sampled per feed load.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    /// Maximum number of activity requests in flight at once.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Maximum number of events shown in the feed view.
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_activities_per_player")]
    pub activities_per_player: usize,
}

fn default_sample_size() -> usize { 30 }
fn default_batch_size() -> usize { 10 }
fn default_limit() -> usize { 50 }
fn default_activities_per_player() -> usize { 20 }

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            batch_size: default_batch_size(),
            limit: default_limit(),
            activities_per_player: default_activities_per_player(),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_dates")]
    pub show_dates: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_show_dates() -> bool { true }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_dates: default_show_dates(),
            theme: default_theme(),
        }
    }
}

/// `[api]` section of `config.toml`.
///
/// Each value is a URL template. `{clan}` and `{player}` are replaced with the
/// percent-encoded clan or player name, `{count}` with
/// [`FeedConfig::activities_per_player`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_clan_members_url")]
    pub clan_members: String,
    #[serde(default = "default_runemetrics_url")]
    pub runemetrics: String,
    #[serde(default = "default_hiscores_url")]
    pub hiscores: String,
    #[serde(default = "default_avatar_url")]
    pub avatar: String,
}

fn default_clan_members_url() -> String {
    "https://secure.runescape.com/m=clan-hiscores/members_lite.ws?clanName={clan}".to_string()
}
fn default_runemetrics_url() -> String {
    "https://apps.runescape.com/runemetrics/profile/profile?user={player}&activities={count}"
        .to_string()
}
fn default_hiscores_url() -> String {
    "https://secure.runescape.com/m=hiscore/index_lite.ws?player={player}".to_string()
}
fn default_avatar_url() -> String {
    "https://secure.runescape.com/m=avatar-rs/{player}/chat.png".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            clan_members: default_clan_members_url(),
            runemetrics: default_runemetrics_url(),
            hiscores: default_hiscores_url(),
            avatar: default_avatar_url(),
        }
    }
}

/// One `[[relays]]` entry: the relay URL is `prefix` followed by the target
/// URL, percent-encoded when `encode` is set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelayConfig {
    pub prefix: String,
    #[serde(default = "default_encode")]
    pub encode: bool,
}

fn default_encode() -> bool { true }

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/clanwatch/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit config file, layered on top of the built-in defaults.
    /// The file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        tracing::debug!(path = %path.display(), "loading config");
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("clanwatch")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
