//! RuneScape API URL builders, driven by the `[api]` config templates.

use clanwatch_core::config::{ApiConfig, Config};

#[derive(Debug, Clone)]
pub struct Endpoints {
    api: ApiConfig,
    activities: usize,
}

impl Endpoints {
    pub fn new(api: ApiConfig, activities: usize) -> Self {
        Self { api, activities }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api.clone(), config.feed.activities_per_player)
    }

    pub fn clan_members(&self, clan: &str) -> String {
        fill(&self.api.clan_members, "{clan}", clan)
    }

    pub fn runemetrics(&self, player: &str) -> String {
        fill(&self.api.runemetrics, "{player}", player)
            .replace("{count}", &self.activities.to_string())
    }

    pub fn hiscores(&self, player: &str) -> String {
        fill(&self.api.hiscores, "{player}", player)
    }

    pub fn avatar(&self, player: &str) -> String {
        fill(&self.api.avatar, "{player}", player)
    }
}

fn fill(template: &str, key: &str, value: &str) -> String {
    template.replace(key, &urlencoding::encode(value))
}
