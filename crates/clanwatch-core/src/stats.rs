//! Player stats: hiscores-lite parsing, the combat formula, and merging of
//! hiscores with a RuneMetrics profile into one [`PlayerStats`].

use crate::{
    activity::{RawActivity, RuneMetricsProfile},
    error::FeedError,
    roster::looks_like_markup,
};
use serde::Serialize;

/// Hiscores-lite row order. Row 0 is the overall total.
pub const HISCORE_SKILLS: [&str; 30] = [
    "Overall", "Attack", "Defence", "Strength", "Constitution", "Ranged",
    "Prayer", "Magic", "Cooking", "Woodcutting", "Fletching", "Fishing",
    "Firemaking", "Crafting", "Smithing", "Mining", "Herblore", "Agility",
    "Thieving", "Slayer", "Farming", "Runecrafting", "Hunter", "Construction",
    "Summoning", "Dungeoneering", "Divination", "Invention", "Archaeology",
    "Necromancy",
];

/// Number of recent activities kept on a stats page.
pub const RECENT_ACTIVITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillLevel {
    pub name: String,
    /// Hiscore rank; RuneMetrics does not report per-skill ranks.
    pub rank: Option<u64>,
    pub level: u32,
    pub xp: u64,
}

/// Parse a hiscores-lite body. Returns `None` for an HTML error page.
///
/// Rows with fewer than three columns are skipped; unparsable numbers become
/// zero (ranks become `None`, the hiscores use `-1` for unranked).
pub fn parse_hiscores(text: &str) -> Option<Vec<SkillLevel>> {
    if looks_like_markup(text) {
        return None;
    }

    let skills = text
        .trim()
        .lines()
        .zip(HISCORE_SKILLS)
        .filter_map(|(line, name)| {
            let parts: Vec<&str> = line.trim().split(',').collect();
            if parts.len() < 3 {
                return None;
            }
            Some(SkillLevel {
                name: name.to_string(),
                rank: parts[0].trim().parse().ok(),
                level: parts[1].trim().parse().unwrap_or(0),
                xp: parts[2].trim().parse().unwrap_or(0),
            })
        })
        .collect();
    Some(skills)
}

/// RS3 combat level from hiscores rows (`Overall` first). Needs at least the
/// eight rows up to Magic; Summoning counts as 1 when missing.
pub fn combat_level(hiscores: &[SkillLevel]) -> Option<u32> {
    if hiscores.len() < 8 {
        return None;
    }
    let lvl = |i: usize| hiscores[i].level as f64;
    let (att, def, str_, con, ran, pra, mag) = (lvl(1), lvl(2), lvl(3), lvl(4), lvl(5), lvl(6), lvl(7));
    let summ = hiscores.get(24).map_or(1.0, |s| s.level as f64);

    let offence = (att + str_).max(2.0 * mag).max(2.0 * ran);
    let combat = (1.3 * offence + def + con + (pra / 2.0).floor() + (summ / 2.0).floor()) / 4.0;
    Some(combat.floor() as u32)
}

/// Skills from a RuneMetrics profile. `skillvalues` ids index the hiscore
/// order without `Overall`; xp is stored in tenths.
fn skills_from_profile(profile: &RuneMetricsProfile) -> Vec<SkillLevel> {
    profile
        .skillvalues
        .iter()
        .map(|sv| SkillLevel {
            name: HISCORE_SKILLS
                .get(sv.id + 1)
                .map_or_else(|| format!("Skill {}", sv.id), |n| n.to_string()),
            rank: None,
            level: sv.level,
            xp: sv.xp / 10,
        })
        .collect()
}

/// Everything the stats page shows for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub display_name: String,
    pub total_level: u32,
    pub total_xp: u64,
    pub combat_level: Option<u32>,
    pub quests_complete: Option<u32>,
    pub overall_rank: Option<u64>,
    /// Individual skills, without the overall row.
    pub skills: Vec<SkillLevel>,
    /// Raw recent activities, newest first, at most [`RECENT_ACTIVITY`].
    pub recent: Vec<RawActivity>,
}

impl PlayerStats {
    /// Merge the two sources. RuneMetrics wins for name, combat, quests and
    /// rank; hiscores win for totals and skills. Both missing is
    /// [`FeedError::PlayerNotFound`].
    pub fn combine(
        rsn: &str,
        hiscores: Option<Vec<SkillLevel>>,
        profile: Option<RuneMetricsProfile>,
    ) -> Result<Self, FeedError> {
        let hiscores = hiscores.filter(|h| !h.is_empty());
        let profile = profile.filter(|p| p.error.is_none());

        if hiscores.is_none() && profile.is_none() {
            return Err(FeedError::PlayerNotFound { player: rsn.to_string() });
        }

        let overall = hiscores.as_ref().and_then(|h| h.first());
        let display_name = profile
            .as_ref()
            .and_then(|p| p.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| rsn.to_string());

        let total_level = overall
            .map(|o| o.level)
            .or_else(|| profile.as_ref().and_then(|p| p.totalskill))
            .unwrap_or(0);
        let total_xp = overall
            .map(|o| o.xp)
            .or_else(|| profile.as_ref().and_then(|p| p.totalxp))
            .unwrap_or(0);

        let combat_level = match &profile {
            Some(p) => p.combatlevel,
            None => hiscores.as_deref().and_then(combat_level),
        };
        let quests_complete = profile.as_ref().and_then(|p| p.questscomplete);
        let overall_rank = match &profile {
            Some(p) => p.overall_rank(),
            None => overall.and_then(|o| o.rank).filter(|&r| r > 0),
        };

        let skills = match &hiscores {
            Some(h) => h.iter().skip(1).cloned().collect(),
            None => profile.as_ref().map(skills_from_profile).unwrap_or_default(),
        };
        let recent = profile
            .and_then(|p| p.activities)
            .map(|mut a| {
                a.truncate(RECENT_ACTIVITY);
                a
            })
            .unwrap_or_default();

        Ok(Self {
            display_name,
            total_level,
            total_xp,
            combat_level,
            quests_complete,
            overall_rank,
            skills,
            recent,
        })
    }
}
