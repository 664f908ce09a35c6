//! Members table helpers: search, column sort, and rank tiers.

use crate::types::ClanMember;
use phf::phf_map;
use std::cmp::Ordering;

/// Clan rank tiers that get their own colour in the members table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankTier {
    Owner,
    DeputyOwner,
    Overseer,
    Coordinator,
    Organiser,
    Admin,
    General,
    Other,
}

static RANK_TIERS: phf::Map<&'static str, RankTier> = phf_map! {
    "owner" => RankTier::Owner,
    "deputyowner" => RankTier::DeputyOwner,
    "overseer" => RankTier::Overseer,
    "coordinator" => RankTier::Coordinator,
    "organiser" => RankTier::Organiser,
    "admin" => RankTier::Admin,
    "general" => RankTier::General,
};

impl RankTier {
    /// Map a roster rank (`"Deputy Owner"`, `"deputy_owner"`, ..) to its tier.
    pub fn from_rank(rank: &str) -> Self {
        let key: String = rank
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        RANK_TIERS.get(key.as_str()).copied().unwrap_or(RankTier::Other)
    }
}

/// Sortable members-table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberColumn {
    Name,
    Rank,
    TotalXp,
    Kills,
}

impl MemberColumn {
    pub const ALL: [MemberColumn; 4] =
        [MemberColumn::Name, MemberColumn::Rank, MemberColumn::TotalXp, MemberColumn::Kills];

    pub fn label(self) -> &'static str {
        match self {
            MemberColumn::Name => "Player Name",
            MemberColumn::Rank => "Rank",
            MemberColumn::TotalXp => "Total XP",
            MemberColumn::Kills => "Kills",
        }
    }

    /// Column after this one, wrapping.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&c| c == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl std::str::FromStr for MemberColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "player" => Ok(MemberColumn::Name),
            "rank" => Ok(MemberColumn::Rank),
            "xp" | "totalxp" | "total_xp" => Ok(MemberColumn::TotalXp),
            "kills" => Ok(MemberColumn::Kills),
            other => Err(format!("unknown column: {other} (expected name, rank, xp, or kills)")),
        }
    }
}

/// Current sort of the members table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberSort {
    pub column: MemberColumn,
    pub ascending: bool,
}

impl Default for MemberSort {
    fn default() -> Self {
        Self { column: MemberColumn::TotalXp, ascending: false }
    }
}

impl MemberSort {
    /// Select `column`: the same column flips direction, a new column starts
    /// ascending for names and descending for everything else.
    pub fn select(self, column: MemberColumn) -> Self {
        if column == self.column {
            Self { ascending: !self.ascending, ..self }
        } else {
            Self::by(column)
        }
    }

    /// Fresh sort on `column` in its natural direction.
    pub fn by(column: MemberColumn) -> Self {
        Self { column, ascending: column == MemberColumn::Name }
    }

    fn compare(self, a: &ClanMember, b: &ClanMember) -> Ordering {
        let ord = match self.column {
            MemberColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            MemberColumn::Rank => a.rank.to_lowercase().cmp(&b.rank.to_lowercase()),
            MemberColumn::TotalXp => a.total_xp.cmp(&b.total_xp),
            MemberColumn::Kills => a.kills.cmp(&b.kills),
        };
        if self.ascending { ord } else { ord.reverse() }
    }
}

/// Members whose name or rank contains `query` (case-insensitive).
pub fn filter_members(members: &[ClanMember], query: &str) -> Vec<ClanMember> {
    let needle = query.to_lowercase();
    members
        .iter()
        .filter(|m| {
            needle.is_empty()
                || m.name.to_lowercase().contains(&needle)
                || m.rank.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Stable sort in place.
pub fn sort_members(members: &mut [ClanMember], sort: MemberSort) {
    members.sort_by(|a, b| sort.compare(a, b));
}
