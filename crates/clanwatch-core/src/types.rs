//! Core types for clanwatch-core.
//!
//! This module defines the data structures shared across every layer: the
//! roster's [`ClanMember`], the classified [`ActivityEvent`], its
//! [`ActivityCategory`], and the [`FeedLoad`] outcome of one feed load cycle.

use serde::Serialize;

/// One row of the clan roster.
///
/// `name` is the unique key and is already whitespace-normalised by the
/// roster parser (no BOM, no non-breaking spaces, trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClanMember {
    pub name: String,
    pub rank: String,
    pub total_xp: u64,
    pub kills: u64,
}

/// A single classified activity from a player's RuneMetrics feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEvent {
    /// Display name of the player, as reported by the profile endpoint.
    pub player: String,
    /// Short headline, e.g. `"Levelled up Attack."`.
    pub text: String,
    /// Longer description, e.g. `"I killed 5 boss monsters..."`.
    pub details: String,
    /// Opaque display string as returned by the API.
    pub date: String,
    pub category: ActivityCategory,
    /// Milliseconds since the Unix epoch; 0 when `date` could not be parsed,
    /// which sorts the event last.
    pub timestamp_millis: i64,
}

impl ActivityEvent {
    /// The string shown in feed rows: `details`, or `text` when details are empty.
    pub fn display_text(&self) -> &str {
        if self.details.is_empty() { &self.text } else { &self.details }
    }
}

/// Classification tag of an [`ActivityEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ActivityCategory {
    Drop,
    Pet,
    Kill,
    Level,
    Quest,
    XpMilestone,
}

impl ActivityCategory {
    /// Every category, in filter-strip order.
    pub const ALL: [ActivityCategory; 6] = [
        ActivityCategory::Drop,
        ActivityCategory::Pet,
        ActivityCategory::Kill,
        ActivityCategory::Level,
        ActivityCategory::Quest,
        ActivityCategory::XpMilestone,
    ];

    /// Short tag shown next to each event.
    pub fn label(self) -> &'static str {
        match self {
            ActivityCategory::Drop => "Drop",
            ActivityCategory::Pet => "Pet",
            ActivityCategory::Kill => "Kill",
            ActivityCategory::Level => "Level",
            ActivityCategory::Quest => "Quest",
            ActivityCategory::XpMilestone => "XP",
        }
    }

    /// Plural label used on filter controls.
    pub fn plural(self) -> &'static str {
        match self {
            ActivityCategory::Drop => "Drops",
            ActivityCategory::Pet => "Pets",
            ActivityCategory::Kill => "Kills",
            ActivityCategory::Level => "Levels",
            ActivityCategory::Quest => "Quests",
            ActivityCategory::XpMilestone => "XP",
        }
    }

    /// Position within [`ActivityCategory::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ActivityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" | "drops" => Ok(ActivityCategory::Drop),
            "pet" | "pets" => Ok(ActivityCategory::Pet),
            "kill" | "kills" => Ok(ActivityCategory::Kill),
            "level" | "levels" => Ok(ActivityCategory::Level),
            "quest" | "quests" => Ok(ActivityCategory::Quest),
            "xp" | "xpmilestone" | "milestone" => Ok(ActivityCategory::XpMilestone),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Outcome of one successful feed load.
///
/// An empty feed is an expected condition (most profiles are private) and is
/// reported as [`FeedLoad::NoActivity`] rather than as an error, so the view
/// layer can tell "nothing to show" apart from "service unavailable".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLoad {
    /// Classified events, sorted newest first.
    Activity(Vec<ActivityEvent>),
    /// Every sampled player yielded no qualifying events.
    NoActivity { sampled: usize },
}

impl FeedLoad {
    /// Wrap aggregated events, mapping an empty set to [`FeedLoad::NoActivity`].
    pub fn from_events(events: Vec<ActivityEvent>, sampled: usize) -> Self {
        if events.is_empty() {
            FeedLoad::NoActivity { sampled }
        } else {
            FeedLoad::Activity(events)
        }
    }

    pub fn events(&self) -> &[ActivityEvent] {
        match self {
            FeedLoad::Activity(events) => events,
            FeedLoad::NoActivity { .. } => &[],
        }
    }
}
