//! Test builders: ergonomic constructors for events, members, and feeds.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use clanwatch_core::{ActivityCategory, ActivityEvent, ClanMember};
use fake::{faker::name::en::FirstName, Fake};

// ---------------------------------------------------------------------------
// ActivityEventBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`ActivityEvent`] fixtures.
///
/// # Example
///
/// ```rust
/// let event = ActivityEventBuilder::new("Zezima")
///     .category(ActivityCategory::Pet)
///     .text("New pet: Kalphite Grub")
///     .at(1_700_000_000_000)
///     .build();
/// ```
pub struct ActivityEventBuilder {
    player: String,
    text: String,
    details: String,
    date: String,
    category: ActivityCategory,
    timestamp_millis: i64,
}

impl ActivityEventBuilder {
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            text: "I found a dragon pickaxe".to_string(),
            details: "I killed a dragon and it dropped a dragon pickaxe.".to_string(),
            date: "19-Oct-2026 12:34".to_string(),
            category: ActivityCategory::Drop,
            timestamp_millis: 0,
        }
    }

    pub fn category(mut self, category: ActivityCategory) -> Self {
        self.category = category;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn at(mut self, timestamp_millis: i64) -> Self {
        self.timestamp_millis = timestamp_millis;
        self
    }

    pub fn build(self) -> ActivityEvent {
        ActivityEvent {
            player: self.player,
            text: self.text,
            details: self.details,
            date: self.date,
            category: self.category,
            timestamp_millis: self.timestamp_millis,
        }
    }
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

pub fn member(name: &str, rank: &str, total_xp: u64, kills: u64) -> ClanMember {
    ClanMember { name: name.into(), rank: rank.into(), total_xp, kills }
}

/// `n` members with distinct fake names, all recruits.
pub fn fake_roster(n: usize) -> Vec<ClanMember> {
    (0..n)
        .map(|i| {
            let first: String = FirstName().fake();
            member(&format!("{first} {i}"), "Recruit", (i as u64 + 1) * 1_000, 0)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Feeds
// ---------------------------------------------------------------------------

/// A newest-first feed cycling through every category. Timestamps count down
/// from `n`, so the result is already sorted.
pub fn sorted_feed(n: usize) -> Vec<ActivityEvent> {
    (0..n)
        .map(|i| {
            let category = ActivityCategory::ALL[i % ActivityCategory::ALL.len()];
            ActivityEventBuilder::new(format!("player{}", i % 7))
                .category(category)
                .text(format!("{} event {i}", category.label()))
                .at((n - i) as i64)
                .build()
        })
        .collect()
}
