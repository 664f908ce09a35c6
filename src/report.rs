//! Plain-text rendering for the headless subcommands.
//!
//! Output is line-oriented and free of colour codes so it can be piped,
//! grepped, or diffed.

use clanwatch_core::{
    filter::CategoryCounts,
    format::{format_activity_text, format_number, group_thousands},
    members::{filter_members, sort_members, MemberColumn, MemberSort},
    stats::PlayerStats,
    ActivityCategory, ActivityEvent, CategoryFilter, ClanMember, FeedLoad, ViewState,
};
use std::fmt::Write;

pub const EMPTY_FEED: &str = "No activity found. Members may have private profiles.";
pub const NO_MATCHES: &str = "No events match the current filter.";
pub const FEED_UNAVAILABLE: &str =
    "Unable to load clan activity. The RuneScape API may be unavailable.";
pub const MEMBERS_UNAVAILABLE: &str =
    "Unable to load clan members. The RuneScape API may be unavailable.";

/// `[Drop] Zezima: I killed a dragon and it dropped a dragon pickaxe. (19-Oct-2026 12:34)`
pub fn event_line(event: &ActivityEvent, show_dates: bool) -> String {
    let mut line =
        format!("[{}] {}: {}", event.category.label(), event.player, format_activity_text(event.display_text()));
    if show_dates && !event.date.is_empty() {
        let _ = write!(line, " ({})", event.date);
    }
    line
}

/// `All 5 | Drops 2 | Pets 1 | ...` over the whole feed.
pub fn counts_line(counts: &CategoryCounts) -> String {
    std::iter::once(CategoryFilter::All)
        .chain(ActivityCategory::ALL.into_iter().map(CategoryFilter::Only))
        .map(|f| format!("{} {}", f.label(), counts.get(f)))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn feed_report(load: &FeedLoad, state: &ViewState, show_dates: bool) -> String {
    let events = match load {
        FeedLoad::NoActivity { .. } => return format!("{EMPTY_FEED}\n"),
        FeedLoad::Activity(events) => events,
    };
    let view = state.view(events);

    let mut out = String::new();
    let _ = writeln!(out, "{}", counts_line(&view.counts));
    if view.events.is_empty() {
        let _ = writeln!(out, "{NO_MATCHES}");
    }
    for event in &view.events {
        let _ = writeln!(out, "{}", event_line(event, show_dates));
    }
    if view.matched > view.events.len() {
        let _ = writeln!(out, "... {} more", view.matched - view.events.len());
    }
    out
}

pub fn members_report(members: &[ClanMember], sort: MemberSort, query: &str) -> String {
    let mut rows = filter_members(members, query);
    sort_members(&mut rows, sort);

    let name_w = rows.iter().map(|m| m.name.chars().count()).chain([MemberColumn::Name.label().len()]).max().unwrap_or(0);
    let rank_w = rows.iter().map(|m| m.rank.chars().count()).chain([MemberColumn::Rank.label().len()]).max().unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_w$}  {:<rank_w$}  {:>15}  {:>7}",
        MemberColumn::Name.label(),
        MemberColumn::Rank.label(),
        MemberColumn::TotalXp.label(),
        MemberColumn::Kills.label(),
    );
    for m in &rows {
        let _ = writeln!(
            out,
            "{:<name_w$}  {:<rank_w$}  {:>15}  {:>7}",
            m.name,
            m.rank,
            group_thousands(m.total_xp),
            group_thousands(m.kills),
        );
    }
    let _ = writeln!(out, "{} of {} members", rows.len(), members.len());
    out
}

pub fn stats_report(stats: &PlayerStats) -> String {
    let opt = |v: Option<u32>| v.map_or_else(|| "-".to_string(), |n| n.to_string());

    let mut out = String::new();
    let _ = writeln!(out, "{}", stats.display_name);
    let _ = writeln!(
        out,
        "Total level {} | Total XP {} | Combat {} | Quests {} | Rank {}",
        group_thousands(u64::from(stats.total_level)),
        format_number(stats.total_xp),
        opt(stats.combat_level),
        opt(stats.quests_complete),
        stats.overall_rank.map_or_else(|| "-".to_string(), group_thousands),
    );
    if !stats.skills.is_empty() {
        let _ = writeln!(out, "Skills:");
        for skill in &stats.skills {
            let _ = writeln!(out, "  {:<13} {:>3}  {:>11}", skill.name, skill.level, group_thousands(skill.xp));
        }
    }
    if !stats.recent.is_empty() {
        let _ = writeln!(out, "Recent activity:");
        for activity in &stats.recent {
            let _ = writeln!(out, "  {} ({})", format_activity_text(&activity.text), activity.date);
        }
    }
    out
}
