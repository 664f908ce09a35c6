//! Presentation filter: category + text narrowing of an aggregated feed.
//!
//! The view state is an explicit [`ViewState`] value: the caller owns it,
//! changes it, and asks for a fresh [`FeedView`] after every change. Nothing
//! here keeps ambient state between calls.

use crate::types::{ActivityCategory, ActivityEvent};

/// Default maximum number of events in a [`FeedView`].
pub const DEFAULT_LIMIT: usize = 50;

/// Which categories the feed view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ActivityCategory),
}

impl CategoryFilter {
    pub fn matches(self, category: ActivityCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }

    /// Next filter in strip order, wrapping `XP → All`.
    pub fn next(self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Only(ActivityCategory::ALL[0]),
            CategoryFilter::Only(c) => ActivityCategory::ALL
                .get(c.index() + 1)
                .map_or(CategoryFilter::All, |&n| CategoryFilter::Only(n)),
        }
    }

    /// Previous filter in strip order, wrapping `All → XP`.
    pub fn prev(self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Only(ActivityCategory::ALL[ActivityCategory::ALL.len() - 1]),
            CategoryFilter::Only(c) if c.index() == 0 => CategoryFilter::All,
            CategoryFilter::Only(c) => CategoryFilter::Only(ActivityCategory::ALL[c.index() - 1]),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c.plural(),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Per-category counts over the full aggregated feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryCounts {
    pub total: usize,
    by_category: [usize; ActivityCategory::ALL.len()],
}

impl CategoryCounts {
    pub fn get(&self, filter: CategoryFilter) -> usize {
        match filter {
            CategoryFilter::All => self.total,
            CategoryFilter::Only(c) => self.by_category[c.index()],
        }
    }
}

/// Count events per category. Counts always reflect the whole feed, never a
/// search-narrowed subset.
pub fn category_counts(events: &[ActivityEvent]) -> CategoryCounts {
    let mut counts = CategoryCounts { total: events.len(), ..Default::default() };
    for event in events {
        counts.by_category[event.category.index()] += 1;
    }
    counts
}

/// True when the player name, details, or text contain `needle`, which must
/// already be lower-cased.
fn matches_query(event: &ActivityEvent, needle: &str) -> bool {
    event.player.to_lowercase().contains(needle)
        || event.details.to_lowercase().contains(needle)
        || event.text.to_lowercase().contains(needle)
}

/// Keep events matching `filter` and `query`, truncated to `limit`. Input
/// order is preserved.
pub fn filter_feed(
    events: &[ActivityEvent],
    filter: CategoryFilter,
    query: &str,
    limit: usize,
) -> Vec<ActivityEvent> {
    matching(events, filter, query).take(limit).cloned().collect()
}

fn matching<'a>(
    events: &'a [ActivityEvent],
    filter: CategoryFilter,
    query: &str,
) -> impl Iterator<Item = &'a ActivityEvent> {
    let needle = query.to_lowercase();
    events
        .iter()
        .filter(move |e| filter.matches(e.category))
        .filter(move |e| needle.is_empty() || matches_query(e, &needle))
}

/// The user-controlled part of the feed view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub filter: CategoryFilter,
    pub query: String,
    pub limit: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter: CategoryFilter::All,
            query: String::new(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ViewState {
    pub fn with_limit(limit: usize) -> Self {
        Self { limit, ..Self::default() }
    }

    /// Derive the visible feed for this state.
    pub fn view(&self, events: &[ActivityEvent]) -> FeedView {
        FeedView {
            filter: self.filter,
            query: self.query.clone(),
            matched: matching(events, self.filter, &self.query).count(),
            events: filter_feed(events, self.filter, &self.query, self.limit),
            counts: category_counts(events),
        }
    }
}

/// What the view layer renders for one filter/search state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedView {
    pub filter: CategoryFilter,
    pub query: String,
    /// At most `limit` events, newest first.
    pub events: Vec<ActivityEvent>,
    pub counts: CategoryCounts,
    /// Events that passed the filter before truncation.
    pub matched: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn event(player: &str, details: &str, category: ActivityCategory, ts: i64) -> ActivityEvent {
        ActivityEvent {
            player: player.into(),
            text: String::new(),
            details: details.into(),
            date: String::new(),
            category,
            timestamp_millis: ts,
        }
    }

    fn feed() -> Vec<ActivityEvent> {
        vec![
            event("Zezima", "I found a Dragon hatchet", ActivityCategory::Drop, 50),
            event("Bob", "I killed 3 Nex", ActivityCategory::Kill, 40),
            event("Alice", "dropped a Zaros godsword", ActivityCategory::Drop, 30),
            event("Zezima", "Quest complete", ActivityCategory::Quest, 20),
        ]
    }

    #[test]
    fn category_filter_keeps_order() {
        let out = filter_feed(&feed(), CategoryFilter::Only(ActivityCategory::Drop), "", 50);
        let players: Vec<_> = out.iter().map(|e| e.player.as_str()).collect();
        assert_eq!(players, vec!["Zezima", "Alice"]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        assert_eq!(filter_feed(&feed(), CategoryFilter::All, "zEzImA", 50).len(), 2);
        assert_eq!(filter_feed(&feed(), CategoryFilter::All, "NEX", 50).len(), 1);
    }

    #[test]
    fn whitespace_in_query_is_significant() {
        let feed = vec![
            event("Zezima", "dropped", ActivityCategory::Drop, 2),
            event("Iron Maiden", "dropped", ActivityCategory::Drop, 1),
        ];
        let players = |q: &str| -> Vec<String> {
            filter_feed(&feed, CategoryFilter::All, q, 50).into_iter().map(|e| e.player).collect()
        };
        assert_eq!(players(" "), vec!["Iron Maiden"]);
        assert!(players("zezima ").is_empty());
        assert_eq!(players("iron "), vec!["Iron Maiden"]);
    }

    #[test]
    fn limit_truncates() {
        assert_eq!(filter_feed(&feed(), CategoryFilter::All, "", 3).len(), 3);
        assert!(filter_feed(&feed(), CategoryFilter::All, "", 0).is_empty());
    }

    #[test]
    fn counts_ignore_search() {
        let state = ViewState { query: "bob".into(), ..ViewState::default() };
        let view = state.view(&feed());
        assert_eq!(view.events.len(), 1);
        assert_eq!(view.matched, 1);
        assert_eq!(view.counts.get(CategoryFilter::All), 4);
        assert_eq!(view.counts.get(CategoryFilter::Only(ActivityCategory::Drop)), 2);
        assert_eq!(view.counts.get(CategoryFilter::Only(ActivityCategory::Pet)), 0);
    }

    #[test]
    fn filter_cycles_through_every_category() {
        let mut f = CategoryFilter::All;
        for _ in 0..=ActivityCategory::ALL.len() {
            f = f.next();
        }
        assert_eq!(f, CategoryFilter::All);
        assert_eq!(CategoryFilter::All.prev().next(), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::Only(ActivityCategory::Drop).prev(),
            CategoryFilter::All
        );
    }

    #[test]
    fn filter_parses() {
        assert_eq!("ALL".parse(), Ok(CategoryFilter::All));
        assert_eq!("pets".parse(), Ok(CategoryFilter::Only(ActivityCategory::Pet)));
    }
}
