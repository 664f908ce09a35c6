//! Domain-specific assertion macros for clanwatch harnesses.
//!
//! These add context to failure messages so it is clear which feed property
//! broke and at which position.

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Assert that a slice of `ActivityEvent`s is sorted newest first.
///
/// ```rust
/// assert_newest_first!(load.events());
/// ```
#[macro_export]
macro_rules! assert_newest_first {
    ($events:expr) => {{
        let events: &[clanwatch_core::ActivityEvent] = &$events;
        for (i, pair) in events.windows(2).enumerate() {
            if pair[0].timestamp_millis < pair[1].timestamp_millis {
                panic!(
                    "assert_newest_first! failed at index {}:\n  [{}] {} @ {}\n  [{}] {} @ {}",
                    i,
                    i,
                    pair[0].player,
                    pair[0].timestamp_millis,
                    i + 1,
                    pair[1].player,
                    pair[1].timestamp_millis,
                );
            }
        }
    }};
}

/// Assert that every event in a slice has the given category.
#[macro_export]
macro_rules! assert_all_category {
    ($events:expr, $category:expr) => {{
        let events: &[clanwatch_core::ActivityEvent] = &$events;
        let category: clanwatch_core::ActivityCategory = $category;
        if let Some((i, e)) = events.iter().enumerate().find(|(_, e)| e.category != category) {
            panic!(
                "assert_all_category! failed: events[{}] is {:?}, expected {:?}\n  text: {}",
                i, e.category, category, e.text
            );
        }
    }};
}

/// Assert the exact player sequence of a feed.
#[macro_export]
macro_rules! assert_players_in_order {
    ($events:expr, [$($player:expr),* $(,)?]) => {{
        let events: &[clanwatch_core::ActivityEvent] = &$events;
        let actual: Vec<&str> = events.iter().map(|e| e.player.as_str()).collect();
        let expected: Vec<&str> = vec![$($player),*];
        pretty_assertions::assert_eq!(actual, expected, "players in feed order");
    }};
}
