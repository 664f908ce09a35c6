//! Activity classifier: maps a raw RuneMetrics activity to an [`ActivityCategory`].
//!
//! Classification is an ordered rule table evaluated top to bottom; the first
//! rule whose predicate matches decides the verdict, which may be "discard".
//! Order matters on ambiguous text: a line mentioning both "quest complete"
//! and "pet" is a [`ActivityCategory::Pet`].
//!
//! | # | Predicate | Verdict |
//! |---|-----------|---------|
//! | 0 | details has "i found a" and "treasure trail" | discard |
//! | 1 | details has "dropped" or "i found a" | `Drop` |
//! | 2 | details or text has "pet" | `Pet` |
//! | 3 | details has "i killed" | `Kill` |
//! | 4 | text has "levelled up" | `Level` |
//! | 5 | details or text has "quest complete" | `Quest` |
//! | 6 | text has `<N>000000xp` with N ≥ 100 | `XpMilestone` |

use crate::types::ActivityCategory;
use regex::Regex;
use std::sync::LazyLock;

/// Multiplier of one million XP required for a milestone to be shown.
pub const XP_MILESTONE_MIN_MILLIONS: u64 = 100;

static XP_MILLIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)000000xp").expect("xp pattern is valid"));

/// Lower-cased copies of the two activity strings.
struct Subject {
    details: String,
    text: String,
}

impl Subject {
    fn either(&self, needle: &str) -> bool {
        self.details.contains(needle) || self.text.contains(needle)
    }
}

type Predicate = fn(&Subject) -> bool;

const RULES: &[(Predicate, Option<ActivityCategory>)] = &[
    (
        |s| s.details.contains("i found a") && s.details.contains("treasure trail"),
        None,
    ),
    (
        |s| s.details.contains("dropped") || s.details.contains("i found a"),
        Some(ActivityCategory::Drop),
    ),
    (|s| s.either("pet"), Some(ActivityCategory::Pet)),
    (|s| s.details.contains("i killed"), Some(ActivityCategory::Kill)),
    (|s| s.text.contains("levelled up"), Some(ActivityCategory::Level)),
    (|s| s.either("quest complete"), Some(ActivityCategory::Quest)),
    (|s| is_xp_milestone(&s.text), Some(ActivityCategory::XpMilestone)),
];

/// Classify one activity. Returns `None` when the activity should not be shown.
pub fn classify(details: &str, text: &str) -> Option<ActivityCategory> {
    let subject = Subject {
        details: details.to_lowercase(),
        text: text.to_lowercase(),
    };

    RULES
        .iter()
        .find(|(matches, _)| matches(&subject))
        .and_then(|(_, verdict)| *verdict)
}

/// True when `text` mentions an XP total of at least 100 million expressed
/// as `<N>000000xp`. Only the first match counts.
fn is_xp_milestone(text: &str) -> bool {
    XP_MILLIONS.captures(text).is_some_and(|caps| {
        // digits only, so a parse failure means the number overflowed u64
        caps[1]
            .parse::<u64>()
            .map_or(true, |millions| millions >= XP_MILESTONE_MIN_MILLIONS)
    })
}
