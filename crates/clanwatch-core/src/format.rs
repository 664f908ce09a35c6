//! Human-readable number and activity-text formatting.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static XP_FIGURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,3}(?:,?\d{3})*)\s*XP").expect("xp figure pattern is valid")
});

/// Compact a large number: `1.2B`, `3.4M`, `5.6K`, else thousands-grouped.
pub fn format_number(n: u64) -> String {
    match n {
        1_000_000_000.. => format!("{:.1}B", n as f64 / 1e9),
        1_000_000.. => format!("{:.1}M", n as f64 / 1e6),
        1_000.. => format!("{:.1}K", n as f64 / 1e3),
        _ => n.to_string(),
    }
}

/// Group digits in threes: `1234567` → `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Rewrite raw XP figures in activity text: `72000000XP` → `72M XP`.
pub fn format_activity_text(text: &str) -> String {
    XP_FIGURE
        .replace_all(text, |caps: &Captures| {
            let n: u64 = caps[1].replace(',', "").parse().unwrap_or(0);
            format!("{} XP", compact_trimmed(n))
        })
        .into_owned()
}

fn compact_trimmed(n: u64) -> String {
    let (value, suffix) = match n {
        1_000_000_000.. => (n as f64 / 1e9, "B"),
        1_000_000.. => (n as f64 / 1e6, "M"),
        1_000.. => (n as f64 / 1e3, "K"),
        _ => return group_thousands(n),
    };
    let s = format!("{value:.1}");
    format!("{}{suffix}", s.strip_suffix(".0").unwrap_or(&s))
}
