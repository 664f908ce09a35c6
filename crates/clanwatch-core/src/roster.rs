//! Roster parser: decodes the clan members-lite payload into [`ClanMember`] rows.
//!
//! The endpoint serves Latin-1 text with one header line followed by
//! `name,rank,total_xp,kills` rows. Player names use non-breaking spaces in
//! place of regular ones and the first row may carry a byte-order mark.
//! When the upstream is unhappy it answers with an HTML page instead, which
//! is only detectable by sniffing for markup.

use crate::{error::FeedError, types::ClanMember};
use std::collections::HashSet;

/// How many comma-separated columns a row needs to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterColumns {
    /// `name, rank, total_xp, kills`; shorter rows are skipped.
    Full,
    /// Only the name is required; missing columns default to empty / zero.
    NamesOnly,
}

impl RosterColumns {
    fn min(self) -> usize {
        match self {
            RosterColumns::Full => 4,
            RosterColumns::NamesOnly => 1,
        }
    }
}

/// Decode a roster body. The endpoint declares ISO-8859-1, which WHATWG (and
/// therefore every browser) maps to windows-1252.
pub fn decode_latin1(bytes: &[u8]) -> String {
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    text.into_owned()
}

/// True when the payload is an HTML page rather than tabular text.
pub fn looks_like_markup(payload: &str) -> bool {
    let lower = payload.to_ascii_lowercase();
    lower.contains("<!doctype") || lower.contains("<html")
}

/// Strip byte-order marks, turn non-breaking spaces into regular ones, trim.
pub fn normalize_name(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c != '\u{FEFF}')
        .map(|c| if c == '\u{00A0}' { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parse a full roster (rows need all four columns).
pub fn parse_roster(payload: &str) -> Result<Vec<ClanMember>, FeedError> {
    parse_roster_with(payload, RosterColumns::Full)
}

/// Parse a roster, accepting rows with at least `columns` fields.
///
/// Leading blank lines are ignored and the first remaining line is the
/// header, which is discarded; blank lines and rows with an empty name are
/// skipped, and the first occurrence of a name wins. Output keeps input order.
pub fn parse_roster_with(
    payload: &str,
    columns: RosterColumns,
) -> Result<Vec<ClanMember>, FeedError> {
    if looks_like_markup(payload) {
        tracing::warn!(bytes = payload.len(), "roster payload is markup");
        return Err(FeedError::MalformedRoster);
    }

    let mut seen = HashSet::new();
    let mut members = Vec::new();

    for line in payload.trim_start().lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < columns.min() {
            tracing::debug!(line, "roster row has too few columns");
            continue;
        }

        let name = normalize_name(parts[0]);
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name.clone()) {
            tracing::debug!(%name, "duplicate roster name skipped");
            continue;
        }

        let field = |i: usize| parts.get(i).map(|s| s.trim()).unwrap_or("");
        members.push(ClanMember {
            name,
            rank: field(1).to_string(),
            total_xp: field(2).parse().unwrap_or(0),
            kills: field(3).parse().unwrap_or(0),
        });
    }

    tracing::debug!(members = members.len(), "roster parsed");
    Ok(members)
}
