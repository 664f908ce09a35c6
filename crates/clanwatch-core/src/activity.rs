//! RuneMetrics profile payloads and their normalisation into [`ActivityEvent`]s.
//!
//! The profile endpoint answers with
//! `{ "name": .., "activities": [{ "text", "details", "date" }], .. }` or with
//! `{ "error": "PROFILE_PRIVATE" }`. Unknown keys are ignored.

use crate::{classify::classify, types::ActivityEvent};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Raw RuneMetrics profile document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuneMetricsProfile {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub activities: Option<Vec<RawActivity>>,
    #[serde(default)]
    pub totalskill: Option<u32>,
    #[serde(default)]
    pub totalxp: Option<u64>,
    #[serde(default)]
    pub combatlevel: Option<u32>,
    #[serde(default)]
    pub questscomplete: Option<u32>,
    /// Overall rank, served as a comma-grouped string (`"56,803"`) or a number.
    #[serde(default)]
    pub rank: Option<serde_json::Value>,
    #[serde(default)]
    pub skillvalues: Vec<RawSkillValue>,
}

/// One entry of the `activities` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawActivity {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub date: String,
}

/// One entry of `skillvalues`; `xp` is in tenths of a point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RawSkillValue {
    pub id: usize,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub xp: u64,
}

impl RuneMetricsProfile {
    /// Parse a profile document.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// Classify the profile's activities. Private or unknown profiles (an
    /// `error` field, or no `activities`) yield nothing; unclassifiable
    /// entries are dropped.
    pub fn into_events(self, requested: &str) -> Vec<ActivityEvent> {
        if let Some(err) = &self.error {
            tracing::debug!(player = requested, error = %err, "profile unavailable");
            return Vec::new();
        }
        let Some(activities) = self.activities else {
            return Vec::new();
        };

        let player = self
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| requested.to_string());

        activities
            .into_iter()
            .filter_map(|raw| {
                let category = classify(&raw.details, &raw.text)?;
                Some(ActivityEvent {
                    player: player.clone(),
                    timestamp_millis: parse_activity_date(&raw.date),
                    text: raw.text,
                    details: raw.details,
                    date: raw.date,
                    category,
                })
            })
            .collect()
    }

    /// Overall rank as a number, accepting `"56,803"` or `56803`.
    pub fn overall_rank(&self) -> Option<u64> {
        match self.rank.as_ref()? {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.replace(',', "").trim().parse().ok(),
            _ => None,
        }
        .filter(|&r| r > 0)
    }
}

/// Parse a RuneMetrics display date into epoch milliseconds.
///
/// Accepts `19-Oct-2026 12:34` (read as UTC), a bare `19-Oct-2026`, and
/// RFC 3339. Anything else yields 0 so the event sorts last.
pub fn parse_activity_date(date: &str) -> i64 {
    let date = date.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(date, "%d-%b-%Y %H:%M") {
        return dt.and_utc().timestamp_millis();
    }
    if let Ok(d) = NaiveDate::parse_from_str(date, "%d-%b-%Y") {
        return d.and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return dt.timestamp_millis();
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActivityCategory;
    use pretty_assertions::assert_eq;

    const PROFILE: &str = r#"{
        "name": "Zezima",
        "totalxp": 5400000000,
        "rank": "1,234",
        "activities": [
            {"date": "18-Oct-2026 21:07", "details": "I found a Dragon hatchet.", "text": "I found a Dragon hatchet"},
            {"date": "18-Oct-2026 20:00", "details": "I visited the Grand Exchange.", "text": "Visited the GE"},
            {"date": "17-Oct-2026 09:15", "details": "I levelled my Attack skill, I am now level 99.", "text": "Levelled up Attack."}
        ]
    }"#;

    #[test]
    fn profile_events_are_classified_and_filtered() {
        let events = RuneMetricsProfile::from_json(PROFILE).unwrap().into_events("zezima");
        let cats: Vec<_> = events.iter().map(|e| e.category).collect();
        assert_eq!(cats, vec![ActivityCategory::Drop, ActivityCategory::Level]);
        assert!(events.iter().all(|e| e.player == "Zezima"));
        assert!(events[0].timestamp_millis > events[1].timestamp_millis);
    }

    #[test]
    fn private_profile_is_empty() {
        let profile = RuneMetricsProfile::from_json(r#"{"error":"PROFILE_PRIVATE"}"#).unwrap();
        assert!(profile.into_events("Bob").is_empty());
    }

    #[test]
    fn missing_activities_is_empty() {
        let profile = RuneMetricsProfile::from_json(r#"{"name":"Bob"}"#).unwrap();
        assert!(profile.into_events("Bob").is_empty());
    }

    #[test]
    fn missing_name_falls_back_to_requested() {
        let body = r#"{"activities":[{"date":"","details":"I killed 3 Nex","text":"3 Nex"}]}"#;
        let events = RuneMetricsProfile::from_json(body).unwrap().into_events("Bob");
        assert_eq!(events[0].player, "Bob");
        assert_eq!(events[0].timestamp_millis, 0);
    }

    #[test]
    fn rank_accepts_grouped_string_and_number() {
        let profile = RuneMetricsProfile::from_json(PROFILE).unwrap();
        assert_eq!(profile.overall_rank(), Some(1234));
        let profile = RuneMetricsProfile::from_json(r#"{"rank": 99}"#).unwrap();
        assert_eq!(profile.overall_rank(), Some(99));
    }

    #[test]
    fn dates() {
        assert_eq!(parse_activity_date("01-Jan-1970 00:01"), 60_000);
        assert_eq!(parse_activity_date("02-Jan-1970"), 86_400_000);
        assert_eq!(parse_activity_date("1970-01-01T00:00:01Z"), 1_000);
        assert_eq!(parse_activity_date("yesterday"), 0);
        assert_eq!(parse_activity_date(""), 0);
    }
}
