//! Literal payloads shaped like the real RuneScape endpoints.
//!
//! The "Gielinor Elite" clan has four members. Their profiles are arranged
//! so the merged feed has exactly one event per category except kills, plus
//! one rejected treasure-trail line and one unclassifiable line.

/// members_lite roster in ISO-8859-1: non-breaking spaces (`0xA0`) inside
/// names and a Latin-1 `é` (`0xE9`).
pub const ROSTER_LATIN1: &[u8] = b"Clanmate, Clan Rank, Total XP, Kills\n\
Zezima,Owner,5400000000,120\n\
Lynx\xa0Titan,Deputy Owner,5600000000,80\n\
Iron\xa0Man,Overseer,200000000,0\n\
Ren\xe9,Recruit,1000,0\n";

/// The same clan served with a UTF-8 byte-order mark and a duplicated row.
pub const ROSTER_UTF8_BOM_DUPLICATE: &[u8] = b"\xef\xbb\xbfClanmate, Clan Rank, Total XP, Kills\n\
Zezima,Owner,5400000000,120\n\
Zezima,Recruit,1,1\n\
\n\
Lynx Titan,Deputy Owner,5600000000,80\n";

/// Header only.
pub const ROSTER_EMPTY: &[u8] = b"Clanmate, Clan Rank, Total XP, Kills\n";

/// What the roster endpoint serves for an unknown clan or during an outage.
pub const ERROR_PAGE: &str = "<!DOCTYPE html>\n<html><head><title>RuneScape - Error</title></head>\n\
<body><p>Sorry, this page is currently unavailable.</p></body></html>\n";

pub const ZEZIMA_PROFILE: &str = r#"{
  "name": "Zezima",
  "totalskill": 2898,
  "totalxp": 5400000000,
  "combatlevel": 138,
  "questscomplete": 300,
  "rank": "56,803",
  "skillvalues": [{ "id": 0, "level": 99, "xp": 130344310, "rank": 10 }],
  "activities": [
    { "date": "19-Oct-2026 12:34", "details": "After killing a Kalphite King, it dropped an off-hand drygore mace.", "text": "I found an off-hand drygore mace" },
    { "date": "18-Oct-2026 09:00", "details": "I levelled my Herblore skill, I am now level 99.", "text": "Levelled up Herblore." },
    { "date": "17-Oct-2026 20:15", "details": "I found a treasure trail (elite) in the rubble.", "text": "Found a clue scroll" },
    { "date": "16-Oct-2026 08:00", "details": "I visited my clan citadel.", "text": "Visited my clan citadel." }
  ]
}"#;

pub const LYNX_TITAN_PROFILE: &str = r#"{
  "name": "Lynx Titan",
  "combatlevel": 138,
  "questscomplete": 290,
  "rank": 1,
  "activities": [
    { "date": "19-Oct-2026 14:00", "details": "I have earned 400000000 experience in Herblore.", "text": "400000000XP in Herblore" },
    { "date": "15-Oct-2026 10:00", "details": "I have completed the quest Sliske's Endgame.", "text": "Quest complete: Sliske's Endgame" }
  ]
}"#;

pub const RENE_PROFILE: &str = r#"{
  "name": "René",
  "activities": [
    { "date": "18-Oct-2026 22:00", "details": "A kalphite grub has started following me.", "text": "New pet: Kalphite Grub" }
  ]
}"#;

pub const PRIVATE_PROFILE: &str = r#"{"error":"PROFILE_PRIVATE","loggedIn":"false"}"#;
pub const NO_PROFILE: &str = r#"{"error":"NO_PROFILE","loggedIn":"false"}"#;

/// Feed lines the Gielinor Elite profiles produce, newest first, dates shown.
pub const GIELINOR_ELITE_FEED: [&str; 5] = [
    "[XP] Lynx Titan: I have earned 400000000 experience in Herblore. (19-Oct-2026 14:00)",
    "[Drop] Zezima: After killing a Kalphite King, it dropped an off-hand drygore mace. (19-Oct-2026 12:34)",
    "[Pet] René: A kalphite grub has started following me. (18-Oct-2026 22:00)",
    "[Level] Zezima: I levelled my Herblore skill, I am now level 99. (18-Oct-2026 09:00)",
    "[Quest] Lynx Titan: I have completed the quest Sliske's Endgame. (15-Oct-2026 10:00)",
];

/// A hiscores-lite body: the overall row, 29 skills at 99 (Necromancy 120),
/// and trailing minigame rows that carry only two columns.
pub fn maxed_hiscores(overall_rank: u64) -> String {
    let mut body = format!("{overall_rank},2898,5400000000\n");
    for skill in 1..30 {
        if skill == 29 {
            body.push_str("2000,120,104273167\n");
        } else {
            body.push_str(&format!("{},99,13034431\n", 1000 + skill));
        }
    }
    body.push_str("-1,-1\n-1,-1\n");
    body
}
