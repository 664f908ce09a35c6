//! Roster parser integration harness.
//!
//! # What this covers
//!
//! - **Latin-1 decoding**: the members-lite endpoint serves ISO-8859-1. Bytes
//!   above 0x7F must decode as their windows-1252 characters, and `0xA0`
//!   inside names must end up as a regular space.
//! - **UTF-8 byte-order mark**: a body starting with a UTF-8 BOM decodes as
//!   UTF-8 with the mark removed.
//! - **Row hygiene**: header discarded, blank rows skipped, duplicate names
//!   skipped (first wins), input order kept.
//! - **Markup detection**: an HTML error page is `MalformedRoster`, never an
//!   empty roster.
//! - **Through the client**: the same payloads served via the relay chain.
//!
//! # What this does NOT cover
//!
//! - Sampling and activity fetches (see `feed_harness`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test roster_harness
//! ```

mod common;
use common::*;

use clanwatch_core::{
    roster::{decode_latin1, parse_roster, parse_roster_with, RosterColumns},
    FeedError,
};
use clanwatch_feeds::ClanClient;
use pretty_assertions::assert_eq;
use rstest::rstest;

// ---------------------------------------------------------------------------
// Payload parsing
// ---------------------------------------------------------------------------

/// Every Latin-1 row becomes a member, in order, with normalised names.
#[test]
fn latin1_roster_parses_in_order() {
    let members = parse_roster(&decode_latin1(ROSTER_LATIN1)).unwrap();
    assert_eq!(
        members,
        vec![
            member("Zezima", "Owner", 5_400_000_000, 120),
            member("Lynx Titan", "Deputy Owner", 5_600_000_000, 80),
            member("Iron Man", "Overseer", 200_000_000, 0),
            member("René", "Recruit", 1_000, 0),
        ]
    );
}

/// No name keeps a non-breaking space after normalisation.
#[test]
fn no_nbsp_survives() {
    let members = parse_roster(&decode_latin1(ROSTER_LATIN1)).unwrap();
    assert!(members.iter().all(|m| !m.name.contains('\u{A0}')));
}

/// A UTF-8 BOM switches decoding to UTF-8; the duplicate Zezima row and the
/// blank line are dropped.
#[test]
fn bom_and_duplicates() {
    let members = parse_roster(&decode_latin1(ROSTER_UTF8_BOM_DUPLICATE)).unwrap();
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Zezima", "Lynx Titan"]);
    assert_eq!(members[0].rank, "Owner");
}

#[test]
fn header_only_is_an_empty_roster() {
    assert_eq!(parse_roster(&decode_latin1(ROSTER_EMPTY)).unwrap(), vec![]);
}

#[rstest]
#[case::doctype(ERROR_PAGE)]
#[case::bare_html("<html><body>maintenance</body></html>")]
#[case::upper_case("<!DOCTYPE HTML>\n<HTML></HTML>")]
fn markup_is_malformed(#[case] payload: &str) {
    assert_eq!(parse_roster(payload), Err(FeedError::MalformedRoster));
}

/// Name-only rows are accepted when sampling, rejected for the full table.
#[test]
fn names_only_rows() {
    let payload = "Clanmate\nZezima\nLynx Titan,Deputy Owner,5,1\n";
    let sampled = parse_roster_with(payload, RosterColumns::NamesOnly).unwrap();
    assert_eq!(sampled.len(), 2);
    assert_eq!(sampled[0], member("Zezima", "", 0, 0));

    let full = parse_roster(payload).unwrap();
    assert_eq!(full, vec![member("Lynx Titan", "Deputy Owner", 5, 1)]);
}

// ---------------------------------------------------------------------------
// Through the relay chain
// ---------------------------------------------------------------------------

#[tokio::test]
async fn client_roster_asks_for_configured_clan() {
    let rs = FakeRuneScape::gielinor_elite().await.unwrap();
    let client = ClanClient::from_config(&rs.config()).unwrap();

    let members = client.roster().await.unwrap();
    assert_eq!(members.len(), 4);
    assert_eq!(members[1].name, "Lynx Titan");
    assert_eq!(rs.requested_clans().await, vec![fake_runescape::CLAN.to_string()]);
}

#[tokio::test]
async fn client_roster_error_page_is_malformed() {
    let rs = FakeRuneScape::gielinor_elite().await.unwrap();
    rs.set_roster(ERROR_PAGE.as_bytes()).await;
    let client = ClanClient::from_config(&rs.config()).unwrap();

    assert_eq!(client.roster().await, Err(FeedError::MalformedRoster));
}

#[tokio::test]
async fn client_roster_missing_is_relay_failure() {
    let rs = FakeRuneScape::gielinor_elite().await.unwrap();
    rs.clear_roster().await;
    let client = ClanClient::from_config(&rs.config()).unwrap();

    assert!(matches!(client.roster().await, Err(FeedError::AllRelaysFailed { .. })));
}
