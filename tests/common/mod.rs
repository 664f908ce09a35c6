//! Shared test utilities for clanwatch integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Network-facing harnesses talk to [`FakeRuneScape`], a
//! local axum server that plays both the relays and the game APIs.

#![allow(dead_code)]

pub mod assertions;
pub mod builders;
pub mod fake_runescape;
pub mod fixtures;

pub use builders::*;
pub use fake_runescape::FakeRuneScape;
pub use fixtures::*;
