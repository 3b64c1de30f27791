//! YouTube Analytics library.
//!
//! A password-protected dashboard that connects a Google account, reports on
//! the channel's most recent videos with title and description suggestions,
//! and exports the report as a spreadsheet. Also ships the `bundle` and
//! `ticker` command-line helpers.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod auth;
pub mod bundle;
pub mod components;
pub mod config;
pub mod constants;
pub mod exchange;
pub mod report;
pub mod spreadsheet;
pub mod web;
pub mod youtube;
