// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::card::escape_html;

const LONG_DATE: &str = "%B %-d, %Y";

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a poll timestamp into its calendar date.
///
/// Offset-carrying timestamps keep the date of their own offset; naive ones are
/// taken as wall-clock time.
#[must_use]
pub fn parse_poll_date(created_at: &str) -> Option<NaiveDate> {
    let text = created_at.trim();

    if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
        return Some(stamp.date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|stamp| stamp.date())
        .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
}

/// Long en-US date such as `January 5, 2024`; unparseable input is shown as-is, escaped.
#[must_use]
pub fn format_long_date(created_at: &str) -> String {
    match parse_poll_date(created_at) {
        Some(date) => date.format(LONG_DATE).to_string(),
        None => escape_html(created_at),
    }
}
