//! Calendar-day helpers shared by the board and the schedule picker.
//!
//! Everything past `normalize` works on `NaiveDate`, so there is no
//! time-of-day arithmetic anywhere in the crate. The local zone is consulted
//! exactly once, when an instant is turned into a day.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, Days, Duration, Local, NaiveDate, TimeZone};

/// Storage and sort key format. Zero padded, so string order is date order.
pub const KEY_FORMAT: &str = "%Y-%m-%d";

/// Truncates an instant to the local calendar day it falls on.
pub fn normalize<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// The current local calendar day.
pub fn today() -> NaiveDate {
    normalize(&Local::now())
}

pub fn encode_key(date: NaiveDate) -> String {
    date.format(KEY_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` key. Anything `encode_key` would not have produced
/// is rejected, including unpadded fields and impossible dates. Years are
/// limited to four digits.
pub fn decode_key(key: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(key, KEY_FORMAT)
        .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", key))?;
    if encode_key(date) != key || !(0..=9999).contains(&date.year()) {
        bail!("Invalid date '{}'. Expected YYYY-MM-DD", key);
    }
    Ok(date)
}

/// Panics outside chrono's calendar; offsets from user input go through
/// `checked_add_days`.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

/// `None` when the result would fall outside the representable calendar.
pub fn checked_add_days(date: NaiveDate, n: i64) -> Option<NaiveDate> {
    let days = Days::new(n.unsigned_abs());
    if n >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    }
}

/// Monday of the ISO week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as i64;
    add_days(date, -offset)
}

/// Whole days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Display form, e.g. "Mon, Mar 11, 2024". Never used for keys or ordering.
pub fn format(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// "Mar 11"
pub fn format_short(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// "11/03", the board cell caption.
pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}
