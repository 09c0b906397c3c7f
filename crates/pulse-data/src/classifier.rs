//! Line grammar for exported chat transcripts.
//!
//! Each line looks like `4/1/21, 9:55 PM - +91 12345: Hello`. A line is
//! first matched against the entry pattern, its date and time are parsed,
//! and the payload is then classified as a join, a message, or noise.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDateTime};
use pulse_core::models::{Event, TimestampedEntry};
use regex::Regex;

/// `chrono` format for the date and time captured by the entry pattern.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%y, %I:%M %p";

fn entry_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2}/\d{1,2}/\d{2}), (\d{1,2}:\d{2} (?:AM|PM)) - (.+)$")
            .expect("regex is valid")
    })
}

fn join_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(.+?) joined using this group's invite link$").expect("regex is valid")
    })
}

fn message_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+?):").expect("regex is valid"))
}

/// Outcome of classifying one raw transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Empty after trimming.
    Blank,
    /// Did not match the grammar, had an invalid date, or carried a payload
    /// that is neither a join nor a message.
    Noise,
    Event(Event),
}

/// Full year for a two-digit `yy`: `00`–`68` are 20xx, `69`–`99` are 19xx.
fn expand_year(yy: u32) -> i32 {
    if yy < 69 {
        2000 + yy as i32
    } else {
        1900 + yy as i32
    }
}

/// Match a trimmed line against the entry pattern and parse its timestamp.
///
/// Returns `None` when the line does not match or the date is not a real
/// calendar date (e.g. `13/40/21`).
pub fn parse_entry(line: &str) -> Option<TimestampedEntry> {
    let caps = entry_regex().captures(line)?;
    let date_str = caps.get(1)?.as_str();
    let time_str = caps.get(2)?.as_str();
    let payload = caps.get(3)?.as_str();

    let stamp = format!("{}, {}", date_str, time_str);
    let dt = NaiveDateTime::parse_from_str(&stamp, TIMESTAMP_FORMAT).ok()?;

    // chrono pivots `%y` at 70; transcripts pivot at 69.
    let yy: u32 = date_str.rsplit('/').next()?.parse().ok()?;
    let date = dt.date().with_year(expand_year(yy))?;

    Some(TimestampedEntry {
        date,
        time: dt.time(),
        payload: payload.to_string(),
    })
}

/// Derive an event from an entry's payload.
///
/// The join pattern is tried before the message pattern, so a join notice
/// containing a colon in the user's name is still a join.
pub fn classify_payload(entry: &TimestampedEntry) -> Option<Event> {
    let date = entry.date;

    if let Some(caps) = join_regex().captures(&entry.payload) {
        let user = caps.get(1)?.as_str().trim().to_string();
        return Some(Event::Join { user, date });
    }

    // Sender is whatever precedes the first colon.
    if let Some(caps) = message_regex().captures(&entry.payload) {
        let user = caps.get(1)?.as_str().trim().to_string();
        return Some(Event::Message { user, date });
    }

    None
}

/// Classify a raw line (surrounding whitespace is ignored).
pub fn classify_line(raw: &str) -> LineClass {
    let line = raw.trim();
    if line.is_empty() {
        return LineClass::Blank;
    }

    parse_entry(line)
        .and_then(|entry| classify_payload(&entry))
        .map_or(LineClass::Noise, LineClass::Event)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
