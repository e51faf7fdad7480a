//! Duration normalization.
//!
//! Worked and overtime fields arrive in whatever shape they were typed in:
//! `"8:17"`, `"8 hrs 17 mins"`, `"8h17m"`, `"8"`, `7.5`, `497`. Everything
//! here folds them into whole minutes and back. Nothing in this module
//! fails: input that cannot be read counts as zero so that one bad row never
//! stops an aggregate.

use chrono::{DateTime, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Plain numbers above this are already minutes; at or below it they are hours.
/// A bare minute count this small is implausible for a workday, and a
/// worked/OT figure above it cannot be hours.
pub const HOURS_CUTOVER: f64 = 24.0;

static COLON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("colon pattern"));

static HOURS_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:hours?|hrs?|h)").expect("hours pattern")
});

static MINUTES_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:minutes?|mins?|m)").expect("minutes pattern")
});

static BARE_HOURS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("bare number pattern"));

/// A duration as it came off the wire: JSON number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Number(f64),
    Text(String),
}

impl From<&str> for RawDuration {
    fn from(s: &str) -> Self {
        RawDuration::Text(s.to_string())
    }
}

/// Minutes in `raw`; `None` is zero.
pub fn parse(raw: Option<&RawDuration>) -> u64 {
    match raw {
        None => 0,
        Some(RawDuration::Number(n)) => parse_number(*n),
        Some(RawDuration::Text(s)) => parse_str(s),
    }
}

/// Numeric input: above [`HOURS_CUTOVER`] it is minutes, otherwise decimal hours.
pub fn parse_number(value: f64) -> u64 {
    if value > HOURS_CUTOVER {
        whole_minutes(value)
    } else {
        whole_minutes(value * 60.0)
    }
}

pub fn parse_str(raw: &str) -> u64 {
    let text = raw.trim();
    if text.is_empty() {
        return 0;
    }

    if let Some(caps) = COLON.captures(text) {
        return whole_minutes(decimal(&caps[1]) * 60.0 + decimal(&caps[2]));
    }

    // "8 hrs 17 mins", "8hr17min", "8h 17m", "2.5 hours", "2 hours 5 minutes", "17m"
    let hours = HOURS_PART.captures(text).map(|c| decimal(&c[1]));
    let minutes = MINUTES_PART.captures(text).map(|c| decimal(&c[1]));
    if hours.is_some() || minutes.is_some() {
        return whole_minutes(hours.unwrap_or(0.0) * 60.0 + minutes.unwrap_or(0.0));
    }

    if BARE_HOURS.is_match(text) {
        return whole_minutes(decimal(text) * 60.0);
    }

    0
}

fn decimal(digits: &str) -> f64 {
    digits.parse().unwrap_or(0.0)
}

/// Rounds to the nearest minute. Anything that does not fit a `u64` is as
/// unreadable as text we could not parse, so it counts as zero.
fn whole_minutes(value: f64) -> u64 {
    let rounded = value.round();
    if !rounded.is_finite() || rounded <= 0.0 || rounded >= u64::MAX as f64 {
        return 0;
    }
    rounded as u64
}

/// `"2 hrs 5 mins"`, `"1 hr"`, `"1 min"`, `"0 mins"`.
pub fn format(minutes: u64) -> String {
    let h = minutes / 60;
    let m = minutes % 60;

    let hours = (h > 0).then(|| format!("{} hr{}", h, plural(h)));
    let mins = (m > 0).then(|| format!("{} min{}", m, plural(m)));

    match (hours, mins) {
        (Some(h), Some(m)) => format!("{} {}", h, m),
        (Some(h), None) => h,
        (None, Some(m)) => m,
        (None, None) => "0 mins".to_string(),
    }
}

fn plural(count: u64) -> &'static str {
    if count == 1 { "" } else { "s" }
}

const TIME_FORMATS: [&str; 5] = ["%H:%M:%S", "%H:%M", "%I:%M %p", "%I:%M%p", "%I:%M:%S %p"];

/// A clock reading: either a bare time of day or a full timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Clock {
    Time(NaiveTime),
    Stamp(NaiveDateTime),
}

impl Clock {
    fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim().to_ascii_uppercase();
        if text.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
            return Some(Clock::Stamp(dt.naive_utc()));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&text, fmt) {
                return Some(Clock::Stamp(dt));
            }
        }
        TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(&text, fmt).ok())
            .map(Clock::Time)
    }

    fn time(&self) -> NaiveTime {
        match self {
            Clock::Time(t) => *t,
            Clock::Stamp(dt) => dt.time(),
        }
    }
}

/// Minutes between a clock-in and a clock-out reading.
///
/// Time-only readings where clock-out is earlier than clock-in are taken
/// to cross midnight. Unreadable input gives zero.
pub fn worked_between(clock_in: &str, clock_out: &str) -> u64 {
    let (Some(start), Some(end)) = (Clock::parse(clock_in), Clock::parse(clock_out)) else {
        return 0;
    };

    let minutes = match (start, end) {
        (Clock::Stamp(a), Clock::Stamp(b)) => (b - a).num_minutes(),
        (a, b) => {
            let diff = (b.time() - a.time()).num_minutes();
            if diff < 0 { diff + 24 * 60 } else { diff }
        }
    };

    minutes.max(0) as u64
}
