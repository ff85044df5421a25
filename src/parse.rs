//! Best-effort heuristics for fields the sites only render as free text.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

static CHAPTER_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Chapter (\d+(\.\d+)?)").unwrap());

static LEADING_INT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").unwrap());

const HOURS_AGO: &str = "giờ trước";
const DAYS_AGO: &str = "ngày trước";

/// `"Chapter 12.5"` → 12.5. No match → 1. Anything that is not a finite number → 0.
pub fn chapter_number(title: &str) -> f64 {
    let parsed = match CHAPTER_NUMBER.captures(title).and_then(|c| c.get(1)) {
        Some(m) => m.as_str().parse::<f64>().unwrap_or(f64::NAN),
        None => 1.0,
    };
    normalize_chapter_number(parsed)
}

pub fn normalize_chapter_number(n: f64) -> f64 {
    if n.is_finite() { n } else { 0.0 }
}

/// Resolves "N giờ trước" / "N ngày trước" against `now`; anything else is `now`.
pub fn relative_time(text: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let text = text.trim();
    let unit = if text.contains(HOURS_AGO) {
        Duration::hours
    } else if text.contains(DAYS_AGO) {
        Duration::days
    } else {
        return now;
    };
    let Some(n) = LEADING_INT
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
    else {
        return now;
    };
    // absurd offsets would overflow chrono's range
    if !(0..=36_500).contains(&n) {
        return now;
    }
    now.checked_sub_signed(unit(n)).unwrap_or(now)
}

/// Last non-empty path segment of an href, which the sites use as the native id.
pub fn last_segment(href: &str) -> Option<&str> {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    path.trim_end_matches('/').rsplit('/').next().filter(|s| !s.is_empty())
}
