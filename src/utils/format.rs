//! Human-readable formatting helpers.

use std::sync::LazyLock;

use regex::Regex;

static FIRST_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)").unwrap());

/// Format a Steam playtime given in minutes.
///
/// Under an hour shows minutes, under 100 hours shows hours and minutes,
/// anything longer shows whole hours.
pub fn format_playtime(minutes: u64) -> String {
    let hours = minutes / 60;
    if hours < 1 {
        format!("{}m", minutes)
    } else if hours < 100 {
        format!("{}h {}m", hours, minutes % 60)
    } else {
        format!("{}h", hours)
    }
}

/// Hours recorded in a free-form playtime string such as "45 hours" or "120h".
///
/// Only the first run of digits counts, so "1h 30m" is one hour.
pub fn parse_playtime_hours(playtime: &str) -> Option<u64> {
    FIRST_NUMBER
        .captures(playtime)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Leading whole lines of `s` totalling at most `max_chars` characters.
///
/// Lines are never split, so inline markup and tags on a line stay intact.
/// The first line is always kept even when it alone exceeds the budget.
pub fn excerpt_lines(s: &str, max_chars: usize) -> &str {
    let mut end = 0;
    let mut used = 0;
    for (i, line) in s.split_inclusive('\n').enumerate() {
        let len = line.trim_end().chars().count();
        if i > 0 && used + len > max_chars {
            break;
        }
        used += len;
        end += line.len();
    }
    s[..end].trim_end()
}
