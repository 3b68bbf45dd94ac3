// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time formatting helpers.

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;

/// Format epoch milliseconds as `yyyy-MM-dd HH:mm:ss` in `tz`.
pub fn format_time_in_zone(epoch_ms: u64, tz: Tz) -> String {
    match Utc.timestamp_millis_opt(epoch_ms as i64).single() {
        Some(t) => t.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

/// Format elapsed seconds as a compact string (e.g. "5s", "2m", "1h30m", "3d").
pub fn format_elapsed(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86_400 {
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        if m == 0 {
            format!("{}h", h)
        } else {
            format!("{}h{}m", h, m)
        }
    } else {
        format!("{}d", secs / 86_400)
    }
}

/// Render a success ratio as a percentage with at most two decimals ("66.67%", "100%").
pub fn format_rate(percent: f64) -> String {
    let rounded = (percent * 100.0).round() / 100.0;
    let mut s = format!("{:.2}", rounded);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    format!("{}%", s)
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
