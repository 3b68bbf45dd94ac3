// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blackout (pause) windows.
//!
//! Dates are `M/d-M/d` ranges, times are `H:m-H:m` ranges, both inclusive and
//! comma separated. Neither wraps around: a range whose start is after its
//! end never matches. A family containing any malformed range matches nothing.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike};

/// An inclusive range over `(major, minor)` pairs, e.g. (month, day) or (hour, minute).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PairRange {
    start: (u32, u32),
    end: (u32, u32),
}

impl PairRange {
    fn parse(raw: &str, sep: char) -> Option<Self> {
        let (left, right) = split_exactly_two(raw.trim(), '-')?;
        Some(Self { start: parse_pair(left, sep)?, end: parse_pair(right, sep)? })
    }

    fn contains(&self, value: (u32, u32)) -> bool {
        self.start <= value && value <= self.end
    }
}

fn split_exactly_two(raw: &str, sep: char) -> Option<(&str, &str)> {
    let mut parts = raw.split(sep);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Some((a.trim(), b.trim())),
        _ => None,
    }
}

fn parse_pair(raw: &str, sep: char) -> Option<(u32, u32)> {
    let (a, b) = split_exactly_two(raw, sep)?;
    Some((a.parse().ok()?, b.parse().ok()?))
}

/// One configured family of ranges (all dates or all times).
#[derive(Debug, Clone, PartialEq, Eq)]
enum Family {
    /// Nothing configured
    Unset,
    Ranges(Vec<PairRange>),
    /// Configured but unparsable; never matches
    Malformed,
}

impl Family {
    fn parse(raw: Option<&str>, sep: char) -> Self {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Family::Unset,
            Some(raw) => raw,
        };
        let ranges: Option<Vec<_>> = raw.split(',').map(|r| PairRange::parse(r, sep)).collect();
        match ranges {
            Some(ranges) => Family::Ranges(ranges),
            None => {
                tracing::warn!(value = raw, "ignoring malformed pause period");
                Family::Malformed
            }
        }
    }

    fn is_set(&self) -> bool {
        !matches!(self, Family::Unset)
    }

    fn matches(&self, value: (u32, u32)) -> bool {
        match self {
            Family::Ranges(ranges) => ranges.iter().any(|r| r.contains(value)),
            Family::Unset | Family::Malformed => false,
        }
    }

    /// Latest end among the ranges containing `value`.
    fn furthest_end(&self, value: (u32, u32)) -> Option<(u32, u32)> {
        match self {
            Family::Ranges(ranges) => {
                ranges.iter().filter(|r| r.contains(value)).map(|r| r.end).max()
            }
            Family::Unset | Family::Malformed => None,
        }
    }
}

/// Parsed pause configuration of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseWindow {
    dates: Family,
    times: Family,
}

impl PauseWindow {
    pub fn parse(pause_date: Option<&str>, pause_time: Option<&str>) -> Self {
        Self { dates: Family::parse(pause_date, '/'), times: Family::parse(pause_time, ':') }
    }

    /// Never pauses.
    pub fn none() -> Self {
        Self { dates: Family::Unset, times: Family::Unset }
    }

    pub fn is_empty(&self) -> bool {
        !self.dates.is_set() && !self.times.is_set()
    }

    /// Whether `instant`, viewed in its own time zone, falls in the blackout.
    ///
    /// With one family configured that family decides; with both configured
    /// both must match.
    pub fn contains<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        let date_in = || self.dates.matches((instant.month(), instant.day()));
        let time_in = || self.times.matches((instant.hour(), instant.minute()));
        match (self.dates.is_set(), self.times.is_set()) {
            (false, false) => false,
            (true, false) => date_in(),
            (false, true) => time_in(),
            (true, true) => date_in() && time_in(),
        }
    }

    /// Last instant of the blackout stretch holding `instant`, or `None` when
    /// `instant` is not paused.
    ///
    /// Every instant from `instant` up to the returned one is paused too. The
    /// stretch ends at the last second of the matching time range, or of the
    /// matching date range when only dates are configured. Falls back to
    /// `instant` itself when that local time does not exist in the zone.
    pub fn paused_until<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        if !self.contains(instant) {
            return None;
        }
        let local = instant.naive_local();
        let end = if self.times.is_set() {
            let (hour, minute) = self.times.furthest_end((instant.hour(), instant.minute()))?;
            local.date().and_hms_opt(hour, minute, 59)
        } else {
            let (month, day) = self.dates.furthest_end((instant.month(), instant.day()))?;
            NaiveDate::from_ymd_opt(instant.year(), month, day)
                .unwrap_or(local.date())
                .and_hms_opt(23, 59, 59)
        };
        let end = end.and_then(|end| instant.timezone().from_local_datetime(&end).latest());
        Some(match end {
            Some(end) if end > *instant => end,
            _ => instant.clone(),
        })
    }
}

/// Convenience wrapper over [`PauseWindow`] for one-off checks.
pub fn in_pause<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    pause_date: Option<&str>,
    pause_time: Option<&str>,
) -> bool {
    PauseWindow::parse(pause_date, pause_time).contains(instant)
}

#[cfg(test)]
#[path = "pause_tests.rs"]
mod tests;
