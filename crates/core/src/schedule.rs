// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron schedules evaluated in a job's time zone.
//!
//! Expressions use the seconds-first Quartz layout
//! (`sec min hour day-of-month month day-of-week [year]`).

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::pause::PauseWindow;

/// How far past the starting instant to look for an unpaused occurrence.
///
/// Pause windows repeat yearly and weekdays realign with leap years every 28
/// years, so a schedule with nothing unpaused within this span never fires.
pub const PAUSE_HORIZON_DAYS: i64 = 28 * 366;

/// Resolve a time zone id, falling back to UTC for unknown ids.
pub fn resolve_time_zone(id: &str) -> Tz {
    match Tz::from_str(id.trim()) {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!(time_zone = id, "unknown time zone, using UTC");
            Tz::UTC
        }
    }
}

/// A parsed cron expression bound to a time zone.
#[derive(Debug, Clone)]
pub struct CronSchedule {
    schedule: cron::Schedule,
    tz: Tz,
}

impl CronSchedule {
    /// Parse `expr`; `None` when it is not a valid expression.
    ///
    /// `?` (no specific value) is accepted in the day fields.
    pub fn parse(expr: &str, tz: Tz) -> Option<Self> {
        let normalized = expr.trim().replace('?', "*");
        match cron::Schedule::from_str(&normalized) {
            Ok(schedule) => Some(Self { schedule, tz }),
            Err(e) => {
                tracing::warn!(cron = expr, error = %e, "unparsable cron expression");
                None
            }
        }
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    fn at(&self, epoch_ms: u64) -> Option<DateTime<Tz>> {
        let epoch_ms = i64::try_from(epoch_ms).ok()?;
        Some(Utc.timestamp_millis_opt(epoch_ms).single()?.with_timezone(&self.tz))
    }

    /// Next occurrence strictly after `after_ms`.
    pub fn next_after(&self, after_ms: u64) -> Option<DateTime<Tz>> {
        self.schedule.after(&self.at(after_ms)?).next()
    }

    /// Next occurrence strictly after `after_ms` that is outside `pause`.
    ///
    /// A paused occurrence moves the search past the end of its blackout
    /// stretch. Returns `None` when the schedule has no further occurrences or
    /// none outside the blackout within [`PAUSE_HORIZON_DAYS`].
    pub fn next_fire_time_excluding(&self, after_ms: u64, pause: &PauseWindow) -> Option<u64> {
        let mut cursor = self.at(after_ms)?;
        let horizon = cursor.clone().checked_add_signed(Duration::days(PAUSE_HORIZON_DAYS))?;
        loop {
            let candidate = self.schedule.after(&cursor).next()?;
            if candidate > horizon {
                return None;
            }
            match pause.paused_until(&candidate) {
                Some(end) => cursor = end,
                None => return u64::try_from(candidate.timestamp_millis()).ok(),
            }
        }
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
