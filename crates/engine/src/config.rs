// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

pub use jd_core::config::defaults::TIME_ZONE as DEFAULT_TIME_ZONE;

/// Pause between touching a job's report marker and reading execution state
/// back. Executors refresh their markers when the report node changes.
pub const REPORT_REFRESH_WAIT: Duration = Duration::from_millis(500);

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Time zone for jobs without a `timeZone` node
    pub default_time_zone: String,
    pub report_refresh_wait: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_time_zone: DEFAULT_TIME_ZONE.to_string(),
            report_refresh_wait: REPORT_REFRESH_WAIT,
        }
    }
}

impl EngineConfig {
    jd_core::setters! {
        into { default_time_zone: String }
        set { report_refresh_wait: Duration }
    }
}
