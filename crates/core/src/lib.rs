// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jd-core: Domain types and pure rules for job status derivation

pub mod macros;

pub mod clock;
pub mod config;
pub mod execution;
pub mod fleet;
pub mod job;
pub mod pause;
pub mod prefer;
pub mod schedule;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, JobConfig, JobSettingsUpdate, ScheduleConfig};
pub use execution::{fresh_completion, ExecutionInfo, ExecutionStatus, ShardMarkers};
pub use fleet::{classify_fleet, compare_version, DomainClass};
pub use job::{ExecutorName, JobName, JobStatus, JobType, TaskId};
pub use pause::{in_pause, PauseWindow};
pub use prefer::{is_migrate_enabled, PreferEntry, PreferList, CONTAINER_MARKER};
pub use schedule::{resolve_time_zone, CronSchedule};
pub use time_fmt::{format_elapsed, format_rate, format_time_in_zone};
