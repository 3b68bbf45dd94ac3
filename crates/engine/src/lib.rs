// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jd-engine: Status derivation, scheduling, fleet and migration operations
//!
//! Every operation is a free function over a [`jd_tree::TreeAccessor`], so the
//! same code runs against a live store or an in-memory tree.

mod config;
mod error;

pub mod catalogue;
pub mod fleet;
pub mod migration;
pub mod schedule;
pub mod servers;
pub mod settings;
pub mod status;

pub use catalogue::{
    depended_jobs, dependent_jobs, format_time_by_job_time_zone, job_overviews, list_job_groups,
    list_jobs, list_non_system_jobs, DependencyStatus, JobOverview, PreferredTarget,
};
pub use config::{EngineConfig, DEFAULT_TIME_ZONE, REPORT_REFRESH_WAIT};
pub use error::EngineError;
pub use fleet::{classify_executor_fleet, executor_versions};
pub use jd_core::is_migrate_enabled;
pub use migration::{
    all_migration_targets, available_migration_targets, batch_migrate_task, migrate_task,
    MigrationTargets,
};
pub use schedule::{job_health, next_fire_time, overdue_jobs, JobHealth};
pub use servers::{executor_candidates, job_servers, job_success_rate, ExecutorCandidate, JobServer};
pub use settings::{get_job_settings, get_schedule_settings, update_job_settings};
pub use status::{
    all_shards_finished, derive_execution_info, derive_job_status, execution_log,
    list_execution_info, running_executor,
};
