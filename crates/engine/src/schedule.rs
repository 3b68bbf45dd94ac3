// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Next fire times and the job health check built on them.

use jd_core::config::keys;
use jd_core::{Clock, JobName};
use jd_tree::paths::{self, execution_keys};
use jd_tree::read::children_or_empty;
use jd_tree::{TreeAccessor, TreeError};
use serde::{Deserialize, Serialize};

use crate::catalogue::list_non_system_jobs;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::settings::get_schedule_settings;

/// First fire time strictly after `after_ms` that falls outside the job's
/// pause window. `None` without a parsable cron or when the schedule runs out.
pub async fn next_fire_time<T>(
    tree: &T,
    job: &JobName,
    after_ms: u64,
    config: &EngineConfig,
) -> Result<Option<u64>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let settings = get_schedule_settings(tree, job, config).await?;
    Ok(settings.next_fire_time(after_ms))
}

/// Expected next fire of an enabled, reporting, cron-driven job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHealth {
    pub job: JobName,
    pub next_fire_time: Option<u64>,
    /// Some shard holds a `running` marker
    pub running: bool,
}

impl JobHealth {
    /// The job should have fired by `now_ms` but nothing is running.
    pub fn is_overdue(&self, now_ms: u64) -> bool {
        !self.running && self.next_fire_time.is_some_and(|t| t < now_ms)
    }
}

/// Health of one job; `None` for jobs the check does not cover (disabled,
/// not cron-driven, or with reporting switched off).
///
/// The next fire time is computed after the later of the moment the job was
/// enabled and its latest shard completion.
pub async fn job_health<T>(
    tree: &T,
    job: &JobName,
    config: &EngineConfig,
) -> Result<Option<JobHealth>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let settings = get_schedule_settings(tree, job, config).await?;
    if !(settings.enabled && settings.job_type.is_cron_driven() && settings.enabled_report) {
        return Ok(None);
    }

    let mut base = tree.mtime(&paths::config(job.as_str(), keys::ENABLED)).await?;
    let mut running = false;
    for item in children_or_empty(tree, &paths::execution_root(job.as_str())).await? {
        let marker = |key: &str| paths::execution(job.as_str(), &item, key);
        running |= tree.exists(&marker(execution_keys::RUNNING)).await?;
        match tree.mtime(&marker(execution_keys::COMPLETED)).await {
            Ok(completed) => base = base.max(completed),
            Err(TreeError::NoNode(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }

    Ok(Some(JobHealth {
        job: job.clone(),
        next_fire_time: settings.next_fire_time(base),
        running,
    }))
}

/// Every non-system job that is overdue at the clock's current time.
///
/// A job whose state cannot be read is logged and left out.
pub async fn overdue_jobs<T, C>(
    tree: &T,
    clock: &C,
    config: &EngineConfig,
) -> Result<Vec<JobHealth>, EngineError>
where
    T: TreeAccessor + ?Sized,
    C: Clock,
{
    let now = clock.epoch_ms();
    let mut overdue = Vec::new();
    for job in list_non_system_jobs(tree).await? {
        match job_health(tree, &job, config).await {
            Ok(Some(health)) if health.is_overdue(now) => overdue.push(health),
            Ok(_) => {}
            Err(e) => tracing::warn!(job = %job, error = %e, "skipping job in health check"),
        }
    }
    Ok(overdue)
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
