// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed job settings: read and transactional update.

use jd_core::{JobConfig, JobName, JobSettingsUpdate, ScheduleConfig};
use jd_tree::read::{job_exists, read_job_config, read_schedule_config};
use jd_tree::{paths, Transaction, TreeAccessor, TreeError};

use crate::config::EngineConfig;
use crate::error::EngineError;

/// The job's full typed configuration.
pub async fn get_job_settings<T>(
    tree: &T,
    job: &JobName,
    config: &EngineConfig,
) -> Result<JobConfig, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    match read_job_config(tree, job, &config.default_time_zone).await {
        Ok(settings) => Ok(settings),
        Err(TreeError::NoNode(_)) => Err(EngineError::job_not_found(job.as_str())),
        Err(e) => Err(e.into()),
    }
}

/// The settings that drive firing and reporting. Garbage in other fields
/// does not affect it.
pub async fn get_schedule_settings<T>(
    tree: &T,
    job: &JobName,
    config: &EngineConfig,
) -> Result<ScheduleConfig, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    match read_schedule_config(tree, job, &config.default_time_zone).await {
        Ok(settings) => Ok(settings),
        Err(TreeError::NoNode(_)) => Err(EngineError::job_not_found(job.as_str())),
        Err(e) => Err(e.into()),
    }
}

/// Write every supplied field in one transaction. Returns whether anything changed.
///
/// Switching reporting off also clears the job's execution subtree, since the
/// markers under it stop being maintained.
pub async fn update_job_settings<T>(
    tree: &T,
    job: &JobName,
    update: &JobSettingsUpdate,
) -> Result<bool, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    if !job_exists(tree, job.as_str()).await? {
        return Err(EngineError::job_not_found(job.as_str()));
    }
    let txn = update
        .entries()
        .into_iter()
        .fold(Transaction::new(), |txn, (key, value)| {
            txn.replace_if_changed(paths::config(job.as_str(), key), value)
        });
    let changed = tree.commit(txn).await?;
    tracing::info!(job = %job, changed, "updated job settings");

    if update.disables_report() {
        tracing::info!(job = %job, "reporting disabled, clearing execution state");
        tree.delete_recursive(&paths::execution_root(job.as_str())).await?;
    }
    Ok(changed)
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
