// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job and shard status derived from liveness markers.
//!
//! Nothing here is cached: the `running` marker is ephemeral and can vanish
//! between two calls when an executor's session dies.

use jd_core::config::keys;
use jd_core::{
    format_time_in_zone, fresh_completion, resolve_time_zone, Clock, ExecutionInfo,
    ExecutionStatus, ExecutorName, JobName, JobStatus, ShardMarkers,
};
use jd_tree::paths::{self, execution_keys, server_keys};
use jd_tree::read::{children_or_empty, read_flag, read_millis};
use jd_tree::{TreeAccessor, TreeError};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::settings::get_schedule_settings;

/// Presence of the four liveness markers of one shard.
pub async fn shard_markers<T>(tree: &T, job: &JobName, item: &str) -> Result<ShardMarkers, TreeError>
where
    T: TreeAccessor + ?Sized,
{
    let marker = |key: &str| paths::execution(job.as_str(), item, key);
    Ok(ShardMarkers {
        running: tree.exists(&marker(execution_keys::RUNNING)).await?,
        completed: tree.exists(&marker(execution_keys::COMPLETED)).await?,
        failed: tree.exists(&marker(execution_keys::FAILED)).await?,
        timeout: tree.exists(&marker(execution_keys::TIMEOUT)).await?,
    })
}

/// True unless some shard is running without having completed.
pub async fn all_shards_finished<T>(tree: &T, job: &JobName) -> Result<bool, TreeError>
where
    T: TreeAccessor + ?Sized,
{
    for item in children_or_empty(tree, &paths::execution_root(job.as_str())).await? {
        let marker = |key: &str| paths::execution(job.as_str(), &item, key);
        let running = tree.exists(&marker(execution_keys::RUNNING)).await?;
        if running && !tree.exists(&marker(execution_keys::COMPLETED)).await? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Lifecycle status of a job.
pub async fn derive_job_status<T>(tree: &T, job: &JobName) -> Result<JobStatus, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let enabled = read_flag(tree, &paths::config(job.as_str(), keys::ENABLED)).await?;
    let finished = all_shards_finished(tree, job).await?;
    Ok(JobStatus::derive(enabled, finished))
}

/// Executor whose assigned shard list holds `item`; first match in server order.
pub async fn running_executor<T>(
    tree: &T,
    job: &JobName,
    item: &str,
) -> Result<Option<ExecutorName>, TreeError>
where
    T: TreeAccessor + ?Sized,
{
    for server in children_or_empty(tree, &paths::servers_root(job.as_str())).await? {
        let sharding = tree.read(&paths::server(job.as_str(), &server, server_keys::SHARDING)).await?;
        let holds = sharding.is_some_and(|list| list.split(',').any(|i| i.trim() == item));
        if holds {
            return Ok(Some(ExecutorName::new(server)));
        }
    }
    Ok(None)
}

/// Execution detail of one shard.
pub async fn derive_execution_info<T, C>(
    tree: &T,
    job: &JobName,
    item: u32,
    clock: &C,
    config: &EngineConfig,
) -> Result<ExecutionInfo, EngineError>
where
    T: TreeAccessor + ?Sized,
    C: Clock,
{
    let settings = get_schedule_settings(tree, job, config).await?;
    let item_key = item.to_string();
    let key = |k: &str| paths::execution(job.as_str(), item, k);

    let markers = shard_markers(tree, job, &item_key).await?;
    let status = ExecutionStatus::classify(markers, settings.enabled_report);
    let tz = resolve_time_zone(&settings.time_zone);
    let fmt_time = |ms: Option<u64>| ms.map(|ms| format_time_in_zone(ms, tz));

    let last_begin = read_millis(tree, &key(execution_keys::LAST_BEGIN_TIME)).await?;
    let last_complete = read_millis(tree, &key(execution_keys::LAST_COMPLETE_TIME)).await?;
    let next_fire = read_millis(tree, &key(execution_keys::NEXT_FIRE_TIME)).await?;

    let elapsed_secs = if markers.running {
        match tree.mtime(&key(execution_keys::RUNNING)).await {
            Ok(started) => Some(clock.epoch_ms().saturating_sub(started) / 1000),
            // Marker vanished since the existence check
            Err(TreeError::NoNode(_)) => None,
            Err(e) => return Err(e.into()),
        }
    } else {
        None
    };

    Ok(ExecutionInfo {
        job: job.clone(),
        item,
        status,
        running_executor: running_executor(tree, job, &item_key).await?,
        failover_executor: tree.read(&key(execution_keys::FAILOVER)).await?,
        job_msg: tree.read(&key(execution_keys::JOB_MSG)).await?,
        last_begin_time: fmt_time(last_begin),
        last_complete_time: fmt_time(fresh_completion(last_begin, last_complete)),
        next_fire_time: fmt_time(next_fire),
        time_zone: settings.time_zone,
        elapsed_secs,
    })
}

/// Execution detail of every shard currently assigned to an executor, by item.
///
/// Touches the job's report marker first and waits
/// [`EngineConfig::report_refresh_wait`] so executors can refresh their
/// markers. A stopped job has nothing to report.
pub async fn list_execution_info<T, C>(
    tree: &T,
    job: &JobName,
    clock: &C,
    config: &EngineConfig,
) -> Result<Vec<ExecutionInfo>, EngineError>
where
    T: TreeAccessor + ?Sized,
    C: Clock,
{
    if derive_job_status(tree, job).await? == JobStatus::Stopped {
        return Ok(Vec::new());
    }
    tree.write(&paths::report(job.as_str()), &clock.epoch_ms().to_string()).await?;
    tokio::time::sleep(config.report_refresh_wait).await;

    let mut result = Vec::new();
    for item in children_or_empty(tree, &paths::execution_root(job.as_str())).await? {
        let Ok(index) = item.parse::<u32>() else {
            tracing::warn!(job = %job, item = %item, "skipping non-numeric execution item");
            continue;
        };
        if running_executor(tree, job, &item).await?.is_some() {
            result.push(derive_execution_info(tree, job, index, clock, config).await?);
        }
    }
    result.sort_by_key(|info| info.item);
    Ok(result)
}

/// The free-text log a shard's last run left behind.
pub async fn execution_log<T>(tree: &T, job: &JobName, item: u32) -> Result<Option<String>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    Ok(tree.read(&paths::execution(job.as_str(), item, execution_keys::JOB_LOG)).await?)
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
