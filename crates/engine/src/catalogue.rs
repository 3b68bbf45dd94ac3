// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job listings: names, groups, dependencies and per-job overviews.
//!
//! Fleet-wide listings isolate failures per job. A job whose state cannot be
//! read is logged and left out instead of failing the whole listing.

use jd_core::config::{keys, split_names, SYSTEM_MODE_PREFIX};
use jd_core::{
    format_time_in_zone, is_migrate_enabled, resolve_time_zone, ExecutorName, JobName, JobStatus,
    JobType, PreferEntry, TaskId,
};
use jd_tree::paths::{self, server_keys, EXECUTORS_ROOT, JOBS_ROOT};
use jd_tree::read::{children_or_empty, job_exists, read_flag, read_trimmed};
use jd_tree::TreeAccessor;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::migration::live_tasks;
use crate::servers::job_success_rate;
use crate::settings::get_job_settings;
use crate::status::derive_job_status;

/// Every job with a `config` node, sorted by name.
pub async fn list_jobs<T>(tree: &T) -> Result<Vec<JobName>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let mut jobs = Vec::new();
    for name in children_or_empty(tree, JOBS_ROOT).await? {
        if job_exists(tree, &name).await? {
            jobs.push(JobName::from(name));
        }
    }
    jobs.sort();
    Ok(jobs)
}

/// [`list_jobs`] without the platform's own `system` jobs.
pub async fn list_non_system_jobs<T>(tree: &T) -> Result<Vec<JobName>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let mut jobs = Vec::new();
    for job in list_jobs(tree).await? {
        let mode = tree.read(&paths::config(job.as_str(), keys::JOB_MODE)).await?;
        if !mode.is_some_and(|m| m.starts_with(SYSTEM_MODE_PREFIX)) {
            jobs.push(job);
        }
    }
    Ok(jobs)
}

/// Distinct non-empty `groups` values, in job order.
pub async fn list_job_groups<T>(tree: &T) -> Result<Vec<String>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let mut groups: Vec<String> = Vec::new();
    for job in list_jobs(tree).await? {
        if let Some(group) = read_trimmed(tree, &paths::config(job.as_str(), keys::GROUPS)).await? {
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
    }
    Ok(groups)
}

/// A related job and whether it is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyStatus {
    pub job: JobName,
    pub enabled: bool,
}

async fn dependency_status<T>(tree: &T, job: JobName) -> Result<DependencyStatus, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let enabled = read_flag(tree, &paths::config(job.as_str(), keys::ENABLED)).await?;
    Ok(DependencyStatus { job, enabled })
}

async fn dependencies_of<T>(tree: &T, job: &JobName) -> Result<Vec<JobName>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let raw = tree.read(&paths::config(job.as_str(), keys::DEPENDENCIES)).await?;
    Ok(raw.as_deref().map(split_names).unwrap_or_default())
}

/// Jobs this job depends on. Unknown, system and self references are skipped.
pub async fn dependent_jobs<T>(tree: &T, job: &JobName) -> Result<Vec<DependencyStatus>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let known = list_non_system_jobs(tree).await?;
    let mut result = Vec::new();
    for dependency in dependencies_of(tree, job).await? {
        if &dependency != job && known.contains(&dependency) {
            result.push(dependency_status(tree, dependency).await?);
        }
    }
    Ok(result)
}

/// Non-system jobs that list this job among their dependencies.
pub async fn depended_jobs<T>(tree: &T, job: &JobName) -> Result<Vec<DependencyStatus>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let mut result = Vec::new();
    for other in list_non_system_jobs(tree).await? {
        if &other != job && dependencies_of(tree, &other).await?.contains(job) {
            result.push(dependency_status(tree, other).await?);
        }
    }
    Ok(result)
}

/// One entry of a preferred list as shown to operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum PreferredTarget {
    Executor(ExecutorName),
    /// Listed but no longer in the executor registry
    DeletedExecutor(ExecutorName),
    ContainerTask(TaskId),
}

/// Summary row of a job listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOverview {
    pub job: JobName,
    pub job_type: JobType,
    pub enabled: bool,
    pub status: JobStatus,
    pub cron: Option<String>,
    pub time_zone: String,
    pub sharding_total_count: u32,
    pub groups: Option<String>,
    pub description: Option<String>,
    /// Container references to tasks that no longer exist are left out
    pub prefer_list: Vec<PreferredTarget>,
    pub migrate_enabled: bool,
    /// Executors holding shards; empty for stopped jobs
    pub sharding_executors: Vec<ExecutorName>,
    /// Percentage of successful runs
    pub success_rate: Option<f64>,
}

/// Overview of one job.
///
/// `executors` and `tasks` are the executor and container task registries,
/// passed in so a listing reads them once.
pub async fn job_overview<T>(
    tree: &T,
    job: &JobName,
    executors: &[ExecutorName],
    tasks: &[TaskId],
    config: &EngineConfig,
) -> Result<JobOverview, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let settings = get_job_settings(tree, job, config).await?;
    let status = derive_job_status(tree, job).await?;

    let mut prefer_list = Vec::new();
    let mut migrate_enabled = false;
    if let Some(prefer) = &settings.prefer_list {
        for entry in prefer.entries() {
            match entry {
                PreferEntry::Executor(name) if !executors.is_empty() && !executors.contains(name) => {
                    prefer_list.push(PreferredTarget::DeletedExecutor(name.clone()));
                }
                PreferEntry::Executor(name) => prefer_list.push(PreferredTarget::Executor(name.clone())),
                PreferEntry::ContainerTask(task) if tasks.contains(task) => {
                    prefer_list.push(PreferredTarget::ContainerTask(task.clone()));
                }
                PreferEntry::ContainerTask(_) => {}
            }
        }
        migrate_enabled = is_migrate_enabled(prefer, tasks);
    }

    let mut sharding_executors = Vec::new();
    if status != JobStatus::Stopped {
        for server in children_or_empty(tree, &paths::servers_root(job.as_str())).await? {
            let sharding = paths::server(job.as_str(), &server, server_keys::SHARDING);
            if read_trimmed(tree, &sharding).await?.is_some() {
                sharding_executors.push(ExecutorName::from(server));
            }
        }
    }

    Ok(JobOverview {
        job: job.clone(),
        job_type: settings.job_type,
        enabled: settings.enabled,
        status,
        cron: settings.cron,
        time_zone: settings.time_zone,
        sharding_total_count: settings.sharding_total_count,
        groups: settings.groups,
        description: settings.description,
        prefer_list,
        migrate_enabled,
        sharding_executors,
        success_rate: job_success_rate(tree, job).await?,
    })
}

/// Overview of every non-system job.
pub async fn job_overviews<T>(tree: &T, config: &EngineConfig) -> Result<Vec<JobOverview>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let executors: Vec<ExecutorName> =
        children_or_empty(tree, EXECUTORS_ROOT).await?.into_iter().map(ExecutorName::from).collect();
    let tasks = live_tasks(tree).await?;

    let mut overviews = Vec::new();
    for job in list_non_system_jobs(tree).await? {
        match job_overview(tree, &job, &executors, &tasks, config).await {
            Ok(overview) => overviews.push(overview),
            Err(e) => tracing::warn!(job = %job, error = %e, "skipping job in overview"),
        }
    }
    Ok(overviews)
}

/// `"<zone> <yyyy-MM-dd HH:mm:ss>"` in the job's time zone.
pub async fn format_time_by_job_time_zone<T>(
    tree: &T,
    job: &JobName,
    epoch_ms: u64,
    config: &EngineConfig,
) -> Result<String, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let zone = read_trimmed(tree, &paths::config(job.as_str(), keys::TIME_ZONE))
        .await?
        .unwrap_or_else(|| config.default_time_zone.clone());
    Ok(format!("{} {}", zone, format_time_in_zone(epoch_ms, resolve_time_zone(&zone))))
}

#[cfg(test)]
#[path = "catalogue_tests.rs"]
mod tests;
