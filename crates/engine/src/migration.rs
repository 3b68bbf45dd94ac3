// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Moving a job's container affinity from one task to another.
//!
//! A migration rewrites every container reference in the job's preferred
//! list to the new task, then recreates the job's `forceShard` marker so the
//! scheduler recomputes shard assignment. Every precondition is checked
//! before the first write.
//!
//! Batch migration validates all jobs first and stops at the first invalid
//! one. The mutation pass is not atomic across jobs: a failure on job *k*
//! leaves jobs before it migrated.

use jd_core::config::keys;
use jd_core::{JobName, PreferList, TaskId};
use jd_tree::paths::{self, CONTAINER_TASKS_ROOT};
use jd_tree::read::children_or_empty;
use jd_tree::{Transaction, TreeAccessor};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Container tasks a job references, and the live tasks it could move to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationTargets {
    pub job: JobName,
    pub current: Vec<TaskId>,
    pub migratable: Vec<TaskId>,
}

/// Every task in the container task registry.
pub async fn live_tasks<T>(tree: &T) -> Result<Vec<TaskId>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    Ok(children_or_empty(tree, CONTAINER_TASKS_ROOT).await?.into_iter().map(TaskId::from).collect())
}

/// All container tasks a job could be migrated to, regardless of job.
pub async fn all_migration_targets<T>(tree: &T) -> Result<Vec<TaskId>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    live_tasks(tree).await
}

async fn read_prefer_list<T>(tree: &T, job: &JobName) -> Result<Option<PreferList>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let raw = tree.read(&paths::config(job.as_str(), keys::PREFER_LIST)).await?;
    Ok(raw.as_deref().map(PreferList::parse))
}

pub async fn available_migration_targets<T>(
    tree: &T,
    job: &JobName,
) -> Result<MigrationTargets, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    if !tree.exists(&paths::job(job.as_str())).await? {
        return Err(EngineError::job_not_found(job.as_str()));
    }
    let prefer = read_prefer_list(tree, job).await?.unwrap_or_default();
    let current: Vec<TaskId> = prefer.tasks().into_iter().cloned().collect();
    let migratable =
        live_tasks(tree).await?.into_iter().filter(|task| !current.contains(task)).collect();
    Ok(MigrationTargets { job: job.clone(), current, migratable })
}

/// Check every migration precondition, in order. Returns the current list.
async fn validate<T>(tree: &T, job: &JobName, task: &TaskId) -> Result<PreferList, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    if !tree.exists(&paths::job(job.as_str())).await? {
        return Err(EngineError::job_not_found(job.as_str()));
    }
    let Some(prefer) = read_prefer_list(tree, job).await? else {
        return Err(EngineError::InvalidState(format!(
            "job {} has no preferred executor list",
            job
        )));
    };
    if !prefer.has_task() {
        return Err(EngineError::InvalidState(format!(
            "job {} has no container task configured",
            job
        )));
    }
    if prefer.references_task(task.as_str()) {
        return Err(EngineError::InvalidState(format!(
            "task {} is already set for job {}",
            task, job
        )));
    }
    if !tree.exists(&paths::container_task(task.as_str())).await? {
        return Err(EngineError::NotFound(format!("container task {} does not exist", task)));
    }
    Ok(prefer)
}

async fn apply<T>(
    tree: &T,
    job: &JobName,
    task: &TaskId,
    prefer: &PreferList,
) -> Result<PreferList, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let migrated = prefer.retarget_tasks(task);
    let txn = Transaction::new()
        .replace_if_changed(paths::config(job.as_str(), keys::PREFER_LIST), migrated.to_string());
    let changed = tree.commit(txn).await?;

    let force_shard = paths::config(job.as_str(), keys::FORCE_SHARD);
    tree.delete(&force_shard).await?;
    tree.create(&force_shard).await?;

    tracing::info!(
        job = %job,
        task = %task,
        old = %prefer,
        new = %migrated,
        changed,
        "migrated container task"
    );
    Ok(migrated)
}

/// Point a job's container references at `task`. Returns the new list.
///
/// Fails without touching the tree when any precondition does not hold.
pub async fn migrate_task<T>(
    tree: &T,
    job: &JobName,
    task: &TaskId,
) -> Result<PreferList, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let prefer = validate(tree, job, task).await?;
    apply(tree, job, task, &prefer).await
}

/// Migrate several jobs to `task`. Returns the new lists in job order.
pub async fn batch_migrate_task<T>(
    tree: &T,
    jobs: &[JobName],
    task: &TaskId,
) -> Result<Vec<PreferList>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    if jobs.is_empty() {
        return Err(EngineError::InvalidState("no jobs to migrate".to_string()));
    }
    for job in jobs {
        validate(tree, job, task).await.map_err(|e| e.in_batch(job))?;
    }

    // Each job is checked again right before its own write
    let mut migrated = Vec::with_capacity(jobs.len());
    for job in jobs {
        migrated.push(migrate_task(tree, job, task).await.map_err(|e| e.in_batch(job))?);
    }
    tracing::info!(jobs = jobs.len(), task = %task, "batch migration finished");
    Ok(migrated)
}

#[cfg(test)]
#[path = "migration_tests.rs"]
mod tests;
