// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executors as seen from one job.

use jd_core::config::keys;
use jd_core::{ExecutorName, JobName, JobStatus, PreferList, TaskId};
use jd_tree::paths::{self, executor_keys, server_keys, EXECUTORS_ROOT};
use jd_tree::read::{children_or_empty, read_count, read_trimmed};
use jd_tree::TreeAccessor;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::migration::live_tasks;
use crate::status::derive_job_status;

/// Share of successful runs across all of a job's servers, in percent.
///
/// `None` when the job has no servers or no recorded runs.
pub async fn job_success_rate<T>(tree: &T, job: &JobName) -> Result<Option<f64>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let (mut success, mut failure) = (0u64, 0u64);
    for server in children_or_empty(tree, &paths::servers_root(job.as_str())).await? {
        let key = |k: &str| paths::server(job.as_str(), &server, k);
        success += read_count(tree, &key(server_keys::PROCESS_SUCCESS_COUNT)).await?;
        failure += read_count(tree, &key(server_keys::PROCESS_FAILURE_COUNT)).await?;
    }
    let total = success + failure;
    Ok((total > 0).then(|| success as f64 / total as f64 * 100.0))
}

/// One executor's state for a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobServer {
    pub executor: ExecutorName,
    pub ip: Option<String>,
    pub version: Option<String>,
    pub process_success_count: u64,
    pub process_failure_count: u64,
    /// Assigned shard items, comma-separated as stored
    pub sharding: Option<String>,
    /// The executor is registered with an ip
    pub online: bool,
    pub leader: bool,
    pub job_status: JobStatus,
}

/// Every executor that ever served the job, in server order.
pub async fn job_servers<T>(tree: &T, job: &JobName) -> Result<Vec<JobServer>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let leader = read_trimmed(tree, &paths::leader_host(job.as_str())).await?;
    let job_status = derive_job_status(tree, job).await?;

    let mut servers = Vec::new();
    for server in children_or_empty(tree, &paths::servers_root(job.as_str())).await? {
        let key = |k: &str| paths::server(job.as_str(), &server, k);
        let online = read_trimmed(tree, &paths::executor_key(&server, executor_keys::IP))
            .await?
            .is_some();
        servers.push(JobServer {
            ip: tree.read(&key(server_keys::IP)).await?,
            version: tree.read(&key(server_keys::VERSION)).await?,
            process_success_count: read_count(tree, &key(server_keys::PROCESS_SUCCESS_COUNT)).await?,
            process_failure_count: read_count(tree, &key(server_keys::PROCESS_FAILURE_COUNT)).await?,
            sharding: tree.read(&key(server_keys::SHARDING)).await?,
            online,
            leader: leader.as_deref() == Some(server.as_str()),
            job_status,
            executor: ExecutorName::from(server),
        });
    }
    Ok(servers)
}

/// A place a job could be pinned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutorCandidate {
    Online { executor: ExecutorName, ip: String },
    ContainerTask { task: TaskId },
    Offline { executor: ExecutorName },
    /// In the job's preferred list but gone from the registry
    Deleted { executor: ExecutorName },
}

/// Candidates for a job's preferred list: online executors, live container
/// tasks, offline executors, then preferred executors missing from the
/// registry.
///
/// Executors running inside a container are skipped; their task is the
/// candidate. Without an executor registry there are no candidates.
pub async fn executor_candidates<T>(
    tree: &T,
    job: &JobName,
) -> Result<Vec<ExecutorCandidate>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let Some(registered) = tree.children(EXECUTORS_ROOT).await? else {
        return Ok(Vec::new());
    };

    let mut online = Vec::new();
    let mut offline = Vec::new();
    for name in &registered {
        if tree.exists(&paths::executor_key(name, executor_keys::TASK)).await? {
            continue;
        }
        let executor = ExecutorName::new(name);
        match read_trimmed(tree, &paths::executor_key(name, executor_keys::IP)).await? {
            Some(ip) => online.push(ExecutorCandidate::Online { executor, ip }),
            None => offline.push(ExecutorCandidate::Offline { executor }),
        }
    }

    let mut candidates = online;
    let tasks = live_tasks(tree).await?;
    candidates.extend(tasks.into_iter().map(|task| ExecutorCandidate::ContainerTask { task }));
    candidates.extend(offline);

    let raw = tree.read(&paths::config(job.as_str(), keys::PREFER_LIST)).await?;
    let prefer = raw.as_deref().map(PreferList::parse).unwrap_or_default();
    for executor in prefer.executors() {
        if !registered.iter().any(|r| executor == r.as_str()) {
            candidates.push(ExecutorCandidate::Deleted { executor: executor.clone() });
        }
    }
    Ok(candidates)
}

#[cfg(test)]
#[path = "servers_tests.rs"]
mod tests;
