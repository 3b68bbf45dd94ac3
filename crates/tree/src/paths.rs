// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path grammar of the coordination tree.
//!
//! ```text
//! /$Jobs/<job>/config/<key>                      job configuration
//! /$Jobs/<job>/execution/<item>/<key>            per-shard execution state
//! /$Jobs/<job>/servers/<executor>/<key>          per-executor, per-job state
//! /$Jobs/<job>/leader/election/host              elected leader executor
//! /$Jobs/<job>/control/report                    report refresh marker
//! /$SaturnExecutors/executors/<executor>/<key>   executor registry
//! /$SaturnExecutors/dcos/tasks/<task>            container task registry
//! ```

use std::fmt::Display;

pub const JOBS_ROOT: &str = "/$Jobs";
pub const EXECUTORS_ROOT: &str = "/$SaturnExecutors/executors";
pub const CONTAINER_TASKS_ROOT: &str = "/$SaturnExecutors/dcos/tasks";

/// Node names under `<job>/execution/<item>/`.
pub mod execution_keys {
    pub const RUNNING: &str = "running";
    pub const COMPLETED: &str = "completed";
    pub const FAILED: &str = "failed";
    pub const TIMEOUT: &str = "timeout";
    pub const LAST_BEGIN_TIME: &str = "lastBeginTime";
    pub const LAST_COMPLETE_TIME: &str = "lastCompleteTime";
    pub const NEXT_FIRE_TIME: &str = "nextFireTime";
    pub const FAILOVER: &str = "failover";
    pub const JOB_MSG: &str = "jobMsg";
    pub const JOB_LOG: &str = "jobLog";
}

/// Node names under `<job>/servers/<executor>/`.
pub mod server_keys {
    pub const IP: &str = "ip";
    pub const VERSION: &str = "version";
    pub const SHARDING: &str = "sharding";
    pub const PROCESS_SUCCESS_COUNT: &str = "processSuccessCount";
    pub const PROCESS_FAILURE_COUNT: &str = "processFailureCount";
}

/// Node names under an executor registry entry.
pub mod executor_keys {
    pub const IP: &str = "ip";
    pub const VERSION: &str = "version";
    /// Present when the executor runs inside a container task
    pub const TASK: &str = "task";
}

pub fn job(job: &str) -> String {
    format!("{}/{}", JOBS_ROOT, job)
}

pub fn config_root(job: &str) -> String {
    format!("{}/{}/config", JOBS_ROOT, job)
}

pub fn config(job: &str, key: &str) -> String {
    format!("{}/{}/config/{}", JOBS_ROOT, job, key)
}

pub fn execution_root(job: &str) -> String {
    format!("{}/{}/execution", JOBS_ROOT, job)
}

pub fn execution_item(job: &str, item: impl Display) -> String {
    format!("{}/{}/execution/{}", JOBS_ROOT, job, item)
}

pub fn execution(job: &str, item: impl Display, key: &str) -> String {
    format!("{}/{}/execution/{}/{}", JOBS_ROOT, job, item, key)
}

pub fn servers_root(job: &str) -> String {
    format!("{}/{}/servers", JOBS_ROOT, job)
}

pub fn server(job: &str, executor: &str, key: &str) -> String {
    format!("{}/{}/servers/{}/{}", JOBS_ROOT, job, executor, key)
}

pub fn leader_host(job: &str) -> String {
    format!("{}/{}/leader/election/host", JOBS_ROOT, job)
}

pub fn report(job: &str) -> String {
    format!("{}/{}/control/report", JOBS_ROOT, job)
}

pub fn executor(executor: &str) -> String {
    format!("{}/{}", EXECUTORS_ROOT, executor)
}

pub fn executor_key(executor: &str, key: &str) -> String {
    format!("{}/{}/{}", EXECUTORS_ROOT, executor, key)
}

pub fn container_task(task: &str) -> String {
    format!("{}/{}", CONTAINER_TASKS_ROOT, task)
}

/// Parent of an absolute path; `None` for the root.
pub fn parent(path: &str) -> Option<&str> {
    match path.rfind('/') {
        Some(0) if path.len() > 1 => Some("/"),
        Some(0) | None => None,
        Some(i) => Some(&path[..i]),
    }
}

/// Last segment of an absolute path.
pub fn name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
