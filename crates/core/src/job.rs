// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job names, job types and the derived job lifecycle status.

use serde::{Deserialize, Serialize};

crate::define_name! {
    /// Name of a job; the key of its subtree in the coordination tree.
    pub struct JobName;
}

crate::define_name! {
    /// Name under which an executor registered itself.
    pub struct ExecutorName;
}

crate::define_name! {
    /// Identifier of a container-orchestrator task usable as an executor.
    pub struct TaskId;
}

/// Lifecycle status of a job, derived from its enabled flag and shard markers.
///
/// Never stored; recomputed on every read because `running` markers are
/// ephemeral and vanish when the owning executor's session dies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Ready,
    Running,
    Stopped,
    Stopping,
}

impl JobStatus {
    /// Map the (enabled, all-shards-finished) pair onto a status.
    pub fn derive(enabled: bool, all_shards_finished: bool) -> Self {
        match (enabled, all_shards_finished) {
            (true, true) => JobStatus::Ready,
            (true, false) => JobStatus::Running,
            (false, true) => JobStatus::Stopped,
            (false, false) => JobStatus::Stopping,
        }
    }

    /// True while any shard still holds a live `running` marker.
    pub fn has_running_shards(&self) -> bool {
        matches!(self, JobStatus::Running | JobStatus::Stopping)
    }
}

crate::simple_display! {
    JobStatus {
        Ready => "READY",
        Running => "RUNNING",
        Stopped => "STOPPED",
        Stopping => "STOPPING",
    }
}

/// Kind of job, as stored in the `jobType` config node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    JavaJob,
    ShellJob,
    MsgJob,
    #[serde(rename = "VSHELL")]
    VshellJob,
    #[serde(rename = "UNKNOWN_JOB")]
    Unknown,
}

impl JobType {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "JAVA_JOB" => JobType::JavaJob,
            "SHELL_JOB" => JobType::ShellJob,
            "MSG_JOB" => JobType::MsgJob,
            "VSHELL" => JobType::VshellJob,
            _ => JobType::Unknown,
        }
    }

    /// Resolve an unknown type from the job class name.
    ///
    /// Jobs written before `jobType` existed only carry a class name; script
    /// jobs are recognisable by their runner class.
    pub fn infer(job_type: Option<&str>, job_class: Option<&str>) -> Self {
        match job_type.map(JobType::parse).unwrap_or(JobType::Unknown) {
            JobType::Unknown => match job_class {
                Some(class) if class.contains("SaturnScriptJob") => JobType::ShellJob,
                _ => JobType::JavaJob,
            },
            known => known,
        }
    }

    /// Only cron-driven job types write execution reports by default.
    pub fn is_cron_driven(&self) -> bool {
        matches!(self, JobType::JavaJob | JobType::ShellJob)
    }
}

crate::simple_display! {
    JobType {
        JavaJob => "JAVA_JOB",
        ShellJob => "SHELL_JOB",
        MsgJob => "MSG_JOB",
        VshellJob => "VSHELL",
        Unknown => "UNKNOWN_JOB",
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
