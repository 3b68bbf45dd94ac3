// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-shard execution markers and the display status derived from them.

use serde::{Deserialize, Serialize};

use crate::job::{ExecutorName, JobName};

/// Presence of the four liveness markers under one shard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardMarkers {
    pub running: bool,
    pub completed: bool,
    pub failed: bool,
    pub timeout: bool,
}

impl ShardMarkers {
    /// A shard is finished unless it is running without having completed.
    ///
    /// A shard with neither marker counts as finished: an executor killed
    /// mid-run loses its ephemeral `running` marker and never writes
    /// `completed`.
    pub fn is_finished(&self) -> bool {
        !(self.running && !self.completed)
    }
}

/// Displayed status of one shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    /// Reporting is disabled for the job; the markers are not authoritative.
    NotReported,
    Running,
    Timeout,
    Failed,
    Completed,
    /// No marker at all: the shard has not run since the last reset.
    Pending,
}

impl ExecutionStatus {
    /// Classify a shard.
    ///
    /// `running` wins over everything; `timeout` wins over `failed` because a
    /// timed-out run is also marked failed by the executor.
    pub fn classify(markers: ShardMarkers, report_enabled: bool) -> Self {
        if !report_enabled {
            return ExecutionStatus::NotReported;
        }
        if markers.running {
            ExecutionStatus::Running
        } else if markers.timeout {
            ExecutionStatus::Timeout
        } else if markers.failed {
            ExecutionStatus::Failed
        } else if markers.completed {
            ExecutionStatus::Completed
        } else {
            ExecutionStatus::Pending
        }
    }
}

crate::simple_display! {
    ExecutionStatus {
        NotReported => "NOT_REPORTED",
        Running => "RUNNING",
        Timeout => "TIMEOUT",
        Failed => "FAILED",
        Completed => "COMPLETED",
        Pending => "PENDING",
    }
}

/// Last complete time, unless it predates the last begin time.
///
/// A completion older than the current begin belongs to the previous run.
pub fn fresh_completion(last_begin_ms: Option<u64>, last_complete_ms: Option<u64>) -> Option<u64> {
    match (last_begin_ms, last_complete_ms) {
        (Some(begin), Some(complete)) if complete < begin => None,
        (_, complete) => complete,
    }
}

/// Execution detail of a single shard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionInfo {
    pub job: JobName,
    pub item: u32,
    pub status: ExecutionStatus,
    /// Executor whose assigned shard list holds this item, if any
    pub running_executor: Option<ExecutorName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failover_executor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_msg: Option<String>,
    pub time_zone: String,
    /// Formatted in `time_zone`
    pub last_begin_time: Option<String>,
    pub last_complete_time: Option<String>,
    pub next_fire_time: Option<String>,
    /// Whole seconds since the `running` marker appeared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_secs: Option<u64>,
}

#[cfg(test)]
#[path = "execution_tests.rs"]
mod tests;
