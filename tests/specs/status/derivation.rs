//! Job status derivation specs
//!
//! Status follows from the enabled flag and whether every shard has finished.
//! A shard counts as unfinished only while `running` is present without
//! `completed`.

use crate::prelude::*;
use crate::prelude::assert_eq;

/// `(markers of each shard, all shards finished)`
const SHARD_SETS: &[(&[&[&str]], bool)] = &[
    (&[], true),
    (&[&[]], true),
    (&[&["completed"]], true),
    (&[&["running", "completed"]], true),
    (&[&["failed"], &["timeout"]], true),
    (&[&["running"]], false),
    (&[&["completed"], &["running"]], false),
    (&[&["running", "failed"]], false),
];

#[tokio::test]
async fn status_matches_the_derivation_table_for_every_shard_set() {
    for &(shards, finished) in SHARD_SETS {
        for enabled in [true, false] {
            let tree = tree_at(MARCH_1);
            job(&tree, "demo", &[("enabled", if enabled { "true" } else { "false" })]);
            for (item, markers) in shards.iter().enumerate() {
                shard(&tree, "demo", item as u32, markers);
            }

            let status = jd_engine::derive_job_status(&tree, &name("demo")).await.unwrap();

            let expected = match (enabled, finished) {
                (true, true) => JobStatus::Ready,
                (true, false) => JobStatus::Running,
                (false, true) => JobStatus::Stopped,
                (false, false) => JobStatus::Stopping,
            };
            assert_eq!(status, expected, "enabled={enabled} shards={shards:?}");
        }
    }
}

#[tokio::test]
async fn missing_enabled_node_reads_as_disabled() {
    let tree = tree_at(MARCH_1);
    job(&tree, "demo", &[]);
    shard(&tree, "demo", 0, &["running"]);

    let status = jd_engine::derive_job_status(&tree, &name("demo")).await.unwrap();

    assert_eq!(status, JobStatus::Stopping);
}

#[tokio::test]
async fn shard_status_follows_marker_precedence() {
    let tree = tree_at(MARCH_1);
    job(&tree, "demo", &[("enabled", "true")]);
    shard(&tree, "demo", 0, &["running", "failed"]);
    shard(&tree, "demo", 1, &["timeout", "failed"]);
    shard(&tree, "demo", 2, &["failed", "completed"]);
    shard(&tree, "demo", 3, &["completed"]);
    shard(&tree, "demo", 4, &[]);
    let clock = tree.clock().clone();

    let mut statuses = Vec::new();
    for item in 0..5 {
        let info = jd_engine::derive_execution_info(&tree, &name("demo"), item, &clock, &utc())
            .await
            .unwrap();
        statuses.push(info.status);
    }

    assert_eq!(
        statuses,
        vec![
            ExecutionStatus::Running,
            ExecutionStatus::Timeout,
            ExecutionStatus::Failed,
            ExecutionStatus::Completed,
            ExecutionStatus::Pending,
        ]
    );
}

#[tokio::test]
async fn switched_off_reporting_hides_shard_state() {
    let tree = tree_at(MARCH_1);
    job(&tree, "demo", &[("enabled", "true"), ("enabledReport", "false")]);
    shard(&tree, "demo", 0, &["failed"]);
    let clock = tree.clock().clone();

    let info = jd_engine::derive_execution_info(&tree, &name("demo"), 0, &clock, &utc())
        .await
        .unwrap();

    assert_eq!(info.status, ExecutionStatus::NotReported);
}
