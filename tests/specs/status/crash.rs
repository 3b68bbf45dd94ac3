//! Executor crash specs
//!
//! `running` markers are ephemeral. When an executor's session dies they
//! vanish without `completed` appearing, and the shard counts as finished.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[tokio::test]
async fn crashed_executor_releases_its_shards() {
    let tree = tree_at(MARCH_1);
    job(&tree, "demo", &[("enabled", "true")]);
    shard(&tree, "demo", 0, &["running"]);
    shard(&tree, "demo", 1, &["completed"]);
    let demo = name("demo");

    assert_eq!(jd_engine::derive_job_status(&tree, &demo).await.unwrap(), JobStatus::Running);

    assert_eq!(tree.expire_session(EXECUTOR_SESSION), 1);

    assert_eq!(jd_engine::derive_job_status(&tree, &demo).await.unwrap(), JobStatus::Ready);
    assert!(jd_engine::all_shards_finished(&tree, &demo).await.unwrap());
}

#[tokio::test]
async fn disabled_job_stops_once_its_executor_dies() {
    let tree = tree_at(MARCH_1);
    job(&tree, "demo", &[("enabled", "false")]);
    shard(&tree, "demo", 0, &["running"]);
    let demo = name("demo");

    assert_eq!(jd_engine::derive_job_status(&tree, &demo).await.unwrap(), JobStatus::Stopping);
    tree.expire_session(EXECUTOR_SESSION);
    assert_eq!(jd_engine::derive_job_status(&tree, &demo).await.unwrap(), JobStatus::Stopped);
}

#[tokio::test]
async fn crashed_shard_reports_its_last_outcome() {
    let tree = tree_at(MARCH_1);
    job(&tree, "demo", &[("enabled", "true")]);
    shard(&tree, "demo", 0, &["running", "failed"]);
    server(&tree, "demo", "e1", &[("sharding", "0")]);
    tree.expire_session(EXECUTOR_SESSION);
    let clock = tree.clock().clone();

    let infos = jd_engine::list_execution_info(&tree, &name("demo"), &clock, &utc()).await.unwrap();

    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].status, ExecutionStatus::Failed);
    assert_eq!(infos[0].elapsed_secs, None);
}
