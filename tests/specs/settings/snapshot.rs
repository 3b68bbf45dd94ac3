//! Settings persistence specs
//!
//! Settings written through the engine survive a snapshot round trip.

use crate::prelude::*;
use crate::prelude::assert_eq;
use jd_core::JobSettingsUpdate;
use jd_tree::TreeSnapshot;

#[tokio::test]
async fn updated_settings_survive_a_compressed_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.json.zst");
    let tree = tree_at(MARCH_1);
    job(&tree, "demo", &[("enabled", "true"), ("cron", "0 * * * * ?")]);
    let update = JobSettingsUpdate::default()
        .cron("0 0/5 * * * ?")
        .pause_period_time("12:00-13:00")
        .time_zone("UTC");

    assert!(jd_engine::update_job_settings(&tree, &name("demo"), &update).await.unwrap());
    tree.snapshot().save(&path).unwrap();

    let reloaded = MemoryTree::from_snapshot(TreeSnapshot::load(&path).unwrap(), FakeClock::at(MARCH_1));
    let settings = jd_engine::get_job_settings(&reloaded, &name("demo"), &utc()).await.unwrap();
    assert_eq!(settings.cron.as_deref(), Some("0 0/5 * * * ?"));
    assert_eq!(settings.pause_period_time.as_deref(), Some("12:00-13:00"));

    let next = jd_engine::next_fire_time(&reloaded, &name("demo"), MARCH_1 + 12 * HOUR, &utc())
        .await
        .unwrap();
    assert_eq!(next, Some(MARCH_1 + 13 * HOUR + 5 * MINUTE));
}

#[tokio::test]
async fn ephemeral_markers_keep_their_owner_across_snapshots() {
    let tree = tree_at(MARCH_1);
    job(&tree, "demo", &[("enabled", "true")]);
    shard(&tree, "demo", 0, &["running"]);

    let reloaded = MemoryTree::from_snapshot(tree.snapshot(), FakeClock::at(MARCH_1));
    assert_eq!(jd_engine::derive_job_status(&reloaded, &name("demo")).await.unwrap(), JobStatus::Running);

    reloaded.expire_session(EXECUTOR_SESSION);
    assert_eq!(jd_engine::derive_job_status(&reloaded, &name("demo")).await.unwrap(), JobStatus::Ready);
}
