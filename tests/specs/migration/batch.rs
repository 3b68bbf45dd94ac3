//! Container task migration specs
//!
//! A batch validates every job before touching any of them. Once writes
//! start, each job is committed on its own.

use crate::prelude::*;
use crate::prelude::assert_eq;
use jd_tree::paths;

fn cluster() -> MemoryTree<FakeClock> {
    let tree = tree_at(MARCH_1);
    for task in ["t1", "t2", "t3"] {
        container_task(&tree, task);
    }
    job(&tree, "billing", &[("enabled", "true"), ("preferList", "e1,@t1")]);
    job(&tree, "reports", &[("enabled", "true"), ("preferList", "@t1,@t2")]);
    job(&tree, "plain", &[("preferList", "e1,e2")]);
    tree
}

async fn prefer_list(tree: &MemoryTree<FakeClock>, job: &str) -> Option<String> {
    tree.read(&paths::config(job, "preferList")).await.unwrap()
}

#[tokio::test]
async fn batch_rewrites_every_container_reference_and_forces_resharding() {
    let tree = cluster();

    let migrated = jd_engine::batch_migrate_task(&tree, &[name("billing"), name("reports")], &TaskId::new("t3"))
        .await
        .unwrap();

    let lists: Vec<String> = migrated.iter().map(ToString::to_string).collect();
    assert_eq!(lists, vec!["e1,@t3".to_string(), "@t3,@t3".to_string()]);
    assert_eq!(prefer_list(&tree, "reports").await.as_deref(), Some("@t3,@t3"));
    for job in ["billing", "reports"] {
        assert!(tree.exists(&paths::config(job, "forceShard")).await.unwrap(), "{job}");
    }
}

#[tokio::test]
async fn one_invalid_job_blocks_the_whole_batch() {
    let tree = cluster();
    let before = tree.snapshot().nodes;

    let err = jd_engine::batch_migrate_task(&tree, &[name("billing"), name("plain")], &TaskId::new("t3"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(tree.snapshot().nodes, before);
}

#[tokio::test]
async fn migrating_to_a_dead_task_is_rejected() {
    let tree = cluster();

    let err = jd_engine::migrate_task(&tree, &name("billing"), &TaskId::new("t9")).await.unwrap_err();

    assert_eq!(err.to_string(), "container task t9 does not exist");
    assert_eq!(prefer_list(&tree, "billing").await.as_deref(), Some("e1,@t1"));
}

#[tokio::test]
async fn targets_follow_the_migration() {
    let tree = cluster();
    let billing = name("billing");

    jd_engine::migrate_task(&tree, &billing, &TaskId::new("t2")).await.unwrap();
    let targets = jd_engine::available_migration_targets(&tree, &billing).await.unwrap();

    assert_eq!(targets.current, vec![TaskId::new("t2")]);
    assert_eq!(targets.migratable, vec![TaskId::new("t1"), TaskId::new("t3")]);
}
