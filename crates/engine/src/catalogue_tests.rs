// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jd_core::FakeClock;
use jd_tree::test_support::{container_task, executor, job as add_job, server, shard};
use jd_tree::MemoryTree;

fn tree() -> MemoryTree<FakeClock> {
    MemoryTree::with_clock(FakeClock::at(1_772_323_200_000))
}

fn names(jobs: &[JobName]) -> Vec<&str> {
    jobs.iter().map(JobName::as_str).collect()
}

fn dep(job: &str, enabled: bool) -> DependencyStatus {
    DependencyStatus { job: JobName::new(job), enabled }
}

#[tokio::test]
async fn listing_needs_a_config_node() {
    let tree = tree();
    add_job(&tree, "b", &[]);
    add_job(&tree, "a", &[]);
    tree.touch(&paths::job("orphan"));
    add_job(&tree, "sys", &[("jobMode", "system_prior")]);

    assert_eq!(names(&list_jobs(&tree).await.unwrap()), vec!["a", "b", "sys"]);
    assert_eq!(names(&list_non_system_jobs(&tree).await.unwrap()), vec!["a", "b"]);
}

#[tokio::test]
async fn empty_tree_lists_nothing() {
    let tree = tree();
    assert!(list_jobs(&tree).await.unwrap().is_empty());
    assert!(list_job_groups(&tree).await.unwrap().is_empty());
}

#[tokio::test]
async fn groups_are_distinct_and_trimmed() {
    let tree = tree();
    add_job(&tree, "a", &[("groups", "billing")]);
    add_job(&tree, "b", &[("groups", " ops ")]);
    add_job(&tree, "c", &[("groups", "billing")]);
    add_job(&tree, "d", &[("groups", "")]);

    assert_eq!(list_job_groups(&tree).await.unwrap(), vec!["billing", "ops"]);
}

#[tokio::test]
async fn dependencies_in_both_directions() {
    let tree = tree();
    add_job(&tree, "a", &[("enabled", "true"), ("dependencies", "b, c,,a,ghost,sys")]);
    add_job(&tree, "b", &[("enabled", "false")]);
    add_job(&tree, "c", &[("enabled", "true"), ("dependencies", "b")]);
    add_job(&tree, "sys", &[("jobMode", "system"), ("dependencies", "b")]);

    let a = JobName::new("a");
    let b = JobName::new("b");
    assert_eq!(dependent_jobs(&tree, &a).await.unwrap(), vec![dep("b", false), dep("c", true)]);
    assert!(dependent_jobs(&tree, &b).await.unwrap().is_empty());
    assert_eq!(depended_jobs(&tree, &b).await.unwrap(), vec![dep("a", true), dep("c", true)]);
    assert!(depended_jobs(&tree, &a).await.unwrap().is_empty());
}

#[tokio::test]
async fn overview_of_a_pinned_job() {
    let tree = tree();
    executor(&tree, "e1", &[("ip", "10.0.0.1")]);
    container_task(&tree, "t1");
    container_task(&tree, "t2");
    add_job(
        &tree,
        "demo",
        &[
            ("enabled", "true"),
            ("jobType", "SHELL_JOB"),
            ("cron", "0 * * * * ?"),
            ("shardingTotalCount", "2"),
            ("groups", "ops"),
            ("preferList", "e1,gone,@t1,@dead"),
        ],
    );
    shard(&tree, "demo", 0, &["running"]);
    server(&tree, "demo", "e1", &[("sharding", "0"), ("processSuccessCount", "3")]);
    server(&tree, "demo", "e9", &[("sharding", " "), ("processFailureCount", "1")]);

    let overviews = job_overviews(&tree, &EngineConfig::default()).await.unwrap();

    assert_eq!(overviews.len(), 1);
    let overview = &overviews[0];
    assert_eq!(overview.status, JobStatus::Running);
    assert_eq!(overview.job_type, JobType::ShellJob);
    assert_eq!(overview.sharding_total_count, 2);
    assert_eq!(overview.groups.as_deref(), Some("ops"));
    similar_asserts::assert_eq!(
        overview.prefer_list,
        vec![
            PreferredTarget::Executor(ExecutorName::new("e1")),
            PreferredTarget::DeletedExecutor(ExecutorName::new("gone")),
            PreferredTarget::ContainerTask(TaskId::new("t1")),
        ]
    );
    assert!(overview.migrate_enabled);
    assert_eq!(overview.sharding_executors, vec![ExecutorName::new("e1")]);
    assert_eq!(overview.success_rate, Some(75.0));
}

#[tokio::test]
async fn stopped_job_has_no_sharding_executors() {
    let tree = tree();
    add_job(&tree, "demo", &[("enabled", "false"), ("preferList", "e1")]);
    server(&tree, "demo", "e1", &[("sharding", "0")]);

    let overviews = job_overviews(&tree, &EngineConfig::default()).await.unwrap();

    assert_eq!(overviews[0].status, JobStatus::Stopped);
    assert!(overviews[0].sharding_executors.is_empty());
    // Without an executor registry nothing is known to be deleted
    assert_eq!(overviews[0].prefer_list, vec![PreferredTarget::Executor(ExecutorName::new("e1"))]);
    assert!(!overviews[0].migrate_enabled);
    assert_eq!(overviews[0].success_rate, None);
}

#[tokio::test]
async fn overview_skips_unreadable_jobs() {
    let tree = tree();
    add_job(&tree, "a", &[]);
    add_job(&tree, "b", &[("shardingTotalCount", "many")]);
    add_job(&tree, "c", &[]);
    tree.fail_under(&paths::servers_root("c"));

    let overviews = job_overviews(&tree, &EngineConfig::default()).await.unwrap();

    let listed: Vec<&str> = overviews.iter().map(|o| o.job.as_str()).collect();
    assert_eq!(listed, vec!["a"]);
}

#[tokio::test]
async fn overview_serializes_with_tagged_targets() {
    let tree = tree();
    executor(&tree, "e1", &[]);
    add_job(&tree, "demo", &[("preferList", "e2")]);

    let overviews = job_overviews(&tree, &EngineConfig::default()).await.unwrap();
    let json = serde_json::to_value(&overviews[0].prefer_list).unwrap();

    assert_eq!(json, serde_json::json!([{ "kind": "deleted_executor", "name": "e2" }]));
}

#[tokio::test]
async fn time_rendered_in_the_job_zone() {
    let tree = tree();
    add_job(&tree, "utc", &[("timeZone", "UTC")]);
    add_job(&tree, "default", &[]);
    let config = EngineConfig::default();

    let utc = format_time_by_job_time_zone(&tree, &JobName::new("utc"), 1_772_323_200_000, &config)
        .await
        .unwrap();
    let default =
        format_time_by_job_time_zone(&tree, &JobName::new("default"), 1_772_323_200_000, &config)
            .await
            .unwrap();

    assert_eq!(utc, "UTC 2026-03-01 00:00:00");
    assert_eq!(default, "Asia/Shanghai 2026-03-01 08:00:00");
}
