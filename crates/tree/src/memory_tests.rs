// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jd_core::FakeClock;
use std::time::Duration;

fn tree() -> MemoryTree<FakeClock> {
    MemoryTree::with_clock(FakeClock::at(1_000))
}

#[tokio::test]
async fn write_creates_parents() {
    let tree = tree();
    tree.write("/$Jobs/demo/config/cron", "0 * * * * ?").await.unwrap();

    assert!(tree.exists("/$Jobs").await.unwrap());
    assert!(tree.exists("/$Jobs/demo/config").await.unwrap());
    assert_eq!(tree.read("/$Jobs/demo/config").await.unwrap(), None);
    assert_eq!(
        tree.read("/$Jobs/demo/config/cron").await.unwrap().as_deref(),
        Some("0 * * * * ?")
    );
}

#[tokio::test]
async fn absent_nodes_are_not_errors() {
    let tree = tree();
    assert!(!tree.exists("/nope").await.unwrap());
    assert_eq!(tree.read("/nope").await.unwrap(), None);
    assert_eq!(tree.children("/nope").await.unwrap(), None);
    assert!(matches!(tree.mtime("/nope").await, Err(TreeError::NoNode(p)) if p == "/nope"));
}

#[tokio::test]
async fn children_are_direct_and_sorted() {
    let tree = tree();
    tree.touch("/$Jobs/b/config");
    tree.touch("/$Jobs/a/config");
    tree.touch("/$Jobs/a-x");

    assert_eq!(
        tree.children("/$Jobs").await.unwrap(),
        Some(vec!["a".to_string(), "a-x".to_string(), "b".to_string()])
    );
    assert_eq!(tree.children("/").await.unwrap(), Some(vec!["$Jobs".to_string()]));
    assert_eq!(tree.children("/$Jobs/a/config").await.unwrap(), Some(vec![]));
}

#[tokio::test]
async fn mtime_follows_the_clock() {
    let tree = tree();
    tree.put("/a", "1");
    tree.clock().advance(Duration::from_secs(5));
    tree.write("/b", "2").await.unwrap();

    assert_eq!(tree.mtime("/a").await.unwrap(), 1_000);
    assert_eq!(tree.mtime("/b").await.unwrap(), 6_000);
}

#[tokio::test]
async fn create_is_idempotent() {
    let tree = tree();
    tree.put("/a", "kept");
    tree.clock().advance(Duration::from_secs(1));
    tree.create("/a").await.unwrap();

    assert_eq!(tree.read("/a").await.unwrap().as_deref(), Some("kept"));
    assert_eq!(tree.mtime("/a").await.unwrap(), 1_000);
}

#[tokio::test]
async fn delete_refuses_parents() {
    let tree = tree();
    tree.touch("/a/b");

    assert!(matches!(tree.delete("/a").await, Err(TreeError::NotEmpty(_))));
    tree.delete("/a/b").await.unwrap();
    tree.delete("/a").await.unwrap();
    tree.delete("/a").await.unwrap();
    assert!(tree.is_empty());
}

#[tokio::test]
async fn delete_recursive_spares_siblings_with_shared_prefix() {
    let tree = tree();
    tree.touch("/a/b/c");
    tree.touch("/a/b-x");

    tree.delete_recursive("/a/b").await.unwrap();

    assert!(!tree.exists("/a/b").await.unwrap());
    assert!(!tree.exists("/a/b/c").await.unwrap());
    assert!(tree.exists("/a/b-x").await.unwrap());
}

#[tokio::test]
async fn expiring_a_session_removes_its_ephemeral_nodes() {
    let tree = tree();
    tree.touch("/$Jobs/demo/execution/0/completed");
    tree.put_ephemeral("/$Jobs/demo/execution/1/running", "exec-1");
    tree.put_ephemeral("/$Jobs/demo/execution/2/running", "exec-2");

    assert_eq!(tree.expire_session("exec-1"), 1);

    assert!(!tree.exists("/$Jobs/demo/execution/1/running").await.unwrap());
    assert!(tree.exists("/$Jobs/demo/execution/1").await.unwrap());
    assert!(tree.exists("/$Jobs/demo/execution/2/running").await.unwrap());
    assert!(tree.exists("/$Jobs/demo/execution/0/completed").await.unwrap());
}

#[tokio::test]
async fn commit_reports_whether_anything_changed() {
    let tree = tree();
    tree.put("/cfg/a", "1");

    let same = Transaction::new().replace_if_changed("/cfg/a", "1");
    assert!(!tree.commit(same).await.unwrap());

    let changed = Transaction::new()
        .replace_if_changed("/cfg/a", "1")
        .replace_if_changed("/cfg/b", "new");
    assert!(tree.commit(changed).await.unwrap());
    assert_eq!(tree.read("/cfg/b").await.unwrap().as_deref(), Some("new"));

    assert!(!tree.commit(Transaction::new()).await.unwrap());
}

#[tokio::test]
async fn failed_commit_applies_nothing() {
    let tree = tree();
    tree.put("/cfg/a", "1");
    tree.fail_under("/locked");

    let txn = Transaction::new()
        .replace_if_changed("/cfg/a", "2")
        .replace_if_changed("/locked/b", "x");
    assert!(matches!(tree.commit(txn).await, Err(TreeError::Unavailable(_))));
    assert_eq!(tree.read("/cfg/a").await.unwrap().as_deref(), Some("1"));

    tree.heal();
    assert!(tree.read("/locked/b").await.unwrap().is_none());
}

#[yare::parameterized(
    relative        = { "a/b" },
    trailing_slash  = { "/a/" },
    empty_segment   = { "/a//b" },
    empty           = { "" },
)]
fn rejects_malformed_paths(path: &str) {
    let tree = tree();
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let result = rt.block_on(tree.read(path));
    assert!(matches!(result, Err(TreeError::InvalidPath(_))));
}

#[tokio::test]
async fn snapshot_restores_nodes_and_sessions() {
    let tree = tree();
    tree.put("/a", "1");
    tree.put_ephemeral("/a/running", "exec-1");

    let restored = MemoryTree::from_snapshot(tree.snapshot(), FakeClock::at(9_000));

    assert_eq!(restored.read("/a").await.unwrap().as_deref(), Some("1"));
    assert_eq!(restored.mtime("/a").await.unwrap(), 1_000);
    assert_eq!(restored.expire_session("exec-1"), 1);
}
