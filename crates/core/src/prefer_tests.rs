// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_mixed_list_in_order() {
    let list = PreferList::parse("exec-a, @task-1 ,exec-b");
    assert_eq!(
        list.entries(),
        &[
            PreferEntry::Executor(ExecutorName::new("exec-a")),
            PreferEntry::ContainerTask(TaskId::new("task-1")),
            PreferEntry::Executor(ExecutorName::new("exec-b")),
        ]
    );
    assert_eq!(list.tasks(), vec![&TaskId::new("task-1")]);
    assert_eq!(list.executors().len(), 2);
}

#[test]
fn keeps_duplicates() {
    let list = PreferList::parse("a,a,@t,@t");
    assert_eq!(list.entries().len(), 4);
}

#[yare::parameterized(
    empty             = { "",                  "" },
    leading_separator = { ",,a,@t",            "a,@t" },
    interior_blank    = { "a,,b",              "a,b" },
    trims             = { " a , @t ",          "a,@t" },
    only_task         = { "@t1",               "@t1" },
)]
fn serialize_normalizes_separators(raw: &str, expected: &str) {
    assert_eq!(PreferList::parse(raw).to_string(), expected);
}

#[test]
fn retarget_rewrites_every_container_entry() {
    let list = PreferList::parse("a,@old,b,@older");
    let moved = list.retarget_tasks(&TaskId::new("new"));
    assert_eq!(moved.to_string(), "a,@new,b,@new");
}

#[test]
fn retarget_without_tasks_is_identity() {
    let list = PreferList::parse("a,b");
    assert_eq!(list.retarget_tasks(&TaskId::new("t")), list);
}

#[test]
fn references_task_ignores_plain_executor_with_same_name() {
    let list = PreferList::parse("t1,@t2");
    assert!(!list.references_task("t1"));
    assert!(list.references_task("t2"));
}

#[yare::parameterized(
    no_live_tasks     = { "@t1",      &[],             false },
    no_task_in_list   = { "a,b",      &["t1"],         false },
    only_current_live = { "@t1",      &["t1"],         false },
    another_live      = { "a,@t1",    &["t1", "t2"],   true },
    dead_reference    = { "@gone",    &["t1"],         true },
)]
fn migrate_enabled(raw: &str, live: &[&str], expected: bool) {
    let live: Vec<TaskId> = live.iter().map(|t| TaskId::new(t)).collect();
    assert_eq!(is_migrate_enabled(&PreferList::parse(raw), &live), expected);
}

#[test]
fn entry_display_restores_marker() {
    assert_eq!(PreferEntry::ContainerTask(TaskId::new("t")).to_string(), "@t");
    assert_eq!(PreferEntry::Executor(ExecutorName::new("e")).to_string(), "e");
}
