// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Preferred-executor lists.
//!
//! On the tree a list is a comma-separated string where container task
//! references carry a leading `@`. It is parsed once at the read boundary and
//! serialized back only when written.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::job::{ExecutorName, TaskId};

/// Prefix marking a container task reference.
pub const CONTAINER_MARKER: char = '@';

/// One entry of a preferred-executor list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum PreferEntry {
    Executor(ExecutorName),
    ContainerTask(TaskId),
}

impl PreferEntry {
    /// Parse one trimmed entry; `None` for blank entries.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match raw.strip_prefix(CONTAINER_MARKER) {
            Some(task) => PreferEntry::ContainerTask(TaskId::new(task)),
            None => PreferEntry::Executor(ExecutorName::new(raw)),
        })
    }

    pub fn as_task(&self) -> Option<&TaskId> {
        match self {
            PreferEntry::ContainerTask(task) => Some(task),
            PreferEntry::Executor(_) => None,
        }
    }
}

impl fmt::Display for PreferEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferEntry::Executor(name) => write!(f, "{}", name),
            PreferEntry::ContainerTask(task) => write!(f, "{}{}", CONTAINER_MARKER, task),
        }
    }
}

/// Ordered preferred-executor list. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferList(Vec<PreferEntry>);

impl PreferList {
    pub fn new(entries: Vec<PreferEntry>) -> Self {
        Self(entries)
    }

    /// Parse the raw tree value.
    ///
    /// Blank entries from stray separators are dropped wherever they sit, not
    /// only at the front, so writing a parsed list back normalizes it:
    /// `a,,@t` is stored again as `a,@t`.
    pub fn parse(raw: &str) -> Self {
        Self(raw.split(',').filter_map(PreferEntry::parse).collect())
    }

    pub fn entries(&self) -> &[PreferEntry] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Container tasks referenced by this list, in list order.
    pub fn tasks(&self) -> Vec<&TaskId> {
        self.0.iter().filter_map(PreferEntry::as_task).collect()
    }

    pub fn has_task(&self) -> bool {
        self.0.iter().any(|e| e.as_task().is_some())
    }

    pub fn references_task(&self, task: &str) -> bool {
        self.tasks().iter().any(|t| *t == task)
    }

    /// Plain executors referenced by this list, in list order.
    pub fn executors(&self) -> Vec<&ExecutorName> {
        self.0
            .iter()
            .filter_map(|e| match e {
                PreferEntry::Executor(name) => Some(name),
                PreferEntry::ContainerTask(_) => None,
            })
            .collect()
    }

    /// Point every container reference at `task`; plain executors are untouched.
    pub fn retarget_tasks(&self, task: &TaskId) -> Self {
        Self(
            self.0
                .iter()
                .map(|e| match e {
                    PreferEntry::ContainerTask(_) => PreferEntry::ContainerTask(task.clone()),
                    other => other.clone(),
                })
                .collect(),
        )
    }
}

impl fmt::Display for PreferList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Whether a job's container affinity could be moved somewhere else.
///
/// True when the list references a task and at least one live task is not
/// already referenced.
pub fn is_migrate_enabled(prefer: &PreferList, live_tasks: &[TaskId]) -> bool {
    if live_tasks.is_empty() || !prefer.has_task() {
        return false;
    }
    let referenced = prefer.tasks();
    live_tasks.iter().any(|t| !referenced.contains(&t))
}

#[cfg(test)]
#[path = "prefer_tests.rs"]
mod tests;
