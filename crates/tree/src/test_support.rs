// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tree builders for tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use jd_core::Clock;

use crate::memory::MemoryTree;
use crate::paths::{self, execution_keys};

/// Session owning the `running` markers created by [`shard`].
pub const EXECUTOR_SESSION: &str = "executor-session";

/// Create a job with the given config values.
pub fn job<C: Clock>(tree: &MemoryTree<C>, name: &str, config: &[(&str, &str)]) {
    tree.touch(&paths::config_root(name));
    for (key, value) in config {
        tree.put(&paths::config(name, key), *value);
    }
}

/// Create a shard with the given marker nodes. `running` is ephemeral and
/// owned by [`EXECUTOR_SESSION`].
pub fn shard<C: Clock>(tree: &MemoryTree<C>, job: &str, item: u32, markers: &[&str]) {
    tree.touch(&paths::execution_item(job, item));
    for marker in markers {
        let path = paths::execution(job, item, marker);
        if *marker == execution_keys::RUNNING {
            tree.put_ephemeral(&path, EXECUTOR_SESSION);
        } else {
            tree.touch(&path);
        }
    }
}

/// Set values under `<job>/servers/<executor>/`.
pub fn server<C: Clock>(tree: &MemoryTree<C>, job: &str, executor: &str, values: &[(&str, &str)]) {
    tree.touch(&format!("{}/{}", paths::servers_root(job), executor));
    for (key, value) in values {
        tree.put(&paths::server(job, executor, key), *value);
    }
}

/// Register an executor with the given values.
pub fn executor<C: Clock>(tree: &MemoryTree<C>, name: &str, values: &[(&str, &str)]) {
    tree.touch(&paths::executor(name));
    for (key, value) in values {
        tree.put(&paths::executor_key(name, key), *value);
    }
}

/// Register a live container task.
pub fn container_task<C: Clock>(tree: &MemoryTree<C>, task: &str) {
    tree.touch(&paths::container_task(task));
}
