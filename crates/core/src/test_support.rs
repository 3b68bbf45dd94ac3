// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use std::collections::HashMap;

use crate::config::{defaults, ConfigError, JobConfig};
use crate::job::JobName;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core types.
pub mod strategies {
    use crate::execution::ShardMarkers;
    use crate::prefer::{PreferEntry, PreferList};
    use crate::job::{ExecutorName, TaskId};
    use proptest::prelude::*;

    pub fn arb_markers() -> impl Strategy<Value = ShardMarkers> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(running, completed, failed, timeout)| ShardMarkers {
                running,
                completed,
                failed,
                timeout,
            },
        )
    }

    /// Dotted numeric versions such as `1.0.12`.
    pub fn arb_version() -> impl Strategy<Value = String> {
        prop::collection::vec(0u16..30, 1..5)
            .prop_map(|parts| parts.iter().map(u16::to_string).collect::<Vec<_>>().join("."))
    }

    pub fn arb_prefer_entry() -> impl Strategy<Value = PreferEntry> {
        prop_oneof![
            "[a-z][a-z0-9]{0,6}".prop_map(|s| PreferEntry::Executor(ExecutorName::new(s))),
            "[a-z][a-z0-9]{0,6}".prop_map(|s| PreferEntry::ContainerTask(TaskId::new(s))),
        ]
    }

    pub fn arb_prefer_list() -> impl Strategy<Value = PreferList> {
        prop::collection::vec(arb_prefer_entry(), 0..6).prop_map(PreferList::new)
    }
}

// ── Config factories ────────────────────────────────────────────────────

/// Parse a job config from literal `(key, value)` pairs.
pub fn job_config(name: &str, pairs: &[(&str, &str)]) -> Result<JobConfig, ConfigError> {
    let raw: HashMap<&str, &str> = pairs.iter().copied().collect();
    JobConfig::from_raw(
        JobName::new(name),
        |key| raw.get(key).map(|v| v.to_string()),
        defaults::TIME_ZONE,
    )
}
