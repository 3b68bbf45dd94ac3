// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use jd_core::{classify_fleet, DomainClass};
use jd_tree::paths::{self, executor_keys, EXECUTORS_ROOT};
use jd_tree::read::children_or_empty;
use jd_tree::TreeAccessor;

use crate::error::EngineError;

/// Version marker of every registered executor, in registry order.
///
/// `None` for an executor without a version node; an existing but empty node
/// reads as `Some("")`.
pub async fn executor_versions<T>(tree: &T) -> Result<Vec<Option<String>>, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let mut versions = Vec::new();
    for executor in children_or_empty(tree, EXECUTORS_ROOT).await? {
        let path = paths::executor_key(&executor, executor_keys::VERSION);
        let version = if tree.exists(&path).await? {
            Some(tree.read(&path).await?.unwrap_or_default())
        } else {
            None
        };
        versions.push(version);
    }
    Ok(versions)
}

/// Classify the registered executor fleet, optionally against `target`.
pub async fn classify_executor_fleet<T>(
    tree: &T,
    target: Option<&str>,
) -> Result<DomainClass, EngineError>
where
    T: TreeAccessor + ?Sized,
{
    let versions = executor_versions(tree).await?;
    let class = classify_fleet(&versions, target);
    tracing::debug!(executors = versions.len(), ?target, ?class, "classified executor fleet");
    Ok(class)
}

#[cfg(test)]
#[path = "fleet_tests.rs"]
mod tests;
