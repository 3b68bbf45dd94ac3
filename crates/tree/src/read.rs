// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed reads on top of [`TreeAccessor`].
//!
//! Every node holds an untyped string. These helpers perform the parse once,
//! at the read boundary, and apply the lenient fallbacks the derivations rely
//! on (a missing counter is zero, an unparsable timestamp is absent).

use std::collections::HashMap;

use jd_core::config::{keys, parse_flag};
use jd_core::{JobConfig, JobName, ScheduleConfig};

use crate::accessor::{TreeAccessor, TreeError};
use crate::paths;

/// Read a job's whole configuration.
///
/// Fails with [`TreeError::NoNode`] when the job has no `config` node, and
/// with [`TreeError::Config`] when a typed field holds garbage.
pub async fn read_job_config<T>(
    tree: &T,
    job: &JobName,
    default_time_zone: &str,
) -> Result<JobConfig, TreeError>
where
    T: TreeAccessor + ?Sized,
{
    let raw = read_config_keys(tree, job, keys::ALL).await?;
    Ok(JobConfig::from_raw(job.clone(), |key| raw.get(key).cloned(), default_time_zone)?)
}

/// Read only the keys that drive a job's firing and reporting.
///
/// Fails with [`TreeError::NoNode`] when the job has no `config` node.
pub async fn read_schedule_config<T>(
    tree: &T,
    job: &JobName,
    default_time_zone: &str,
) -> Result<ScheduleConfig, TreeError>
where
    T: TreeAccessor + ?Sized,
{
    let raw = read_config_keys(tree, job, keys::SCHEDULE).await?;
    Ok(ScheduleConfig::from_raw(|key| raw.get(key).cloned(), default_time_zone))
}

async fn read_config_keys<T>(
    tree: &T,
    job: &JobName,
    wanted: &[&'static str],
) -> Result<HashMap<&'static str, String>, TreeError>
where
    T: TreeAccessor + ?Sized,
{
    let root = paths::config_root(job.as_str());
    if !tree.exists(&root).await? {
        return Err(TreeError::NoNode(root));
    }
    let mut raw = HashMap::with_capacity(wanted.len());
    for key in wanted {
        if let Some(value) = tree.read(&paths::config(job.as_str(), key)).await? {
            raw.insert(*key, value);
        }
    }
    Ok(raw)
}

/// True when the job's `config` node exists.
pub async fn job_exists<T: TreeAccessor + ?Sized>(tree: &T, job: &str) -> Result<bool, TreeError> {
    tree.exists(&paths::config_root(job)).await
}

/// Child names, or empty when the node is absent.
pub async fn children_or_empty<T: TreeAccessor + ?Sized>(
    tree: &T,
    path: &str,
) -> Result<Vec<String>, TreeError> {
    Ok(tree.children(path).await?.unwrap_or_default())
}

/// Trimmed value; blank values read as absent.
pub async fn read_trimmed<T: TreeAccessor + ?Sized>(
    tree: &T,
    path: &str,
) -> Result<Option<String>, TreeError> {
    Ok(tree
        .read(path)
        .await?
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

/// Epoch-millisecond value. Garbage reads as absent.
pub async fn read_millis<T: TreeAccessor + ?Sized>(
    tree: &T,
    path: &str,
) -> Result<Option<u64>, TreeError> {
    let Some(raw) = read_trimmed(tree, path).await? else {
        return Ok(None);
    };
    match raw.parse() {
        Ok(ms) => Ok(Some(ms)),
        Err(_) => {
            tracing::warn!(path, value = %raw, "ignoring unparsable timestamp");
            Ok(None)
        }
    }
}

/// Counter value. Missing or garbage reads as zero.
pub async fn read_count<T: TreeAccessor + ?Sized>(tree: &T, path: &str) -> Result<u64, TreeError> {
    Ok(read_trimmed(tree, path).await?.and_then(|v| v.parse().ok()).unwrap_or(0))
}

/// Lenient boolean: only `true` (any case) is true.
pub async fn read_flag<T: TreeAccessor + ?Sized>(tree: &T, path: &str) -> Result<bool, TreeError> {
    Ok(parse_flag(tree.read(path).await?.as_deref()))
}

#[cfg(test)]
#[path = "read_tests.rs"]
mod tests;
