// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory coordination tree.
//!
//! Nodes live in a sorted map keyed by absolute path, so children enumerate
//! in lexicographic order. Ephemeral nodes are bound to a session name and
//! vanish when that session expires. Modification times come from the
//! injected [`Clock`].

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use jd_core::{Clock, SystemClock};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::accessor::{TreeAccessor, TreeError};
use crate::paths;
use crate::snapshot::{TreeSnapshot, CURRENT_SNAPSHOT_VERSION};
use crate::transaction::{Transaction, TxnOp};

/// A stored node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub mtime_ms: u64,
    /// Session owning an ephemeral node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_owner: Option<String>,
}

#[derive(Debug, Default)]
struct TreeState {
    nodes: BTreeMap<String, Node>,
    /// Path prefixes whose access fails with `Unavailable`
    failing: Vec<String>,
}

fn check_path(path: &str) -> Result<(), TreeError> {
    let valid = path == "/"
        || (path.starts_with('/') && !path.ends_with('/') && !path.contains("//"));
    if valid {
        Ok(())
    } else {
        Err(TreeError::InvalidPath(path.to_string()))
    }
}

fn child_prefix(path: &str) -> String {
    if path == "/" {
        "/".to_string()
    } else {
        format!("{}/", path)
    }
}

impl TreeState {
    fn guard(&self, path: &str) -> Result<(), TreeError> {
        check_path(path)?;
        match self.failing.iter().find(|prefix| path.starts_with(prefix.as_str())) {
            Some(prefix) => Err(TreeError::Unavailable(format!("injected failure under {}", prefix))),
            None => Ok(()),
        }
    }

    fn exists(&self, path: &str) -> bool {
        path == "/" || self.nodes.contains_key(path)
    }

    fn children(&self, path: &str) -> Option<Vec<String>> {
        if !self.exists(path) {
            return None;
        }
        let prefix = child_prefix(path);
        let names = self
            .nodes
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, _)| {
                let rest = &key[prefix.len()..];
                (!rest.contains('/')).then(|| rest.to_string())
            })
            .collect();
        Some(names)
    }

    fn has_children(&self, path: &str) -> bool {
        let prefix = child_prefix(path);
        self.nodes.range(prefix.clone()..).next().is_some_and(|(key, _)| key.starts_with(&prefix))
    }

    fn ensure_parents(&mut self, path: &str, now: u64) {
        let mut missing = Vec::new();
        let mut cursor = paths::parent(path);
        while let Some(parent) = cursor {
            if self.exists(parent) {
                break;
            }
            missing.push(parent.to_string());
            cursor = paths::parent(parent);
        }
        for parent in missing {
            self.nodes.insert(parent, Node { value: None, mtime_ms: now, ephemeral_owner: None });
        }
    }

    fn set(&mut self, path: &str, value: Option<String>, now: u64, owner: Option<String>) {
        self.ensure_parents(path, now);
        let node = self.nodes.entry(path.to_string()).or_default();
        node.value = value;
        node.mtime_ms = now;
        if owner.is_some() {
            node.ephemeral_owner = owner;
        }
    }

    fn create(&mut self, path: &str, now: u64) {
        if !self.exists(path) {
            self.set(path, None, now, None);
        }
    }

    fn remove_subtree(&mut self, path: &str) -> usize {
        let prefix = child_prefix(path);
        let mut doomed: Vec<String> = self
            .nodes
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .map(|(key, _)| key.clone())
            .collect();
        if self.nodes.contains_key(path) {
            doomed.push(path.to_string());
        }
        for key in &doomed {
            self.nodes.remove(key);
        }
        doomed.len()
    }
}

/// In-memory [`TreeAccessor`]. Clones share the same nodes.
#[derive(Debug, Clone)]
pub struct MemoryTree<C: Clock = SystemClock> {
    state: Arc<Mutex<TreeState>>,
    clock: C,
}

impl Default for MemoryTree<SystemClock> {
    fn default() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl MemoryTree<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> MemoryTree<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { state: Arc::new(Mutex::new(TreeState::default())), clock }
    }

    /// Rebuild a tree from a snapshot, keeping stored mtimes and session owners.
    pub fn from_snapshot(snapshot: TreeSnapshot, clock: C) -> Self {
        let tree = Self::with_clock(clock);
        tree.state.lock().nodes = snapshot.nodes;
        tree
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        let created_at = chrono::DateTime::from_timestamp_millis(self.clock.epoch_ms() as i64)
            .unwrap_or_default();
        TreeSnapshot {
            version: CURRENT_SNAPSHOT_VERSION,
            created_at,
            nodes: self.state.lock().nodes.clone(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Set a persistent node's value, creating parents.
    pub fn put(&self, path: &str, value: impl Into<String>) {
        let now = self.clock.epoch_ms();
        self.state.lock().set(path, Some(value.into()), now, None);
    }

    /// Create an empty persistent node (a presence marker).
    pub fn touch(&self, path: &str) {
        let now = self.clock.epoch_ms();
        self.state.lock().create(path, now);
    }

    /// Create an empty node owned by `session`.
    pub fn put_ephemeral(&self, path: &str, session: &str) {
        let now = self.clock.epoch_ms();
        self.state.lock().set(path, None, now, Some(session.to_string()));
    }

    /// Drop every node owned by `session`. Returns how many nodes went away.
    pub fn expire_session(&self, session: &str) -> usize {
        let mut state = self.state.lock();
        let owned: Vec<String> = state
            .nodes
            .iter()
            .filter(|(_, node)| node.ephemeral_owner.as_deref() == Some(session))
            .map(|(path, _)| path.clone())
            .collect();
        let removed: usize = owned.iter().map(|path| state.remove_subtree(path)).sum();
        tracing::debug!(session, removed, "expired session");
        removed
    }

    pub fn node(&self, path: &str) -> Option<Node> {
        self.state.lock().nodes.get(path).cloned()
    }

    /// Number of stored nodes, excluding the implicit root.
    pub fn len(&self) -> usize {
        self.state.lock().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every access to a path under `prefix` fail as a transient outage.
    #[cfg(any(test, feature = "test-support"))]
    pub fn fail_under(&self, prefix: &str) {
        self.state.lock().failing.push(prefix.to_string());
    }

    /// Clear injected failures.
    #[cfg(any(test, feature = "test-support"))]
    pub fn heal(&self) {
        self.state.lock().failing.clear();
    }
}

#[async_trait]
impl<C: Clock> TreeAccessor for MemoryTree<C> {
    async fn exists(&self, path: &str) -> Result<bool, TreeError> {
        let state = self.state.lock();
        state.guard(path)?;
        Ok(state.exists(path))
    }

    async fn read(&self, path: &str) -> Result<Option<String>, TreeError> {
        let state = self.state.lock();
        state.guard(path)?;
        Ok(state.nodes.get(path).and_then(|node| node.value.clone()))
    }

    async fn children(&self, path: &str) -> Result<Option<Vec<String>>, TreeError> {
        let state = self.state.lock();
        state.guard(path)?;
        Ok(state.children(path))
    }

    async fn mtime(&self, path: &str) -> Result<u64, TreeError> {
        let state = self.state.lock();
        state.guard(path)?;
        state
            .nodes
            .get(path)
            .map(|node| node.mtime_ms)
            .ok_or_else(|| TreeError::NoNode(path.to_string()))
    }

    async fn write(&self, path: &str, value: &str) -> Result<(), TreeError> {
        let now = self.clock.epoch_ms();
        let mut state = self.state.lock();
        state.guard(path)?;
        state.set(path, Some(value.to_string()), now, None);
        Ok(())
    }

    async fn create(&self, path: &str) -> Result<(), TreeError> {
        let now = self.clock.epoch_ms();
        let mut state = self.state.lock();
        state.guard(path)?;
        state.create(path, now);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), TreeError> {
        let mut state = self.state.lock();
        state.guard(path)?;
        if state.has_children(path) {
            return Err(TreeError::NotEmpty(path.to_string()));
        }
        state.nodes.remove(path);
        Ok(())
    }

    async fn delete_recursive(&self, path: &str) -> Result<(), TreeError> {
        let mut state = self.state.lock();
        state.guard(path)?;
        if path == "/" {
            state.nodes.clear();
        } else {
            state.remove_subtree(path);
        }
        Ok(())
    }

    async fn commit(&self, txn: Transaction) -> Result<bool, TreeError> {
        let now = self.clock.epoch_ms();
        let mut state = self.state.lock();
        for op in txn.ops() {
            state.guard(op.path())?;
        }
        let mut changed = false;
        for op in txn.ops() {
            match op {
                TxnOp::ReplaceIfChanged { path, value } => {
                    let current = state.nodes.get(path.as_str()).and_then(|n| n.value.as_deref());
                    if current != Some(value.as_str()) {
                        state.set(path, Some(value.clone()), now, None);
                        changed = true;
                    }
                }
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
