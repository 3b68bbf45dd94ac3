// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The accessor seam every derivation and mutation goes through.

use async_trait::async_trait;
use jd_core::ConfigError;
use thiserror::Error;

use crate::transaction::Transaction;

/// Errors from tree operations
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("no node at {0}")]
    NoNode(String),
    #[error("node {0} has children")]
    NotEmpty(String),
    #[error("invalid path: {0:?}")]
    InvalidPath(String),
    /// Transient I/O failure talking to the store
    #[error("tree unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Path-addressed access to the coordination tree.
///
/// Reads of absent nodes are not errors: `read` and `children` return `None`.
/// Only `mtime` needs the node and fails with [`TreeError::NoNode`].
#[async_trait]
pub trait TreeAccessor: Send + Sync {
    async fn exists(&self, path: &str) -> Result<bool, TreeError>;

    async fn read(&self, path: &str) -> Result<Option<String>, TreeError>;

    /// Child names in store order; `None` when the node is absent.
    async fn children(&self, path: &str) -> Result<Option<Vec<String>>, TreeError>;

    /// Last modification time in epoch milliseconds.
    async fn mtime(&self, path: &str) -> Result<u64, TreeError>;

    /// Set a node's value, creating it and any missing parents.
    async fn write(&self, path: &str, value: &str) -> Result<(), TreeError>;

    /// Create an empty persistent node if it does not exist.
    async fn create(&self, path: &str) -> Result<(), TreeError>;

    /// Delete a childless node. Deleting an absent node succeeds.
    async fn delete(&self, path: &str) -> Result<(), TreeError>;

    /// Delete a node and its whole subtree. Deleting an absent node succeeds.
    async fn delete_recursive(&self, path: &str) -> Result<(), TreeError>;

    /// Apply every operation atomically. Returns whether anything changed.
    async fn commit(&self, txn: Transaction) -> Result<bool, TreeError>;
}
