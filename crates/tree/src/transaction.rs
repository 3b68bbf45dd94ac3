// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Multi-path conditional writes.

/// A value that can be written to a node. `None` means "leave the node alone".
pub trait TreeValue {
    fn into_tree_value(self) -> Option<String>;
}

impl TreeValue for String {
    fn into_tree_value(self) -> Option<String> {
        Some(self)
    }
}

impl TreeValue for &str {
    fn into_tree_value(self) -> Option<String> {
        Some(self.to_string())
    }
}

macro_rules! display_tree_value {
    ($($ty:ty),+) => {
        $(
            impl TreeValue for $ty {
                fn into_tree_value(self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )+
    };
}

display_tree_value!(bool, i32, u32, u64);

impl<T: TreeValue> TreeValue for Option<T> {
    fn into_tree_value(self) -> Option<String> {
        self.and_then(TreeValue::into_tree_value)
    }
}

/// One staged operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxnOp {
    /// Create the node with `value`, or overwrite it if the stored value differs
    ReplaceIfChanged { path: String, value: String },
}

impl TxnOp {
    pub fn path(&self) -> &str {
        match self {
            TxnOp::ReplaceIfChanged { path, .. } => path,
        }
    }
}

/// Builder for an atomic batch of [`TxnOp`]s, applied by
/// [`TreeAccessor::commit`](crate::TreeAccessor::commit).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    ops: Vec<TxnOp>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a replace-if-changed write. Values that resolve to `None` are skipped.
    pub fn replace_if_changed(mut self, path: impl Into<String>, value: impl TreeValue) -> Self {
        if let Some(value) = value.into_tree_value() {
            self.ops.push(TxnOp::ReplaceIfChanged { path: path.into(), value });
        }
        self
    }

    pub fn ops(&self) -> &[TxnOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
#[path = "transaction_tests.rs"]
mod tests;
