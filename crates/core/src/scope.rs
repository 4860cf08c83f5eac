// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit logging scopes.
//!
//! A `ScopeStack` is an immutable value passed down the call chain.
//! Pushing returns a new stack sharing the parent's nodes, so callers can
//! hand stacks across tasks without copying or synchronizing.

use std::sync::Arc;

#[derive(Debug)]
struct ScopeNode {
    value: String,
    parent: Option<Arc<ScopeNode>>,
    depth: usize,
}

/// Immutable stack of scope labels, innermost last.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    head: Option<Arc<ScopeNode>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new stack with `value` as the innermost scope.
    #[must_use]
    pub fn push(&self, value: impl Into<String>) -> Self {
        let depth = self.len() + 1;
        Self {
            head: Some(Arc::new(ScopeNode {
                value: value.into(),
                parent: self.head.clone(),
                depth,
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.head.as_ref().map_or(0, |node| node.depth)
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Innermost scope, if any.
    pub fn current(&self) -> Option<&str> {
        self.head.as_deref().map(|node| node.value.as_str())
    }

    /// Scope labels, outermost first.
    pub fn to_vec(&self) -> Vec<&str> {
        let mut values = Vec::with_capacity(self.len());
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            values.push(n.value.as_str());
            node = n.parent.as_deref();
        }
        values.reverse();
        values
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
