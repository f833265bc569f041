//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//! Typed instance trees.
//!
//! A tree node carries a typed value whose string slot holds the node name
//! (chunk roots hold the full instance path instead), an optional module
//! qualifier and an ordered child vector. Trees are value-owned forests;
//! region-backed trees share their byte buffers with the region.

use sysrepo_mem::Mem;

use crate::value::{Value, ValueData};

/// Instance tree node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    pub value: Value,
    // Module qualifier, present only where it differs from the parent's
    // effective qualifier.
    pub module: Option<String>,
    pub children: Vec<Node>,
}

/// Bounds for chunked emission of a subtree.
#[derive(Clone, Copy, Debug)]
pub struct ChunkBounds {
    // Range of top-level children to emit.
    pub slice_offset: usize,
    pub slice_width: usize,
    // Maximum children per node below the root.
    pub child_limit: usize,
    // Maximum emitted depth, root being depth 0.
    pub depth_limit: usize,
}

/// Predicate deciding whether a subtree is dropped during copy/emit.
pub type PruneFn<'a> = &'a dyn Fn(&Node) -> bool;

// ===== impl Node =====

impl Node {
    pub fn new(name: &str, data: ValueData) -> Node {
        Node {
            value: Value::new(Some(name), data),
            module: None,
            children: Vec::new(),
        }
    }

    /// Node name (the value's string slot).
    pub fn name(&self) -> &str {
        self.value.xpath.as_deref().unwrap_or("")
    }

    /// Appends a new child and returns a handle to it.
    pub fn add_child(&mut self, name: &str, data: ValueData) -> &mut Node {
        self.children.push(Node::new(name, data));
        self.children.last_mut().unwrap()
    }

    pub fn set_module(&mut self, module: &str) {
        self.module = Some(module.to_owned());
    }

    /// Module qualifier in effect for this node, given the parent's.
    pub fn effective_module<'a>(
        &'a self,
        parent: Option<&'a str>,
    ) -> Option<&'a str> {
        self.module.as_deref().or(parent)
    }

    /// Depth-first pre-order iterator over the subtree.
    pub fn traverse(&self) -> impl Iterator<Item = &Node> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Number of nodes in the subtree.
    pub fn size(&self) -> usize {
        self.traverse().count()
    }

    /// Deep copy with pruned subtrees omitted.
    ///
    /// Pruning is applied top-down; a pruned node and all of its descendants
    /// are dropped. Returns `None` when the root itself is pruned.
    pub fn copy_pruned(&self, prune: PruneFn<'_>) -> Option<Node> {
        if prune(self) {
            return None;
        }
        let children = self
            .children
            .iter()
            .filter_map(|child| child.copy_pruned(prune))
            .collect();
        Some(Node {
            value: self.value.clone(),
            module: self.module.clone(),
            children,
        })
    }

    /// Emits a bounded chunk of the subtree.
    ///
    /// The top-level children of the result range over
    /// `[slice_offset, slice_offset + slice_width)` of the (pruned) child
    /// sequence; every node below them is limited to `child_limit` children
    /// and nothing deeper than `depth_limit` is emitted. Pruned subtrees do
    /// not count toward sibling limits.
    ///
    /// The chunk root carries `root_path` in its string slot so the client
    /// can anchor a follow-up request for the next chunk.
    pub fn emit_chunk(
        &self,
        root_path: &str,
        bounds: &ChunkBounds,
        prune: Option<PruneFn<'_>>,
    ) -> Node {
        let prune = prune.unwrap_or(&prune_none);
        let mut root = Node {
            value: Value::new(Some(root_path), self.value.data.clone()),
            module: self.module.clone(),
            children: Vec::new(),
        };
        root.value.dflt = self.value.dflt;
        if bounds.depth_limit == 0 {
            return root;
        }
        root.children = self
            .children
            .iter()
            .filter(|child| !prune(child))
            .skip(bounds.slice_offset)
            .take(bounds.slice_width)
            .map(|child| child.emit_limited(bounds, prune, 1))
            .collect();
        root
    }

    fn emit_limited(
        &self,
        bounds: &ChunkBounds,
        prune: PruneFn<'_>,
        depth: usize,
    ) -> Node {
        let mut node = Node {
            value: self.value.clone(),
            module: self.module.clone(),
            children: Vec::new(),
        };
        if depth < bounds.depth_limit {
            node.children = self
                .children
                .iter()
                .filter(|child| !prune(child))
                .take(bounds.child_limit)
                .map(|child| child.emit_limited(bounds, prune, depth + 1))
                .collect();
        }
        node
    }

    /// Duplicates the whole tree into the given region (see
    /// [`Value::duplicate`]).
    pub fn duplicate(&self, mem: Option<&Mem>) -> Node {
        Node {
            value: self.value.duplicate(mem),
            module: self.module.clone(),
            children: self
                .children
                .iter()
                .map(|child| child.duplicate(mem))
                .collect(),
        }
    }
}

// ===== helper functions =====

fn prune_none(_: &Node) -> bool {
    false
}
