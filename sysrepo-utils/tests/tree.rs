//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

use sysrepo_utils::tree::{ChunkBounds, Node};
use sysrepo_utils::value::ValueData;

// Builds an interface-list-shaped tree: a container with `n` list entries,
// each carrying a name leaf and a stats container with two counters.
fn test_tree(n: usize) -> Node {
    let mut root = Node::new("interfaces", ValueData::Container);
    for i in 0..n {
        let entry = root.add_child("interface", ValueData::List);
        entry.add_child(
            "name",
            ValueData::String(format!("eth{}", i).as_str().into()),
        );
        let stats = entry.add_child("statistics", ValueData::Container);
        stats.add_child("in-octets", ValueData::Uint64(100 + i as u64));
        stats.add_child("out-octets", ValueData::Uint64(200 + i as u64));
    }
    root
}

#[test]
fn test_traverse_preorder() {
    let root = test_tree(2);
    let names = root.traverse().map(Node::name).collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "interfaces",
            "interface",
            "name",
            "statistics",
            "in-octets",
            "out-octets",
            "interface",
            "name",
            "statistics",
            "in-octets",
            "out-octets",
        ]
    );
    assert_eq!(root.size(), 11);
}

#[test]
fn test_module_qualifier_inheritance() {
    let mut root = Node::new("interfaces", ValueData::Container);
    root.set_module("ietf-interfaces");
    let child = root.add_child("interface", ValueData::List);
    assert_eq!(
        child.effective_module(Some("ietf-interfaces")),
        Some("ietf-interfaces")
    );
    child.set_module("example-augment");
    assert_eq!(
        child.effective_module(Some("ietf-interfaces")),
        Some("example-augment")
    );
}

#[test]
fn test_copy_pruned_top_down() {
    let root = test_tree(3);
    // Drop every statistics subtree.
    let copy = root
        .copy_pruned(&|node| node.name() == "statistics")
        .unwrap();
    assert_eq!(copy.size(), 1 + 3 * 2);
    assert!(copy.traverse().all(|node| node.name() != "in-octets"));

    // Pruning the root yields nothing.
    assert!(root.copy_pruned(&|node| node.name() == "interfaces").is_none());
}

#[test]
fn test_chunk_slice_bounds() {
    let root = test_tree(5);
    let bounds = ChunkBounds {
        slice_offset: 1,
        slice_width: 2,
        child_limit: 10,
        depth_limit: 10,
    };
    let chunk = root.emit_chunk("/ietf-interfaces:interfaces", &bounds, None);

    // Chunk root carries the instance path for follow-up requests.
    assert_eq!(chunk.name(), "/ietf-interfaces:interfaces");
    assert_eq!(chunk.children.len(), 2);
    assert_eq!(
        chunk.children[0].children[0].value.canonical_string().unwrap(),
        "eth1"
    );
}

#[test]
fn test_chunk_child_and_depth_limits() {
    let root = test_tree(2);
    let bounds = ChunkBounds {
        slice_offset: 0,
        slice_width: 10,
        child_limit: 1,
        depth_limit: 2,
    };
    let chunk = root.emit_chunk("/ietf-interfaces:interfaces", &bounds, None);

    // Below the root, each node emits at most one child and nothing deeper
    // than depth 2 survives.
    assert_eq!(chunk.children.len(), 2);
    for entry in &chunk.children {
        assert_eq!(entry.children.len(), 1);
        assert!(entry.children[0].children.is_empty());
    }
}

#[test]
fn test_chunk_pruned_nodes_dont_count() {
    let root = test_tree(4);
    let bounds = ChunkBounds {
        slice_offset: 0,
        slice_width: 2,
        child_limit: 10,
        depth_limit: 10,
    };
    // Prune entries whose name leaf is eth0; the slice still yields two
    // entries because pruned ones do not count toward sibling limits.
    let prune = |node: &Node| {
        node.children
            .iter()
            .any(|child| {
                child.name() == "name"
                    && child.value.canonical_string().unwrap() == "eth0"
            })
    };
    let chunk =
        root.emit_chunk("/ietf-interfaces:interfaces", &bounds, Some(&prune));
    assert_eq!(chunk.children.len(), 2);
    assert_eq!(
        chunk.children[0].children[0].value.canonical_string().unwrap(),
        "eth1"
    );
    assert_eq!(
        chunk.children[1].children[0].value.canonical_string().unwrap(),
        "eth2"
    );
}

#[test]
fn test_chunk_depth_zero_emits_root_only() {
    let root = test_tree(3);
    let bounds = ChunkBounds {
        slice_offset: 0,
        slice_width: 10,
        child_limit: 10,
        depth_limit: 0,
    };
    let chunk = root.emit_chunk("/ietf-interfaces:interfaces", &bounds, None);
    assert!(chunk.children.is_empty());
}
