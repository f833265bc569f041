//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

use sysrepo_mem::Mem;

#[test]
fn test_snapshot_restore_exact() {
    let mem = Mem::new();
    let _keep = mem.alloc_str("kept");
    let used_before = mem.used();
    let buffers_before = mem.buffer_count();

    let snapshot = mem.snapshot();
    for i in 0..100 {
        let s = mem.alloc_str(&format!("value-{}", i));
        mem.retain();
        drop(s);
    }
    assert!(mem.used() > used_before);
    assert_eq!(mem.obj_count(), 100);

    mem.restore(&snapshot);
    assert_eq!(mem.used(), used_before);
    assert_eq!(mem.buffer_count(), buffers_before);
    assert_eq!(mem.obj_count(), 0);

    // The next allocation begins right at the pre-snapshot watermark.
    mem.alloc_str("x");
    assert_eq!(mem.used(), used_before + 1);
}

#[test]
fn test_restore_foreign_snapshot_ignored() {
    let mem_a = Mem::new();
    let mem_b = Mem::new();
    let snapshot_b = mem_b.snapshot();

    mem_a.alloc_str("payload");
    mem_a.restore(&snapshot_b);
    assert_eq!(mem_a.buffer_count(), 1);
}

#[test]
fn test_obj_count_gates_release() {
    let mem = Mem::new();
    mem.retain();
    mem.retain();
    assert!(!mem.release());
    assert!(mem.release());
    assert_eq!(mem.obj_count(), 0);
}

#[test]
fn test_edit_string_reuses_top_buffer() {
    let mem = Mem::new();
    let mut slot = None;
    mem.edit_string(&mut slot, "long initial content");
    let used = mem.used();
    let buffers = mem.buffer_count();

    // Shorter replacement fits in the top buffer.
    mem.edit_string(&mut slot, "short");
    assert_eq!(slot.as_deref(), Some("short"));
    assert_eq!(mem.used(), used);
    assert_eq!(mem.buffer_count(), buffers);

    // Longer replacement needs a fresh buffer.
    mem.edit_string(&mut slot, "content that does not fit in place");
    assert!(mem.used() > used);
}

#[test]
fn test_region_identity() {
    let mem = Mem::new();
    let other = Mem::new();
    let href = mem.downgrade();
    assert!(href.is_region(&mem));
    assert!(!href.is_region(&other));
    assert!(href.same_region(&mem.downgrade()));
    assert!(!href.same_region(&other.downgrade()));
}
