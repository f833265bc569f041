//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//! Region memory context used for request-scoped message and value graphs.
//!
//! A [`Mem`] region interns the byte buffers of every value built while
//! serving a single request. Buffers are never freed individually: a
//! [`MemSnapshot`] taken before a multi-step build captures the region state,
//! and [`Mem::restore`] rewinds to it when the build fails, so no partially
//! built graph is ever exposed.
//!
//! The object count gates teardown. Every top-level message or value handed
//! back to a caller retains the region once; the region may be dropped only
//! after every such object released it.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::trace;

#[derive(Debug, Default)]
struct MemInner {
    // Interned string buffers, in allocation order.
    buffers: RefCell<Vec<Rc<str>>>,
    // High-watermark of interned bytes.
    used: Cell<usize>,
    // Number of retained top-level objects.
    obj_count: Cell<u32>,
}

/// Region memory context.
#[derive(Clone, Debug, Default)]
pub struct Mem {
    inner: Rc<MemInner>,
}

/// Non-owning handle to a region, kept by values and messages built from it.
#[derive(Clone, Debug, Default)]
pub struct MemRef {
    inner: Weak<MemInner>,
}

/// Cursor capturing the state of a region at a point in time.
///
/// A snapshot is only meaningful for the region it was taken from and only
/// as long as that region is alive.
#[derive(Debug)]
pub struct MemSnapshot {
    mem: Weak<MemInner>,
    buffers_len: usize,
    used: usize,
    obj_count: u32,
}

// ===== impl Mem =====

impl Mem {
    pub fn new() -> Mem {
        Mem::default()
    }

    /// Interns a copy of `s` and returns a handle to it.
    pub fn alloc_str(&self, s: &str) -> Rc<str> {
        let buf: Rc<str> = Rc::from(s);
        self.inner.buffers.borrow_mut().push(buf.clone());
        self.inner.used.set(self.inner.used.get() + s.len());
        buf
    }

    /// Re-points `slot` at a region-owned copy of `s`.
    ///
    /// When the slot already references the buffer on top of the region and
    /// the new content fits within it, the buffer is replaced in place and
    /// the watermark does not grow.
    pub fn edit_string(&self, slot: &mut Option<Rc<str>>, s: &str) {
        let mut buffers = self.inner.buffers.borrow_mut();
        if let Some(old) = slot
            && let Some(top) = buffers.last()
            && Rc::ptr_eq(old, top)
            && s.len() <= top.len()
        {
            let buf: Rc<str> = Rc::from(s);
            *buffers.last_mut().unwrap() = buf.clone();
            *slot = Some(buf);
            return;
        }
        drop(buffers);
        *slot = Some(self.alloc_str(s));
    }

    /// Captures the current region state.
    pub fn snapshot(&self) -> MemSnapshot {
        MemSnapshot {
            mem: Rc::downgrade(&self.inner),
            buffers_len: self.inner.buffers.borrow().len(),
            used: self.inner.used.get(),
            obj_count: self.inner.obj_count.get(),
        }
    }

    /// Rewinds the region to a previously captured state.
    ///
    /// Everything interned after the snapshot is discarded from the region;
    /// handles to discarded buffers must not be kept. Snapshots taken from a
    /// different region are ignored.
    pub fn restore(&self, snapshot: &MemSnapshot) {
        let Some(mem) = snapshot.mem.upgrade() else {
            return;
        };
        if !Rc::ptr_eq(&mem, &self.inner) {
            return;
        }
        let mut buffers = self.inner.buffers.borrow_mut();
        let discarded = buffers.len().saturating_sub(snapshot.buffers_len);
        buffers.truncate(snapshot.buffers_len);
        self.inner.used.set(snapshot.used);
        self.inner.obj_count.set(snapshot.obj_count);
        trace!(%discarded, "region restored to snapshot");
    }

    /// Registers one more retained top-level object.
    pub fn retain(&self) {
        self.inner.obj_count.set(self.inner.obj_count.get() + 1);
    }

    /// Releases one retained object. Returns `true` when none remain and the
    /// region may be dropped.
    pub fn release(&self) -> bool {
        let count = self.inner.obj_count.get().saturating_sub(1);
        self.inner.obj_count.set(count);
        count == 0
    }

    pub fn obj_count(&self) -> u32 {
        self.inner.obj_count.get()
    }

    /// High-watermark of interned bytes.
    pub fn used(&self) -> usize {
        self.inner.used.get()
    }

    pub fn buffer_count(&self) -> usize {
        self.inner.buffers.borrow().len()
    }

    pub fn downgrade(&self) -> MemRef {
        MemRef {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

// ===== impl MemRef =====

impl MemRef {
    pub fn upgrade(&self) -> Option<Mem> {
        self.inner.upgrade().map(|inner| Mem { inner })
    }

    /// Whether this handle refers to the given region.
    pub fn is_region(&self, mem: &Mem) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| Rc::ptr_eq(&inner, &mem.inner))
    }

    /// Whether two handles refer to the same region.
    pub fn same_region(&self, other: &MemRef) -> bool {
        Weak::ptr_eq(&self.inner, &other.inner)
            && self.inner.upgrade().is_some()
    }
}
