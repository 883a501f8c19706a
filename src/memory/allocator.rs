//! Raw allocator seam used by the allocation engine
//!
//! The engine never calls the global allocator directly. It goes through
//! [`RawAllocator`] so tests can count calls or simulate exhaustion, while the
//! binary uses [`SystemAllocator`].

use std::alloc::{self, Layout};
use std::fmt;
use std::ptr::NonNull;

/// Which allocation primitive serves a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocatorKind {
    /// No guarantee about the returned bytes
    Uninitialized,
    /// Every returned byte is zero
    Zeroed,
}

impl AllocatorKind {
    pub fn label(self) -> &'static str {
        match self {
            AllocatorKind::Uninitialized => "alloc",
            AllocatorKind::Zeroed => "alloc_zeroed",
        }
    }
}

impl fmt::Display for AllocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A source of raw memory blocks.
///
/// Implementations hand out blocks for non-zero-sized layouts and take them
/// back through [`RawAllocator::release`].
pub trait RawAllocator {
    /// Reserve a block for `layout`, or `None` when the request cannot be met.
    fn allocate(&self, layout: Layout, kind: AllocatorKind) -> Option<NonNull<u8>>;

    /// Return a block to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this allocator with the
    /// same `layout`, and must not be used afterwards.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);
}

impl<A: RawAllocator + ?Sized> RawAllocator for &A {
    fn allocate(&self, layout: Layout, kind: AllocatorKind) -> Option<NonNull<u8>> {
        (**self).allocate(layout, kind)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).release(ptr, layout)
    }
}

/// The process allocator from `std::alloc`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl RawAllocator for SystemAllocator {
    fn allocate(&self, layout: Layout, kind: AllocatorKind) -> Option<NonNull<u8>> {
        if layout.size() == 0 {
            return None;
        }
        // SAFETY: layout has a non-zero size, checked above.
        let ptr = unsafe {
            match kind {
                AllocatorKind::Uninitialized => alloc::alloc(layout),
                AllocatorKind::Zeroed => alloc::alloc_zeroed(layout),
            }
        };
        NonNull::new(ptr)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        alloc::dealloc(ptr.as_ptr(), layout);
    }
}
