//! The single managed allocation
//!
//! A [`ManagedBuffer`] describes one block obtained from a
//! [`RawAllocator`](super::allocator::RawAllocator). The block always carries
//! [`OVERRUN_BYTES`] of slack past the nominal end: writes "past the end" land
//! in that slack, so the overallocation demo stays inside memory we own.
//!
//! The buffer does not free itself. The engine that created it hands the raw
//! parts back to the same allocator.

use super::allocator::AllocatorKind;
use crate::constants::OVERRUN_BYTES;
use std::alloc::Layout;
use std::ptr::{self, NonNull};

#[derive(Debug)]
pub struct ManagedBuffer {
    ptr: NonNull<u8>,
    layout: Layout,
    len: usize,
    kind: AllocatorKind,
    zeroed: usize,  // bytes from the start known to hold zero
    overrun: usize, // bytes written past `len`
}

impl ManagedBuffer {
    /// Layout of the backing block for a nominal length, slack included
    pub(crate) fn layout_for(len: usize) -> Option<Layout> {
        let size = len.checked_add(OVERRUN_BYTES)?;
        Layout::from_size_align(size, 1).ok()
    }

    /// Wrap a freshly allocated block.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a live block of `layout_for(len)` obtained with
    /// `kind`.
    pub(crate) unsafe fn from_raw(
        ptr: NonNull<u8>,
        layout: Layout,
        len: usize,
        kind: AllocatorKind,
    ) -> Self {
        let zeroed = match kind {
            AllocatorKind::Zeroed => len,
            AllocatorKind::Uninitialized => 0,
        };
        ManagedBuffer {
            ptr,
            layout,
            len,
            kind,
            zeroed,
            overrun: 0,
        }
    }

    pub(crate) fn into_raw(self) -> (NonNull<u8>, Layout) {
        (self.ptr, self.layout)
    }

    /// Nominal length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn kind(&self) -> AllocatorKind {
        self.kind
    }

    /// Length of the prefix known to be zero
    pub fn zeroed_len(&self) -> usize {
        self.zeroed
    }

    /// Number of bytes written past the nominal end
    pub fn overrun_len(&self) -> usize {
        self.overrun
    }

    /// The zeroed prefix. Bytes past it may be uninitialized and are not exposed.
    pub fn zeroed_bytes(&self) -> &[u8] {
        // SAFETY: [0, zeroed) lies inside the block and has been written.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.zeroed) }
    }

    /// The bytes written past the nominal end
    pub fn overrun_bytes(&self) -> &[u8] {
        // SAFETY: [len, len + overrun) lies inside the slack and has been written.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr().add(self.len), self.overrun) }
    }

    /// Zero `[start, end)` of the nominal extent, extending the zeroed prefix.
    pub(crate) fn zero_range(&mut self, start: usize, end: usize) {
        assert!(start <= end && end <= self.len, "zero range out of bounds");
        // SAFETY: the range lies inside the block; write_bytes is fine on
        // uninitialized memory.
        unsafe { ptr::write_bytes(self.ptr.as_ptr().add(start), 0, end - start) };
        // The pointer escapes so the stores are not dropped as dead before release.
        std::hint::black_box(self.ptr);
        if start <= self.zeroed {
            self.zeroed = self.zeroed.max(end);
        }
    }

    /// Write `value` at the next byte past the nominal end.
    ///
    /// Returns the number of bytes now written past the end, or `None` once the
    /// slack is used up.
    pub(crate) fn write_past_end(&mut self, value: u8) -> Option<usize> {
        if self.overrun >= OVERRUN_BYTES {
            return None;
        }
        // SAFETY: len + overrun < len + OVERRUN_BYTES == layout.size().
        unsafe { ptr::write_volatile(self.ptr.as_ptr().add(self.len + self.overrun), value) };
        self.overrun += 1;
        Some(self.overrun)
    }
}
