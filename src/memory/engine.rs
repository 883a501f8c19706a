//! Allocation engine
//!
//! The engine owns the single [`ManagedBuffer`]. Every call to
//! [`AllocationEngine::allocate`] releases the current buffer before asking
//! the allocator for a new one, so two buffers never coexist.
//!
//! Zero-filling walks the nominal extent in progress steps and reports each
//! boundary. With overallocation enabled (and a non-empty buffer) the walk
//! continues [`OVERRUN_BYTES`] past the nominal end, pausing after every such
//! byte so the overrun is visible on screen. The fill cannot be interrupted
//! once started.

use super::allocator::RawAllocator;
use super::buffer::ManagedBuffer;
use super::progress::{Progress, ProgressSink};
use super::EngineConfig;
use crate::constants::OVERRUN_BYTES;
use crate::errors::AppError;
use crate::state::AllocationState;
use std::thread;

pub struct AllocationEngine<A: RawAllocator> {
    allocator: A,
    config: EngineConfig,
    buffer: Option<ManagedBuffer>,
}

impl<A: RawAllocator> AllocationEngine<A> {
    pub fn new(allocator: A, config: EngineConfig) -> Self {
        AllocationEngine {
            allocator,
            config,
            buffer: None,
        }
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// The buffer currently held, if any
    pub fn buffer(&self) -> Option<&ManagedBuffer> {
        self.buffer.as_ref()
    }

    /// Free the held buffer. Does nothing when no buffer is held.
    pub fn release(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            let len = buffer.len();
            let (ptr, layout) = buffer.into_raw();
            // SAFETY: the block came from this allocator with this layout and
            // the buffer that referenced it is gone.
            unsafe { self.allocator.release(ptr, layout) };
            log::debug!("Released {} bytes", len);
        }
    }

    /// Materialize `state`: release, reserve, then optionally zero-fill.
    ///
    /// Fails with [`AppError::OutOfMemory`] when the allocator refuses the
    /// request, leaving no buffer held.
    pub fn allocate<S: ProgressSink>(
        &mut self,
        state: &AllocationState,
        sink: &mut S,
    ) -> Result<(), AppError> {
        self.release();

        let kind = state.allocator_kind();
        let Some(nominal) = self.config.bytes_for(state.size_units) else {
            log::error!("Size of {} units overflows usize", state.size_units);
            return Err(AppError::size_overflow());
        };

        sink.report(Progress::Requesting {
            bytes: nominal,
            allocator: kind,
        })?;
        log::info!("Allocating {} bytes with {}", nominal, kind);

        let reserved = ManagedBuffer::layout_for(nominal).and_then(|layout| {
            self.allocator
                .allocate(layout, kind)
                // SAFETY: the block was just allocated for exactly this layout.
                .map(|ptr| unsafe { ManagedBuffer::from_raw(ptr, layout, nominal, kind) })
        });
        let Some(buffer) = reserved else {
            log::error!("Allocation of {} bytes with {} failed", nominal, kind);
            sink.report(Progress::Failed { bytes: nominal })?;
            return Err(AppError::out_of_memory(nominal));
        };
        let buffer = self.buffer.insert(buffer);
        sink.report(Progress::Allocated { bytes: nominal })?;

        if !state.zero_on_allocate {
            sink.report(Progress::NotZeroed)?;
            return Ok(());
        }

        let overrun = if state.overallocate && state.size_units > 0 {
            OVERRUN_BYTES
        } else {
            0
        };
        let step = self.config.progress_step.max(1);
        let delay = self.config.overrun_delay;
        sink.report(Progress::ZeroingStarted {
            bytes: nominal,
            overrun,
        })?;

        let mut offset = 0;
        while offset < nominal {
            sink.report(Progress::Zeroed { bytes: offset })?;
            let end = offset.saturating_add(step).min(nominal);
            buffer.zero_range(offset, end);
            offset = end;
        }

        for _ in 0..overrun {
            let offset = nominal + buffer.overrun_len();
            if offset % step == 0 {
                sink.report(Progress::Zeroed { bytes: offset })?;
            }
            sink.report(Progress::Overran {
                offset,
                bytes_past_end: buffer.overrun_len() + 1,
            })?;
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            if buffer.write_past_end(0).is_none() {
                break;
            }
        }

        let zeroed = buffer.zeroed_len();
        let written_past_end = buffer.overrun_len();
        if written_past_end > 0 {
            log::warn!(
                "Wrote {} byte(s) past the nominal end of a {} byte buffer",
                written_past_end,
                nominal
            );
        }
        log::info!("Zeroed {} bytes", zeroed);
        sink.report(Progress::Finished {
            zeroed,
            overrun: written_past_end,
        })?;
        Ok(())
    }
}

impl<A: RawAllocator> Drop for AllocationEngine<A> {
    fn drop(&mut self) {
        self.release();
    }
}
