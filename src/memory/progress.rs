//! Progress events emitted while an allocation is materialized

use super::allocator::AllocatorKind;
use std::io;

/// One step of an allocate-and-fill run, in the order the engine emits them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// A block of `bytes` is about to be requested
    Requesting {
        bytes: usize,
        allocator: AllocatorKind,
    },
    /// The request succeeded
    Allocated { bytes: usize },
    /// The request failed; the engine returns an error right after this
    Failed { bytes: usize },
    /// Zeroing is disabled, the contents are left as the allocator returned them
    NotZeroed,
    /// Zero-filling begins; `overrun` bytes will be written past the end
    ZeroingStarted { bytes: usize, overrun: usize },
    /// Cumulative bytes zeroed, reported at every progress-step boundary
    Zeroed { bytes: usize },
    /// A byte was written at `offset`, which lies past the nominal end
    Overran { offset: usize, bytes_past_end: usize },
    /// Zero-filling finished
    Finished { zeroed: usize, overrun: usize },
}

impl Progress {
    /// Whether this event should cause an immediate redraw
    pub fn redraws(&self) -> bool {
        !matches!(self, Progress::ZeroingStarted { .. })
    }
}

/// Receiver of engine progress.
///
/// The control loop implements this by redrawing the screen; tests record the
/// events instead.
pub trait ProgressSink {
    fn report(&mut self, event: Progress) -> io::Result<()>;
}

impl ProgressSink for Vec<Progress> {
    fn report(&mut self, event: Progress) -> io::Result<()> {
        self.push(event);
        Ok(())
    }
}
