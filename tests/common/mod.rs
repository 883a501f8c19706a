// Shared helpers for the integration tests

#![allow(dead_code)]

use allocviz::input::{InputSource, Key};
use allocviz::memory::allocator::{AllocatorKind, RawAllocator, SystemAllocator};
use allocviz::memory::engine::AllocationEngine;
use allocviz::memory::{EngineConfig, SizeUnit};
use allocviz::signals::ShutdownFlag;
use allocviz::ui::App;
use ratatui::{backend::TestBackend, Terminal};
use std::alloc::Layout;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::ptr::NonNull;
use std::time::Duration;

/// Bytes per unit in tests; 1024 progress steps of 8 bytes each
pub const TEST_UNIT: usize = 8192;

pub const UP: &[u8] = b"\x1b[A";
pub const DOWN: &[u8] = b"\x1b[B";
pub const RIGHT: &[u8] = b"\x1b[C";
pub const LEFT: &[u8] = b"\x1b[D";
pub const CTRL_C: &[u8] = b"\x03";

pub fn test_config() -> EngineConfig {
    EngineConfig {
        unit_bytes: TEST_UNIT,
        progress_step: TEST_UNIT / 1024,
        overrun_delay: Duration::ZERO,
    }
}

/// One call made to a [`CountingAllocator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Allocate { size: usize, kind: AllocatorKind },
    Refused { size: usize, kind: AllocatorKind },
    Release { size: usize },
}

/// System allocator that records every call and can refuse large requests
#[derive(Debug, Default)]
pub struct CountingAllocator {
    calls: RefCell<Vec<Call>>,
    limit: Option<usize>,
}

impl CountingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse any block larger than `limit` bytes
    pub fn with_limit(limit: usize) -> Self {
        CountingAllocator {
            calls: RefCell::new(Vec::new()),
            limit: Some(limit),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn allocations(&self) -> Vec<(usize, AllocatorKind)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match *call {
                Call::Allocate { size, kind } => Some((size, kind)),
                _ => None,
            })
            .collect()
    }

    /// Blocks handed out and not yet released
    pub fn live(&self) -> usize {
        self.calls.borrow().iter().fold(0, |live, call| match call {
            Call::Allocate { .. } => live + 1,
            Call::Release { .. } => live - 1,
            Call::Refused { .. } => live,
        })
    }
}

impl RawAllocator for CountingAllocator {
    fn allocate(&self, layout: Layout, kind: AllocatorKind) -> Option<NonNull<u8>> {
        let size = layout.size();
        if self.limit.is_some_and(|limit| size > limit) {
            self.calls.borrow_mut().push(Call::Refused { size, kind });
            return None;
        }
        let ptr = SystemAllocator.allocate(layout, kind)?;
        self.calls.borrow_mut().push(Call::Allocate { size, kind });
        Some(ptr)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.calls.borrow_mut().push(Call::Release {
            size: layout.size(),
        });
        SystemAllocator.release(ptr, layout);
    }
}

/// Replays a fixed sequence of raw reads.
///
/// Each entry is what one `read` of up to three bytes would have returned; an
/// empty entry stands for a poll timeout. Once the script is exhausted every
/// poll fails with `UnexpectedEof`, which ends the control loop.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    reads: VecDeque<Vec<u8>>,
    polls: usize,
}

impl ScriptedInput {
    pub fn new<I, B>(reads: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        ScriptedInput {
            reads: reads.into_iter().map(|r| r.as_ref().to_vec()).collect(),
            polls: 0,
        }
    }

    /// Number of times the source has been polled
    pub fn polls(&self) -> usize {
        self.polls
    }

    pub fn remaining(&self) -> usize {
        self.reads.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self, _timeout: Duration) -> io::Result<Option<Key>> {
        self.polls += 1;
        let read = self.reads.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "input script exhausted")
        })?;
        if read.is_empty() {
            return Ok(None);
        }
        let len = read.len().min(3);
        Ok(Some(Key::from_bytes(&read[..len])))
    }
}

pub fn test_engine(allocator: CountingAllocator) -> AllocationEngine<CountingAllocator> {
    AllocationEngine::new(allocator, test_config())
}

pub fn test_app(
    allocator: CountingAllocator,
    reads: &[&[u8]],
) -> App<CountingAllocator, ScriptedInput> {
    App::new(
        test_engine(allocator),
        ScriptedInput::new(reads.iter().copied()),
        ShutdownFlag::new(),
        SizeUnit::Gib,
        Duration::from_millis(50),
    )
}

pub fn test_terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(80, 24)).expect("test backend")
}

/// The rendered screen, one line per row
pub fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
