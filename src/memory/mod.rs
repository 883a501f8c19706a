//! Memory management for the visualizer
//!
//! - [`allocator`]: the [`RawAllocator`](allocator::RawAllocator) seam and the
//!   system implementation
//! - [`buffer`]: the single [`ManagedBuffer`](buffer::ManagedBuffer) and its
//!   overrun slack
//! - [`engine`]: release, reserve, zero-fill and overrun logic
//! - [`progress`]: events the engine reports while it works
//!
//! # Sizes
//!
//! Requests are made in whole units. A unit is 1 GiB by default; `--unit mib`
//! switches to 1 MiB for demonstrations on small machines. Zero-fill progress
//! is reported [`PROGRESS_STEPS_PER_UNIT`] times per unit.

pub mod allocator;
pub mod buffer;
pub mod engine;
pub mod progress;

use crate::constants::{DEFAULT_OVERRUN_DELAY_MS, GIB, MIB, PROGRESS_STEPS_PER_UNIT};
use clap::ValueEnum;
use std::time::Duration;

/// Size of one requested unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SizeUnit {
    #[default]
    Gib,
    Mib,
}

impl SizeUnit {
    pub fn bytes(self) -> usize {
        match self {
            SizeUnit::Gib => GIB,
            SizeUnit::Mib => MIB,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            SizeUnit::Gib => "GiB",
            SizeUnit::Mib => "MiB",
        }
    }
}

/// Geometry and pacing of the allocation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Bytes per requested unit
    pub unit_bytes: usize,
    /// Distance between zero-fill progress reports
    pub progress_step: usize,
    /// Pause after every byte written past the nominal end
    pub overrun_delay: Duration,
}

impl EngineConfig {
    pub fn for_unit(unit: SizeUnit) -> Self {
        let unit_bytes = unit.bytes();
        EngineConfig {
            unit_bytes,
            progress_step: (unit_bytes / PROGRESS_STEPS_PER_UNIT).max(1),
            overrun_delay: Duration::from_millis(DEFAULT_OVERRUN_DELAY_MS),
        }
    }

    pub fn with_overrun_delay(mut self, delay: Duration) -> Self {
        self.overrun_delay = delay;
        self
    }

    /// Nominal byte size of `units`, or `None` on overflow
    pub fn bytes_for(&self, units: usize) -> Option<usize> {
        units.checked_mul(self.unit_bytes)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::for_unit(SizeUnit::Gib)
    }
}
