// Constants for the allocation visualizer

/// One mebibyte
pub const MIB: usize = 1 << 20;

/// One gibibyte, the default size unit
pub const GIB: usize = 1 << 30;

/// Upper bound for the requested size, in units
pub const MAX_SIZE_UNITS: usize = 1024 * 1024;

/// Units added or removed by the left/right arrow keys
pub const LARGE_STEP_UNITS: usize = 1024;

/// Bytes written past the nominal end when overallocation is enabled
pub const OVERRUN_BYTES: usize = 1;

/// Progress reports per unit while zero-filling (1 MiB steps for GiB units)
pub const PROGRESS_STEPS_PER_UNIT: usize = 1024;

/// Default input poll timeout in milliseconds; also the spinner frame rate
pub const DEFAULT_POLL_MS: u64 = 50;

/// Default pause after each byte written past the nominal end
pub const DEFAULT_OVERRUN_DELAY_MS: u64 = 100;
