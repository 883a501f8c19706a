//! # Introduction
//!
//! allocviz lets you grow and shrink one large memory allocation from the
//! keyboard and watch what the allocator does: whether the request succeeds,
//! how long zero-filling takes, and what happens when a byte is written past
//! the nominal end.
//!
//! ## Control flow
//!
//! ```text
//! Input → AllocationState → AllocationEngine → Progress → StatusBoard → TUI
//! ```
//!
//! 1. [`input`]: polls for one key with a timeout and decodes it.
//! 2. [`state`]: applies the key to the desired [`state::AllocationState`].
//! 3. [`memory`]: releases the old buffer, reserves the new one, zero-fills
//!    it and reports [`memory::progress::Progress`].
//! 4. [`ui`]: the control loop and the ratatui panes.
//! 5. [`terminal`] and [`signals`]: raw-mode guard and shutdown flag.

pub mod config;
pub mod constants;
pub mod errors;
pub mod input;
pub mod memory;
pub mod signals;
pub mod state;
pub mod terminal;
pub mod ui;
