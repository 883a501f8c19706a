//! TUI pane rendering modules
//!
//! - [`controls`]: key bindings
//! - [`allocation`]: request outcome, fill mode and fill progress
//! - [`status`]: state bar with the spinner and the current request
//!
//! Each module exports a stateless `render_*` function; the layout that places
//! them lives in [`crate::ui::app::draw`].

mod format;

pub mod allocation;
pub mod controls;
pub mod status;

pub use allocation::{render_allocation_pane, ALLOCATION_HEIGHT};
pub use controls::{render_controls_pane, CONTROLS_HEIGHT, KEY_BINDINGS};
pub use format::{format_gb, format_units};
pub use status::render_status_bar;
