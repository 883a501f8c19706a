//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: the control loop: input polling, state transitions, engine calls
//! - **[`board`]**: display state folded from engine progress events
//! - **[`panes`]**: stateless render functions for each visible pane
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with an
//! [`AllocationEngine`] and an input source, then call [`App::run`].
//!
//! [`AllocationEngine`]: crate::memory::engine::AllocationEngine
//! [`App::run`]: app::App::run

pub mod app;
pub mod board;
pub mod panes;
pub mod theme;

pub use app::{exit_status, App, ExitReason};
