//! Control loop: poll a key, update the desired state, materialize it, redraw

use crate::errors::AppError;
use crate::input::{InputSource, Key};
use crate::memory::allocator::RawAllocator;
use crate::memory::engine::AllocationEngine;
use crate::memory::progress::{Progress, ProgressSink};
use crate::memory::SizeUnit;
use crate::signals::ShutdownFlag;
use crate::state::{AllocationState, Transition};
use crate::ui::board::StatusBoard;
use crate::ui::panes::{
    render_allocation_pane, render_controls_pane, render_status_bar, ALLOCATION_HEIGHT,
    CONTROLS_HEIGHT,
};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Why the control loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `q` was pressed
    QuitKey,
    /// Ctrl+C or a signal raised the shutdown flag
    Interrupted,
}

/// Process exit status for a finished run: 0 for quit or interrupt, 1 for a
/// fatal error
pub fn exit_status(result: &Result<ExitReason, AppError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// The main application state
pub struct App<A: RawAllocator, I: InputSource> {
    engine: AllocationEngine<A>,
    input: I,
    state: AllocationState,
    board: StatusBoard,
    shutdown: ShutdownFlag,
    unit: SizeUnit,
    poll_interval: Duration,
    exit_reason: Option<ExitReason>,
}

impl<A: RawAllocator, I: InputSource> App<A, I> {
    pub fn new(
        engine: AllocationEngine<A>,
        input: I,
        shutdown: ShutdownFlag,
        unit: SizeUnit,
        poll_interval: Duration,
    ) -> Self {
        App {
            engine,
            input,
            state: AllocationState::default(),
            board: StatusBoard::new(),
            shutdown,
            unit,
            poll_interval,
            exit_reason: None,
        }
    }

    pub fn state(&self) -> &AllocationState {
        &self.state
    }

    pub fn board(&self) -> &StatusBoard {
        &self.board
    }

    pub fn engine(&self) -> &AllocationEngine<A> {
        &self.engine
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.exit_reason
    }

    /// Run until quit, interrupt, or a fatal error.
    ///
    /// The initial empty state is materialized once before the first poll.
    /// The shutdown flag is checked once per iteration, so a signal received
    /// during a long zero-fill takes effect after the fill completes. The
    /// buffer is released on a clean exit; on error it stays held until the
    /// app is dropped.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<ExitReason, AppError> {
        log::info!(
            "Control loop started (unit {}, poll {:?})",
            self.unit.suffix(),
            self.poll_interval
        );
        self.materialize(terminal)?;

        let reason = loop {
            if let Some(reason) = self.exit_reason {
                break reason;
            }
            if self.shutdown.is_raised() {
                break ExitReason::Interrupted;
            }

            self.board.spinner.advance();
            self.redraw(terminal)?;

            if let Some(key) = self.input.poll_key(self.poll_interval)? {
                self.handle_key(key, terminal)?;
            }
        };

        self.exit_reason = Some(reason);
        log::info!("Control loop stopped: {:?}", reason);
        self.engine.release();
        Ok(reason)
    }

    fn handle_key<B: Backend>(&mut self, key: Key, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        if key == Key::Interrupt {
            self.shutdown.raise();
            return Ok(());
        }
        match self.state.apply(key) {
            Transition::Quit => self.exit_reason = Some(ExitReason::QuitKey),
            Transition::Unchanged => log::debug!("Ignored {:?}", key),
            Transition::Reallocate => {
                log::debug!("{:?} -> {:?}", key, self.state);
                self.materialize(terminal)?;
            }
        }
        Ok(())
    }

    /// Hand the current state to the engine, redrawing on every progress event
    fn materialize<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut display = LiveDisplay {
            terminal,
            board: &mut self.board,
            state: &self.state,
            unit: self.unit,
        };
        let result = self.engine.allocate(&self.state, &mut display);
        if let Err(ref err) = result {
            log::error!("Allocation failed: {}", err);
        }
        result
    }

    fn redraw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|f| draw(f, &self.state, &self.board, self.unit))?;
        Ok(())
    }
}

/// Progress sink that updates the board and redraws the screen
struct LiveDisplay<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    board: &'a mut StatusBoard,
    state: &'a AllocationState,
    unit: SizeUnit,
}

impl<B: Backend> ProgressSink for LiveDisplay<'_, B> {
    fn report(&mut self, event: Progress) -> io::Result<()> {
        self.board.apply(&event);
        if event.redraws() {
            let (state, board, unit) = (self.state, &*self.board, self.unit);
            self.terminal.draw(|f| draw(f, state, board, unit))?;
        }
        Ok(())
    }
}

/// Lay out and render every pane
pub fn draw(frame: &mut Frame, state: &AllocationState, board: &StatusBoard, unit: SizeUnit) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CONTROLS_HEIGHT),
            Constraint::Length(ALLOCATION_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_controls_pane(frame, rows[0]);
    render_allocation_pane(frame, rows[1], board);
    render_status_bar(frame, rows[3], state, board, unit.suffix());
}
