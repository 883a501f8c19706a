//! Display state fed by engine progress
//!
//! [`StatusBoard`] holds everything the allocation pane shows: the last
//! request, whether it succeeded, the zero-fill mode and the running counters.
//! It is updated from [`Progress`] events and read by the render functions.

use crate::memory::allocator::AllocatorKind;
use crate::memory::progress::Progress;
use crate::ui::panes::format_gb;

const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Four-frame activity indicator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spinner {
    frame: u64,
}

impl Spinner {
    pub fn advance(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }

    pub fn glyph(&self) -> char {
        SPINNER_FRAMES[(self.frame % SPINNER_FRAMES.len() as u64) as usize]
    }
}

/// Result of the most recent request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Succeeded,
    Failed,
}

/// What the fill step is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// No allocation has been requested yet
    Idle,
    NotZeroed,
    Zeroing { bytes: usize, overrun: usize },
}

#[derive(Debug, Clone)]
pub struct StatusBoard {
    pub spinner: Spinner,
    request: Option<(usize, AllocatorKind)>,
    outcome: Outcome,
    fill: FillMode,
    zeroed_bytes: usize,
    overrun: Option<(usize, usize)>,
    finished: bool,
}

impl StatusBoard {
    pub fn new() -> Self {
        StatusBoard {
            spinner: Spinner::default(),
            request: None,
            outcome: Outcome::Pending,
            fill: FillMode::Idle,
            zeroed_bytes: 0,
            overrun: None,
            finished: false,
        }
    }

    /// Fold one engine event into the board
    pub fn apply(&mut self, event: &Progress) {
        match *event {
            Progress::Requesting { bytes, allocator } => {
                self.request = Some((bytes, allocator));
                self.outcome = Outcome::Pending;
                self.fill = FillMode::Idle;
                self.zeroed_bytes = 0;
                self.overrun = None;
                self.finished = false;
            }
            Progress::Allocated { .. } => self.outcome = Outcome::Succeeded,
            Progress::Failed { .. } => self.outcome = Outcome::Failed,
            Progress::NotZeroed => self.fill = FillMode::NotZeroed,
            Progress::ZeroingStarted { bytes, overrun } => {
                self.fill = FillMode::Zeroing { bytes, overrun };
            }
            Progress::Zeroed { bytes } => {
                self.spinner.advance();
                self.zeroed_bytes = self.zeroed_bytes.max(bytes);
            }
            Progress::Overran {
                offset,
                bytes_past_end,
            } => {
                self.overrun = Some((offset, bytes_past_end));
            }
            Progress::Finished { zeroed, .. } => {
                self.zeroed_bytes = self.zeroed_bytes.max(zeroed);
                self.finished = true;
            }
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn fill(&self) -> FillMode {
        self.fill
    }

    pub fn zeroed_bytes(&self) -> usize {
        self.zeroed_bytes
    }

    /// "Allocating 3.00 GB with alloc successful"
    pub fn request_line(&self) -> Option<String> {
        let (bytes, allocator) = self.request?;
        let verdict = match self.outcome {
            Outcome::Pending => "...",
            Outcome::Succeeded => "successful",
            Outcome::Failed => "failed",
        };
        Some(format!(
            "Allocating {} with {} {}",
            format_gb(bytes),
            allocator,
            verdict
        ))
    }

    pub fn fill_line(&self) -> Option<String> {
        match self.fill {
            FillMode::Idle => None,
            FillMode::NotZeroed => Some("Memory not zeroed".to_string()),
            FillMode::Zeroing { bytes, overrun: 0 } => Some(format!("Zeroing {}", format_gb(bytes))),
            FillMode::Zeroing { bytes, overrun } => Some(format!(
                "Overallocating {} with {} byte",
                format_gb(bytes),
                overrun
            )),
        }
    }

    pub fn progress_line(&self) -> Option<String> {
        if !matches!(self.fill, FillMode::Zeroing { .. }) {
            return None;
        }
        if let Some((offset, bytes_past_end)) = self.overrun {
            return Some(format!(
                "{} over allocated with {} byte",
                format_gb(offset),
                bytes_past_end
            ));
        }
        let suffix = if self.finished { " (done)" } else { "" };
        Some(format!("{} zeroed{}", format_gb(self.zeroed_bytes), suffix))
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GIB;

    #[test]
    fn test_spinner_cycles() {
        let mut spinner = Spinner::default();
        let glyphs: String = (0..5)
            .map(|_| {
                let g = spinner.glyph();
                spinner.advance();
                g
            })
            .collect();
        assert_eq!(glyphs, "|/-\\|");
        assert_eq!(spinner.frames(), 5);
    }

    #[test]
    fn test_unzeroed_request_lines() {
        let mut board = StatusBoard::new();
        assert!(board.request_line().is_none());
        board.apply(&Progress::Requesting {
            bytes: 3 * GIB,
            allocator: AllocatorKind::Uninitialized,
        });
        assert_eq!(
            board.request_line().unwrap(),
            "Allocating 3.00 GB with alloc ..."
        );
        board.apply(&Progress::Allocated { bytes: 3 * GIB });
        board.apply(&Progress::NotZeroed);
        assert_eq!(
            board.request_line().unwrap(),
            "Allocating 3.00 GB with alloc successful"
        );
        assert_eq!(board.fill_line().unwrap(), "Memory not zeroed");
        assert!(board.progress_line().is_none());
    }

    #[test]
    fn test_zeroing_progress_and_overrun() {
        let mut board = StatusBoard::new();
        board.apply(&Progress::Requesting {
            bytes: GIB,
            allocator: AllocatorKind::Zeroed,
        });
        board.apply(&Progress::Allocated { bytes: GIB });
        board.apply(&Progress::ZeroingStarted {
            bytes: GIB,
            overrun: 1,
        });
        assert_eq!(
            board.fill_line().unwrap(),
            "Overallocating 1.00 GB with 1 byte"
        );
        board.apply(&Progress::Zeroed { bytes: GIB / 2 });
        assert_eq!(board.progress_line().unwrap(), "0.50 GB zeroed");
        assert_eq!(board.spinner.frames(), 1);

        board.apply(&Progress::Overran {
            offset: GIB,
            bytes_past_end: 1,
        });
        assert_eq!(
            board.progress_line().unwrap(),
            "1.00 GB over allocated with 1 byte"
        );
    }

    #[test]
    fn test_new_request_resets_counters() {
        let mut board = StatusBoard::new();
        board.apply(&Progress::ZeroingStarted {
            bytes: GIB,
            overrun: 0,
        });
        board.apply(&Progress::Zeroed { bytes: GIB });
        board.apply(&Progress::Requesting {
            bytes: 0,
            allocator: AllocatorKind::Uninitialized,
        });
        assert_eq!(board.zeroed_bytes(), 0);
        assert_eq!(board.fill(), FillMode::Idle);
        assert_eq!(board.outcome(), Outcome::Pending);
    }

    #[test]
    fn test_failure_is_shown() {
        let mut board = StatusBoard::new();
        board.apply(&Progress::Requesting {
            bytes: 2 * GIB,
            allocator: AllocatorKind::Uninitialized,
        });
        board.apply(&Progress::Failed { bytes: 2 * GIB });
        assert_eq!(board.outcome(), Outcome::Failed);
        assert!(board.request_line().unwrap().ends_with("failed"));
    }
}
