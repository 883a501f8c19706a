//! Desired allocation state and its key-driven transitions

use crate::constants::{LARGE_STEP_UNITS, MAX_SIZE_UNITS};
use crate::input::Key;
use crate::memory::allocator::AllocatorKind;

/// What the user currently asks the engine to materialize
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationState {
    /// Requested size in units (see [`SizeUnit`](crate::memory::SizeUnit))
    pub size_units: usize,
    pub zero_on_allocate: bool,
    pub overallocate: bool,
    /// Set for the one allocation triggered by `c`, cleared by any other key
    pub use_zero_initializing_allocator: bool,
}

/// Outcome of applying a key to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing to do
    Unchanged,
    /// Re-materialize the allocation
    Reallocate,
    /// Leave the control loop
    Quit,
}

impl AllocationState {
    /// Allocator selected for the next allocation
    pub fn allocator_kind(&self) -> AllocatorKind {
        if self.use_zero_initializing_allocator {
            AllocatorKind::Zeroed
        } else {
            AllocatorKind::Uninitialized
        }
    }

    /// Apply one key press.
    ///
    /// Arrow keys always reallocate, even when the size is already clamped.
    /// `x` is ignored while nothing is allocated.
    pub fn apply(&mut self, key: Key) -> Transition {
        match key {
            Key::Quit | Key::Interrupt => return Transition::Quit,
            Key::Other => return Transition::Unchanged,
            Key::OverallocateOn if self.size_units == 0 => return Transition::Unchanged,
            Key::Up => {
                if self.size_units < MAX_SIZE_UNITS {
                    self.size_units += 1;
                }
            }
            Key::Down => self.size_units = self.size_units.saturating_sub(1),
            Key::Right => {
                self.size_units = (self.size_units + LARGE_STEP_UNITS).min(MAX_SIZE_UNITS);
            }
            Key::Left => {
                if self.size_units >= LARGE_STEP_UNITS {
                    self.size_units -= LARGE_STEP_UNITS;
                }
            }
            Key::ZeroingOn => self.zero_on_allocate = true,
            Key::ZeroingOff => self.zero_on_allocate = false,
            Key::OverallocateOn => self.overallocate = true,
            Key::ZeroedAllocate => {}
        }
        self.use_zero_initializing_allocator = key == Key::ZeroedAllocate;
        Transition::Reallocate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(size_units: usize) -> AllocationState {
        AllocationState {
            size_units,
            ..AllocationState::default()
        }
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = AllocationState::default();
        assert_eq!(state.size_units, 0);
        assert!(!state.zero_on_allocate);
        assert!(!state.overallocate);
        assert_eq!(state.allocator_kind(), AllocatorKind::Uninitialized);
    }

    #[test]
    fn test_up_three_times() {
        let mut state = AllocationState::default();
        for _ in 0..3 {
            assert_eq!(state.apply(Key::Up), Transition::Reallocate);
        }
        assert_eq!(state.size_units, 3);
        assert_eq!(state.allocator_kind(), AllocatorKind::Uninitialized);
    }

    #[test]
    fn test_size_never_leaves_bounds() {
        let mut state = state_with(MAX_SIZE_UNITS - 1);
        state.apply(Key::Right);
        assert_eq!(state.size_units, MAX_SIZE_UNITS);
        state.apply(Key::Up);
        assert_eq!(state.size_units, MAX_SIZE_UNITS);
        state.apply(Key::Right);
        assert_eq!(state.size_units, MAX_SIZE_UNITS);

        let mut state = state_with(0);
        assert_eq!(state.apply(Key::Down), Transition::Reallocate);
        assert_eq!(state.size_units, 0);
    }

    #[test]
    fn test_left_is_noop_below_large_step() {
        let mut state = state_with(LARGE_STEP_UNITS - 1);
        assert_eq!(state.apply(Key::Left), Transition::Reallocate);
        assert_eq!(state.size_units, LARGE_STEP_UNITS - 1);

        let mut state = state_with(LARGE_STEP_UNITS + 5);
        state.apply(Key::Left);
        assert_eq!(state.size_units, 5);
    }

    #[test]
    fn test_overallocate_requires_a_buffer() {
        let mut state = state_with(0);
        assert_eq!(state.apply(Key::OverallocateOn), Transition::Unchanged);
        assert!(!state.overallocate);

        let mut state = state_with(1);
        assert_eq!(state.apply(Key::OverallocateOn), Transition::Reallocate);
        assert!(state.overallocate);
    }

    #[test]
    fn test_zeroed_allocator_is_one_shot() {
        let mut state = state_with(2);
        state.apply(Key::ZeroedAllocate);
        assert_eq!(state.allocator_kind(), AllocatorKind::Zeroed);
        state.apply(Key::ZeroingOn);
        assert_eq!(state.allocator_kind(), AllocatorKind::Uninitialized);
        assert!(state.zero_on_allocate);
        state.apply(Key::ZeroingOff);
        assert!(!state.zero_on_allocate);
    }

    #[test]
    fn test_quit_and_unknown_keys_leave_state_alone() {
        let mut state = state_with(4);
        state.use_zero_initializing_allocator = true;
        let before = state;
        assert_eq!(state.apply(Key::Quit), Transition::Quit);
        assert_eq!(state.apply(Key::Interrupt), Transition::Quit);
        assert_eq!(state.apply(Key::Other), Transition::Unchanged);
        assert_eq!(state, before);
    }
}
