//! Non-blocking keyboard input
//!
//! The control loop asks an [`InputSource`] for at most one key per iteration,
//! waiting no longer than the poll timeout. Keys are reduced to the small
//! [`Key`] vocabulary the state machine understands, whether they come from
//! crossterm events or from raw terminal bytes.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

const ESC: u8 = 0x1b;

/// A decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Up arrow: one more unit
    Up,
    /// Down arrow: one unit less
    Down,
    /// Right arrow: 1024 more units
    Right,
    /// Left arrow: 1024 units less
    Left,
    /// `z`
    ZeroingOn,
    /// `a`
    ZeroingOff,
    /// `x`
    OverallocateOn,
    /// `c`
    ZeroedAllocate,
    /// `q`
    Quit,
    /// Ctrl+C, which raw mode delivers as a key instead of a signal
    Interrupt,
    Other,
}

impl Key {
    /// Decode up to three raw bytes: a single ASCII key or `ESC [ <letter>`.
    pub fn from_bytes(bytes: &[u8]) -> Key {
        match bytes {
            [ESC, b'[', code, ..] => match code {
                b'A' => Key::Up,
                b'B' => Key::Down,
                b'C' => Key::Right,
                b'D' => Key::Left,
                _ => Key::Other,
            },
            [byte, ..] => Key::from_char(*byte as char),
            [] => Key::Other,
        }
    }

    pub fn from_char(c: char) -> Key {
        match c {
            'z' => Key::ZeroingOn,
            'a' => Key::ZeroingOff,
            'x' => Key::OverallocateOn,
            'c' => Key::ZeroedAllocate,
            'q' => Key::Quit,
            '\x03' => Key::Interrupt,
            _ => Key::Other,
        }
    }

    pub fn from_event(key: KeyEvent) -> Key {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Key::Interrupt,
            (_, KeyCode::Up) => Key::Up,
            (_, KeyCode::Down) => Key::Down,
            (_, KeyCode::Right) => Key::Right,
            (_, KeyCode::Left) => Key::Left,
            (_, KeyCode::Char(c)) => Key::from_char(c),
            _ => Key::Other,
        }
    }
}

/// Anything that can be polled for a key press with a timeout
pub trait InputSource {
    /// Wait up to `timeout` for a key. `Ok(None)` means the timeout elapsed.
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<Key>>;
}

/// Reads keys from the real terminal through crossterm.
///
/// Expects raw mode to be enabled (see [`TerminalGuard`](crate::terminal::TerminalGuard)).
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<Key>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                log::debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);
                Ok(Some(Key::from_event(key)))
            }
            _ => Ok(None),
        }
    }
}
