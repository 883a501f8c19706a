//! Shutdown requests from signals and keys
//!
//! SIGINT and SIGTERM are turned into a flag the control loop checks once per
//! iteration. The handler only performs an atomic store.

use signal_hook::consts::{SIGINT, SIGTERM};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "please stop" flag
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Route SIGINT and SIGTERM to `flag`.
///
/// Every installed flag is raised; earlier registrations stay in place.
pub fn install(flag: &ShutdownFlag) -> io::Result<()> {
    for signum in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signum, Arc::clone(&flag.0))?;
    }
    log::debug!("Installed SIGINT/SIGTERM handlers");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_clones_share_state() {
        let flag = ShutdownFlag::new();
        let handle = flag.clone();
        assert!(!handle.is_raised());
        flag.raise();
        assert!(handle.is_raised());
    }

    #[test]
    fn test_sigterm_raises_every_installed_flag() {
        let first = ShutdownFlag::new();
        let second = ShutdownFlag::new();
        install(&first).unwrap();
        install(&second).unwrap();
        assert!(!second.is_raised());

        signal_hook::low_level::raise(SIGTERM).unwrap();

        assert!(first.is_raised());
        assert!(second.is_raised());
    }
}
