//! Error types for the allocation visualizer
//!
//! [`AppError`] covers everything that can end the control loop. Both variants
//! are fatal: the loop stops, the terminal is restored, and the process exits
//! with a failure status.

use std::fmt;
use std::io;

/// Fatal errors raised by the allocation engine or the control loop
#[derive(Debug)]
pub enum AppError {
    /// The allocator could not satisfy a request (or the size overflowed)
    OutOfMemory { requested: Option<usize> },

    /// Waiting for input or drawing the screen failed
    Io(io::Error),
}

impl AppError {
    /// Out-of-memory for a request that fits in `usize`
    pub fn out_of_memory(requested: usize) -> Self {
        AppError::OutOfMemory {
            requested: Some(requested),
        }
    }

    /// Out-of-memory for a request too large to even express
    pub fn size_overflow() -> Self {
        AppError::OutOfMemory { requested: None }
    }

    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, AppError::OutOfMemory { .. })
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::OutOfMemory {
                requested: Some(bytes),
            } => {
                write!(f, "Out of memory: failed to allocate {} bytes", bytes)
            }
            AppError::OutOfMemory { requested: None } => {
                write!(f, "Out of memory: requested size overflows the address space")
            }
            AppError::Io(err) => write!(f, "Terminal I/O error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(err) => Some(err),
            AppError::OutOfMemory { .. } => None,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_memory_message_names_size() {
        let err = AppError::out_of_memory(3 << 30);
        assert!(err.is_out_of_memory());
        assert_eq!(
            err.to_string(),
            "Out of memory: failed to allocate 3221225472 bytes"
        );
    }

    #[test]
    fn test_io_error_converts_and_keeps_source() {
        let err: AppError = io::Error::new(io::ErrorKind::Interrupted, "select failed").into();
        assert!(!err.is_out_of_memory());
        assert!(err.to_string().contains("select failed"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
