//! Ctrl-C handling for the session wait loop.
//!
//! Registers a SIGINT handler that sets an atomic flag. The session loop
//! polls the flag between sleeps instead of blocking on the signal, so an
//! interruption is picked up within one poll interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{HarnessError, Result};

/// Non-blocking SIGINT flag shared with the session wait loop.
///
/// Cloning shares the underlying flag; all clones observe the same state.
#[derive(Clone)]
pub struct SignalHandler {
    interrupted: Arc<AtomicBool>,
}

impl SignalHandler {
    /// Registers the SIGINT handler. Can only succeed once per process.
    pub fn new() -> Result<Self> {
        let interrupted = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&interrupted);

        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })
        .map_err(|e| HarnessError::SignalHandler(e.to_string()))?;

        Ok(Self { interrupted })
    }

    /// Returns true once SIGINT has been received.
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Builds a handler around an existing flag without registering a
    /// process-wide signal handler. Used by tests to simulate interruption.
    pub fn from_flag(interrupted: Arc<AtomicBool>) -> Self {
        Self { interrupted }
    }
}
