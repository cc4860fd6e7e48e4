//! Child process lifecycle: spawn with a merged output pipe, graceful
//! termination with bounded wait, forced kill as the fallback.

use std::io::{self, PipeReader};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::SessionConfig;
use crate::error::{HarnessError, Result};

/// How a supervised child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationOutcome {
    /// Exited within the grace period after the graceful request.
    Exited,
    /// Did not exit in time and was force-killed.
    ForceKilled,
    /// No child was running when termination was attempted.
    NotRunning,
}

/// Owns the spawned target process.
///
/// The child handle lives behind `Arc<Mutex<..>>` so termination can be
/// requested from the main flow while the monitor thread is still reading
/// the output pipe. Exactly one reader of the pipe exists by construction;
/// the supervisor itself never touches the stream.
#[derive(Clone)]
pub struct Supervisor {
    child: Arc<Mutex<Option<Child>>>,
}

impl Supervisor {
    pub fn new() -> Self {
        Self {
            child: Arc::new(Mutex::new(None)),
        }
    }

    /// Spawns the target executable with stdout and stderr merged into a
    /// single pipe, returning the read end.
    ///
    /// Launch failure (missing executable, permission denied) is fatal to
    /// the harness and reported as `HarnessError::Launch`.
    pub fn spawn(&self, config: &SessionConfig) -> Result<PipeReader> {
        let (reader, writer) = io::pipe()?;
        let stderr_writer = writer.try_clone()?;

        let child = Command::new(&config.target)
            .current_dir(&config.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(writer))
            .stderr(Stdio::from(stderr_writer))
            .spawn()
            .map_err(|source| HarnessError::Launch {
                path: config.target.clone(),
                source,
            })?;

        let mut guard = self.lock()?;
        *guard = Some(child);
        Ok(reader)
    }

    /// Returns true if a child handle is currently held.
    pub fn is_running(&self) -> bool {
        self.child
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Requests graceful termination (SIGTERM on unix).
    ///
    /// Returns `Ok(false)` if no child is running. A child that already
    /// exited between the check and the signal is not an error.
    #[cfg(unix)]
    pub fn terminate(&self) -> Result<bool> {
        let guard = self.lock()?;
        let Some(child) = guard.as_ref() else {
            return Ok(false);
        };

        let rc = unsafe { libc::kill(child.id() as libc::pid_t, libc::SIGTERM) };
        if rc == 0 {
            return Ok(true);
        }
        let err = io::Error::last_os_error();
        // ESRCH: the child exited before the signal landed.
        if err.raw_os_error() == Some(libc::ESRCH) {
            return Ok(true);
        }
        Err(HarnessError::Terminate(err.to_string()))
    }

    /// No cooperative signal is available off unix; escalate straight to
    /// a hard kill.
    #[cfg(not(unix))]
    pub fn terminate(&self) -> Result<bool> {
        self.kill()
    }

    /// Waits up to `grace` for the child to exit, polling at `poll`
    /// intervals, then escalates to a forced kill.
    ///
    /// The child is reaped in every branch that finds one running.
    pub fn wait_with_grace(&self, grace: Duration, poll: Duration) -> Result<TerminationOutcome> {
        let deadline = Instant::now() + grace;

        loop {
            {
                let mut guard = self.lock()?;
                let Some(child) = guard.as_mut() else {
                    return Ok(TerminationOutcome::NotRunning);
                };
                if child.try_wait()?.is_some() {
                    guard.take();
                    return Ok(TerminationOutcome::Exited);
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return if self.kill()? {
                    Ok(TerminationOutcome::ForceKilled)
                } else {
                    Ok(TerminationOutcome::NotRunning)
                };
            }
            thread::sleep(poll.min(deadline - now));
        }
    }

    /// Force-kills and reaps the child. Safe to call when nothing is
    /// running or the child already exited.
    ///
    /// Returns `Ok(true)` if a child handle was present.
    pub fn kill(&self) -> Result<bool> {
        let mut guard = self.lock()?;
        if let Some(mut child) = guard.take() {
            if let Err(e) = child.kill() {
                // Already-exited children report InvalidInput.
                if e.kind() != io::ErrorKind::InvalidInput {
                    return Err(HarnessError::Terminate(e.to_string()));
                }
            }
            let _ = child.wait();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Child>>> {
        self.child
            .lock()
            .map_err(|e| HarnessError::Terminate(format!("child handle lock poisoned: {}", e)))
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}
