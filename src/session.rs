//! The primary session flow: start the target, watch its output for the
//! session duration, then tear it down.

use std::io::BufReader;
use std::thread;
use std::time::Instant;

use crate::config::{FilterConfig, SessionConfig};
use crate::error::Result;
use crate::filter::LineFilter;
use crate::monitor::spawn_monitor;
use crate::output;
use crate::signal::SignalHandler;
use crate::supervisor::{Supervisor, TerminationOutcome};

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The full session duration elapsed and the child was torn down.
    Completed,
    /// The operator interrupted the session early.
    Interrupted,
}

/// Runs one complete debug session.
///
/// Spawns the target, hands its combined output stream to the monitor
/// thread, then waits out the session duration while polling for Ctrl-C.
/// On elapse the child gets a graceful termination request, a bounded
/// grace period, and a forced kill if it is still running. On interrupt
/// the graceful request is sent immediately and the session ends without
/// waiting out the grace period.
///
/// The monitor thread is never joined; it ends on its own once the
/// child's death closes the stream.
pub fn run_session(
    config: &SessionConfig,
    filter_config: FilterConfig,
    signals: &SignalHandler,
) -> Result<SessionOutcome> {
    output::print_starting();
    let supervisor = Supervisor::new();
    let reader = supervisor.spawn(config)?;
    output::print_started();

    let _monitor = spawn_monitor(BufReader::new(reader), LineFilter::new(filter_config));

    let deadline = Instant::now() + config.session_duration;
    loop {
        if signals.is_interrupted() {
            output::print_interrupted();
            // Best-effort: request termination and leave, no grace wait.
            let _ = supervisor.terminate();
            return Ok(SessionOutcome::Interrupted);
        }

        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep(config.poll_interval.min(deadline - now));
    }

    output::print_terminating();
    supervisor.terminate()?;
    let outcome = supervisor.wait_with_grace(config.grace_period, config.poll_interval)?;
    if outcome == TerminationOutcome::ForceKilled {
        output::print_force_killed();
    }
    output::print_finished();

    Ok(SessionOutcome::Completed)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn script_config(dir: &TempDir, body: &str) -> SessionConfig {
        let path = dir.path().join("target.sh");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();

        SessionConfig {
            target: path,
            working_dir: dir.path().to_path_buf(),
            session_duration: Duration::from_millis(200),
            grace_period: Duration::from_secs(2),
            poll_interval: Duration::from_millis(20),
        }
    }

    fn idle_handler() -> SignalHandler {
        SignalHandler::from_flag(Arc::new(AtomicBool::new(false)))
    }

    #[test]
    fn test_session_completes_after_duration_elapses() {
        let dir = TempDir::new().unwrap();
        let config = script_config(
            &dir,
            "trap 'exit 0' TERM\necho '🔍 NetworkDirectoryDialog: init'\nwhile true; do sleep 0.05; done",
        );

        let started = Instant::now();
        let outcome = run_session(&config, FilterConfig::default(), &idle_handler()).unwrap();

        assert_eq!(outcome, SessionOutcome::Completed);
        // Duration plus graceful teardown, well under the grace period cap.
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_session_with_short_lived_child_still_runs_full_duration() {
        let dir = TempDir::new().unwrap();
        let config = script_config(&dir, "echo done");

        let started = Instant::now();
        let outcome = run_session(&config, FilterConfig::default(), &idle_handler()).unwrap();

        assert_eq!(outcome, SessionOutcome::Completed);
        assert!(started.elapsed() >= Duration::from_millis(200));
    }

    #[test]
    fn test_interrupt_ends_session_before_duration() {
        let dir = TempDir::new().unwrap();
        let mut config = script_config(&dir, "trap 'exit 0' TERM\nwhile true; do sleep 0.05; done");
        config.session_duration = Duration::from_secs(30);

        let flag = Arc::new(AtomicBool::new(false));
        let handler = SignalHandler::from_flag(flag.clone());
        let trigger = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            flag.store(true, Ordering::SeqCst);
        });

        let started = Instant::now();
        let outcome = run_session(&config, FilterConfig::default(), &handler).unwrap();
        trigger.join().unwrap();

        assert_eq!(outcome, SessionOutcome::Interrupted);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_launch_failure_is_reported_as_error() {
        let dir = TempDir::new().unwrap();
        let config = SessionConfig {
            target: dir.path().join("missing-binary"),
            working_dir: dir.path().to_path_buf(),
            ..SessionConfig::default()
        };

        let result = run_session(&config, FilterConfig::default(), &idle_handler());
        assert!(result.is_err());
    }
}
