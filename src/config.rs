//! Session and filter configuration.
//!
//! Everything here is fixed policy: the harness takes no flags and consults
//! no environment, so the `Default` impls carry the only values the binary
//! ever uses. The structs exist so tests (and any future reuse) can inject
//! different targets, durations, or keyword sets.

use std::path::PathBuf;
use std::time::Duration;

/// Substrings that mark NetworkDirectoryDialog debug messages.
const DEBUG_KEYWORDS: &[&str] = &[
    "NetworkDirectoryDialog",
    "getSelectedDirectories",
    "updateSelectionCount",
    "onItemChanged",
    "🔍",
    "🔄",
    "📊",
    "🔘",
    "✅ Ausgewählter Pfad",
];

/// Substrings that mark key lifecycle events worth showing.
const KEY_EVENT_KEYWORDS: &[&str] = &[
    "FTP connected",
    "Dialog",
    "Benutzer hat",
    "Verzeichnisse ausgewählt",
];

const TARGET_EXECUTABLE: &str = "./FileDuper";
const WORKING_DIR: &str = "/home/nex/c++";
const SESSION_DURATION_SECS: u64 = 120;
const GRACE_PERIOD_SECS: u64 = 5;
const POLL_INTERVAL_MS: u64 = 100;

/// Where to find the target application and how long to run it.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Path to the target executable, resolved relative to `working_dir`.
    pub target: PathBuf,
    /// Working directory the target is launched from.
    pub working_dir: PathBuf,
    /// Total wall-clock time the session runs before terminating the child.
    pub session_duration: Duration,
    /// How long to wait after a graceful termination request before
    /// escalating to a forced kill.
    pub grace_period: Duration,
    /// Interval at which the session wait loop checks for interruption.
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from(TARGET_EXECUTABLE),
            working_dir: PathBuf::from(WORKING_DIR),
            session_duration: Duration::from_secs(SESSION_DURATION_SECS),
            grace_period: Duration::from_secs(GRACE_PERIOD_SECS),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
        }
    }
}

/// The two keyword sets used to classify output lines.
///
/// Matching is case-sensitive substring containment; the debug set is
/// always checked before the key-event set.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub debug_keywords: Vec<String>,
    pub key_event_keywords: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            debug_keywords: DEBUG_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            key_event_keywords: KEY_EVENT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
