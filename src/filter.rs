//! Line classification against the configured keyword sets.

use crate::config::FilterConfig;

/// Which keyword set a line matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCategory {
    /// NetworkDirectoryDialog debug message.
    Debug,
    /// Key lifecycle event (FTP connect, dialog open, user selection).
    KeyEvent,
}

impl LineCategory {
    /// The marker prepended to matched lines when printed.
    pub fn prefix(&self) -> &'static str {
        match self {
            LineCategory::Debug => "🐛",
            LineCategory::KeyEvent => "📋",
        }
    }
}

/// Classifies output lines by case-sensitive substring containment.
///
/// The debug set is checked before the key-event set, so a line matching
/// both is reported once, as a debug message.
#[derive(Debug, Clone)]
pub struct LineFilter {
    config: FilterConfig,
}

impl LineFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Classifies a single line. Returns `None` for lines that match
    /// neither set (including empty lines after trimming).
    pub fn classify(&self, line: &str) -> Option<LineCategory> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if self.config.debug_keywords.iter().any(|k| line.contains(k.as_str())) {
            Some(LineCategory::Debug)
        } else if self
            .config
            .key_event_keywords
            .iter()
            .any(|k| line.contains(k.as_str()))
        {
            Some(LineCategory::KeyEvent)
        } else {
            None
        }
    }

    /// Formats a matched line for printing: `<prefix> <trimmed line>`.
    pub fn format(&self, line: &str, category: LineCategory) -> String {
        format!("{} {}", category.prefix(), line.trim())
    }
}

impl Default for LineFilter {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}
