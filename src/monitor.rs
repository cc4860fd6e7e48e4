//! Background reader for the child's combined output stream.
//!
//! Exactly one monitor exists per session. It ends on its own when the
//! stream closes (the child exited) or a read error occurs; the session
//! flow never joins it before initiating termination.

use std::io::BufRead;
use std::thread::{self, JoinHandle};

use crate::filter::{LineCategory, LineFilter};
use crate::output;

/// Reads lines until end of stream or a read error, passing each match to
/// `sink` with its category.
///
/// A read error is reported and ends the loop; it never propagates. The
/// loop is separated from the thread spawn so tests can drive it with an
/// in-memory reader.
pub fn monitor_lines<R, F>(reader: R, filter: &LineFilter, mut sink: F)
where
    R: BufRead,
    F: FnMut(&str, LineCategory),
{
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                output::print_monitor_error(&e);
                break;
            }
        };

        let trimmed = line.trim();
        if let Some(category) = filter.classify(trimmed) {
            sink(trimmed, category);
        }
    }
}

/// Spawns the monitor thread, printing matched lines to the console.
pub fn spawn_monitor<R>(reader: R, filter: LineFilter) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        output::print_monitoring();
        monitor_lines(reader, &filter, |line, category| {
            output::print_matched_line(line, category);
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Cursor, Read};

    fn collect_matches(input: &str) -> Vec<String> {
        let filter = LineFilter::default();
        let mut emitted = Vec::new();
        monitor_lines(Cursor::new(input.to_string()), &filter, |line, category| {
            emitted.push(filter.format(line, category));
        });
        emitted
    }

    #[test]
    fn test_matching_lines_are_emitted_with_prefixes() {
        let input = "Loading icons...\n\
                     🔍 NetworkDirectoryDialog: onItemChanged called\n\
                     FTP connected to 192.168.1.5\n\
                     scan finished\n";

        let emitted = collect_matches(input);

        assert_eq!(
            emitted,
            vec![
                "🐛 🔍 NetworkDirectoryDialog: onItemChanged called",
                "📋 FTP connected to 192.168.1.5",
            ]
        );
    }

    #[test]
    fn test_non_matching_input_emits_nothing() {
        let emitted = collect_matches("Loading icons...\nstartup done\n");
        assert!(emitted.is_empty());
    }

    #[test]
    fn test_line_matching_both_sets_emitted_once_as_debug() {
        let emitted = collect_matches("NetworkDirectoryDialog opened after FTP connected\n");

        assert_eq!(
            emitted,
            vec!["🐛 NetworkDirectoryDialog opened after FTP connected"]
        );
    }

    #[test]
    fn test_stream_close_ends_loop_cleanly() {
        // No trailing newline on the final line; EOF still ends the loop.
        let emitted = collect_matches("updateSelectionCount: 2");
        assert_eq!(emitted, vec!["🐛 updateSelectionCount: 2"]);
    }

    /// Yields its data, then fails every subsequent read.
    struct BrokenPipe {
        data: Vec<u8>,
        pos: usize,
    }

    impl Read for BrokenPipe {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos < self.data.len() {
                let n = (self.data.len() - self.pos).min(buf.len());
                buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
                self.pos += n;
                Ok(n)
            } else {
                Err(io::Error::other("broken pipe"))
            }
        }
    }

    #[test]
    fn test_read_error_stops_monitoring_without_panicking() {
        let reader = BufReader::new(BrokenPipe {
            data: b"onItemChanged fired\n".to_vec(),
            pos: 0,
        });
        let filter = LineFilter::default();
        let mut emitted = Vec::new();

        monitor_lines(reader, &filter, |line, category| {
            emitted.push(filter.format(line, category));
        });

        // The line before the failure is still delivered; nothing after.
        assert_eq!(emitted, vec!["🐛 onItemChanged fired"]);
    }

    #[test]
    fn test_spawned_monitor_finishes_when_stream_closes() {
        let handle = spawn_monitor(
            BufReader::new(Cursor::new(b"Dialog closed\n".to_vec())),
            LineFilter::default(),
        );
        handle.join().unwrap();
    }
}
