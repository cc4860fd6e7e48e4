//! dialogwatch entry point.
//!
//! Takes no arguments: every run performs the same fixed sequence (start
//! FileDuper, monitor its output for two minutes, terminate it). All
//! failures are reported to the console; the exit code is always 0.

use clap::Parser;
use dialogwatch::output::{print_error, print_header};
use dialogwatch::{run_session, FilterConfig, SessionConfig, SignalHandler};

#[derive(Parser)]
#[command(name = "dialogwatch")]
#[command(
    version,
    about = "Debug harness for FileDuper's NetworkDirectoryDialog selection flow",
    long_about = "Starts FileDuper, watches its combined output for \
NetworkDirectoryDialog debug messages and key lifecycle events for two \
minutes, then terminates it (gracefully, with a forced kill after five \
seconds). Ctrl-C ends the session early."
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();

    print_header();

    let signals = match SignalHandler::new() {
        Ok(signals) => signals,
        Err(e) => {
            print_error(&e);
            return;
        }
    };

    let config = SessionConfig::default();
    if let Err(e) = run_session(&config, FilterConfig::default(), &signals) {
        print_error(&e);
    }
}
