//! Operator-facing console output.
//!
//! All harness output goes through here: the session header, the numbered
//! instructions, and the prefixed copies of matched lines. Human-readable
//! only, never machine-parsed.

use chrono::Local;
use terminal_size::{terminal_size, Width};

use crate::filter::LineCategory;

// ANSI color codes
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GRAY: &str = "\x1b[90m";

const DEFAULT_TERMINAL_WIDTH: usize = 80;
const MIN_RULE_WIDTH: usize = 20;
const MAX_RULE_WIDTH: usize = 70;

fn rule_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
        .clamp(MIN_RULE_WIDTH, MAX_RULE_WIDTH)
}

fn print_rule(ch: char) {
    println!("{GRAY}{}{RESET}", ch.to_string().repeat(rule_width()));
}

pub fn print_header() {
    print_rule('=');
    println!("{BOLD}🔧 FileDuper NetworkDirectoryDialog Debug Test{RESET}");
    println!("🎯 Testing: Checkbox und 'Ausgewählte hinzufügen' Funktionalität");
    println!(
        "{DIM}Started at {}{RESET}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    print_rule('=');
    println!();
}

pub fn print_starting() {
    println!("🚀 Starting FileDuper...");
}

pub fn print_started() {
    println!("✅ FileDuper started!");
    println!("💡 Instructions:");
    println!("   1. Wait for FTP auto-discovery");
    println!("   2. Double-click on FTP service to open NetworkDirectoryDialog");
    println!("   3. Try selecting checkboxes");
    println!("   4. Click 'Ausgewählte hinzufügen'");
    println!("   5. Check debug output below");
    println!();
}

pub fn print_monitoring() {
    println!("🔍 Monitoring FileDuper output...");
    println!("💡 Wait for FTP auto-connect, then NetworkDirectoryDialog should open");
    print_rule('-');
}

/// Prints a matched output line with its category marker.
pub fn print_matched_line(line: &str, category: LineCategory) {
    println!("{} {}", category.prefix(), line);
}

pub fn print_monitor_error(err: &dyn std::fmt::Display) {
    println!("Error monitoring: {}", err);
}

pub fn print_terminating() {
    println!();
    println!("🛑 Test completed - terminating FileDuper...");
}

pub fn print_force_killed() {
    println!("⚠️ FileDuper did not exit in time - killed");
}

pub fn print_finished() {
    println!("✅ Test finished!");
}

pub fn print_interrupted() {
    println!();
    println!("⏹️ Test interrupted by user");
}

pub fn print_error(err: &dyn std::fmt::Display) {
    eprintln!("❌ Error: {}", err);
}
