//! Terminal output helpers
//!
//! Colored status reporting shared by every menu handler, plus the global
//! debug state toggled from the command line.

use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

// Separator character for menu headings
pub const SEPARATOR_LIGHT: &str = "─";

// Global debug state
static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_debug_mode(enabled: bool) {
    DEBUG_MODE.store(enabled, Ordering::Relaxed);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_MODE.load(Ordering::Relaxed)
}

/// Print a bold heading with a separator line underneath.
pub fn heading(text: &str) {
    println!();
    println!("{}", text.bold());
    println!("{}", SEPARATOR_LIGHT.repeat(text.chars().count()));
}

pub fn success(msg: &str) {
    println!("{}", msg.green());
}

pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

pub fn info(msg: &str) {
    println!("{msg}");
}

pub fn hint(msg: &str) {
    println!("{}", msg.dimmed());
}

pub fn debug(msg: &str) {
    if is_debug_enabled() {
        eprintln!("{}", format!("debug: {msg}").dimmed());
    }
}

/// Short delay after rejecting input so the notice is visible before the
/// menu redraws.
pub fn pause_briefly() {
    thread::sleep(Duration::from_millis(900));
}
