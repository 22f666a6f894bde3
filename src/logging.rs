#![cfg(feature = "std")]
//! Logger for the binaries.
//!
//! Records go to stderr so they never interleave with the boards and prompts
//! the terminal player prints on stdout. This crate's records are shown from
//! the level in `MANEUVER_LOG` (default `info`); other crates only get their
//! warnings through.

use std::env;
use std::io::{self, Write};

use log::{Level, LevelFilter, Metadata, Record};

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

struct StderrLogger;

impl StderrLogger {
    fn is_ours(target: &str) -> bool {
        match target.strip_prefix(CRATE_TARGET) {
            Some(rest) => rest.is_empty() || rest.starts_with("::"),
            None => false,
        }
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if !Self::is_ours(metadata.target()) && metadata.level() > Level::Warn {
            return false;
        }
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut err = io::stderr().lock();
        // nowhere left to report a failed write
        writeln!(err, "{:<5} [{}] {}", record.level(), record.target(), record.args()).ok();
    }

    fn flush(&self) {
        io::stderr().flush().ok();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// Install the stderr logger. Calling it again is harmless.
pub fn init_logging() {
    let level = env::var("MANEUVER_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
