//! Minimal `log` backend writing to stderr.

use log::{LevelFilter, Log, Metadata, Record};
use std::env;

/// Environment variable holding the log level (`error`..`trace`, `off`).
pub const LOG_ENV: &str = "BATTLESHEEP_LOG";

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // stdout carries the JSON-lines protocol
            eprintln!("{:<5} {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Level named by `BATTLESHEEP_LOG`, if set and valid.
pub fn level_from_env() -> Option<LevelFilter> {
    env::var(LOG_ENV).ok().and_then(|lvl| lvl.parse().ok())
}

/// Install the logger at `level`. Later calls only adjust the level.
pub fn init_logging_at(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Install the logger at the level from `BATTLESHEEP_LOG`, defaulting to `info`.
pub fn init_logging() {
    init_logging_at(level_from_env().unwrap_or(LevelFilter::Info));
}
