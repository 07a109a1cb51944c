//! Minimal stderr logger behind the `log` facade.
//!
//! The level comes from the `BATTLESHIP_LOG` environment variable; stdout is
//! left to the game itself.

use log::{LevelFilter, Metadata, Record};
use std::env;

/// Environment variable holding the log level (`error` .. `trace`, or `off`).
pub const LOG_ENV: &str = "BATTLESHIP_LOG";

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {} - {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Level named by `value`, ignoring case; `info` if absent or unrecognised.
pub fn log_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Initialize logging with a level taken from `BATTLESHIP_LOG`.
pub fn init_logging() {
    let value = env::var(LOG_ENV).ok();
    init_logging_with(log_level(value.as_deref()));
}

/// Install the stderr logger at `level`. Later calls only adjust the level.
pub fn init_logging_with(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
