//! The log sink.
//!
//! `start_log` installs the process-wide `env_logger` backend once (stderr, or a
//! file opened in append mode) and writes a timestamped start banner;
//! `close_log` writes the closing banner and flushes. Everything in between goes
//! through the ordinary `log` macros.

use std::fs::{File, OpenOptions};
use std::sync::Once;

use chrono::Local;
use log::LevelFilter;

use crate::config::MonitoringConfig;
use crate::error::StrataError;

static INIT_LOGGER: Once = Once::new();

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Installs the logger on first call and writes the start banner.
///
/// Later calls only write another banner; the backend and its target are
/// fixed by the first call, and their `log_file` is never opened.
pub fn start_log(config: &MonitoringConfig) -> Result<(), StrataError> {
    if !INIT_LOGGER.is_completed() {
        let file = match &config.log_file {
            Some(path) => Some(open_log_file(path)?),
            None => None,
        };
        let level = if config.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        INIT_LOGGER.call_once(move || install(level, file));
    }

    log::info!("==== LOG STARTED {} ====", Local::now().format(TIMESTAMP_FORMAT));
    Ok(())
}

fn open_log_file(path: &str) -> Result<File, StrataError> {
    Ok(OpenOptions::new().append(true).create(true).open(path)?)
}

fn install(level: LevelFilter, file: Option<File>) {
    let mut builder = env_logger::Builder::new();
    builder.is_test(false);
    builder.filter_level(level);

    // Custom formatter: just print the level and message
    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(buf, "[{}] {}", record.level(), record.args())?;
        buf.flush()?;
        Ok(())
    });

    if let Some(file) = file {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    let _ = builder.try_init();
}

/// Writes the closing banner and flushes the backend.
pub fn close_log() {
    log::info!("==== LOG FINISHED {} ====", Local::now().format(TIMESTAMP_FORMAT));
    log::logger().flush();
}
