//! Logger initialization.
//!
//! One line per record on stderr, either coloured text or a JSON object.

use std::io::{self, Write};

use colored::Colorize;
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependencies whose logs are capped below the requested level.
///
/// rustls reports every handshake step at debug; the HTML parser complains
/// about markup errors that are normal on real pages.
const QUIET_DEPENDENCIES: &[(&str, LevelFilter)] = &[
    ("rustls", LevelFilter::Warn),
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
];

/// Installs the global logger.
///
/// Records go to stderr, leaving stdout to the rendered page or the result
/// list. `RUST_LOG` directives are applied first and `level` then overrides
/// the global and `go2web` levels.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Show every redirect hop and cache decision
/// go2web --log-level info -u example.com
///
/// # Machine-readable logs while keeping the page on stdout
/// go2web --log-format json --log-level debug -s "rust tls" 2> go2web.log
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr).filter_level(level);
    for (module, cap) in QUIET_DEPENDENCIES {
        builder.filter_module(module, (*cap).min(level));
    }
    builder.filter_module("go2web", level);

    match format {
        LogFormat::Json => builder.format(write_json),
        LogFormat::Plain => builder.format(write_plain),
    };

    builder.try_init()?;
    Ok(())
}

fn write_json(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    let msg = serde_json::to_string(&record.args().to_string()).unwrap_or_else(|_| "\"\"".into());
    writeln!(
        buf,
        "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{msg}}}",
        chrono::Utc::now().timestamp_millis(),
        record.level(),
        record.target(),
    )
}

fn write_plain(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    let level = record.level().to_string();
    let level = match record.level() {
        Level::Error => level.red().bold(),
        Level::Warn => level.yellow(),
        Level::Info => level.green(),
        Level::Debug => level.blue(),
        Level::Trace => level.dimmed(),
    };
    writeln!(buf, "{level:>5} {}: {}", record.target().cyan(), record.args())
}
