//! Logger setup for the gateway binary.

use std::io::Write;

use colored::*;
use log::{Level, LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Caps for chatty dependencies. sqlx logs every statement at info.
const DEPENDENCY_LEVELS: &[(&str, LevelFilter)] = &[
    ("sqlx", LevelFilter::Warn),
    ("moka", LevelFilter::Warn),
    ("hyper", LevelFilter::Info),
    ("reqwest", LevelFilter::Info),
];

/// Installs `env_logger` as the global logger.
///
/// `RUST_LOG` is read first and `level` then overrides it for the whole
/// process and for `geo_gateway` itself. Provider failures during failover and
/// degraded cache tiers show up at `warn`, cache hits at `debug`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, cap) in DEPENDENCY_LEVELS {
        builder.filter_module(module, *cap);
    }
    builder.filter_module("geo_gateway", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| writeln!(buf, "{}", json_line(record)));
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{} {:<5} {} {}",
                    chrono::Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
                    colored_level(record.level()),
                    record.target().cyan(),
                    record.args()
                )
            });
        }
    }

    builder.try_init()?;
    Ok(())
}

/// One JSON object per record: `ts` (epoch millis), `level`, `target`, `msg`.
fn json_line(record: &Record<'_>) -> String {
    serde_json::json!({
        "ts": chrono::Utc::now().timestamp_millis(),
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    })
    .to_string()
}

fn colored_level(level: Level) -> ColoredString {
    let label = level.as_str();
    match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    }
}
