use std::fmt;
use std::str::FromStr;

/// Console log level, set once per job from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
    Off,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(level: &str) -> Result<Self, Self::Err> {
        match level.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            "off" => Ok(LogLevel::Off),
            other => Err(format!("nível de log inválido: {}", other)),
        }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
            LogLevel::Off => "off",
        };
        f.write_str(name)
    }
}

/// Install the console logger.
///
/// SQL noise from the driver stays at `warn` unless the job itself runs at
/// `trace`. Calling this twice is harmless (tests do).
pub fn init_logger(level: LogLevel) {
    let filter: log::LevelFilter = level.into();
    let driver_filter = if level == LogLevel::Trace {
        log::LevelFilter::Trace
    } else {
        filter.min(log::LevelFilter::Warn)
    };

    let _ = env_logger::Builder::new()
        .filter_level(filter)
        .filter_module("sqlx", driver_filter)
        .filter_module("sea_orm", driver_filter)
        .format_timestamp_secs()
        .format_target(false)
        .try_init();
}

/// True when `max_level` would swallow an error line.
fn failure_needs_stderr(max_level: log::LevelFilter) -> bool {
    max_level < log::LevelFilter::Error
}

/// Report a failed job. The line reaches the console even with logging off.
pub fn report_failure(context: &str, error: &dyn fmt::Display) {
    if failure_needs_stderr(log::max_level()) {
        eprintln!("{}: {}", context, error);
    } else {
        log::error!("{}: {}", context, error);
    }
}
