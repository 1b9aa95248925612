//! Logger and logging macros
//!
//! Library crates log through the macros exported here, which forward to the `log` facade.
//! Binaries and tests install the `log4rs` backend with [`init_logger`] or [`try_init_logger`].

use consts::{DEFAULT_LOGGER_ENV, ERR_LOG_FILE_NAME, LOG_FILE_NAME};
use log::LevelFilter;
use log4rs::config::{Config, Root};
use thiserror::Error;

mod appender;
mod consts;
mod logger;

#[doc(hidden)]
pub use ::log as __log;

const CONSOLE_APPENDER: &str = "stdout";
const LOG_FILE_APPENDER: &str = "log_file";
const ERR_LOG_FILE_APPENDER: &str = "err_log_file";

#[derive(Clone, Debug, Error)]
pub enum LogError {
    #[error("Logger spec parsing error: {0}")]
    ParseLoggerSpecError(String),

    #[error("Logger appender error: {0}")]
    AppenderError(String),

    #[error("Logger configuration error: {0}")]
    ConfigError(String),

    #[error("Logger initialization error: {0}")]
    InitError(String),
}

/// Builds the `log4rs` configuration: a console appender, plus a rolling log file and a
/// warn-and-above error file when `log_dir` is provided.
fn build_config(log_dir: Option<&str>, filters: &str) -> Result<Config, LogError> {
    let loggers = logger::Builder::new().root_level(LevelFilter::Info).parse_env(DEFAULT_LOGGER_ENV).parse_expression(filters).build();

    let mut stdout_appender = Some(appender::AppenderSpec::console(CONSOLE_APPENDER, None));
    let mut file_appender = log_dir.map(|x| appender::AppenderSpec::roller(LOG_FILE_APPENDER, None, x, LOG_FILE_NAME)).transpose()?;
    let mut err_file_appender = log_dir
        .map(|x| appender::AppenderSpec::roller(ERR_LOG_FILE_APPENDER, Some(LevelFilter::Warn), x, ERR_LOG_FILE_NAME))
        .transpose()?;

    let mut specs = [stdout_appender.as_mut(), file_appender.as_mut(), err_file_appender.as_mut()].into_iter().flatten().collect::<Vec<_>>();
    let names = specs.iter().map(|x| x.name).collect::<Vec<_>>();
    let appenders = specs.iter_mut().filter_map(|x| x.appender()).collect::<Vec<_>>();

    Config::builder()
        .appenders(appenders)
        .loggers(loggers.items())
        .build(Root::builder().appenders(names).build(loggers.root_level()))
        .map_err(|err| LogError::ConfigError(err.to_string()))
}

/// Installs the global logger. `filters` uses the `RUST_LOG` syntax, e.g. `"info,ledger_txdb=trace"`,
/// and is applied after the `RUST_LOG` environment variable itself.
pub fn init_logger(log_dir: Option<&str>, filters: &str) -> Result<(), LogError> {
    let config = build_config(log_dir, filters)?;
    log4rs::init_config(config).map_err(|err| LogError::InitError(err.to_string()))?;
    Ok(())
}

/// Tries to init the global logger, but does not fail if it was already initiated.
/// Intended for tests, where many test functions race to install a logger.
pub fn try_init_logger(filters: &str) {
    if let Ok(config) = build_config(None, filters) {
        let _ = log4rs::init_config(config);
    }
}

#[macro_export]
macro_rules! trace {
    ($($t:tt)*) => {{
        $crate::log::__log::trace!($($t)*);
    }};
}

#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => {{
        $crate::log::__log::debug!($($t)*);
    }};
}

#[macro_export]
macro_rules! info {
    ($($t:tt)*) => {{
        $crate::log::__log::info!($($t)*);
    }};
}

#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => {{
        $crate::log::__log::warn!($($t)*);
    }};
}

#[macro_export]
macro_rules! error {
    ($($t:tt)*) => {{
        $crate::log::__log::error!($($t)*);
    }};
}
