use super::LogError;
use log::LevelFilter;
use log4rs::config::Logger;
use std::{collections::HashMap, env, mem};

/// A module-level logger. It has no appenders of its own and writes through the root appenders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct LoggerSpec {
    pub name: String,
    pub level: LevelFilter,
}

impl LoggerSpec {
    pub fn new(name: String, level: LevelFilter) -> Self {
        Self { name, level }
    }

    pub fn logger(&self) -> Logger {
        Logger::builder().build(self.name.clone(), self.level)
    }
}

pub(super) struct Loggers {
    loggers: Vec<LoggerSpec>,
    root_level: LevelFilter,
}

impl Loggers {
    pub fn root_level(&self) -> LevelFilter {
        self.root_level
    }

    pub fn items(&self) -> impl IntoIterator<Item = Logger> + '_ {
        self.loggers.iter().map(|x| x.logger())
    }

    #[cfg(test)]
    pub fn specs(&self) -> &[LoggerSpec] {
        &self.loggers
    }
}

/// Collects per-module levels from `RUST_LOG`-style expressions such as `"info,ledger_txdb=trace"`.
pub(super) struct Builder {
    loggers: HashMap<String, LevelFilter>,
    root_level: Option<LevelFilter>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder { loggers: HashMap::new(), root_level: None }
    }

    pub fn parse_env(&mut self, env: &str) -> &mut Self {
        self.parse_expression(&env::var(env).unwrap_or_default())
    }

    pub fn parse_expression(&mut self, expression: &str) -> &mut Self {
        for spec in expression.split(',').map(|x| x.trim()) {
            if spec.is_empty() {
                continue;
            }
            let mut parts = spec.split('=');
            let (log_level, name) = match (parts.next().map(|x| x.trim()), parts.next().map(|x| x.trim()), parts.next()) {
                (Some(part0), None, None) => {
                    // a lone level string sets the root level, anything else names a module at max level
                    match part0.parse() {
                        Ok(lvl) => (lvl, None),
                        Err(_) => (LevelFilter::max(), Some(part0)),
                    }
                }
                (Some(part0), Some(""), None) => (LevelFilter::max(), Some(part0)),
                (Some(part0), Some(part1), None) => match part1.parse() {
                    Ok(lvl) => (lvl, Some(part0)),
                    _ => {
                        eprintln!("Ignoring invalid logging spec '{}'", LogError::ParseLoggerSpecError(part1.to_string()));
                        continue;
                    }
                },
                _ => {
                    eprintln!("Ignoring invalid logging spec '{}'", LogError::ParseLoggerSpecError(spec.to_string()));
                    continue;
                }
            };
            match name {
                Some(name) => {
                    self.logger(name.to_string(), log_level);
                }
                None => {
                    self.root_level(log_level);
                }
            }
        }
        self
    }

    pub fn root_level(&mut self, root_level: LevelFilter) -> &mut Self {
        self.root_level.replace(root_level);
        self
    }

    pub fn logger(&mut self, name: String, level: LevelFilter) -> &mut Self {
        self.loggers.insert(name, level);
        self
    }

    pub fn build(&mut self) -> Loggers {
        let loggers_map = mem::take(&mut self.loggers);
        let loggers = loggers_map.into_iter().map(|(name, level)| LoggerSpec::new(name, level)).collect::<Vec<_>>();
        Loggers { loggers, root_level: self.root_level.take().unwrap_or(LevelFilter::Error) }
    }
}
