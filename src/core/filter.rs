//! Process-wide component and level filters, injected into the dispatcher

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use std::env;

/// Comma-separated list of logger names allowed to print
pub const FILTER_ENV_VAR: &str = "LOGGER_FILTER";

/// Level specification, `{component:}{output:}level[,...]`
pub const LEVEL_ENV_VAR: &str = "LOGGER_LEVEL";

/// Parsed `{component:}{output:}level` entries.
///
/// Only the first global (single part) entry is honored; later global
/// entries are discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelSpec {
    global: Option<LogLevel>,
    outputs: Vec<(String, LogLevel)>,
    scoped: Vec<(String, String, LogLevel)>,
}

impl LevelSpec {
    pub fn parse(spec: &str) -> Result<Self> {
        let mut parsed = LevelSpec::default();

        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
            match parts.as_slice() {
                [level] => {
                    let level: LogLevel = level.parse()?;
                    if parsed.global.is_none() {
                        parsed.global = Some(level);
                    }
                }
                [output, level] => {
                    parsed.outputs.push((output.to_string(), level.parse()?));
                }
                [component, output, level] => {
                    parsed
                        .scoped
                        .push((component.to_string(), output.to_string(), level.parse()?));
                }
                _ => {
                    return Err(LoggerError::config(
                        "level spec",
                        format!("'{}' has more than three parts", entry),
                    ))
                }
            }
        }

        Ok(parsed)
    }

    pub fn global(&self) -> Option<LogLevel> {
        self.global
    }

    /// Most specific level for a (component, output) pair
    pub fn resolve(&self, component: &str, output: &str) -> Option<LogLevel> {
        self.scoped
            .iter()
            .find(|(c, o, _)| c.eq_ignore_ascii_case(component) && o.eq_ignore_ascii_case(output))
            .map(|(_, _, level)| *level)
            .or_else(|| {
                self.outputs
                    .iter()
                    .find(|(o, _)| o.eq_ignore_ascii_case(output))
                    .map(|(_, level)| *level)
            })
            .or(self.global)
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_none() && self.outputs.is_empty() && self.scoped.is_empty()
    }
}

/// Filters normally sourced from the environment.
///
/// Loggers hold one of these and consult it on every dispatch instead of
/// reading the environment themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    components: Option<Vec<String>>,
    levels: LevelSpec,
}

impl FilterConfig {
    /// No filtering at all
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `LOGGER_FILTER` and `LOGGER_LEVEL`
    pub fn from_env() -> Result<Self> {
        let filter = env::var(FILTER_ENV_VAR).ok();
        let level = env::var(LEVEL_ENV_VAR).ok();
        Self::from_vars(filter.as_deref(), level.as_deref())
    }

    pub fn from_vars(filter: Option<&str>, level: Option<&str>) -> Result<Self> {
        let components = filter
            .map(Self::parse_components)
            .filter(|components| !components.is_empty());
        let levels = match level {
            Some(spec) => LevelSpec::parse(spec)?,
            None => LevelSpec::default(),
        };

        Ok(Self { components, levels })
    }

    /// Split a comma-separated component list, ignoring blank entries
    pub fn parse_components(list: &str) -> Vec<String> {
        list.split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[must_use]
    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = Some(components.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_levels(mut self, levels: LevelSpec) -> Self {
        self.levels = levels;
        self
    }

    pub fn components(&self) -> Option<&[String]> {
        self.components.as_deref()
    }

    pub fn levels(&self) -> &LevelSpec {
        &self.levels
    }

    /// True when no allow-list is set or it names `component`
    pub fn allows_component(&self, component: &str) -> bool {
        match &self.components {
            Some(components) => components.iter().any(|c| c.eq_ignore_ascii_case(component)),
            None => true,
        }
    }

    pub fn level_for(&self, component: &str, output: &str) -> Option<LogLevel> {
        self.levels.resolve(component, output)
    }
}
