//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message severity, ordered from least to most verbose.
///
/// An output bound to `max_level` writes every message whose level is less
/// than or equal to it. `None` is never written unless the message is forced.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    None = 0,
    Fatal = 1,
    Error = 2,
    Warn = 3,
    Info = 4,
    Debug = 5,
    Trace = 6,
}

const NAMES: [&str; 7] = ["none", "fatal", "error", "warn", "info", "debug", "trace"];

impl LogLevel {
    pub const ALL: [LogLevel; 7] = [
        LogLevel::None,
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::None => "NONE",
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Lower-case name, as used by formatters and the prefix mask
    pub fn name(&self) -> &'static str {
        NAMES[*self as usize]
    }

    /// Names of every level, least verbose first
    pub fn names() -> &'static [&'static str] {
        &NAMES
    }

    /// True if a message at this level must not be written by an output
    /// bound to `max_level`.
    #[inline]
    pub fn is_more_verbose_than(&self, max_level: LogLevel) -> bool {
        *self > max_level
    }

    /// Join level names with commas, e.g. `fatal,error`
    pub fn join(levels: &[LogLevel]) -> String {
        levels
            .iter()
            .map(LogLevel::name)
            .collect::<Vec<_>>()
            .join(",")
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::None => White,
            LogLevel::Trace => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(LogLevel::None),
            "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggerError::invalid_level(s, &NAMES)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_ordering() {
        assert!(LogLevel::Debug.is_more_verbose_than(LogLevel::Info));
        assert!(!LogLevel::Debug.is_more_verbose_than(LogLevel::Trace));
        assert!(!LogLevel::Error.is_more_verbose_than(LogLevel::Error));
        assert!(LogLevel::Fatal < LogLevel::Error);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(" trace ".parse::<LogLevel>().unwrap(), LogLevel::Trace);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "verbose".parse::<LogLevel>().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));
        assert!(err.to_string().contains("none, fatal, error, warn, info, debug, trace"));

        assert!("".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_display_and_join() {
        assert_eq!(LogLevel::Info.to_string(), "info");
        assert_eq!(LogLevel::Info.to_str(), "INFO");
        assert_eq!(LogLevel::join(&[LogLevel::Fatal, LogLevel::Error]), "fatal,error");
    }
}
