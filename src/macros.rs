//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Each expands to a
//! logger printer call and evaluates to its `DispatchReport`.
//!
//! # Examples
//!
//! ```
//! use rust_logger_pipeline::prelude::*;
//! use rust_logger_pipeline::{info, sinks};
//!
//! let (buffer, output) = sinks::buffer(LogLevel::Info, Vec::<Processor>::new());
//! let logger = Logger::new("server");
//! logger.add_outputs([output]).unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! assert_eq!(buffer.lines(), vec!["Server started", "Server listening on port 8080"]);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_logger_pipeline::prelude::*;
/// # let logger = Logger::new("app");
/// use rust_logger_pipeline::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.print($level, format!($($arg)+))
    };
}

/// Like [`log!`], with a trailing newline.
#[macro_export]
macro_rules! logln {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.println($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use rust_logger_pipeline::prelude::*;
/// # let logger = Logger::new("app");
/// use rust_logger_pipeline::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_logger_pipeline::prelude::*;
/// # let logger = Logger::new("app");
/// use rust_logger_pipeline::error;
/// error!(logger, "Failed to connect");
/// error!(logger, "Error code: {}", 404);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// Terminates the process after writing unless the logger's
/// `exit_on_fatal` is off.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
