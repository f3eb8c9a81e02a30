//! # Rust Logger Pipeline
//!
//! A structured logging library built around named outputs, each with its
//! own level filter and processor chain.
//!
//! ## Features
//!
//! - **Named Outputs**: Console, standard error, file, in-memory buffer and
//!   search-index sinks, each enabled, muted or re-levelled independently
//! - **Processor Chains**: Ordered message transformations that can tag,
//!   prefix, colorize, mute or force a message per output
//! - **Concurrent Fan-out**: Every message is written to every output in
//!   parallel, and failures in one output never block the others
//! - **Structured Data**: Fields, tags and flags travel with each message and
//!   are rendered by the text and JSON formatters
//!
//! ## Example
//!
//! ```
//! use rust_logger_pipeline::prelude::*;
//! use rust_logger_pipeline::{processors, sinks};
//!
//! let (buffer, output) = sinks::buffer(LogLevel::Info, [processors::prefixer("[api] ")]);
//! let logger = Logger::new("api");
//! logger.add_outputs([output]).unwrap();
//!
//! logger.infoln("listening");
//! logger.debugln("hidden");
//!
//! assert_eq!(buffer.contents(), "[api] listening\n");
//! ```

pub mod core;
pub mod formatters;
pub mod macros;
pub mod processors;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        with_field, with_fields, with_flag, with_id, with_outputs_names, with_processors_names,
        with_tags, DispatchReport, FieldValue, Fields, FilterConfig, Flag, LogLevel, Logger,
        LoggerBuilder, LoggerError, LoggerMetrics, Message, MessageOption, MessageToOutput,
        Options, Output, Processor, Result, Status, TimestampFormat, WriteOutcome,
    };
    pub use crate::sinks::SharedBuffer;
}

pub use crate::core::{
    DispatchReport, FieldValue, Fields, FilterConfig, Flag, LevelSpec, LogLevel, Logger,
    LoggerBuilder, LoggerError, LoggerMetrics, Message, MessageOption, MessageToOutput, Options,
    Output, OutputFailure, Processor, Result, Status, Tags, TimestampFormat, WriteOutcome,
};
pub use crate::sinks::SharedBuffer;
