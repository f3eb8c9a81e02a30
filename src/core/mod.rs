//! Core pipeline types: messages, processors, outputs and the logger

pub mod content;
pub mod error;
pub mod fields;
pub mod filter;
pub mod flag;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod options;
pub mod output;
pub mod processor;
pub mod status;
pub mod tags;
pub mod timestamp;

pub use content::Content;
pub use error::{LoggerError, Result};
pub use fields::{format_fields, merge_fields, FieldValue, Fields};
pub use filter::{FilterConfig, LevelSpec, FILTER_ENV_VAR, LEVEL_ENV_VAR};
pub use flag::Flag;
pub use log_level::LogLevel;
pub use logger::{DispatchReport, Logger, LoggerBuilder, OutputFailure};
pub use message::{content_hash, Message};
pub use metrics::LoggerMetrics;
pub use options::{
    apply_options, with_field, with_fields, with_flag, with_id, with_outputs_names,
    with_processors_names, with_tags, MessageOption, MessageToOutput, Options,
};
pub use output::{Output, WriteOutcome};
pub use processor::Processor;
pub use status::Status;
pub use tags::Tags;
pub use timestamp::TimestampFormat;
