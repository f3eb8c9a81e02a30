//! Error types for the logger pipeline

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown level name
    #[error("Invalid level: '{value}'. Available: {available}")]
    InvalidLevel { value: String, available: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// An output with the same name is already registered
    #[error("Output '{name}' is already registered")]
    DuplicateOutput { name: String },

    /// File output error with path
    #[error("File output error for '{path}': {message}")]
    FileOutputError { path: String, message: String },

    /// A processor failed while running against a message
    #[error("Processor '{processor}' failed: {message}")]
    ProcessorError { processor: String, message: String },

    /// The sink rejected the write
    #[error("Sink error for output '{output}': {message}")]
    SinkError { output: String, message: String },

    /// Raw, non-processed message text returned by the `serror` printers
    #[error("{0}")]
    Message(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid level error listing the accepted names
    pub fn invalid_level(value: impl Into<String>, available: &[&str]) -> Self {
        LoggerError::InvalidLevel {
            value: value.into(),
            available: available.join(", "),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn duplicate_output(name: impl Into<String>) -> Self {
        LoggerError::DuplicateOutput { name: name.into() }
    }

    /// Create a file output error
    pub fn file_output(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileOutputError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a processor error
    pub fn processor(processor: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::ProcessorError {
            processor: processor.into(),
            message: message.into(),
        }
    }

    /// Create a sink error
    pub fn sink(output: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkError {
            output: output.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
