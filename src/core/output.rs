//! Named output: level filter, processor chain and sink

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::message::Message;
use super::processor::Processor;
use super::status::{AtomicStatus, Status};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// What `Output::write` did with a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The processed text reached the sink
    Written,
    /// More verbose than the output's max level (or `None`) and not forced
    Filtered,
    /// Flagged `Mute`/`SkipAndMute` by the caller or a processor
    Muted,
    /// The output is disabled
    Disabled,
}

/// Line-oriented adapter over a byte sink.
///
/// Each message becomes exactly one `write_all` of the full line followed by
/// a flush, under a lock, so concurrent messages never interleave.
pub(crate) struct SinkWriter {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl SinkWriter {
    fn new(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    fn write_line(&self, text: &str) -> std::io::Result<()> {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        if !line.ends_with('\n') {
            line.push('\n');
        }

        let mut sink = self.sink.lock();
        sink.write_all(line.as_bytes())?;
        sink.flush()
    }

    fn flush(&self) -> std::io::Result<()> {
        self.sink.lock().flush()
    }

    fn replace(&self, sink: Box<dyn Write + Send>) {
        *self.sink.lock() = sink;
    }
}

struct OutputInner {
    name: String,
    status: AtomicStatus,
    max_level: RwLock<LogLevel>,
    processors: RwLock<Vec<Arc<Processor>>>,
    formatter: RwLock<Option<Arc<Processor>>>,
    writer: SinkWriter,
}

/// A named sink with its own level filter and processor chain.
///
/// `Output` is a cheap handle: clones share the same state, so a logger, its
/// children and the caller all observe the same status, level and chain.
///
/// # Example
///
/// ```
/// use rust_logger_pipeline::{LogLevel, Message, Output, WriteOutcome};
/// use rust_logger_pipeline::processors::prefixer;
///
/// let output = Output::new("Memory", LogLevel::Info, Vec::<u8>::new())
///     .with_processors([prefixer("> ")]);
///
/// let mut message = Message::new(LogLevel::Info, "ready");
/// assert_eq!(output.write(&mut message).unwrap(), WriteOutcome::Written);
/// assert_eq!(message.text(), "> ready");
/// ```
#[derive(Clone)]
pub struct Output {
    inner: Arc<OutputInner>,
}

impl Output {
    pub fn new<W>(name: impl Into<String>, max_level: LogLevel, sink: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            inner: Arc::new(OutputInner {
                name: name.into(),
                status: AtomicStatus::new(Status::Enabled),
                max_level: RwLock::new(max_level),
                processors: RwLock::new(Vec::new()),
                formatter: RwLock::new(None),
                writer: SinkWriter::new(Box::new(sink)),
            }),
        }
    }

    /// Append processors (builder form of `add_processors`)
    #[must_use]
    pub fn with_processors<I, P>(self, processors: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Arc<Processor>>,
    {
        self.add_processors(processors);
        self
    }

    /// Set the formatter (builder form of `set_formatter`)
    #[must_use]
    pub fn with_formatter(self, formatter: impl Into<Arc<Processor>>) -> Self {
        self.set_formatter(Some(formatter.into()));
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn status(&self) -> Status {
        self.inner.status.get()
    }

    pub fn set_status(&self, status: Status) -> &Self {
        self.inner.status.set(status);
        self
    }

    pub fn max_level(&self) -> LogLevel {
        *self.inner.max_level.read()
    }

    pub fn set_max_level(&self, level: LogLevel) -> &Self {
        *self.inner.max_level.write() = level;
        self
    }

    pub fn add_processors<I, P>(&self, processors: I) -> &Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Arc<Processor>>,
    {
        self.inner
            .processors
            .write()
            .extend(processors.into_iter().map(Into::into));
        self
    }

    /// Replace registered processors that share a name with the given ones.
    /// Processors with no registered counterpart are ignored.
    pub fn set_processors<I, P>(&self, processors: I) -> &Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Arc<Processor>>,
    {
        let mut registered = self.inner.processors.write();
        for processor in processors {
            let processor = processor.into();
            for slot in registered.iter_mut() {
                if slot.name().eq_ignore_ascii_case(processor.name()) {
                    *slot = Arc::clone(&processor);
                }
            }
        }
        self
    }

    /// First registered processor with this name (case-insensitive)
    pub fn processor(&self, name: &str) -> Option<Arc<Processor>> {
        self.inner
            .processors
            .read()
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn processors(&self) -> Vec<Arc<Processor>> {
        self.inner.processors.read().clone()
    }

    pub fn processors_names(&self) -> Vec<String> {
        self.inner
            .processors
            .read()
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    pub fn formatter(&self) -> Option<Arc<Processor>> {
        self.inner.formatter.read().clone()
    }

    /// Set or clear the formatter. Without one, the processed text is
    /// written as-is.
    pub fn set_formatter(&self, formatter: Option<Arc<Processor>>) -> &Self {
        *self.inner.formatter.write() = formatter;
        self
    }

    /// Swap the underlying sink
    pub fn set_writer<W>(&self, sink: W) -> &Self
    where
        W: Write + Send + 'static,
    {
        self.inner.writer.replace(Box::new(sink));
        self
    }

    pub fn flush(&self) -> Result<()> {
        self.inner
            .writer
            .flush()
            .map_err(|e| LoggerError::io_operation("flushing output", self.name(), e))
    }

    /// True if both handles point at the same output
    pub fn ptr_eq(&self, other: &Output) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Process and write one message using this output's own max level
    pub fn write(&self, message: &mut Message) -> Result<WriteOutcome> {
        self.write_with_max_level(message, self.max_level())
    }

    /// Process and write one message against an explicit max level.
    ///
    /// The chain runs before the level check so a processor can force (or
    /// mute) a message it was handed.
    pub(crate) fn write_with_max_level(
        &self,
        message: &mut Message,
        max_level: LogLevel,
    ) -> Result<WriteOutcome> {
        if !self.status().is_enabled() {
            return Ok(WriteOutcome::Disabled);
        }

        if !message.flag().skips_processing() {
            self.run_chain(message)?;
        }

        if message.flag().is_muted() {
            return Ok(WriteOutcome::Muted);
        }

        let level = message.level();
        if !message.flag().is_forced()
            && (level == LogLevel::None || level.is_more_verbose_than(max_level))
        {
            return Ok(WriteOutcome::Filtered);
        }

        self.inner
            .writer
            .write_line(message.text())
            .map_err(|e| LoggerError::io_operation("writing to output", self.name(), e))?;

        Ok(WriteOutcome::Written)
    }

    fn run_chain(&self, message: &mut Message) -> Result<()> {
        let processors = self.processors();
        let formatter = self.formatter();

        message.strip();
        let result = Self::apply_chain(message, &processors, formatter);
        message.restore();
        result
    }

    fn apply_chain(
        message: &mut Message,
        processors: &[Arc<Processor>],
        formatter: Option<Arc<Processor>>,
    ) -> Result<()> {
        for processor in processors {
            if !processor.status().is_enabled() || !message.allows_processor(processor.name()) {
                continue;
            }

            message.set_processor_name(processor.name());
            processor.run(message)?;
        }

        if let Some(formatter) = formatter.filter(|f| f.status().is_enabled()) {
            message.set_processor_name(formatter.name());
            formatter.run(message)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("name", &self.name())
            .field("status", &self.status())
            .field("max_level", &self.max_level())
            .field("processors", &self.processors_names())
            .finish()
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
