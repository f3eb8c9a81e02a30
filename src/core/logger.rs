//! Logger: owns outputs and global state, fans messages out to outputs

use super::{
    error::{LoggerError, Result},
    fields::{merge_fields, FieldValue, Fields},
    filter::FilterConfig,
    flag::Flag,
    log_level::LogLevel,
    message::Message,
    metrics::LoggerMetrics,
    options::{apply_options, with_flag, MessageOption, MessageToOutput, Options},
    output::{Output, WriteOutcome},
    processor::Processor,
    status::{AtomicStatus, Status},
    tags::Tags,
};
use crate::{formatters, processors, sinks};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use serde::Serialize;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, BufRead};
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// One output that failed for one message
#[derive(Debug)]
pub struct OutputFailure {
    pub component: String,
    pub output: String,
    pub message_id: String,
    pub error: LoggerError,
}

/// Aggregated outcome of one dispatch call.
///
/// Printing never fails from the caller's point of view; this report is how
/// per-output errors and the fatal signal surface.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Enabled outputs a message was handed to
    pub attempted: usize,
    pub written: usize,
    pub filtered: usize,
    pub muted: usize,
    pub failures: Vec<OutputFailure>,
    /// A `Fatal` message was dispatched
    pub fatal: bool,
}

impl DispatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn merge(&mut self, other: DispatchReport) {
        self.attempted += other.attempted;
        self.written += other.written;
        self.filtered += other.filtered;
        self.muted += other.muted;
        self.failures.extend(other.failures);
        self.fatal |= other.fatal;
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Everything a dispatch needs, captured once per call so concurrent
/// mutation of the logger cannot change a batch halfway through.
struct DispatchContext {
    component: String,
    outputs: Vec<Output>,
    fields: Fields,
    tags: Tags,
    filter: Arc<FilterConfig>,
    metrics: Arc<LoggerMetrics>,
}

/// One unit of fan-out work: a prepared message index and a target output
type Job<'a> = (usize, &'a Output);

type JobResult = (usize, String, Result<WriteOutcome>);

/// Upper bound on dispatch workers, including the calling thread
fn fan_out_width() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

impl DispatchContext {
    /// Prepare every message, then run all (message, output) writes on a
    /// bounded pool. Returns once every write has finished.
    fn dispatch(&self, messages: Vec<Message>) -> DispatchReport {
        let mut report = DispatchReport::default();
        let mut prepared = Vec::with_capacity(messages.len());
        let mut jobs = Vec::new();

        for message in messages {
            if let Some((message, outputs)) = self.prepare(message, &mut report) {
                let index = prepared.len();
                jobs.extend(outputs.into_iter().map(|output| (index, output)));
                prepared.push(message);
            }
        }

        for (index, output, result) in self.run_jobs(&prepared, jobs) {
            self.record(&mut report, &prepared[index], output, result);
        }

        report
    }

    /// Merge global state into `message` and pick its enabled target outputs.
    /// `None` when the message is dropped before reaching any output.
    fn prepare(
        &self,
        mut message: Message,
        report: &mut DispatchReport,
    ) -> Option<(Message, Vec<&Output>)> {
        if message.content().original().is_empty() && message.flag() == Flag::SkipAndMute {
            self.metrics.record_dropped();
            return None;
        }

        if !self.filter.allows_component(&self.component) {
            self.metrics.record_dropped();
            return None;
        }

        let targets: Vec<String> = if message.outputs_names().is_empty() {
            self.outputs.iter().map(|o| o.name().to_string()).collect()
        } else {
            message.outputs_names().to_vec()
        };
        message.set_outputs_names(targets.iter().cloned());

        let fields = merge_fields(&self.fields, message.fields());
        message.set_fields(fields);

        let mut tags = self.tags.clone();
        tags.add(message.tags().iter());
        message.set_tags(tags);

        report.fatal |= message.level() == LogLevel::Fatal;

        let mut selected = Vec::new();
        for output in &self.outputs {
            if !targets.iter().any(|t| t.eq_ignore_ascii_case(output.name())) {
                continue;
            }
            if output.status().is_enabled() {
                selected.push(output);
            } else {
                self.metrics.record_skipped_disabled();
            }
        }
        report.attempted += selected.len();

        Some((message, selected))
    }

    /// Run `jobs` on at most `fan_out_width()` threads. The calling thread
    /// is one of the workers, so a refused spawn only narrows the pool.
    fn run_jobs<'a>(&'a self, messages: &'a [Message], jobs: Vec<Job<'a>>) -> Vec<JobResult> {
        let workers = fan_out_width().min(jobs.len());
        if workers <= 1 {
            return jobs
                .into_iter()
                .map(|(index, output)| {
                    let (name, result) = self.write_one(&messages[index], output);
                    (index, name, result)
                })
                .collect();
        }

        let (job_tx, job_rx) = unbounded::<Job<'a>>();
        for job in jobs {
            let _ = job_tx.send(job);
        }
        drop(job_tx);

        let (result_tx, result_rx) = unbounded::<JobResult>();

        thread::scope(|scope| {
            for _ in 1..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                let spawned = thread::Builder::new()
                    .name("logger-dispatch".to_string())
                    .spawn_scoped(scope, move || self.drain(messages, &job_rx, &result_tx));

                if let Err(e) = spawned {
                    eprintln!(
                        "[LOGGER WARNING] Dispatch for component '{}' continues with fewer workers: {}",
                        self.component, e
                    );
                    break;
                }
            }

            self.drain(messages, &job_rx, &result_tx);
            drop(result_tx);
        });

        result_rx.iter().collect()
    }

    fn drain(&self, messages: &[Message], jobs: &Receiver<Job<'_>>, results: &Sender<JobResult>) {
        for (index, output) in jobs.iter() {
            let (name, result) = self.write_one(&messages[index], output);
            if results.send((index, name, result)).is_err() {
                break;
            }
        }
    }

    /// Write an isolated copy of `message` to one output. Panics inside a
    /// processor or sink are contained here.
    fn write_one(&self, message: &Message, output: &Output) -> (String, Result<WriteOutcome>) {
        let mut copy = message.clone();
        copy.set_component_name(self.component.as_str())
            .set_output_name(output.name());

        let max_level = self
            .filter
            .level_for(&self.component, output.name())
            .unwrap_or_else(|| output.max_level());

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            output.write_with_max_level(&mut copy, max_level)
        }))
        .unwrap_or_else(|panic_info| {
            Err(LoggerError::sink(
                output.name(),
                format!("panicked: {}", panic_message(&*panic_info)),
            ))
        });

        (output.name().to_string(), result)
    }

    fn record(
        &self,
        report: &mut DispatchReport,
        message: &Message,
        output: String,
        result: Result<WriteOutcome>,
    ) {
        match result {
            Ok(WriteOutcome::Written) => {
                report.written += 1;
                self.metrics.record_written();
            }
            Ok(WriteOutcome::Filtered) => {
                report.filtered += 1;
                self.metrics.record_filtered();
            }
            Ok(WriteOutcome::Muted) => {
                report.muted += 1;
                self.metrics.record_muted();
            }
            Ok(WriteOutcome::Disabled) => {
                self.metrics.record_skipped_disabled();
            }
            Err(error) => {
                eprintln!(
                    "[LOGGER ERROR] Output '{}' failed for component '{}': {}",
                    output, self.component, error
                );
                self.metrics.record_failed();
                report.failures.push(OutputFailure {
                    component: self.component.clone(),
                    output,
                    message_id: message.id().to_string(),
                    error,
                });
            }
        }
    }
}

/// A named logger.
///
/// Every method takes `&self`; a logger can be shared across threads behind
/// an `Arc`. Outputs are shared with children created by [`Logger::child`].
///
/// # Example
///
/// ```
/// use rust_logger_pipeline::prelude::*;
/// use rust_logger_pipeline::sinks;
///
/// let (buffer, output) = sinks::buffer(LogLevel::Info, Vec::<Processor>::new());
/// let logger = Logger::builder()
///     .name("api")
///     .output(output)
///     .build()
///     .unwrap();
///
/// logger.info("started");
/// logger.debug("not written");
/// assert_eq!(buffer.contents(), "started\n");
/// ```
pub struct Logger {
    name: RwLock<String>,
    outputs: Arc<RwLock<Vec<Output>>>,
    fields: RwLock<Fields>,
    tags: RwLock<Tags>,
    default_level: RwLock<LogLevel>,
    status: AtomicStatus,
    filter: RwLock<Arc<FilterConfig>>,
    metrics: Arc<LoggerMetrics>,
    exit_on_fatal: AtomicBool,
}

impl Logger {
    /// A logger with no outputs
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: RwLock::new(name.into()),
            outputs: Arc::new(RwLock::new(Vec::new())),
            fields: RwLock::new(Fields::new()),
            tags: RwLock::new(Tags::new()),
            default_level: RwLock::new(LogLevel::None),
            status: AtomicStatus::new(Status::Enabled),
            filter: RwLock::new(Arc::new(FilterConfig::new())),
            metrics: Arc::new(LoggerMetrics::new()),
            exit_on_fatal: AtomicBool::new(true),
        }
    }

    /// Console output at `max_level` that mutes Fatal and Error, plus a
    /// standard error output that prints only Fatal and Error. Both use the
    /// text formatter; `processors` are registered on both.
    pub fn with_defaults(
        name: impl Into<String>,
        max_level: LogLevel,
        processors: Vec<Arc<Processor>>,
    ) -> Self {
        let mut console_processors = processors.clone();
        console_processors.push(Arc::new(processors::mute_based_on_level(&[
            LogLevel::Fatal,
            LogLevel::Error,
        ])));

        let logger = Self::new(name);
        *logger.outputs.write() = vec![
            sinks::console(max_level, console_processors).with_formatter(formatters::text()),
            sinks::stderr(processors).with_formatter(formatters::text()),
        ];
        logger
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Derive a logger that shares this logger's outputs.
    ///
    /// Fields, tags, default level, status and exit behavior are copied as
    /// they are now; later changes on either side stay local. Output
    /// changes, including adding or replacing outputs, are visible to both.
    pub fn child(&self, name: impl Into<String>) -> Logger {
        Logger {
            name: RwLock::new(name.into()),
            outputs: Arc::clone(&self.outputs),
            fields: RwLock::new(self.fields()),
            tags: RwLock::new(self.tags()),
            default_level: RwLock::new(self.default_level()),
            status: AtomicStatus::new(self.status()),
            filter: RwLock::new(Arc::clone(&self.filter.read())),
            metrics: Arc::clone(&self.metrics),
            exit_on_fatal: AtomicBool::new(self.exit_on_fatal()),
        }
    }

    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) -> &Self {
        *self.name.write() = name.into();
        self
    }

    pub fn status(&self) -> Status {
        self.status.get()
    }

    /// A disabled logger drops every print
    pub fn set_status(&self, status: Status) -> &Self {
        self.status.set(status);
        self
    }

    /// Level used when the logger is written to as an `io::Write`
    pub fn default_level(&self) -> LogLevel {
        *self.default_level.read()
    }

    pub fn set_default_level(&self, level: LogLevel) -> &Self {
        *self.default_level.write() = level;
        self
    }

    pub fn fields(&self) -> Fields {
        self.fields.read().clone()
    }

    pub fn set_fields(&self, fields: Fields) -> &Self {
        *self.fields.write() = fields;
        self
    }

    pub fn set_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> &Self {
        self.fields.write().insert(key.into(), value.into());
        self
    }

    pub fn tags(&self) -> Tags {
        self.tags.read().clone()
    }

    pub fn add_tags<I, S>(&self, tags: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.write().add(tags);
        self
    }

    pub fn set_tags<I, S>(&self, tags: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.tags.write() = tags.into_iter().collect();
        self
    }

    pub fn filter(&self) -> Arc<FilterConfig> {
        Arc::clone(&self.filter.read())
    }

    pub fn set_filter(&self, filter: FilterConfig) -> &Self {
        *self.filter.write() = Arc::new(filter);
        self
    }

    pub fn exit_on_fatal(&self) -> bool {
        self.exit_on_fatal.load(Ordering::Acquire)
    }

    /// When disabled, a `Fatal` print only sets `DispatchReport::fatal`
    pub fn set_exit_on_fatal(&self, exit: bool) -> &Self {
        self.exit_on_fatal.store(exit, Ordering::Release);
        self
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    //////
    // Outputs
    //////

    /// Register outputs. Names must be unique (case-insensitive) among the
    /// registered outputs and the new ones; nothing is added on error.
    pub fn add_outputs<I>(&self, outputs: I) -> Result<&Self>
    where
        I: IntoIterator<Item = Output>,
    {
        let mut registered = self.outputs.write();
        let mut added: Vec<Output> = Vec::new();

        for output in outputs {
            let taken = registered
                .iter()
                .chain(added.iter())
                .any(|o| o.name().eq_ignore_ascii_case(output.name()));
            if taken {
                return Err(LoggerError::duplicate_output(output.name()));
            }
            added.push(output);
        }

        registered.extend(added);
        Ok(self)
    }

    /// Replace registered outputs that share a name with the given ones.
    /// Outputs with no registered counterpart are ignored.
    pub fn set_outputs<I>(&self, outputs: I) -> &Self
    where
        I: IntoIterator<Item = Output>,
    {
        let mut registered = self.outputs.write();
        for output in outputs {
            if let Some(slot) = registered
                .iter_mut()
                .find(|o| o.name().eq_ignore_ascii_case(output.name()))
            {
                *slot = output;
            }
        }
        self
    }

    /// Registered output by name (case-insensitive)
    pub fn output(&self, name: &str) -> Option<Output> {
        self.outputs
            .read()
            .iter()
            .find(|o| o.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn outputs(&self) -> Vec<Output> {
        self.outputs.read().clone()
    }

    pub fn outputs_names(&self) -> Vec<String> {
        self.outputs
            .read()
            .iter()
            .map(|o| o.name().to_string())
            .collect()
    }

    pub fn max_levels(&self) -> BTreeMap<String, LogLevel> {
        self.outputs
            .read()
            .iter()
            .map(|o| (o.name().to_string(), o.max_level()))
            .collect()
    }

    /// Set the max level of every registered output
    pub fn set_max_level(&self, level: LogLevel) -> &Self {
        for output in self.outputs.read().iter() {
            output.set_max_level(level);
        }
        self
    }

    /// True if any output, or the injected global level, is at `level`
    pub fn any_max_level(&self, level: LogLevel) -> bool {
        self.outputs.read().iter().any(|o| o.max_level() == level)
            || self.filter.read().levels().global() == Some(level)
    }

    /// Flush every output, returning the first error after trying all
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for output in self.outputs() {
            if let Err(e) = output.flush() {
                eprintln!("[LOGGER ERROR] Output '{}' flush failed: {}", output.name(), e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    //////
    // Dispatch
    //////

    /// Fan `messages` out to the outputs and wait for every write.
    ///
    /// Never terminates the process; see `DispatchReport::fatal`.
    pub fn dispatch(&self, messages: Vec<Message>) -> DispatchReport {
        if messages.is_empty() {
            return DispatchReport::default();
        }

        if !self.status().is_enabled() {
            for _ in &messages {
                self.metrics.record_skipped_disabled();
            }
            return DispatchReport::default();
        }

        let context = DispatchContext {
            component: self.name(),
            outputs: self.outputs(),
            fields: self.fields(),
            tags: self.tags(),
            filter: self.filter(),
            metrics: Arc::clone(&self.metrics),
        };

        context.dispatch(messages)
    }

    /// Dispatch, then act on the fatal signal
    fn process(&self, messages: Vec<Message>) -> DispatchReport {
        let report = self.dispatch(messages);

        if report.fatal && self.exit_on_fatal() {
            let _ = self.flush();
            eprintln!(
                "[LOGGER ERROR] Fatal message printed by '{}', exiting",
                self.name()
            );
            process::exit(1);
        }

        report
    }

    //////
    // Printers
    //////

    /// Print pre-built messages, giving full control over each one
    pub fn print_messages(&self, messages: Vec<Message>) -> DispatchReport {
        self.process(messages)
    }

    pub fn print_message(&self, message: Message) -> DispatchReport {
        self.process(vec![message])
    }

    pub fn print(&self, level: LogLevel, content: impl Into<String>) -> DispatchReport {
        self.print_message(Message::new(level, content))
    }

    pub fn println(&self, level: LogLevel, content: impl Into<String>) -> DispatchReport {
        self.print(level, with_newline(content))
    }

    pub fn print_with_options(
        &self,
        level: LogLevel,
        content: impl Into<String>,
        options: &[MessageOption],
    ) -> DispatchReport {
        let mut message = Message::new(level, content);
        apply_options(&mut message, options);
        self.print_message(message)
    }

    pub fn println_with_options(
        &self,
        level: LogLevel,
        content: impl Into<String>,
        options: &[MessageOption],
    ) -> DispatchReport {
        self.print_with_options(level, with_newline(content), options)
    }

    /// Print each entry to its own named output, concurrently. Entries naming
    /// an unknown output are not written anywhere.
    pub fn print_messages_to_outputs<I>(&self, entries: I) -> DispatchReport
    where
        I: IntoIterator<Item = MessageToOutput>,
    {
        self.process(entries.into_iter().map(MessageToOutput::into_message).collect())
    }

    pub fn print_messages_to_outputs_with_options<I>(
        &self,
        options: &Options,
        entries: I,
    ) -> DispatchReport
    where
        I: IntoIterator<Item = MessageToOutput>,
    {
        let messages = entries
            .into_iter()
            .map(|entry| {
                let mut message = entry.into_message();
                options.apply(&mut message);
                message
            })
            .collect();
        self.process(messages)
    }

    /// Print `data` as indented JSON, bypassing processors
    pub fn print_pretty<T: Serialize + ?Sized>(
        &self,
        level: LogLevel,
        data: &T,
    ) -> Result<DispatchReport> {
        let json = serde_json::to_string_pretty(data)?;
        Ok(self.print_with_options(level, json, &[with_flag(Flag::Skip)]))
    }

    pub fn println_pretty<T: Serialize + ?Sized>(
        &self,
        level: LogLevel,
        data: &T,
    ) -> Result<DispatchReport> {
        let json = serde_json::to_string_pretty(data)?;
        Ok(self.println_with_options(level, json, &[with_flag(Flag::Skip)]))
    }

    /// Print an empty line to every output regardless of level
    pub fn print_new_line(&self) -> DispatchReport {
        self.print_with_options(LogLevel::Info, "\n", &[with_flag(Flag::SkipAndForce)])
    }

    pub fn fatal(&self, content: impl Into<String>) -> DispatchReport {
        self.print(LogLevel::Fatal, content)
    }

    pub fn fatalln(&self, content: impl Into<String>) -> DispatchReport {
        self.println(LogLevel::Fatal, content)
    }

    pub fn error(&self, content: impl Into<String>) -> DispatchReport {
        self.print(LogLevel::Error, content)
    }

    pub fn errorln(&self, content: impl Into<String>) -> DispatchReport {
        self.println(LogLevel::Error, content)
    }

    pub fn warn(&self, content: impl Into<String>) -> DispatchReport {
        self.print(LogLevel::Warn, content)
    }

    pub fn warnln(&self, content: impl Into<String>) -> DispatchReport {
        self.println(LogLevel::Warn, content)
    }

    pub fn info(&self, content: impl Into<String>) -> DispatchReport {
        self.print(LogLevel::Info, content)
    }

    pub fn infoln(&self, content: impl Into<String>) -> DispatchReport {
        self.println(LogLevel::Info, content)
    }

    pub fn debug(&self, content: impl Into<String>) -> DispatchReport {
        self.print(LogLevel::Debug, content)
    }

    pub fn debugln(&self, content: impl Into<String>) -> DispatchReport {
        self.println(LogLevel::Debug, content)
    }

    pub fn trace(&self, content: impl Into<String>) -> DispatchReport {
        self.print(LogLevel::Trace, content)
    }

    pub fn traceln(&self, content: impl Into<String>) -> DispatchReport {
        self.println(LogLevel::Trace, content)
    }

    /// Print at Error and hand back the unprocessed text as an error
    pub fn serror(&self, content: impl Into<String>) -> LoggerError {
        let content = content.into();
        self.error(content.as_str());
        LoggerError::Message(content)
    }

    pub fn serrorln(&self, content: impl Into<String>) -> LoggerError {
        self.serror(with_newline(content))
    }

    /// Print a checkpoint and block until a line is read from stdin
    pub fn breakpoint(&self, name: &str, data: &[&dyn fmt::Debug]) -> DispatchReport {
        let stdin = io::stdin();
        self.breakpoint_with_reader(&mut stdin.lock(), name, data)
    }

    pub fn breakpoint_with_reader<R: BufRead>(
        &self,
        reader: &mut R,
        name: &str,
        data: &[&dyn fmt::Debug],
    ) -> DispatchReport {
        let mut checkpoint = format!("Breakpoint: {}. PID: {}", name, process::id());
        if !data.is_empty() {
            let values: Vec<String> = data.iter().map(|d| format!("{:?}", d)).collect();
            checkpoint = format!("{}. Data: {}", checkpoint, values.join(", "));
        }

        let mut report = self.print_with_options(
            LogLevel::Debug,
            format!("{}. Press enter to continue...", checkpoint),
            &[with_flag(Flag::Force)],
        );

        let mut line = String::new();
        let resumed = match reader.read_line(&mut line) {
            Ok(_) => self.traceln("Resuming"),
            Err(e) => self.errorln(format!("{}. Failed to read input: {}", checkpoint, e)),
        };
        report.merge(resumed);
        report
    }
}

fn with_newline(content: impl Into<String>) -> String {
    let mut content = content.into();
    content.push('\n');
    content
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("status", &self.status())
            .field("outputs", &self.outputs_names())
            .field("default_level", &self.default_level())
            .finish()
    }
}

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name.read())
    }
}

/// Bytes written to a logger are printed at its default level
impl io::Write for &Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.print(self.default_level(), String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Logger::flush(self).map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

impl io::Write for Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::Write::write(&mut &*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::Write::flush(&mut &*self)
    }
}

/// Builder for [`Logger`]
///
/// # Example
/// ```
/// use rust_logger_pipeline::prelude::*;
/// use rust_logger_pipeline::sinks;
///
/// let logger = Logger::builder()
///     .name("worker")
///     .output(sinks::console(LogLevel::Info, Vec::<Processor>::new()))
///     .field("service", "billing")
///     .tags(["batch"])
///     .exit_on_fatal(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.outputs_names(), vec!["Console".to_string()]);
/// ```
pub struct LoggerBuilder {
    name: String,
    outputs: Vec<Output>,
    fields: Fields,
    tags: Tags,
    default_level: LogLevel,
    filter: FilterConfig,
    exit_on_fatal: bool,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            outputs: Vec::new(),
            fields: Fields::new(),
            tags: Tags::new(),
            default_level: LogLevel::None,
            filter: FilterConfig::new(),
            exit_on_fatal: true,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, output: Output) -> Self {
        self.outputs.push(output);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn outputs<I: IntoIterator<Item = Output>>(mut self, outputs: I) -> Self {
        self.outputs.extend(outputs);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: Fields) -> Self {
        self.fields.extend(fields);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.add(tags);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn default_level(mut self, level: LogLevel) -> Self {
        self.default_level = level;
        self
    }

    /// Inject component/level filters, e.g. `FilterConfig::from_env()?`
    #[must_use = "builder methods return a new value"]
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Whether a `Fatal` print terminates the process (default `true`)
    #[must_use = "builder methods return a new value"]
    pub fn exit_on_fatal(mut self, exit: bool) -> Self {
        self.exit_on_fatal = exit;
        self
    }

    /// Build the Logger; fails on duplicate output names
    pub fn build(self) -> Result<Logger> {
        let logger = Logger::new(self.name);
        logger.add_outputs(self.outputs)?;
        logger
            .set_fields(self.fields)
            .set_default_level(self.default_level)
            .set_filter(self.filter)
            .set_exit_on_fatal(self.exit_on_fatal);
        *logger.tags.write() = self.tags;
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
