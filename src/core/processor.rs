//! Named unit of work run against a message inside an output's chain

use super::error::Result;
use super::message::Message;
use super::status::{AtomicStatus, Status};
use std::fmt;

type ProcessFn = dyn Fn(&mut Message) -> Result<()> + Send + Sync;

/// A processor mutates a message's processed content, fields, tags or flag.
///
/// Chains run in registration order. An error aborts the rest of that
/// output's chain for the message but never touches other outputs. Formatters
/// are processors too.
///
/// # Example
///
/// ```
/// use rust_logger_pipeline::{LogLevel, Message, Processor};
///
/// let shout = Processor::new("Shout", |m: &mut Message| {
///     let upper = m.text().to_uppercase();
///     m.set_text(upper);
///     Ok(())
/// });
///
/// let mut message = Message::new(LogLevel::Info, "hello");
/// shout.run(&mut message).unwrap();
/// assert_eq!(message.text(), "HELLO");
/// ```
pub struct Processor {
    name: String,
    status: AtomicStatus,
    func: Box<ProcessFn>,
}

impl Processor {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&mut Message) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            status: AtomicStatus::new(Status::Enabled),
            func: Box::new(func),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status.get()
    }

    /// Enable or disable at runtime; visible to every output sharing it
    pub fn set_status(&self, status: Status) {
        self.status.set(status);
    }

    /// Run unconditionally. Chains check `status` before calling this.
    pub fn run(&self, message: &mut Message) -> Result<()> {
        (self.func)(message)
    }
}

impl fmt::Debug for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("name", &self.name)
            .field("status", &self.status.get())
            .finish()
    }
}

impl fmt::Display for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
