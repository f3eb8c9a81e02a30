//! Functional message options and batch options

use super::fields::{FieldValue, Fields};
use super::flag::Flag;
use super::log_level::LogLevel;
use super::message::Message;

/// One mutation applied to a message before dispatch.
///
/// Options only touch the message they are applied to.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageOption {
    Id(String),
    Tags(Vec<String>),
    Field(String, FieldValue),
    Fields(Fields),
    Flag(Flag),
    OutputsNames(Vec<String>),
    ProcessorsNames(Vec<String>),
}

impl MessageOption {
    pub fn apply(&self, message: &mut Message) {
        match self {
            MessageOption::Id(id) => {
                message.set_id(id.as_str());
            }
            MessageOption::Tags(tags) => {
                message.add_tags(tags.iter().cloned());
            }
            MessageOption::Field(key, value) => {
                message.set_field(key.as_str(), value.clone());
            }
            MessageOption::Fields(fields) => {
                message.set_fields(fields.clone());
            }
            MessageOption::Flag(flag) => {
                message.set_flag(*flag);
            }
            MessageOption::OutputsNames(names) => {
                message.set_outputs_names(names.iter().cloned());
            }
            MessageOption::ProcessorsNames(names) => {
                message.set_processors_names(names.iter().cloned());
            }
        }
    }
}

fn collect_strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

pub fn with_id(id: impl Into<String>) -> MessageOption {
    MessageOption::Id(id.into())
}

pub fn with_tags<I, S>(tags: I) -> MessageOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    MessageOption::Tags(collect_strings(tags))
}

/// Set or overwrite one field
pub fn with_field(key: impl Into<String>, value: impl Into<FieldValue>) -> MessageOption {
    MessageOption::Field(key.into(), value.into())
}

/// Replace the message's whole field map
pub fn with_fields(fields: Fields) -> MessageOption {
    MessageOption::Fields(fields)
}

pub fn with_flag(flag: Flag) -> MessageOption {
    MessageOption::Flag(flag)
}

/// Restrict the message to these outputs
pub fn with_outputs_names<I, S>(names: I) -> MessageOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    MessageOption::OutputsNames(collect_strings(names))
}

/// Restrict the message to these processors
pub fn with_processors_names<I, S>(names: I) -> MessageOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    MessageOption::ProcessorsNames(collect_strings(names))
}

/// Apply options in order
pub fn apply_options(message: &mut Message, options: &[MessageOption]) {
    for option in options {
        option.apply(message);
    }
}

/// Options applied to every message of a batch.
///
/// Routing is not part of it: each batch entry names its own output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub id: Option<String>,
    pub fields: Fields,
    pub tags: Vec<String>,
    pub flag: Flag,
    pub processors_names: Vec<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: Flag) -> Self {
        self.flag = flag;
        self
    }

    #[must_use]
    pub fn processors_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.processors_names = collect_strings(names);
        self
    }

    pub(crate) fn apply(&self, message: &mut Message) {
        if let Some(id) = &self.id {
            message.set_id(id.as_str());
        }
        for (key, value) in &self.fields {
            message.set_field(key.as_str(), value.clone());
        }
        message
            .add_tags(self.tags.iter().cloned())
            .set_flag(self.flag)
            .set_processors_names(self.processors_names.iter().cloned());
    }
}

/// One batch entry pinned to a single named output
#[derive(Debug, Clone, PartialEq)]
pub struct MessageToOutput {
    pub output_name: String,
    pub level: LogLevel,
    pub content: String,
}

impl MessageToOutput {
    pub fn new(output_name: impl Into<String>, level: LogLevel, content: impl Into<String>) -> Self {
        Self {
            output_name: output_name.into(),
            level,
            content: content.into(),
        }
    }

    pub(crate) fn into_message(self) -> Message {
        let mut message = Message::new(self.level, self.content);
        message.set_outputs_names([self.output_name]);
        message
    }
}
