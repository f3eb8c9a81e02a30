//! Message record dispatched to outputs

use super::content::Content;
use super::fields::{FieldValue, Fields};
use super::flag::Flag;
use super::log_level::LogLevel;
use super::tags::Tags;
use chrono::{DateTime, Utc};
use sha1::{Digest, Sha1};
use std::fmt;

/// Random message identifier (UUID v4)
pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Deterministic digest of the trimmed content.
///
/// Two messages whose content only differs by surrounding whitespace or line
/// breaks share the same hash, which lets consumers de-duplicate.
pub fn content_hash(content: &str) -> String {
    let trimmed = content.trim_matches(|c| matches!(c, '\x0c' | '\t' | '\r' | '\n' | ' '));
    hex::encode(Sha1::digest(trimmed.as_bytes()))
}

/// A single log message.
///
/// Created per print call (or built by the caller), merged with the logger's
/// global fields and tags, then cloned once per output so every processor
/// chain works on its own copy.
#[derive(Debug, Clone)]
pub struct Message {
    id: String,
    content_hash: String,
    level: LogLevel,
    content: Content,
    fields: Fields,
    tags: Tags,
    flag: Flag,
    outputs_names: Vec<String>,
    processors_names: Vec<String>,
    component_name: String,
    output_name: String,
    processor_name: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(level: LogLevel, content: impl Into<String>) -> Self {
        let content = Content::new(content);
        Self {
            id: generate_id(),
            content_hash: content_hash(content.original()),
            level,
            content,
            fields: Fields::new(),
            tags: Tags::new(),
            flag: Flag::None,
            outputs_names: Vec::new(),
            processors_names: Vec::new(),
            component_name: String::new(),
            output_name: String::new(),
            processor_name: String::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = id.into();
        self
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) -> &mut Self {
        self.level = level;
        self
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Content {
        &mut self.content
    }

    /// Replace the content; the content hash follows the new original text.
    pub fn set_content(&mut self, content: Content) -> &mut Self {
        self.content_hash = content_hash(content.original());
        self.content = content;
        self
    }

    /// Shorthand for `content().processed()`
    pub fn text(&self) -> &str {
        self.content.processed()
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.content.set_processed(text);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn strip(&mut self) {
        self.content.strip();
    }

    pub fn restore(&mut self) {
        self.content.restore();
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut Fields {
        &mut self.fields
    }

    pub fn set_fields(&mut self, fields: Fields) -> &mut Self {
        self.fields = fields;
        self
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn add_tags<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.add(tags);
        self
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn delete_tag(&mut self, tag: &str) {
        self.tags.remove(tag);
    }

    pub(crate) fn set_tags(&mut self, tags: Tags) {
        self.tags = tags;
    }

    pub fn flag(&self) -> Flag {
        self.flag
    }

    pub fn set_flag(&mut self, flag: Flag) -> &mut Self {
        self.flag = flag;
        self
    }

    pub fn outputs_names(&self) -> &[String] {
        &self.outputs_names
    }

    pub fn set_outputs_names<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn processors_names(&self) -> &[String] {
        &self.processors_names
    }

    pub fn set_processors_names<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.processors_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// True if the processor allow-list is empty or names `processor`
    pub fn allows_processor(&self, processor: &str) -> bool {
        self.processors_names.is_empty()
            || self
                .processors_names
                .iter()
                .any(|name| name.eq_ignore_ascii_case(processor))
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    pub fn set_component_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.component_name = name.into();
        self
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    pub fn set_output_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.output_name = name.into();
        self
    }

    pub fn processor_name(&self) -> &str {
        &self.processor_name
    }

    pub fn set_processor_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.processor_name = name.into();
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: DateTime<Utc>) -> &mut Self {
        self.timestamp = timestamp;
        self
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content.processed())
    }
}
