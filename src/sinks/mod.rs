//! Built-in sinks
//!
//! Every sink is an [`Output`](crate::core::Output) constructor: the same
//! capability bound to a different byte destination.

pub mod buffer;
pub mod console;
pub mod file;

#[cfg(feature = "elasticsearch")]
pub mod elasticsearch;

pub use buffer::{buffer, SharedBuffer};
pub use console::{console, stderr};
pub use file::{file, file_based};

#[cfg(feature = "elasticsearch")]
pub use elasticsearch::{elasticsearch, elasticsearch_with_tag_map, ElasticsearchConfig, TagMapItem};
