//! Standard output and standard error sinks

use crate::core::{LogLevel, Output, Processor};
use crate::processors::print_only_at_level;
use std::io;
use std::sync::Arc;

/// "Console": standard output at `max_level`
pub fn console<I, P>(max_level: LogLevel, processors: I) -> Output
where
    I: IntoIterator<Item = P>,
    P: Into<Arc<Processor>>,
{
    Output::new("Console", max_level, io::stdout()).with_processors(processors)
}

/// "StdErr": standard error, printing only Fatal and Error messages.
///
/// The level guard is appended after `processors`.
pub fn stderr<I, P>(processors: I) -> Output
where
    I: IntoIterator<Item = P>,
    P: Into<Arc<Processor>>,
{
    Output::new("StdErr", LogLevel::Error, io::stderr())
        .with_processors(processors)
        .with_processors([print_only_at_level(&[LogLevel::Fatal, LogLevel::Error])])
}
