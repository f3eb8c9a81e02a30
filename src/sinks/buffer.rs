//! In-memory sink, mostly for tests and capture

use crate::core::{LogLevel, Output, Processor};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Cloneable, thread-safe byte buffer. Clones share the same bytes.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// "Buffer": writes into a [`SharedBuffer`] returned alongside the output
pub fn buffer<I, P>(max_level: LogLevel, processors: I) -> (SharedBuffer, Output)
where
    I: IntoIterator<Item = P>,
    P: Into<Arc<Processor>>,
{
    let buffer = SharedBuffer::new();
    let output = Output::new("Buffer", max_level, buffer.clone()).with_processors(processors);
    (buffer, output)
}
