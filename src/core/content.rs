//! Message content: the immutable original text and its processed form

/// Raw and processed text of a message.
///
/// Processors only ever touch the processed text. Before the chain runs the
/// trailing line break is stripped so suffixes and formatters see the bare
/// text; it is restored exactly once afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    original: String,
    processed: String,
    stripped: Option<&'static str>,
}

impl Content {
    pub fn new(text: impl Into<String>) -> Self {
        let original = text.into();
        Self {
            processed: original.clone(),
            original,
            stripped: None,
        }
    }

    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[inline]
    pub fn processed(&self) -> &str {
        &self.processed
    }

    pub fn set_processed(&mut self, text: impl Into<String>) {
        self.processed = text.into();
    }

    /// Remove one trailing `\r\n`, `\n` or `\r` from the processed text.
    ///
    /// A second call before `restore` is a no-op, so the pair stays reversible.
    pub fn strip(&mut self) {
        if self.stripped.is_some() {
            return;
        }

        let line_break = if self.processed.ends_with("\r\n") {
            "\r\n"
        } else if self.processed.ends_with('\n') {
            "\n"
        } else if self.processed.ends_with('\r') {
            "\r"
        } else {
            return;
        };

        self.processed.truncate(self.processed.len() - line_break.len());
        self.stripped = Some(line_break);
    }

    /// Re-append what `strip` removed. Without a prior strip this does nothing.
    pub fn restore(&mut self) {
        if let Some(line_break) = self.stripped.take() {
            self.processed.push_str(line_break);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::new(s)
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::new(s)
    }
}
