//! Ordered, duplicate-free tag set

use serde::{Serialize, Serializer};

/// Tags attached to a message or a logger.
///
/// Insertion order is kept for display; adding a tag that is already present
/// does nothing, so repeated merges never accumulate duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            let tag = tag.into();
            if !self.0.contains(&tag) {
                self.0.push(tag);
            }
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn remove(&mut self, tag: &str) {
        self.0.retain(|t| t != tag);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Tags::new();
        tags.add(iter);
        tags
    }
}

impl Serialize for Tags {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_deduplicates() {
        let mut tags = Tags::new();
        tags.add(["a", "b"]);
        tags.add(["b", "c", "a"]);

        assert_eq!(tags.as_slice(), ["a", "b", "c"]);
    }

    #[test]
    fn test_contains_and_remove() {
        let mut tags: Tags = ["db", "slow"].into_iter().collect();
        assert!(tags.contains("db"));

        tags.remove("db");
        assert!(!tags.contains("db"));
        assert_eq!(tags.len(), 1);
    }
}
