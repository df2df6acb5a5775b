//! In-memory dictionary model shared by both codecs.

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Free-form dictionary metadata, kept in insertion order.
///
/// Re-inserting an existing key replaces its value without moving it.
pub type Metadata = IndexMap<String, String>;

/// One dictionary article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Lookup terms; the first is the primary headword, the rest are synonyms.
    pub headwords: Vec<String>,
    /// Definition text.
    pub definition: String,
}

impl Entry {
    /// Create an entry. `headwords` must not be empty.
    pub fn new(headwords: Vec<String>, definition: impl Into<String>) -> Self {
        debug_assert!(!headwords.is_empty(), "entry without headwords");
        Self {
            headwords,
            definition: definition.into(),
        }
    }

    /// The primary headword.
    pub fn primary(&self) -> &str {
        &self.headwords[0]
    }

    /// Secondary headwords.
    pub fn synonyms(&self) -> &[String] {
        self.headwords.get(1..).unwrap_or_default()
    }
}

/// Entries plus metadata for one conversion run.
///
/// An entry's position in `entries` is its original read order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    pub metadata: Metadata,
    pub entries: Vec<Entry>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of secondary headwords across all entries.
    pub fn synonym_count(&self) -> usize {
        self.entries.iter().map(|e| e.synonyms().len()).sum()
    }

    /// Fail on the first entry with an empty headword list.
    pub fn check_headwords(&self) -> Result<()> {
        match self.entries.iter().position(|e| e.headwords.is_empty()) {
            Some(index) => Err(Error::EmptyEntry { index }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_primary_and_synonyms() {
        let entry = Entry::new(vec!["foo".into(), "Foo".into(), "FOO".into()], "def");
        assert_eq!(entry.primary(), "foo");
        assert_eq!(entry.synonyms(), &["Foo".to_string(), "FOO".to_string()]);
    }

    #[test]
    fn test_synonym_count() {
        let mut dict = Dictionary::new();
        dict.entries.push(Entry::new(vec!["a".into(), "b".into()], "x"));
        dict.entries.push(Entry::new(vec!["c".into()], "y"));
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.synonym_count(), 1);
    }

    #[test]
    fn test_metadata_keeps_first_position_on_overwrite() {
        let mut meta = Metadata::new();
        meta.insert("a".into(), "1".into());
        meta.insert("b".into(), "2".into());
        meta.insert("a".into(), "3".into());
        let pairs: Vec<_> = meta.iter().collect();
        assert_eq!(pairs[0], (&"a".to_string(), &"3".to_string()));
        assert_eq!(pairs[1].0, "b");
    }

    #[test]
    fn test_check_headwords() {
        let mut dict = Dictionary::new();
        dict.entries.push(Entry::new(vec!["a".into()], "x"));
        assert!(dict.check_headwords().is_ok());

        dict.entries.push(Entry {
            headwords: Vec::new(),
            definition: "y".into(),
        });
        assert_eq!(dict.synonym_count(), 0);
        assert!(matches!(
            dict.check_headwords(),
            Err(Error::EmptyEntry { index: 1 })
        ));
    }
}
