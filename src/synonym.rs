//! Association between secondary headwords and their owning entries.
//!
//! In a [`Dictionary`](crate::Dictionary) synonyms live inline as the tail of
//! an entry's headword list. StarDict stores them separately in the `.syn`
//! file, each pointing at an entry by its position in the `.idx` file.

use crate::dictionary::Entry;
use crate::error::{Error, Result};

/// One `.syn` record: a synonym and the index of the entry it points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymRecord {
    pub text: String,
    pub entry_index: u32,
}

impl SynonymRecord {
    pub fn new(text: impl Into<String>, entry_index: u32) -> Self {
        Self {
            text: text.into(),
            entry_index,
        }
    }
}

/// Invert inline synonyms into `.syn` records.
///
/// `order` maps output position to read-order index (see
/// [`sort_order`](crate::sort::sort_order)); each record references the
/// output position of its entry. Records come out grouped by entry and
/// still need [`sort_synonyms`](crate::sort::sort_synonyms).
pub fn collect(entries: &[Entry], order: &[usize]) -> Result<Vec<SynonymRecord>> {
    let mut records = Vec::new();

    for (position, &read_index) in order.iter().enumerate() {
        let entry_index =
            u32::try_from(position).map_err(|_| Error::TooLarge("entry count"))?;
        for synonym in entries[read_index].synonyms() {
            records.push(SynonymRecord::new(synonym.clone(), entry_index));
        }
    }

    Ok(records)
}

/// Append each record's text to the headwords of the entry it references.
///
/// Records are applied in file order; nothing is re-sorted.
pub fn merge(entries: &mut [Entry], records: Vec<SynonymRecord>) -> Result<()> {
    let entry_count = entries.len();

    for record in records {
        let entry = entries.get_mut(record.entry_index as usize).ok_or(
            Error::SynonymIndexOutOfRange {
                index: record.entry_index,
                entry_count,
            },
        )?;
        entry.headwords.push(record.text);
    }

    Ok(())
}
