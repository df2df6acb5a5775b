//! Deterministic ordering for StarDict output.
//!
//! StarDict readers binary-search the index with an ASCII-case-insensitive
//! comparison that falls back to a plain byte comparison, so the `.idx` and
//! `.syn` files must be written in exactly that order.
//!
//! Comparison is over UTF-8 bytes, which is code-point order. Tools that
//! compare UTF-16 code units disagree only when a character above U+FFFF
//! meets one in U+E000..=U+FFFF; this crate follows the byte order that
//! StarDict lookup uses.

use std::cmp::Ordering;

use crate::dictionary::Entry;
use crate::synonym::SynonymRecord;

/// Compare two headwords in StarDict order.
///
/// Only ASCII `A`-`Z` are folded; every other byte compares as-is. Ties on
/// the folded form are broken by the unfolded bytes.
pub fn compare_headwords(a: &str, b: &str) -> Ordering {
    let folded = a
        .bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()));

    folded.then_with(|| a.as_bytes().cmp(b.as_bytes()))
}

/// Compute the output order of `entries`.
///
/// Returns read-order indices in sorted order. Entries with identical
/// primary headwords keep their read order, so the result does not depend
/// on sort stability.
pub fn sort_order(entries: &[Entry]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_unstable_by(|&a, &b| {
        compare_headwords(entries[a].primary(), entries[b].primary()).then(a.cmp(&b))
    });
    order
}

/// Sort synonym records for the `.syn` file.
///
/// Records with the same text are ordered by the entry they reference.
pub fn sort_synonyms(records: &mut [SynonymRecord]) {
    records.sort_unstable_by(|a, b| {
        compare_headwords(&a.text, &b.text).then(a.entry_index.cmp(&b.entry_index))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hw: &str) -> Entry {
        Entry::new(vec![hw.to_string()], "")
    }

    #[test]
    fn test_ascii_case_folding() {
        assert_eq!(compare_headwords("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_headwords("Zebra", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_case_sensitive_tie_break() {
        // 'F' (0x46) sorts before 'f' (0x66)
        assert_eq!(compare_headwords("Foo", "foo"), Ordering::Less);
        assert_eq!(compare_headwords("foo", "foo"), Ordering::Equal);
    }

    #[test]
    fn test_non_ascii_not_folded() {
        // 'É' is not folded to 'é'
        assert_ne!(compare_headwords("École", "école"), Ordering::Equal);
        assert_eq!(compare_headwords("z", "é"), Ordering::Less);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare_headwords("foo", "foobar"), Ordering::Less);
        assert_eq!(compare_headwords("FOO", "foobar"), Ordering::Less);
    }

    #[test]
    fn test_sort_order_uses_read_order_for_duplicates() {
        let entries = vec![entry("b"), entry("a"), entry("B"), entry("a"), entry("A")];
        assert_eq!(sort_order(&entries), vec![4, 1, 3, 2, 0]);
    }

    #[test]
    fn test_sort_order_is_reproducible() {
        let entries: Vec<Entry> = ["x", "X", "x", "y", "X"].iter().map(|s| entry(s)).collect();
        let first = sort_order(&entries);
        let second = sort_order(&entries);
        assert_eq!(first, second);
        assert_eq!(first, vec![1, 4, 0, 2, 3]);
    }

    #[test]
    fn test_sort_synonyms_ties_by_entry_index() {
        let mut records = vec![
            SynonymRecord::new("same", 5),
            SynonymRecord::new("Alpha", 9),
            SynonymRecord::new("same", 2),
            SynonymRecord::new("alpha", 1),
        ];
        sort_synonyms(&mut records);
        let got: Vec<(&str, u32)> = records
            .iter()
            .map(|r| (r.text.as_str(), r.entry_index))
            .collect();
        assert_eq!(
            got,
            vec![("Alpha", 9), ("alpha", 1), ("same", 2), ("same", 5)]
        );
    }

    #[test]
    fn test_supplementary_characters_sort_after_bmp() {
        // F0.. sorts after EF..; UTF-16 would put the surrogate pair first
        assert_eq!(compare_headwords("\u{10000}", "\u{FFFD}"), Ordering::Greater);
        assert_eq!(compare_headwords("\u{1F600}", "\u{E000}"), Ordering::Greater);
    }
}
