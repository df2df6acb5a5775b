//! StarDict file constants and record codecs.
//!
//! # Records
//!
//! All integers are unsigned 32-bit big-endian.
//!
//! ```text
//! .idx   headword \0 | offset u32 | length u32     (repeated)
//! .syn   synonym  \0 | entry index u32             (repeated)
//! .dict  definition bytes, addressed by (offset, length)
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dictionary::Metadata;
use crate::error::{Error, FileKind, Result};
use crate::synonym::SynonymRecord;

pub const IFO_EXT: &str = "ifo";
pub const IDX_EXT: &str = "idx";
pub const IDX_GZ_EXT: &str = "idx.gz";
pub const DICT_EXT: &str = "dict";
pub const DICT_DZ_EXT: &str = "dict.dz";
pub const SYN_EXT: &str = "syn";

/// First line of every `.ifo` file.
pub const IFO_MAGIC: &str = "StarDict's dict ifo file";

/// `.ifo` format version written by this crate.
pub const IFO_VERSION: &str = "2.4.2";

/// The only supported `sametypesequence`: plain-text definitions.
pub const SAME_TYPE_SEQUENCE: &str = "h";

/// Width of every integer field in `.idx` and `.syn` records.
pub const INT_SIZE: usize = 4;

/// `.ifo` keys derived from the files themselves rather than carried as
/// dictionary content.
pub const BOOKKEEPING_KEYS: &[&str] = &[
    "version",
    "wordcount",
    "synwordcount",
    "idxfilesize",
    "idxoffsetbits",
    "sametypesequence",
];

static IFO_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\w+)\s*=\s*(.*)").expect("valid ifo line regex"));

/// Parse `.ifo` text into metadata.
///
/// Lines that are not `key=value` (such as the magic line) are skipped.
pub fn parse_ifo(text: &str) -> Metadata {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let mut metadata = Metadata::new();

    for line in text.split(['\r', '\n']) {
        if let Some(caps) = IFO_LINE.captures(line) {
            metadata.insert(caps[1].to_string(), caps[2].to_string());
        }
    }

    metadata
}

/// Reject configurations other than 32-bit offsets with `sametypesequence=h`.
pub fn check_ifo(metadata: &Metadata) -> Result<()> {
    if metadata.get("sametypesequence").map(String::as_str) != Some(SAME_TYPE_SEQUENCE) {
        return Err(Error::UnsupportedFormat(format!(
            "Only StarDict's dictionaries with 'sametypesequence={}' are supported.",
            SAME_TYPE_SEQUENCE
        )));
    }
    if metadata.get("idxoffsetbits").map(String::as_str) == Some("64") {
        return Err(Error::UnsupportedFormat(
            "Only StarDict's dictionaries with 'idxoffsetbits=32' are supported.".to_string(),
        ));
    }
    Ok(())
}

/// Render a GLS directive key as an `.ifo` key.
pub fn ifo_key(directive: &str) -> String {
    directive.to_lowercase().replace(' ', "_")
}

/// One `.idx` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdxRecord {
    pub headword: String,
    pub offset: u32,
    pub length: u32,
}

/// Append an `.idx` record.
pub fn push_idx_record(buf: &mut Vec<u8>, headword: &str, offset: u32, length: u32) {
    buf.extend_from_slice(headword.as_bytes());
    buf.push(0);
    buf.extend_from_slice(&offset.to_be_bytes());
    buf.extend_from_slice(&length.to_be_bytes());
}

/// Append a `.syn` record.
pub fn push_syn_record(buf: &mut Vec<u8>, synonym: &str, entry_index: u32) {
    buf.extend_from_slice(synonym.as_bytes());
    buf.push(0);
    buf.extend_from_slice(&entry_index.to_be_bytes());
}

/// Decode a whole `.idx` buffer.
pub fn decode_idx(data: &[u8]) -> Result<Vec<IdxRecord>> {
    let mut cursor = RecordCursor::new(data, FileKind::Idx);
    let mut records = Vec::new();

    while !cursor.is_empty() {
        let headword = cursor.read_str("headword")?;
        let offset = cursor.read_u32()?;
        let length = cursor.read_u32()?;
        records.push(IdxRecord {
            headword,
            offset,
            length,
        });
    }

    Ok(records)
}

/// Decode a whole `.syn` buffer.
pub fn decode_syn(data: &[u8]) -> Result<Vec<SynonymRecord>> {
    let mut cursor = RecordCursor::new(data, FileKind::Syn);
    let mut records = Vec::new();

    while !cursor.is_empty() {
        let text = cursor.read_str("synonym")?;
        let entry_index = cursor.read_u32()?;
        records.push(SynonymRecord { text, entry_index });
    }

    Ok(records)
}

/// Bounds-checked reader over NUL-terminated records.
struct RecordCursor<'a> {
    data: &'a [u8],
    pos: usize,
    file: FileKind,
}

impl<'a> RecordCursor<'a> {
    fn new(data: &'a [u8], file: FileKind) -> Self {
        Self { data, pos: 0, file }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn truncated(&self) -> Error {
        Error::TruncatedRecord {
            file: self.file,
            offset: self.pos,
        }
    }

    fn read_str(&mut self, what: &'static str) -> Result<String> {
        let data: &'a [u8] = self.data;
        let rest = &data[self.pos..];
        let len = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| self.truncated())?;

        let text = std::str::from_utf8(&rest[..len]).map_err(|e| Error::InvalidUtf8 {
            what,
            offset: self.pos + e.valid_up_to(),
        })?;

        self.pos += len + 1;
        Ok(text.to_string())
    }

    fn read_u32(&mut self) -> Result<u32> {
        let bytes: [u8; INT_SIZE] = self
            .data
            .get(self.pos..self.pos + INT_SIZE)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| self.truncated())?;
        self.pos += INT_SIZE;
        Ok(u32::from_be_bytes(bytes))
    }
}
