//! StarDict dictionary reader.

use std::fs;

use super::files::StarDictFiles;
use super::format::*;
use crate::dictionary::{Dictionary, Entry};
use crate::error::{Error, Result};
use crate::synonym;

/// Reads a StarDict file set into a [`Dictionary`].
///
/// Entries keep `.idx` order. Synonyms from `.syn` are appended to the
/// headwords of the entries they reference, in `.syn` order.
pub struct StarDictReader;

impl StarDictReader {
    /// Read and decode every file in `files`.
    pub fn read(files: &StarDictFiles) -> Result<Dictionary> {
        log::info!("Reading .ifo file...");
        let ifo = fs::read_to_string(&files.ifo)?;

        // Reject unsupported layouts before touching the larger files
        check_ifo(&parse_ifo(&ifo))?;

        let syn = match &files.syn {
            Some(path) => {
                log::info!("Reading .syn file...");
                Some(fs::read(path)?)
            }
            None => None,
        };

        log::info!("Reading .idx and .dict files...");
        let idx = files.idx.load()?;
        let dict = files.dict.load()?;

        Self::from_parts(&ifo, &idx, &dict, syn.as_deref())
    }

    /// Decode already-loaded (and decompressed) file contents.
    pub fn from_parts(ifo: &str, idx: &[u8], dict: &[u8], syn: Option<&[u8]>) -> Result<Dictionary> {
        let metadata = parse_ifo(ifo);
        check_ifo(&metadata)?;

        let records = decode_idx(idx)?;
        let mut entries = Vec::with_capacity(records.len());

        for (i, record) in records.into_iter().enumerate() {
            if i % 1000 == 0 {
                log::debug!("Processing .idx record {}", i);
            }
            let definition = definition(dict, record.offset, record.length)?;
            entries.push(Entry::new(vec![record.headword], definition));
        }

        if let Some(syn) = syn {
            let records = decode_syn(syn)?;
            if !records.is_empty() {
                log::info!("Adding {} synonyms...", records.len());
            }
            synonym::merge(&mut entries, records)?;
        }

        Ok(Dictionary { metadata, entries })
    }
}

fn definition(blob: &[u8], offset: u32, length: u32) -> Result<String> {
    let start = offset as usize;
    let bytes = start
        .checked_add(length as usize)
        .and_then(|end| blob.get(start..end))
        .ok_or(Error::DefinitionOutOfBounds {
            offset,
            length,
            blob_len: blob.len(),
        })?;

    let text = std::str::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
        what: "definition",
        offset: start + e.valid_up_to(),
    })?;

    Ok(text.to_string())
}
