//! StarDict dictionary writer.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use super::format::*;
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::gls::{RESERVED_DIRECTIVES, TITLE_DIRECTIVE};
use crate::sort;
use crate::synonym;

/// Serialized StarDict files, ready to be saved.
#[derive(Debug, Clone)]
pub struct StarDictOutput {
    pub ifo: String,
    pub idx: Vec<u8>,
    pub idx_gz: Vec<u8>,
    pub dict: Vec<u8>,
    /// Absent when no entry has synonyms.
    pub syn: Option<Vec<u8>>,
    pub word_count: usize,
    pub synonym_count: usize,
}

impl StarDictOutput {
    /// Write the files next to `stem` (`<stem>.idx.gz`, `<stem>.dict`, ...).
    ///
    /// The `.ifo` file is written last. The plain `.idx` is removed once the
    /// `.idx.gz` copy exists unless `keep_idx` is set. Returns the paths left
    /// on disk.
    pub fn save(&self, stem: &Path, keep_idx: bool) -> Result<Vec<PathBuf>> {
        let idx_path = stem.with_extension(IDX_EXT);
        let idx_gz_path = stem.with_extension(IDX_GZ_EXT);
        let dict_path = stem.with_extension(DICT_EXT);
        let syn_path = stem.with_extension(SYN_EXT);
        let ifo_path = stem.with_extension(IFO_EXT);

        let mut written = Vec::new();

        log::info!("Writing .idx and .dict files...");
        fs::write(&idx_path, &self.idx)?;
        fs::write(&idx_gz_path, &self.idx_gz)?;
        written.push(idx_gz_path);
        fs::write(&dict_path, &self.dict)?;
        written.push(dict_path);

        if let Some(syn) = &self.syn {
            log::info!("Writing .syn file...");
            fs::write(&syn_path, syn)?;
            written.push(syn_path);
        }

        log::info!("Writing .ifo file...");
        fs::write(&ifo_path, &self.ifo)?;
        written.push(ifo_path);

        if keep_idx {
            written.push(idx_path);
        } else {
            fs::remove_file(&idx_path)?;
        }

        Ok(written)
    }
}

/// Serializes a [`Dictionary`] into StarDict files.
///
/// Entries are written in StarDict order (see [`sort`]); the dictionary's
/// own order only breaks ties.
pub struct StarDictWriter {
    default_title: String,
}

impl StarDictWriter {
    /// Create a writer. `default_title` is used as `bookname` when the
    /// metadata carries no title.
    pub fn new(default_title: impl Into<String>) -> Self {
        Self {
            default_title: default_title.into(),
        }
    }

    /// Build all files in memory.
    pub fn write(&self, dict: &Dictionary) -> Result<StarDictOutput> {
        dict.check_headwords()?;

        log::info!("Sorting the dictionary...");
        let order = sort::sort_order(&dict.entries);

        let mut idx = Vec::new();
        let mut blob = Vec::new();

        for (position, &read_index) in order.iter().enumerate() {
            if position % 1000 == 0 {
                log::debug!("Writing entry {}/{}", position, order.len());
            }
            let entry = &dict.entries[read_index];
            let offset = u32::try_from(blob.len()).map_err(|_| Error::TooLarge(".dict"))?;
            let length =
                u32::try_from(entry.definition.len()).map_err(|_| Error::TooLarge("definition"))?;

            push_idx_record(&mut idx, entry.primary(), offset, length);
            blob.extend_from_slice(entry.definition.as_bytes());
        }

        let mut synonyms = synonym::collect(&dict.entries, &order)?;
        sort::sort_synonyms(&mut synonyms);

        let syn = if synonyms.is_empty() {
            None
        } else {
            let mut buf = Vec::new();
            for record in &synonyms {
                push_syn_record(&mut buf, &record.text, record.entry_index);
            }
            Some(buf)
        };

        let idx_gz = gzip(&idx)?;
        let ifo = self.render_ifo(dict, synonyms.len(), idx.len());

        Ok(StarDictOutput {
            ifo,
            idx,
            idx_gz,
            dict: blob,
            syn,
            word_count: dict.len(),
            synonym_count: synonyms.len(),
        })
    }

    fn render_ifo(&self, dict: &Dictionary, synonym_count: usize, idx_size: usize) -> String {
        let title = dict
            .metadata
            .get(TITLE_DIRECTIVE)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.default_title);

        let mut ifo = format!(
            "{}\nversion={}\nbookname={}\nwordcount={}\nsynwordcount={}\nidxfilesize={}\nsametypesequence={}\n",
            IFO_MAGIC,
            IFO_VERSION,
            title,
            dict.len(),
            synonym_count,
            idx_size,
            SAME_TYPE_SEQUENCE
        );

        for (key, value) in &dict.metadata {
            if RESERVED_DIRECTIVES.contains(&key.as_str()) {
                continue;
            }
            ifo.push_str(&format!("{}={}\n", ifo_key(key), value));
        }

        ifo
    }
}

fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Entry;

    #[test]
    fn test_write_empty_dictionary() {
        let output = StarDictWriter::new("empty").write(&Dictionary::new()).unwrap();
        assert!(output.idx.is_empty());
        assert!(output.dict.is_empty());
        assert!(output.syn.is_none());
        assert!(output.ifo.contains("wordcount=0\n"));
    }

    #[test]
    fn test_ifo_layout() {
        let mut dict = Dictionary::new();
        dict.metadata.insert("Glossary title".into(), "Test".into());
        dict.metadata.insert("Author".into(), "Jane".into());
        dict.metadata.insert("Source language".into(), "en".into());
        dict.metadata.insert("Wordcount".into(), "999".into());
        dict.metadata.insert("Glossary section".into(), "".into());
        dict.entries.push(Entry::new(vec!["a".into()], "x"));

        let output = StarDictWriter::new("fallback").write(&dict).unwrap();
        assert_eq!(
            output.ifo,
            "StarDict's dict ifo file\n\
             version=2.4.2\n\
             bookname=Test\n\
             wordcount=1\n\
             synwordcount=0\n\
             idxfilesize=10\n\
             sametypesequence=h\n\
             author=Jane\n\
             source_language=en\n"
        );
    }

    #[test]
    fn test_title_falls_back_to_default() {
        let mut dict = Dictionary::new();
        dict.entries.push(Entry::new(vec!["a".into()], "x"));
        let output = StarDictWriter::new("my_dict").write(&dict).unwrap();
        assert!(output.ifo.contains("\nbookname=my_dict\n"));

        dict.metadata.insert("Glossary title".into(), "".into());
        let output = StarDictWriter::new("my_dict").write(&dict).unwrap();
        assert!(output.ifo.contains("\nbookname=my_dict\n"));
    }

    #[test]
    fn test_entry_without_headwords_is_rejected() {
        let mut dict = Dictionary::new();
        dict.entries.push(Entry::new(vec!["a".into()], "x"));
        dict.entries.push(Entry {
            headwords: Vec::new(),
            definition: "orphan".into(),
        });

        assert!(matches!(
            StarDictWriter::new("t").write(&dict),
            Err(Error::EmptyEntry { index: 1 })
        ));
    }
}
