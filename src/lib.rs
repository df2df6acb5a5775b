//! gls-stardict - Convert dictionaries between GLS text and StarDict.
//!
//! This crate converts a dictionary in either direction between the
//! line-oriented GLS text format and the StarDict binary file set
//! (`.ifo`, `.idx`, `.dict`, `.syn`).
//!
//! # Features
//!
//! - **GLS parsing**: strict line-by-line parser with line-numbered errors
//! - **StarDict writing**: sorted `.idx`/`.idx.gz`, `.dict`, `.syn` and a
//!   derived `.ifo`
//! - **StarDict reading**: plain or gzip-compressed `.idx` and `.dict`,
//!   with synonyms merged back into their entries
//! - **Deterministic order**: output is byte-identical across runs
//!
//! # Quick Start
//!
//! ```no_run
//! use gls_stardict::{convert, ConvertOptions};
//! use std::path::Path;
//!
//! // dictionary.gls -> dictionary.ifo, .idx.gz, .dict, .syn
//! let report = convert(Path::new("dictionary.gls"), &ConvertOptions::default())?;
//! println!("{} entries, {} synonyms", report.entry_count, report.synonym_count);
//!
//! // dictionary.ifo -> dictionary.gls
//! convert(Path::new("dictionary.ifo"), &ConvertOptions::default())?;
//! # Ok::<(), gls_stardict::Error>(())
//! ```
//!
//! The codecs can also be used on their own:
//!
//! ```
//! use gls_stardict::gls::GlsParser;
//! use gls_stardict::stardict::{StarDictReader, StarDictWriter};
//!
//! let text = "### Glossary title:Test\n\nfoo|Foo\nA test word.\n\nbar\nAnother.\n";
//! let dict = GlsParser::parse(text.as_bytes())?;
//!
//! let files = StarDictWriter::new("test").write(&dict)?;
//! let back = StarDictReader::from_parts(&files.ifo, &files.idx, &files.dict, files.syn.as_deref())?;
//! assert_eq!(back.entries[0].primary(), "bar");
//! # Ok::<(), gls_stardict::Error>(())
//! ```

mod config;
mod convert;
mod dictionary;
mod error;
mod pack;

pub mod gls;
pub mod sort;
pub mod stardict;
pub mod synonym;

// Re-export core types
pub use dictionary::{Dictionary, Entry, Metadata};
pub use error::{Error, FileKind, ParseErrorKind, Result};

// Re-export the driver
pub use config::{ConvertOptions, DEFAULT_PACKER};
pub use convert::{convert, ConversionReport, Direction, GLS_EXT};
pub use pack::{pack_dict, PackOutcome};
