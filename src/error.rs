//! Error types for gls-stardict.

use std::fmt;

use thiserror::Error;

/// Error type for dictionary conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrong invocation shape (argument count, input extension)
    #[error("usage error: {0}")]
    Usage(String),

    /// Malformed GLS input
    #[error("Error: {kind} {} line {line}.", .kind.preposition())]
    Parse { line: usize, kind: ParseErrorKind },

    /// StarDict configuration this converter cannot handle
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A required StarDict component file is absent
    #[error("{0} file not found")]
    MissingFile(FileKind),

    /// Text in a binary file is not valid UTF-8
    #[error("invalid UTF-8 in {what} at byte {offset}")]
    InvalidUtf8 { what: &'static str, offset: usize },

    /// A binary record ends before its fixed fields
    #[error("truncated record in {file} at byte {offset}")]
    TruncatedRecord { file: FileKind, offset: usize },

    /// An index record points outside the definitions blob
    #[error("definition range {offset}+{length} exceeds .dict size {blob_len}")]
    DefinitionOutOfBounds {
        offset: u32,
        length: u32,
        blob_len: usize,
    },

    /// A synonym record references a non-existent entry
    #[error("synonym entry index {index} out of range (entry count {entry_count})")]
    SynonymIndexOutOfRange { index: u32, entry_count: usize },

    /// An entry reached a writer without any headword
    #[error("entry {index} has no headwords")]
    EmptyEntry { index: usize },

    /// Output does not fit 32-bit offsets
    #[error("{0} exceeds the 32-bit offset limit")]
    TooLarge(&'static str),
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn parse(line: usize, kind: ParseErrorKind) -> Self {
        Error::Parse { line, kind }
    }
}

/// The specific way a GLS line broke the format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("no empty line before article")]
    NoEmptyLineBeforeArticle,

    #[error("no headwords in the article")]
    NoHeadwords,

    #[error("headword should be less than {limit} bytes in the article")]
    HeadwordTooLong { limit: usize },

    #[error("wrong article format")]
    WrongArticleFormat,

    #[error("invalid UTF-8")]
    InvalidUtf8,

    /// Headword line left without a definition; reported against the
    /// line that ended it.
    #[error("wrong article format")]
    IncompleteArticle,
}

impl ParseErrorKind {
    fn preposition(&self) -> &'static str {
        match self {
            ParseErrorKind::IncompleteArticle => "before",
            _ => "at",
        }
    }
}

/// StarDict component files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Ifo,
    Idx,
    Dict,
    Syn,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Ifo => f.write_str(".ifo"),
            FileKind::Idx => f.write_str(".idx (or .idx.gz)"),
            FileKind::Dict => f.write_str(".dict (or .dict.dz)"),
            FileKind::Syn => f.write_str(".syn"),
        }
    }
}
