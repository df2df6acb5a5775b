//! GLS text format parser.

use std::io::{BufRead, BufReader, Read};

use super::format::*;
use crate::dictionary::{Dictionary, Entry};
use crate::error::{Error, ParseErrorKind, Result};

/// Lines of the article currently being read.
#[derive(Debug, Default)]
enum PendingArticle {
    #[default]
    Empty,
    Headwords(Vec<String>),
    Complete(Vec<String>, String),
}

/// Line-driven GLS parser.
///
/// Feed lines with [`GlsParser::feed_line`] and collect the result with
/// [`GlsParser::finish`], or use [`GlsParser::parse`] on a reader. The first
/// error aborts the parse; no partial dictionary is returned.
#[derive(Debug)]
pub struct GlsParser {
    dictionary: Dictionary,
    line_number: usize,
    in_directive_zone: bool,
    has_directives: bool,
    blank_run: usize,
    article: PendingArticle,
}

impl GlsParser {
    /// Create a parser positioned before the first line.
    pub fn new() -> Self {
        Self {
            dictionary: Dictionary::new(),
            line_number: 0,
            in_directive_zone: true,
            has_directives: false,
            blank_run: 0,
            article: PendingArticle::Empty,
        }
    }

    /// Parse a whole GLS document from a reader.
    ///
    /// `\r\n`, `\n` and a lone `\r` all end a line.
    pub fn parse<R: Read>(reader: R) -> Result<Dictionary> {
        let mut parser = Self::new();
        let mut reader = BufReader::new(reader);
        let mut chunk = Vec::new();

        loop {
            chunk.clear();
            if reader.read_until(b'\n', &mut chunk)? == 0 {
                break;
            }

            for raw in split_lines(&chunk) {
                let line = std::str::from_utf8(raw).map_err(|_| {
                    Error::parse(parser.line_number + 1, ParseErrorKind::InvalidUtf8)
                })?;
                parser.feed_line(line)?;

                if parser.line_number % 10_000 == 0 {
                    log::debug!(
                        "Parsed {} lines, {} articles",
                        parser.line_number,
                        parser.dictionary.len()
                    );
                }
            }
        }

        parser.finish()
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Consume one line (without its terminator).
    pub fn feed_line(&mut self, raw: &str) -> Result<()> {
        self.line_number += 1;

        let line = if self.line_number == 1 {
            let line = raw.strip_prefix(BOM).unwrap_or(raw).trim();
            if is_article_line(line) {
                return Err(self.error(ParseErrorKind::NoEmptyLineBeforeArticle));
            }
            line
        } else {
            raw.trim()
        };

        if line.is_empty() {
            self.blank_run += 1;
            if self.has_directives {
                self.in_directive_zone = false;
            }
            if !self.in_directive_zone {
                self.flush_article()?;
            }
        } else if is_article_line(line) || !self.in_directive_zone {
            self.article_line(line)?;
        } else {
            self.blank_run = 0;
            if let Some((key, value)) = parse_directive(line) {
                self.dictionary
                    .metadata
                    .insert(key.to_string(), value.to_string());
                self.has_directives = true;
            }
        }

        Ok(())
    }

    /// Flush the last article and return the dictionary.
    pub fn finish(mut self) -> Result<Dictionary> {
        self.flush_article()?;
        Ok(self.dictionary)
    }

    fn article_line(&mut self, line: &str) -> Result<()> {
        self.article = match std::mem::take(&mut self.article) {
            PendingArticle::Empty => {
                if self.blank_run == 0 {
                    return Err(self.error(ParseErrorKind::NoEmptyLineBeforeArticle));
                }
                self.in_directive_zone = false;
                self.blank_run = 0;
                PendingArticle::Headwords(self.headwords(line)?)
            }
            PendingArticle::Headwords(headwords) => {
                PendingArticle::Complete(headwords, line.to_string())
            }
            PendingArticle::Complete(..) => {
                return Err(self.error(ParseErrorKind::WrongArticleFormat));
            }
        };
        Ok(())
    }

    fn headwords(&self, line: &str) -> Result<Vec<String>> {
        let headwords = split_headwords(line);

        if headwords.is_empty() {
            return Err(self.error(ParseErrorKind::NoHeadwords));
        }
        if headwords.iter().any(|hw| hw.len() >= HEADWORD_LIMIT) {
            return Err(self.error(ParseErrorKind::HeadwordTooLong {
                limit: HEADWORD_LIMIT,
            }));
        }

        Ok(headwords)
    }

    fn flush_article(&mut self) -> Result<()> {
        match std::mem::take(&mut self.article) {
            PendingArticle::Empty => Ok(()),
            PendingArticle::Complete(headwords, definition) => {
                self.dictionary
                    .entries
                    .push(Entry::new(headwords, definition));
                Ok(())
            }
            PendingArticle::Headwords(_) => Err(self.error(ParseErrorKind::IncompleteArticle)),
        }
    }

    fn error(&self, kind: ParseErrorKind) -> Error {
        Error::parse(self.line_number, kind)
    }
}

/// Split a chunk read up to `\n` (or end of input) into lines.
fn split_lines(chunk: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = chunk.strip_suffix(b"\n").unwrap_or(chunk);
    let body = body.strip_suffix(b"\r").unwrap_or(body);
    body.split(|&b| b == b'\r')
}

impl Default for GlsParser {
    fn default() -> Self {
        Self::new()
    }
}
