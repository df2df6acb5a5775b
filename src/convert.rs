//! Conversion driver.
//!
//! Picks the direction from the input extension and runs the phases in
//! order: read, then (for StarDict output) sort and serialize, then write.
//! Every fallible phase completes before the first output file is created,
//! so a parse error leaves the file system untouched.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::ConvertOptions;
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::gls::{GlsParser, GlsWriter};
use crate::pack::{pack_dict, PackOutcome};
use crate::stardict::{StarDictFiles, StarDictReader, StarDictWriter, DICT_EXT, IFO_EXT};

/// Extension of GLS text dictionaries.
pub const GLS_EXT: &str = "gls";

/// Conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    GlsToStarDict,
    StarDictToGls,
}

impl Direction {
    /// Pick the direction from an input path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(GLS_EXT) => Ok(Direction::GlsToStarDict),
            Some(IFO_EXT) => Ok(Direction::StarDictToGls),
            _ => Err(Error::Usage(format!(
                "expected a .{} or .{} file, got {:?}",
                GLS_EXT, IFO_EXT, path
            ))),
        }
    }
}

/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub direction: Direction,
    pub entry_count: usize,
    pub synonym_count: usize,
    /// Files left on disk, in the order they were written.
    pub written: Vec<PathBuf>,
    pub pack: PackOutcome,
}

/// Convert `input` in the direction its extension selects.
pub fn convert(input: &Path, options: &ConvertOptions) -> Result<ConversionReport> {
    let direction = Direction::from_path(input)?;
    let context = ConversionContext { input, options };

    let report = match direction {
        Direction::GlsToStarDict => context.gls_to_stardict()?,
        Direction::StarDictToGls => context.stardict_to_gls()?,
    };

    log::info!(
        "{} articles with {} synonyms saved.",
        report.entry_count,
        report.synonym_count
    );
    Ok(report)
}

/// Inputs shared by the phases of one run.
struct ConversionContext<'a> {
    input: &'a Path,
    options: &'a ConvertOptions,
}

impl ConversionContext<'_> {
    fn gls_to_stardict(&self) -> Result<ConversionReport> {
        log::info!("Reading .gls file...");
        let dict = GlsParser::parse(File::open(self.input)?)?;

        if dict.is_empty() {
            log::warn!("No articles found in {:?}; nothing written", self.input);
            return Ok(self.empty_report(Direction::GlsToStarDict));
        }

        let title = self
            .input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = StarDictWriter::new(title).write(&dict)?;

        let stem = self.output_path(IFO_EXT);
        let written = output.save(&stem, self.options.keep_uncompressed_index)?;

        let pack = if self.options.pack_dict {
            pack_dict(&self.options.packer, &stem.with_extension(DICT_EXT))
        } else {
            PackOutcome::Skipped
        };

        Ok(ConversionReport {
            direction: Direction::GlsToStarDict,
            entry_count: output.word_count,
            synonym_count: output.synonym_count,
            written,
            pack,
        })
    }

    fn stardict_to_gls(&self) -> Result<ConversionReport> {
        let files = StarDictFiles::locate(self.input)?;
        log::debug!("Located StarDict files: {:?}", files);

        let dict = StarDictReader::read(&files)?;

        if dict.is_empty() {
            log::warn!("No articles found in {:?}; nothing written", self.input);
            return Ok(self.empty_report(Direction::StarDictToGls));
        }

        log::info!("Writing .gls file...");
        let path = self.output_path(GLS_EXT);
        write_gls(&dict, &path)?;

        Ok(ConversionReport {
            direction: Direction::StarDictToGls,
            entry_count: dict.len(),
            synonym_count: dict.synonym_count(),
            written: vec![path],
            pack: PackOutcome::Skipped,
        })
    }

    fn output_path(&self, default_ext: &str) -> PathBuf {
        match &self.options.output {
            Some(path) => path.clone(),
            None => self.input.with_extension(default_ext),
        }
    }

    fn empty_report(&self, direction: Direction) -> ConversionReport {
        ConversionReport {
            direction,
            entry_count: 0,
            synonym_count: 0,
            written: Vec::new(),
            pack: PackOutcome::Skipped,
        }
    }
}

/// Write GLS through a temp file in the target directory, then rename.
fn write_gls(dict: &Dictionary, path: &Path) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let temp = NamedTempFile::new_in(dir)?;
    let mut out = BufWriter::new(temp);
    GlsWriter::write(dict, &mut out)?;
    out.flush()?;

    let temp = out.into_inner().map_err(|e| e.into_error())?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
