//! Locating and loading the files that make up a StarDict dictionary.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use super::format::*;
use crate::error::{Error, FileKind, Result};

/// A component stored either plain or gzip-compressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Plain(PathBuf),
    Gzipped(PathBuf),
}

impl Component {
    /// Path of the file on disk.
    pub fn path(&self) -> &Path {
        match self {
            Component::Plain(path) | Component::Gzipped(path) => path,
        }
    }

    /// Read the component, decompressing it if needed.
    pub fn load(&self) -> Result<Vec<u8>> {
        match self {
            Component::Plain(path) => Ok(fs::read(path)?),
            Component::Gzipped(path) => {
                let raw = fs::read(path)?;
                let data = gunzip(&raw)?;
                log::debug!(
                    "Decompressed {:?}: {} -> {} bytes",
                    path,
                    raw.len(),
                    data.len()
                );
                Ok(data)
            }
        }
    }
}

/// The file set of one StarDict dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarDictFiles {
    pub ifo: PathBuf,
    pub idx: Component,
    pub dict: Component,
    pub syn: Option<PathBuf>,
}

impl StarDictFiles {
    /// Find the companions of an `.ifo` file in its directory.
    ///
    /// Uncompressed `.idx`/`.dict` win over `.idx.gz`/`.dict.dz` when both
    /// exist. The `.syn` file is optional.
    pub fn locate(ifo: &Path) -> Result<Self> {
        if !ifo.is_file() {
            return Err(Error::MissingFile(FileKind::Ifo));
        }

        let idx = pick(ifo, IDX_EXT, IDX_GZ_EXT).ok_or(Error::MissingFile(FileKind::Idx))?;
        let dict = pick(ifo, DICT_EXT, DICT_DZ_EXT).ok_or(Error::MissingFile(FileKind::Dict))?;
        let syn = Some(ifo.with_extension(SYN_EXT)).filter(|p| p.is_file());

        Ok(Self {
            ifo: ifo.to_path_buf(),
            idx,
            dict,
            syn,
        })
    }
}

fn pick(ifo: &Path, plain: &str, gzipped: &str) -> Option<Component> {
    let plain = ifo.with_extension(plain);
    if plain.is_file() {
        return Some(Component::Plain(plain));
    }
    let gzipped = ifo.with_extension(gzipped);
    if gzipped.is_file() {
        return Some(Component::Gzipped(gzipped));
    }
    None
}

/// Decompress a whole gzip (or dictzip) buffer.
pub fn gunzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
