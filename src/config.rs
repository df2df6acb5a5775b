//! Conversion options.

use std::path::PathBuf;

/// Program used to pack `.dict` into `.dict.dz` by default.
pub const DEFAULT_PACKER: &str = "dictzip";

/// Runtime options for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Run the packer on `.dict` after a GLS -> StarDict conversion.
    pub pack_dict: bool,
    /// Packer program, invoked as `<packer> <file>.dict`.
    pub packer: String,
    /// Keep the plain `.idx` next to `.idx.gz`.
    pub keep_uncompressed_index: bool,
    /// Output path. For GLS -> StarDict only its stem matters. Defaults to
    /// the input path with its extension replaced.
    pub output: Option<PathBuf>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            pack_dict: true,
            packer: DEFAULT_PACKER.to_string(),
            keep_uncompressed_index: false,
            output: None,
        }
    }
}

impl ConvertOptions {
    /// Options that never invoke an external program.
    pub fn without_packing() -> Self {
        Self {
            pack_dict: false,
            ..Self::default()
        }
    }
}
