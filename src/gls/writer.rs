//! GLS text format writer.

use std::io::Write;

use super::format::*;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::stardict::BOOKKEEPING_KEYS;

/// Serializes a dictionary as GLS, in the given entry order.
pub struct GlsWriter;

impl GlsWriter {
    /// Write `dict` to `out`.
    pub fn write<W: Write>(dict: &Dictionary, mut out: W) -> Result<()> {
        dict.check_headwords()?;

        write!(out, "{}", BOM)?;

        for (key, value) in &dict.metadata {
            if BOOKKEEPING_KEYS.contains(&key.as_str()) {
                continue;
            }
            writeln!(out, "### {}:{}", directive_key(key), value)?;
        }
        write!(out, "### {}:\n\n", SECTION_DIRECTIVE)?;

        for (i, entry) in dict.entries.iter().enumerate() {
            if i % 1000 == 0 {
                log::debug!("Writing article {}/{}", i, dict.len());
            }
            write!(
                out,
                "{}\n{}\n\n",
                entry.headwords.join("|"),
                entry.definition
            )?;
        }

        out.flush()?;
        Ok(())
    }

    /// Serialize `dict` into a byte buffer.
    pub fn to_bytes(dict: &Dictionary) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::write(dict, &mut buffer)?;
        Ok(buffer)
    }
}
