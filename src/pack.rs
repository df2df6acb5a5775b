//! Packing `.dict` with an external compressor.
//!
//! Failure here never fails a conversion: the files already written stay
//! valid StarDict input with a plain `.dict`.

use std::path::Path;
use std::process::Command;

/// Result of the packing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackOutcome {
    /// The packer exited successfully.
    Packed,
    /// Packing was disabled or there was nothing to pack.
    Skipped,
    /// The packer could not be started or exited with an error.
    Failed(String),
}

impl PackOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, PackOutcome::Failed(_))
    }
}

/// Run `packer` on `dict_path`.
pub fn pack_dict(packer: &str, dict_path: &Path) -> PackOutcome {
    log::info!("Trying to pack the .dict file by {}...", packer);

    let outcome = match Command::new(packer).arg(dict_path).output() {
        Ok(output) if output.status.success() => PackOutcome::Packed,
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            PackOutcome::Failed(format!("{} ({})", output.status, stderr.trim()))
        }
        Err(e) => PackOutcome::Failed(e.to_string()),
    };

    match &outcome {
        PackOutcome::Packed => log::info!(".dict file is packed successfully."),
        PackOutcome::Failed(reason) => log::warn!("{} error: {}", packer, reason),
        PackOutcome::Skipped => {}
    }

    outcome
}
