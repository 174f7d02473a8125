//! Rewriting atlas files on disk.
//!
//! The atlas generator writes a plain RGBA PNG. These helpers decode it,
//! run it through an [`IndexedEncoder`] and write the indexed result back,
//! either in place or as a tinted preview copy.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::encode::{EncodeSummary, IndexedEncoder};
use crate::error::EncodeError;
use crate::raster::Named;
use crate::tint::Tint;

/// What happened to a file handed to [`process_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The file did not exist.
    Skipped,
    /// The file was re-encoded.
    Encoded(EncodeSummary),
}

/// Re-encode the PNG at `path` in place.
///
/// The file is only replaced once the whole image has been encoded, so a
/// marker violation leaves the original untouched.
pub fn process_file(
    encoder: &mut IndexedEncoder,
    path: &Path,
    tint: Tint,
) -> Result<ProcessOutcome, EncodeError> {
    if !path.exists() {
        warn!(
            "The specified file {} does not exist; skipping.",
            path.display()
        );
        return Ok(ProcessOutcome::Skipped);
    }

    let mut atlas = image::open(path)?.to_rgba8();
    let name = path.display().to_string();
    let mut raster = Named::new(&name, &mut atlas);
    let (png, summary) = encoder.encode_to_vec(&mut raster, tint)?;
    fs::write(path, &png)?;

    info!("Rewrote {name} ({} bytes)", png.len());
    Ok(ProcessOutcome::Encoded(summary))
}

/// Copy the atlas at `atlas` to `preview` and re-encode the copy with `tint`.
///
/// The atlas itself is not modified.
pub fn process_preview(
    encoder: &mut IndexedEncoder,
    atlas: &Path,
    preview: &Path,
    tint: Tint,
) -> Result<ProcessOutcome, EncodeError> {
    if !atlas.exists() {
        warn!(
            "The specified file {} does not exist; skipping.",
            atlas.display()
        );
        return Ok(ProcessOutcome::Skipped);
    }
    if let Some(parent) = preview.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(atlas, preview)?;
    process_file(encoder, preview, tint)
}
