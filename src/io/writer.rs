//! Label file output
//!
//! One segment per line, start and end in seconds with three decimals, separated
//! by a tab. A recording without segments produces an empty file.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::analysis::result::Segment;
use crate::error::DetectionError;

/// Render segments as tab-separated lines
pub fn format_segments(segments: &[Segment]) -> String {
    let mut out = String::with_capacity(segments.len() * 20);
    for seg in segments {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{:.3}\t{:.3}", seg.start, seg.end);
    }
    out
}

/// Write segments to a label file, replacing any existing file
///
/// # Errors
///
/// Returns `DetectionError::IoError` if the file cannot be written
pub fn write_segments(path: &Path, segments: &[Segment]) -> Result<(), DetectionError> {
    fs::write(path, format_segments(segments))
        .map_err(|e| DetectionError::IoError(format!("{}: {}", path.display(), e)))?;
    log::debug!("Wrote {} segments to {}", segments.len(), path.display());
    Ok(())
}
