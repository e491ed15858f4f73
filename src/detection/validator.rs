//! Silence rejection for candidate regions
//!
//! A region that is quiet in the high band *and* in the low band for nearly its
//! whole length is far more likely to be a pause than filtered speech, since a
//! low-pass filter leaves the low band intact. Candidates whose low-band energy
//! sits below `min_lower_ener` for at least `ener_thresh_ratio` of their length
//! are dropped.

use crate::config::DetectionConfig;
use crate::detection::extractor::CandidateRegion;
use crate::error::DetectionError;
use crate::features::band_energy::{band_energy, Band};
use crate::features::stft::Spectrogram;
use crate::features::threshold::Thresholds;
use serde::{Deserialize, Serialize};

/// Outcome of validating one candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    /// The candidate that was checked
    pub region: CandidateRegion,

    /// Frames in the region with low-band energy below `min_lower_ener`
    pub quiet_frames: usize,

    /// Whether the region is kept
    pub accepted: bool,
}

/// Decide whether a candidate is filtered speech or silence
///
/// Low-band energy is read for frames `start + 1 ..= end`, which lines up with
/// the difference-array indexing used by the extractor.
///
/// # Errors
///
/// Returns `DetectionError::InvalidInput` if the region lies outside the spectrogram
pub fn validate_candidate(
    spectrogram: &Spectrogram,
    region: CandidateRegion,
    thresholds: &Thresholds,
    config: &DetectionConfig,
) -> Result<Validation, DetectionError> {
    if region.end < region.start {
        return Err(DetectionError::InvalidInput(format!(
            "Region end {} precedes start {}",
            region.end, region.start
        )));
    }

    let lower = band_energy(
        spectrogram,
        Band::Low,
        config.cutoff_bin,
        region.start + 1..region.end + 1,
        config.eps,
    )?;

    let quiet_frames = lower
        .iter()
        .filter(|&&e| e < thresholds.min_lower_ener)
        .count();

    let accepted = (quiet_frames as f64) < config.ener_thresh_ratio * region.len() as f64;

    if !accepted {
        log::debug!(
            "Rejecting region [{}, {}] as silence: {}/{} quiet low-band frames",
            region.start,
            region.end,
            quiet_frames,
            region.len()
        );
    }

    Ok(Validation {
        region,
        quiet_frames,
        accepted,
    })
}
