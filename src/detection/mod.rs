//! Redaction detection stages
//!
//! - Frame classification (smoothed high-band energy vs. `red_thresh`)
//! - Candidate extraction (edge pairing on the frame mask)
//! - Silence validation (low-band energy floor)
//! - Time mapping (frame edges to padded seconds)

pub mod classifier;
pub mod extractor;
pub mod time_mapper;
pub mod validator;

use crate::analysis::result::Segment;
use crate::config::DetectionConfig;
use crate::error::DetectionError;
use crate::features::stft::Spectrogram;
use crate::features::threshold::{estimate_thresholds, Thresholds};

use classifier::classify_frames;
use extractor::extract_candidates;
use time_mapper::{merge_overlapping, region_to_segment};
use validator::{validate_candidate, Validation};

/// Everything the detection stages produce for one spectrogram
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Thresholds estimated from the interior frames
    pub thresholds: Thresholds,

    /// Per-frame redaction mask
    pub mask: Vec<bool>,

    /// Every candidate with its validation outcome
    pub candidates: Vec<Validation>,

    /// Accepted segments, sorted and non-overlapping
    pub segments: Vec<Segment>,
}

/// Run thresholding, classification, extraction, validation and time mapping
///
/// # Errors
///
/// Returns `DetectionError` if the configuration does not fit the spectrogram or
/// the extracted edges violate the pairing invariant
pub fn run_stages(
    spectrogram: &Spectrogram,
    config: &DetectionConfig,
) -> Result<PipelineOutput, DetectionError> {
    let thresholds = estimate_thresholds(spectrogram, config)?;
    let mask = classify_frames(spectrogram, &thresholds, config)?;
    let regions = extract_candidates(&mask)?;

    let mut candidates = Vec::with_capacity(regions.len());
    let mut segments = Vec::new();
    for region in regions {
        let validation = validate_candidate(spectrogram, region, &thresholds, config)?;
        if validation.accepted {
            segments.push(region_to_segment(region, &spectrogram.times, config)?);
        }
        candidates.push(validation);
    }

    let segments = merge_overlapping(segments);

    log::debug!(
        "{} candidates, {} accepted as segments",
        candidates.len(),
        segments.len()
    );

    Ok(PipelineOutput {
        thresholds,
        mask,
        candidates,
        segments,
    })
}
