//! Detection result types

use serde::{Deserialize, Serialize};

use crate::detection::validator::Validation;
use crate::features::threshold::Thresholds;

/// A suspected redacted interval in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,
}

impl Segment {
    /// Create a segment
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the segment in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether two segments share any time
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl From<[f64; 2]> for Segment {
    fn from(pair: [f64; 2]) -> Self {
        Segment::new(pair[0], pair[1])
    }
}

/// Complete detection result for one recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Accepted segments, sorted by start time and non-overlapping
    pub segments: Vec<Segment>,

    /// Every candidate region with its validation outcome
    pub candidates: Vec<Validation>,

    /// Thresholds used for this recording (`None` when the recording was too
    /// short to analyze)
    pub thresholds: Option<Thresholds>,

    /// Run metadata
    pub metadata: DetectionMetadata,
}

impl DetectionMetadata {
    /// Fraction of frames classified as redacted (0 when there are no frames)
    pub fn mask_coverage(&self) -> f64 {
        if self.n_frames == 0 {
            return 0.0;
        }
        self.masked_frames as f64 / self.n_frames as f64
    }
}

impl DetectionResult {
    /// Number of candidates rejected as silence
    pub fn rejected_count(&self) -> usize {
        self.candidates.iter().filter(|v| !v.accepted).count()
    }

    /// Total duration covered by the accepted segments in seconds
    pub fn redacted_seconds(&self) -> f64 {
        self.segments.iter().map(Segment::duration).sum()
    }
}

/// Detection metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionMetadata {
    /// Audio duration in seconds
    pub duration_seconds: f64,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of spectrogram frames
    pub n_frames: usize,

    /// Frames classified as redacted before validation
    pub masked_frames: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Crate version that produced the result
    pub algorithm_version: String,

    /// Notes about degenerate input (e.g. too short to analyze)
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_overlap() {
        let a = Segment::new(1.0, 2.0);
        assert!(a.overlaps(&Segment::new(1.5, 3.0)));
        assert!(!a.overlaps(&Segment::new(2.0, 3.0)));
        assert!((a.duration() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mask_coverage() {
        let mut metadata = DetectionMetadata {
            duration_seconds: 10.0,
            sample_rate: 16000,
            n_frames: 0,
            masked_frames: 0,
            processing_time_ms: 0.0,
            algorithm_version: "0.1.0".to_string(),
            warnings: vec![],
        };
        assert_eq!(metadata.mask_coverage(), 0.0);

        metadata.n_frames = 1000;
        metadata.masked_frames = 250;
        assert!((metadata.mask_coverage() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_segment_json_shape() {
        let json = serde_json::to_string(&Segment::new(1.25, 2.5)).unwrap();
        assert_eq!(json, r#"{"start":1.25,"end":2.5}"#);
    }
}
