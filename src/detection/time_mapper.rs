//! Frame-to-time mapping
//!
//! An accepted region `[s, e]` becomes `(times[s] + t_adj_lo, times[e] + t_adj_hi)`.
//! The offsets are empirical: the start offset accounts for the rise index
//! being one frame before the first masked frame and for the filter's transition,
//! the end offset for detection lag at region offset.

use crate::analysis::result::Segment;
use crate::config::DetectionConfig;
use crate::detection::extractor::CandidateRegion;
use crate::error::DetectionError;

/// Map a region's edge indices to a time segment
///
/// # Errors
///
/// Returns `DetectionError::InvalidInput` if an edge index has no frame time
pub fn region_to_segment(
    region: CandidateRegion,
    times: &[f64],
    config: &DetectionConfig,
) -> Result<Segment, DetectionError> {
    let (start, end) = match (times.get(region.start), times.get(region.end)) {
        (Some(&start), Some(&end)) => (start, end),
        _ => {
            return Err(DetectionError::InvalidInput(format!(
                "Region [{}, {}] outside time axis of {} frames",
                region.start,
                region.end,
                times.len()
            )))
        }
    };

    Ok(Segment::new(start + config.t_adj_lo, end + config.t_adj_hi))
}

/// Merge segments whose padded intervals overlap
///
/// Input must be sorted by start time. Two regions separated by a gap shorter
/// than `t_adj_hi - t_adj_lo` overlap once padded; they are reported as one.
pub fn merge_overlapping(segments: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for seg in segments {
        match merged.last_mut() {
            Some(prev) if seg.start < prev.end => {
                log::debug!(
                    "Merging overlapping segments [{:.3}, {:.3}] and [{:.3}, {:.3}]",
                    prev.start,
                    prev.end,
                    seg.start,
                    seg.end
                );
                prev.end = prev.end.max(seg.end);
            }
            _ => merged.push(seg),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::extractor::extract_candidates;
    use crate::features::stft::compute_stft;

    fn times(n: usize) -> Vec<f64> {
        (0..n).map(|m| m as f64 * 0.008).collect()
    }

    #[test]
    fn test_padding_applied() {
        let config = DetectionConfig::default();
        let seg = region_to_segment(CandidateRegion { start: 10, end: 135 }, &times(200), &config)
            .unwrap();
        assert!((seg.start - (0.08 + 0.02)).abs() < 1e-12);
        assert!((seg.end - (1.08 + 0.08)).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_region() {
        let config = DetectionConfig::default();
        let result = region_to_segment(CandidateRegion { start: 10, end: 200 }, &times(200), &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_fully_masked_recording_spans_everything() {
        let config = DetectionConfig::default();
        let samples = vec![0.1f32; 16000 * 10];
        let spec = compute_stft(&samples, 16000, config.nfft, config.window_len).unwrap();
        assert_eq!(spec.n_frames(), 1251);

        let candidates = extract_candidates(&vec![true; spec.n_frames()]).unwrap();
        assert_eq!(candidates, vec![CandidateRegion { start: 0, end: 1249 }]);

        let seg = region_to_segment(candidates[0], &spec.times, &config).unwrap();
        assert!((seg.start - 0.02).abs() < 1e-9);
        assert!((seg.end - 10.072).abs() < 1e-9);
    }

    #[test]
    fn test_merge_overlapping() {
        let merged = merge_overlapping(vec![
            Segment::new(0.1, 0.5),
            Segment::new(0.45, 0.9),
            Segment::new(2.0, 3.0),
        ]);
        assert_eq!(merged, vec![Segment::new(0.1, 0.9), Segment::new(2.0, 3.0)]);
    }

    #[test]
    fn test_touching_segments_not_merged() {
        let merged = merge_overlapping(vec![Segment::new(0.0, 1.0), Segment::new(1.0, 2.0)]);
        assert_eq!(merged.len(), 2);
    }
}
