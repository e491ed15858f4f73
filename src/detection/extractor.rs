//! Candidate region extraction
//!
//! Turns the per-frame mask into `(start, end)` index pairs by edge detection on
//! the first difference `diff[i] = mask[i + 1] - mask[i]`.
//!
//! A run touching the start of the recording has no rising edge, so `diff[0]` is
//! forced to `+1` when `mask[0]` is set; likewise `diff[n - 2]` is forced to `-1`
//! when the last frame is set. The nonzero indices then alternate rise/fall and
//! are paired in order.
//!
//! Indices are positions in the difference array: a rise at `s` means frame
//! `s + 1` is the first masked frame (frame 0 for a forced rise), and a fall at
//! `e` means frame `e` is the last masked frame.

use crate::error::DetectionError;
use serde::{Deserialize, Serialize};

/// A candidate region in difference-array index space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRegion {
    /// Rising edge index
    pub start: usize,

    /// Falling edge index (last masked frame)
    pub end: usize,
}

impl CandidateRegion {
    /// Number of frames between the two edges (`end - start`)
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the edges coincide
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Extract candidate regions from a frame mask
///
/// # Arguments
///
/// * `mask` - One flag per frame, `true` where the frame looks redacted
///
/// # Returns
///
/// Candidate regions in ascending order; empty if no frame is set or the mask
/// has fewer than two frames
///
/// # Errors
///
/// Returns `DetectionError::InvariantViolation` if the edges cannot be paired,
/// which happens when a run at either end of the mask is a single frame
pub fn extract_candidates(mask: &[bool]) -> Result<Vec<CandidateRegion>, DetectionError> {
    if mask.len() < 2 {
        return Ok(Vec::new());
    }

    let mut diff: Vec<i8> = mask
        .windows(2)
        .map(|w| w[1] as i8 - w[0] as i8)
        .collect();

    if mask[0] {
        diff[0] = 1;
    }
    let last = diff.len() - 1;
    if mask[mask.len() - 1] {
        diff[last] = -1;
    }

    let edges: Vec<usize> = diff
        .iter()
        .enumerate()
        .filter(|(_, &d)| d != 0)
        .map(|(i, _)| i)
        .collect();

    if edges.len() % 2 != 0 {
        return Err(DetectionError::InvariantViolation(format!(
            "Odd number of region edges ({}) in mask of {} frames",
            edges.len(),
            mask.len()
        )));
    }

    let mut candidates = Vec::with_capacity(edges.len() / 2);
    for pair in edges.chunks_exact(2) {
        let (start, end) = (pair[0], pair[1]);

        if diff[start] != 1 || diff[end] != -1 {
            return Err(DetectionError::InvariantViolation(format!(
                "Edges at {} and {} do not form a rise/fall pair",
                start, end
            )));
        }

        // First masked frame is the one after the rise, except for a forced rise at 0
        let first_frame = if start == 0 && mask[0] { 0 } else { start + 1 };
        if !mask[first_frame] || !mask[end] {
            return Err(DetectionError::InvariantViolation(format!(
                "Region [{}, {}] does not cover masked frames",
                start, end
            )));
        }

        candidates.push(CandidateRegion { start, end });
    }

    log::debug!(
        "Extracted {} candidate regions from {} frames",
        candidates.len(),
        mask.len()
    );

    Ok(candidates)
}
