//! Temporal smoothing of per-frame energy curves

use crate::error::DetectionError;

/// Sliding median filter
///
/// Each output is the median of the `window` values centred on the same index.
/// Positions that fall outside the input are treated as zero, so callers that
/// care about the edges should pad the curve themselves first (see
/// [`pad_constant`]).
///
/// # Arguments
///
/// * `values` - Input curve
/// * `window` - Window width in samples, must be odd
///
/// # Returns
///
/// Smoothed curve with the same length as the input
///
/// # Errors
///
/// Returns `DetectionError::InvalidConfig` if the window is even or zero
pub fn median_filter(values: &[f64], window: usize) -> Result<Vec<f64>, DetectionError> {
    if window == 0 || window % 2 == 0 {
        return Err(DetectionError::InvalidConfig(format!(
            "Median filter window must be odd, got {}",
            window
        )));
    }

    let half = window / 2;
    let n = values.len();
    let mut scratch = vec![0.0f64; window];
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        for (k, slot) in scratch.iter_mut().enumerate() {
            // Index i + k - half, with zero outside [0, n)
            *slot = (i + k)
                .checked_sub(half)
                .and_then(|j| values.get(j))
                .copied()
                .unwrap_or(0.0);
        }
        let (_, mid, _) = scratch.select_nth_unstable_by(half, f64::total_cmp);
        out.push(*mid);
    }

    Ok(out)
}

/// Pad a curve with `width` copies of `value` on both ends
pub fn pad_constant(values: &[f64], width: usize, value: f64) -> Vec<f64> {
    let mut padded = Vec::with_capacity(values.len() + 2 * width);
    padded.resize(width, value);
    padded.extend_from_slice(values);
    padded.resize(values.len() + 2 * width, value);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_isolated_spike() {
        let values = vec![1.0, 1.0, 9.0, 1.0, 1.0];
        let smoothed = median_filter(&values, 3).unwrap();
        assert_eq!(smoothed[2], 1.0);
    }

    #[test]
    fn test_preserves_step_edge() {
        let values = vec![0.0, 0.0, 0.0, 5.0, 5.0, 5.0, 5.0];
        let smoothed = median_filter(&values, 3).unwrap();
        assert_eq!(&smoothed[1..6], &[0.0, 0.0, 5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_zero_fill_at_edges() {
        let values = vec![4.0, 4.0, 4.0];
        let smoothed = median_filter(&values, 5).unwrap();
        // Edge windows hold two zeros and three fours
        assert_eq!(smoothed, vec![4.0, 4.0, 4.0]);

        let values = vec![4.0, 4.0];
        let smoothed = median_filter(&values, 5).unwrap();
        assert_eq!(smoothed, vec![0.0, 0.0]);
    }

    #[test]
    fn test_window_one_is_identity() {
        let values = vec![3.0, -1.0, 2.0];
        assert_eq!(median_filter(&values, 1).unwrap(), values);
    }

    #[test]
    fn test_even_window_rejected() {
        assert!(median_filter(&[1.0, 2.0], 4).is_err());
        assert!(median_filter(&[1.0, 2.0], 0).is_err());
    }

    #[test]
    fn test_pad_constant() {
        let padded = pad_constant(&[1.0, 2.0], 2, 7.0);
        assert_eq!(padded, vec![7.0, 7.0, 1.0, 2.0, 7.0, 7.0]);
        assert!(pad_constant(&[], 0, 1.0).is_empty());
    }
}
