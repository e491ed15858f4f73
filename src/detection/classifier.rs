//! Frame classification
//!
//! Marks every frame whose median-smoothed high-band energy falls strictly below
//! `red_thresh`. The whole recording is classified, including the margins that
//! threshold estimation skipped.
//!
//! Before smoothing, the energy curve is padded on both ends with
//! `(median_window + 1) / 2` copies of `red_thresh + db_red`, a value that can
//! never be classified as redacted. This keeps the filter from inventing or
//! extending regions at the first and last frames. The padding is removed after
//! filtering so the mask has exactly one entry per frame.

use crate::config::DetectionConfig;
use crate::error::DetectionError;
use crate::features::band_energy::{full_band_energy, Band};
use crate::features::smoothing::{median_filter, pad_constant};
use crate::features::stft::Spectrogram;
use crate::features::threshold::Thresholds;

/// Smooth a high-band energy curve with sentinel padding
///
/// # Arguments
///
/// * `high_energy` - High-band energy per frame
/// * `thresholds` - Thresholds for this recording
/// * `config` - Detection configuration (`median_window`, `db_red`)
///
/// # Returns
///
/// Smoothed energy, same length as `high_energy`
pub fn smooth_high_energy(
    high_energy: &[f64],
    thresholds: &Thresholds,
    config: &DetectionConfig,
) -> Result<Vec<f64>, DetectionError> {
    let pad = config.median_pad();
    let sentinel = thresholds.red_thresh + config.db_red;

    let padded = pad_constant(high_energy, pad, sentinel);
    let smoothed = median_filter(&padded, config.median_window)?;

    Ok(smoothed[pad..pad + high_energy.len()].to_vec())
}

/// Binary mask: `true` where the smoothed energy is strictly below `red_thresh`
pub fn threshold_mask(smoothed: &[f64], red_thresh: f64) -> Vec<bool> {
    smoothed.iter().map(|&e| e < red_thresh).collect()
}

/// Classify every frame of a recording as redacted or not
///
/// # Arguments
///
/// * `spectrogram` - Complex spectrogram of the whole recording
/// * `thresholds` - Thresholds estimated from the interior frames
/// * `config` - Detection configuration
///
/// # Returns
///
/// One flag per spectrogram frame
///
/// # Errors
///
/// Returns `DetectionError` if the band split or smoothing window is invalid
pub fn classify_frames(
    spectrogram: &Spectrogram,
    thresholds: &Thresholds,
    config: &DetectionConfig,
) -> Result<Vec<bool>, DetectionError> {
    let high = full_band_energy(spectrogram, Band::High, config.cutoff_bin, config.eps)?;
    let smoothed = smooth_high_energy(&high, thresholds, config)?;
    let mask = threshold_mask(&smoothed, thresholds.red_thresh);

    log::debug!(
        "Classified {} frames: {} below red_thresh={:.3}",
        mask.len(),
        mask.iter().filter(|&&m| m).count(),
        thresholds.red_thresh
    );

    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(window: usize) -> DetectionConfig {
        DetectionConfig {
            median_window: window,
            db_red: 10.0,
            ..Default::default()
        }
    }

    fn thresholds() -> Thresholds {
        Thresholds {
            red_thresh: 0.0,
            min_lower_ener: -100.0,
        }
    }

    #[test]
    fn test_mask_is_strict() {
        assert_eq!(
            threshold_mask(&[-1.0, 0.0, 1.0], 0.0),
            vec![true, false, false]
        );
    }

    #[test]
    fn test_smoothing_drops_isolated_frames() {
        let mut energy = vec![10.0; 20];
        energy[5] = -50.0;
        energy[12..18].iter_mut().for_each(|e| *e = -50.0);

        let smoothed = smooth_high_energy(&energy, &thresholds(), &config(5)).unwrap();
        let mask = threshold_mask(&smoothed, 0.0);

        assert_eq!(mask.len(), 20);
        assert!(!mask[5], "single-frame dip should be smoothed away");
        // A 6-frame run survives a 5-wide median with its edges in place
        assert_eq!(
            mask.iter().enumerate().filter(|(_, &m)| m).map(|(i, _)| i).collect::<Vec<_>>(),
            (12..18).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_sentinel_padding_limits_edge_regions() {
        // Two quiet frames at the very start: with a 5-wide window and sentinel
        // padding of 3 they are outvoted instead of zero-filled into a region
        let mut energy = vec![10.0; 12];
        energy[0] = -50.0;
        energy[1] = -50.0;
        let smoothed = smooth_high_energy(&energy, &thresholds(), &config(5)).unwrap();
        assert!(threshold_mask(&smoothed, 0.0).iter().all(|&m| !m));

        // Three quiet frames at the start survive
        energy[2] = -50.0;
        let smoothed = smooth_high_energy(&energy, &thresholds(), &config(5)).unwrap();
        let mask = threshold_mask(&smoothed, 0.0);
        assert_eq!(&mask[..4], &[true, true, true, false]);
    }

    #[test]
    fn test_all_quiet_curve_is_fully_masked() {
        let energy = vec![-50.0; 40];
        let smoothed = smooth_high_energy(&energy, &thresholds(), &config(31)).unwrap();
        assert!(threshold_mask(&smoothed, 0.0).iter().all(|&m| m));
    }
}
