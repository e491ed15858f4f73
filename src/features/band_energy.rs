//! Per-frame log energy within a frequency band
//!
//! The energy of a frame over a band is `Σ ln(|X[bin]| + eps)` across the band's
//! bins. Summing log magnitudes (rather than magnitudes) lets a uniform drop in
//! level across many bins, which is what a low-pass filter produces in the
//! stopband, move the statistic by a large and stable amount.

use std::ops::Range;

use crate::error::DetectionError;
use crate::features::stft::Spectrogram;

/// Which side of the cutoff bin to sum over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Bins `0..cutoff` (the passband of the redaction filter)
    Low,
    /// Bins `cutoff..n_bins` (removed by the redaction filter)
    High,
}

impl Band {
    /// Bin range covered by this band for the given cutoff
    pub fn bins(self, cutoff_bin: usize, n_bins: usize) -> Range<usize> {
        match self {
            Band::Low => 0..cutoff_bin,
            Band::High => cutoff_bin..n_bins,
        }
    }
}

/// Compute log energy of one band for a range of frames
///
/// # Arguments
///
/// * `spectrogram` - Complex spectrogram
/// * `band` - Low or high band
/// * `cutoff_bin` - First bin of the high band
/// * `frames` - Frame indices to evaluate
/// * `eps` - Constant added to magnitudes before the log
///
/// # Returns
///
/// One energy value per frame in `frames`
///
/// # Errors
///
/// Returns `DetectionError::InvalidConfig` if the cutoff is outside the bin range
/// and `DetectionError::InvalidInput` if the frame range exceeds the spectrogram
pub fn band_energy(
    spectrogram: &Spectrogram,
    band: Band,
    cutoff_bin: usize,
    frames: Range<usize>,
    eps: f64,
) -> Result<Vec<f64>, DetectionError> {
    let n_bins = spectrogram.n_bins();
    if cutoff_bin == 0 || cutoff_bin >= n_bins {
        return Err(DetectionError::InvalidConfig(format!(
            "Cutoff bin {} outside valid range [1, {})",
            cutoff_bin, n_bins
        )));
    }

    if frames.end > spectrogram.n_frames() || frames.start > frames.end {
        return Err(DetectionError::InvalidInput(format!(
            "Frame range {:?} outside spectrogram with {} frames",
            frames,
            spectrogram.n_frames()
        )));
    }

    let bins = band.bins(cutoff_bin, n_bins);

    spectrogram.frames[frames]
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            if frame.len() != n_bins {
                return Err(DetectionError::InvalidInput(format!(
                    "Inconsistent frame length: expected {} bins, frame {} has {}",
                    n_bins,
                    i,
                    frame.len()
                )));
            }
            Ok(frame[bins.clone()]
                .iter()
                .map(|c| (c.norm() as f64 + eps).ln())
                .sum())
        })
        .collect()
}

/// Log energy of one band over every frame
pub fn full_band_energy(
    spectrogram: &Spectrogram,
    band: Band,
    cutoff_bin: usize,
    eps: f64,
) -> Result<Vec<f64>, DetectionError> {
    band_energy(spectrogram, band, cutoff_bin, 0..spectrogram.n_frames(), eps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::num_complex::Complex;

    fn constant_spectrogram(n_frames: usize, n_bins: usize, magnitude: f32) -> Spectrogram {
        Spectrogram {
            frequencies: (0..n_bins).map(|k| k as f32 * 100.0).collect(),
            times: (0..n_frames).map(|m| m as f64 * 0.01).collect(),
            frames: vec![vec![Complex::new(magnitude, 0.0); n_bins]; n_frames],
        }
    }

    #[test]
    fn test_band_ranges() {
        assert_eq!(Band::Low.bins(17, 257), 0..17);
        assert_eq!(Band::High.bins(17, 257), 17..257);
    }

    #[test]
    fn test_energy_sums_log_magnitude() {
        let spec = constant_spectrogram(4, 10, std::f32::consts::E);
        let high = full_band_energy(&spec, Band::High, 3, 0.0).unwrap();
        let low = full_band_energy(&spec, Band::Low, 3, 0.0).unwrap();

        assert_eq!(high.len(), 4);
        assert!((high[0] - 7.0).abs() < 1e-5);
        assert!((low[0] - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_magnitude_uses_eps() {
        let spec = constant_spectrogram(2, 4, 0.0);
        let low = full_band_energy(&spec, Band::Low, 2, 1e-12).unwrap();
        assert!((low[0] - 2.0 * (1e-12f64).ln()).abs() < 1e-9);
        assert!(low.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_frame_subrange() {
        let mut spec = constant_spectrogram(5, 4, 1.0);
        spec.frames[2] = vec![Complex::new(0.0, std::f32::consts::E); 4];
        let high = band_energy(&spec, Band::High, 2, 1..4, 0.0).unwrap();
        assert_eq!(high.len(), 3);
        assert!(high[0].abs() < 1e-6);
        assert!((high[1] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_invalid_ranges() {
        let spec = constant_spectrogram(5, 4, 1.0);
        assert!(band_energy(&spec, Band::High, 4, 0..5, 1e-12).is_err());
        assert!(band_energy(&spec, Band::High, 0, 0..5, 1e-12).is_err());
        assert!(band_energy(&spec, Band::High, 2, 0..6, 1e-12).is_err());
    }
}
