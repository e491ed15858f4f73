//! Adaptive energy thresholds
//!
//! Two statistics are taken once per recording from the interior frames:
//!
//! - `red_thresh = median(high-band energy) - db_red`
//! - `min_lower_ener = quantile(low-band energy, ener_quant)`
//!
//! The median and a low quantile stay put as long as redacted spans are a
//! minority of the recording, so the regions being searched for do not drag
//! the statistic used to find them.
//!
//! Frames within `interior_margin` of either end are left out because the
//! zero-extended transform boundaries bias their energy.

use crate::config::DetectionConfig;
use crate::error::DetectionError;
use crate::features::band_energy::{band_energy, Band};
use crate::features::stft::Spectrogram;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Thresholds estimated for one recording
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// High-band energy below which a frame counts as redacted
    pub red_thresh: f64,

    /// Low-band energy below which a frame counts as silent
    pub min_lower_ener: f64,
}

/// Median of a set of values
///
/// Even-length inputs return the mean of the two middle elements.
///
/// # Errors
///
/// Returns `DetectionError::InvalidInput` if values are empty
pub fn median(values: &[f64]) -> Result<f64, DetectionError> {
    if values.is_empty() {
        return Err(DetectionError::InvalidInput(
            "Empty values for median calculation".to_string(),
        ));
    }

    let mut scratch = values.to_vec();
    let n = scratch.len();
    let mid = n / 2;
    let (lower, upper, _) = scratch.select_nth_unstable_by(mid, f64::total_cmp);
    let upper = *upper;

    if n % 2 == 1 {
        return Ok(upper);
    }

    // Largest element of the lower partition is the other middle value
    let lower_mid = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok((lower_mid + upper) * 0.5)
}

/// Quantile with linear interpolation between closest ranks
///
/// For `n` sorted values the position is `h = (n - 1) * q`, and the result is
/// `x[floor(h)] + frac(h) * (x[floor(h) + 1] - x[floor(h)])`.
///
/// # Errors
///
/// Returns `DetectionError::InvalidInput` if values are empty or `q` is out of range
pub fn quantile(values: &[f64], q: f64) -> Result<f64, DetectionError> {
    if values.is_empty() {
        return Err(DetectionError::InvalidInput(
            "Empty values for quantile calculation".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&q) {
        return Err(DetectionError::InvalidInput(format!(
            "Quantile must be in [0.0, 1.0], got {}",
            q
        )));
    }

    let mut scratch = values.to_vec();
    let n = scratch.len();
    let h = (n - 1) as f64 * q;
    let lo = h.floor() as usize;
    let frac = h - lo as f64;

    let (_, lo_value, upper) = scratch.select_nth_unstable_by(lo, f64::total_cmp);
    let lo_value = *lo_value;

    if frac == 0.0 || upper.is_empty() {
        return Ok(lo_value);
    }

    let hi_value = upper.iter().copied().fold(f64::INFINITY, f64::min);
    Ok(lo_value + frac * (hi_value - lo_value))
}

/// Frame range used for threshold estimation
///
/// Falls back to every frame when the margins would leave nothing.
pub fn interior_frames(n_frames: usize, margin: usize) -> Range<usize> {
    if n_frames > margin.saturating_mul(2) {
        margin..n_frames - margin
    } else {
        log::warn!(
            "Recording has {} frames, too short for an interior margin of {}; using all frames for thresholds",
            n_frames,
            margin
        );
        0..n_frames
    }
}

/// Estimate redaction and minimum-energy thresholds for a recording
///
/// # Arguments
///
/// * `spectrogram` - Complex spectrogram of the whole recording
/// * `config` - Detection configuration (`cutoff_bin`, `db_red`, `ener_quant`,
///   `interior_margin`, `eps`)
///
/// # Returns
///
/// `Thresholds` computed from the interior frames
///
/// # Errors
///
/// Returns `DetectionError` if the spectrogram is empty or the band split is invalid
pub fn estimate_thresholds(
    spectrogram: &Spectrogram,
    config: &DetectionConfig,
) -> Result<Thresholds, DetectionError> {
    if spectrogram.n_frames() == 0 {
        return Err(DetectionError::InvalidInput(
            "Spectrogram has no frames".to_string(),
        ));
    }

    let interior = interior_frames(spectrogram.n_frames(), config.interior_margin);

    let high = band_energy(
        spectrogram,
        Band::High,
        config.cutoff_bin,
        interior.clone(),
        config.eps,
    )?;
    let low = band_energy(spectrogram, Band::Low, config.cutoff_bin, interior, config.eps)?;

    let red_thresh = median(&high)? - config.db_red;
    let min_lower_ener = quantile(&low, config.ener_quant)?;

    log::debug!(
        "Thresholds from {} interior frames: red_thresh={:.3}, min_lower_ener={:.3}",
        high.len(),
        red_thresh,
        min_lower_ener
    );

    Ok(Thresholds {
        red_thresh,
        min_lower_ener,
    })
}
