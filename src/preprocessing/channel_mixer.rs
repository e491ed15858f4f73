//! Channel selection for multi-channel PCM
//!
//! Detection runs on a single channel. Multi-channel recordings contribute
//! their first channel only; channels are not averaged, since a redaction filter
//! applied to one channel would be diluted by the others.

use crate::error::DetectionError;

/// Extract one channel from interleaved samples
///
/// # Arguments
///
/// * `interleaved` - Interleaved samples (`[c0, c1, ..., c0, c1, ...]`)
/// * `channels` - Number of interleaved channels
/// * `index` - Channel to keep (0-based)
///
/// # Returns
///
/// Samples of the selected channel; a trailing partial frame is dropped
///
/// # Errors
///
/// Returns `DetectionError::InvalidInput` if `channels` is zero or `index` is out of range
pub fn extract_channel(
    interleaved: &[f32],
    channels: usize,
    index: usize,
) -> Result<Vec<f32>, DetectionError> {
    if channels == 0 {
        return Err(DetectionError::InvalidInput(
            "Channel count must be > 0".to_string(),
        ));
    }

    if index >= channels {
        return Err(DetectionError::InvalidInput(format!(
            "Channel index {} out of range for {} channels",
            index, channels
        )));
    }

    if channels == 1 {
        return Ok(interleaved.to_vec());
    }

    if interleaved.len() % channels != 0 {
        log::warn!(
            "Interleaved buffer of {} samples is not a multiple of {} channels; dropping partial frame",
            interleaved.len(),
            channels
        );
    }

    Ok(interleaved
        .chunks_exact(channels)
        .map(|frame| frame[index])
        .collect())
}

/// Extract the first channel from interleaved samples
pub fn first_channel(interleaved: &[f32], channels: usize) -> Result<Vec<f32>, DetectionError> {
    extract_channel(interleaved, channels, 0)
}
