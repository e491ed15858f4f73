//! Short-time Fourier transform
//!
//! Produces the complex spectrogram every later stage reads from.
//!
//! # Algorithm
//!
//! 1. Extend the signal with `window_len / 2` zeros on both sides so the first and
//!    last frames are centred on the first and last samples
//! 2. Append zeros until the final hop is complete
//! 3. Multiply each `window_len` segment by a periodic Hann window
//! 4. Zero-pad the segment to `nfft` points and take the FFT
//! 5. Keep the one-sided spectrum (`nfft / 2 + 1` bins) scaled by the window sum
//!
//! Frames advance by `window_len / 2` samples. Frame `m` is centred at
//! `m * hop / sample_rate` seconds.
//!
//! # Example
//!
//! ```no_run
//! use redaction_dsp::features::stft::compute_stft;
//!
//! let samples = vec![0.0f32; 16000];
//! let spec = compute_stft(&samples, 16000, 512, 256)?;
//! assert_eq!(spec.n_bins(), 257);
//! # Ok::<(), redaction_dsp::DetectionError>(())
//! ```

use crate::error::DetectionError;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Complex spectrogram with its coordinate axes
#[derive(Debug, Clone)]
pub struct Spectrogram {
    /// Centre frequency of each bin in Hz, ascending
    pub frequencies: Vec<f32>,

    /// Centre time of each frame in seconds, ascending
    pub times: Vec<f64>,

    /// Complex spectrum per frame (`n_frames × n_bins`)
    pub frames: Vec<Vec<Complex<f32>>>,
}

impl Spectrogram {
    /// Number of time frames
    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of frequency bins per frame
    pub fn n_bins(&self) -> usize {
        self.frequencies.len()
    }
}

/// Periodic Hann window of the given length
fn periodic_hann(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let t = 2.0 * std::f32::consts::PI * i as f32 / len as f32;
            0.5 - 0.5 * t.cos()
        })
        .collect()
}

/// Compute the one-sided STFT of a mono signal
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `nfft` - FFT size (default 512); segments are zero-padded to this length
/// * `window_len` - Analysis window length (default 256); must be even and `<= nfft`
///
/// # Returns
///
/// `Spectrogram` with `nfft / 2 + 1` bins
///
/// # Errors
///
/// Returns `DetectionError::InvalidInput` for an empty signal or zero sample rate,
/// and `DetectionError::InvalidConfig` for inconsistent transform sizes
pub fn compute_stft(
    samples: &[f32],
    sample_rate: u32,
    nfft: usize,
    window_len: usize,
) -> Result<Spectrogram, DetectionError> {
    if samples.is_empty() {
        return Err(DetectionError::InvalidInput(
            "Empty audio samples".to_string(),
        ));
    }

    if sample_rate == 0 {
        return Err(DetectionError::InvalidInput(
            "Sample rate must be > 0".to_string(),
        ));
    }

    if window_len < 2 || window_len % 2 != 0 || window_len > nfft {
        return Err(DetectionError::InvalidConfig(format!(
            "Window length must be even and in [2, nfft={}], got {}",
            nfft, window_len
        )));
    }

    let hop = window_len / 2;
    let n = samples.len();

    // Zero padding that completes the last hop
    let tail = (hop - n % hop) % hop;
    let mut padded = Vec::with_capacity(n + window_len + tail);
    padded.resize(hop, 0.0f32);
    padded.extend_from_slice(samples);
    padded.resize(n + window_len + tail, 0.0f32);

    let n_frames = (padded.len() - window_len) / hop + 1;
    let n_bins = nfft / 2 + 1;

    log::debug!(
        "Computing STFT: {} samples at {} Hz, nfft={}, window={}, hop={}, {} frames",
        n,
        sample_rate,
        nfft,
        window_len,
        hop,
        n_frames
    );

    let window = periodic_hann(window_len);
    let scale = 1.0 / window.iter().sum::<f32>();

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(nfft);
    let mut scratch = vec![Complex::new(0.0f32, 0.0); fft.get_inplace_scratch_len()];
    let mut buffer = vec![Complex::new(0.0f32, 0.0); nfft];

    let mut frames = Vec::with_capacity(n_frames);
    for m in 0..n_frames {
        let start = m * hop;
        let segment = &padded[start..start + window_len];

        for (slot, (&x, &w)) in buffer.iter_mut().zip(segment.iter().zip(window.iter())) {
            *slot = Complex::new(x * w, 0.0);
        }
        for slot in buffer[window_len..].iter_mut() {
            *slot = Complex::new(0.0, 0.0);
        }

        fft.process_with_scratch(&mut buffer, &mut scratch);

        frames.push(buffer[..n_bins].iter().map(|&c| c * scale).collect());
    }

    let frequencies = (0..n_bins)
        .map(|k| k as f32 * sample_rate as f32 / nfft as f32)
        .collect();
    let times = (0..n_frames)
        .map(|m| (m * hop) as f64 / sample_rate as f64)
        .collect();

    Ok(Spectrogram {
        frequencies,
        times,
        frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count_and_axes() {
        // 1000 samples, hop 128: 1000 % 128 = 104 -> 24 samples of tail padding
        let samples = vec![0.1f32; 1000];
        let spec = compute_stft(&samples, 16000, 512, 256).unwrap();

        assert_eq!(spec.n_bins(), 257);
        assert_eq!(spec.n_frames(), (1000 + 24) / 128 + 1);
        assert_eq!(spec.times[0], 0.0);
        assert!((spec.times[1] - 128.0 / 16000.0).abs() < 1e-12);
        assert!((spec.frequencies[1] - 16000.0 / 512.0).abs() < 1e-3);
        assert!((spec.frequencies[256] - 8000.0).abs() < 1e-3);
    }

    #[test]
    fn test_exact_multiple_of_hop() {
        let samples = vec![0.0f32; 1280];
        let spec = compute_stft(&samples, 8000, 512, 256).unwrap();
        assert_eq!(spec.n_frames(), 11);
    }

    #[test]
    fn test_sine_peaks_at_expected_bin() {
        let sample_rate = 16000;
        // Exactly bin 64 of a 512-point FFT
        let freq = 64.0 * sample_rate as f32 / 512.0;
        let samples: Vec<f32> = (0..sample_rate)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin())
            .collect();

        let spec = compute_stft(&samples, sample_rate, 512, 256).unwrap();
        let mid = &spec.frames[spec.n_frames() / 2];
        let peak_bin = mid
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.norm().total_cmp(&b.1.norm()))
            .map(|(i, _)| i)
            .unwrap();

        assert_eq!(peak_bin, 64);
        // Window-sum scaling puts a unit sine at amplitude ~0.5
        assert!((mid[64].norm() - 0.5).abs() < 0.05, "got {}", mid[64].norm());
    }

    #[test]
    fn test_silence_is_all_zero() {
        let samples = vec![0.0f32; 4096];
        let spec = compute_stft(&samples, 16000, 512, 256).unwrap();
        assert!(spec.frames.iter().flatten().all(|c| c.norm() == 0.0));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(compute_stft(&[], 16000, 512, 256).is_err());
        assert!(compute_stft(&[0.0; 100], 0, 512, 256).is_err());
        assert!(compute_stft(&[0.0; 100], 16000, 512, 255).is_err());
        assert!(compute_stft(&[0.0; 100], 16000, 256, 512).is_err());
    }

    #[test]
    fn test_short_signal_still_produces_frames() {
        let spec = compute_stft(&[0.5f32; 10], 16000, 512, 256).unwrap();
        // 10 samples + 118 tail -> 128 / 128 + 1
        assert_eq!(spec.n_frames(), 2);
    }
}
