//! # Redaction DSP
//!
//! Detection of low-pass-filtered regions in long-form speech recordings.
//!
//! Redacted spans in some speech corpora were produced by low-pass filtering the
//! audio, which removes nearly all energy above a few hundred hertz while leaving
//! the low band audible. This crate finds those spans from the spectrogram alone
//! and reports them as `(start, end)` times in seconds.
//!
//! ## Quick Start
//!
//! ```no_run
//! use redaction_dsp::{detect_redactions, DetectionConfig};
//!
//! // Load audio samples (mono or first channel, f32)
//! let samples: Vec<f32> = vec![]; // Your audio data
//! let sample_rate = 16000;
//!
//! let segments = detect_redactions(&samples, sample_rate, &DetectionConfig::default())?;
//! for seg in &segments {
//!     println!("{:.3}\t{:.3}", seg.start, seg.end);
//! }
//! # Ok::<(), redaction_dsp::DetectionError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Waveform → STFT → Thresholds → Frame mask → Candidates → Validation → Segments
//! ```
//!
//! Decoding, per-recording overrides and label files live in [`io`] and
//! [`overrides`] and are applied outside the detection pipeline.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod detection;
pub mod error;
pub mod features;
pub mod io;
pub mod overrides;
pub mod preprocessing;

// Re-export main types
pub use analysis::result::{DetectionMetadata, DetectionResult, Segment};
pub use config::DetectionConfig;
pub use detection::extractor::CandidateRegion;
pub use error::DetectionError;
pub use features::threshold::Thresholds;
pub use io::source::{DirectorySource, Waveform, WaveformSource};
pub use overrides::OverrideTable;

use features::stft::compute_stft;

/// Minimum number of spectrogram frames needed to form a region
const MIN_FRAMES: usize = 3;

/// Main detection function
///
/// Runs the full pipeline over one recording and returns the result together
/// with thresholds, every candidate's validation outcome and timing metadata.
///
/// # Arguments
///
/// * `samples` - Mono audio samples (first channel of the source)
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Detection configuration
///
/// # Returns
///
/// `DetectionResult`; an empty or too-short recording yields no segments
///
/// # Errors
///
/// Returns `DetectionError` if the configuration is invalid, the sample rate is
/// zero, or an internal invariant fails
pub fn analyze_redactions(
    samples: &[f32],
    sample_rate: u32,
    config: &DetectionConfig,
) -> Result<DetectionResult, DetectionError> {
    use std::time::Instant;
    let start_time = Instant::now();

    config.validate()?;

    if sample_rate == 0 {
        return Err(DetectionError::InvalidInput(
            "Invalid sample rate".to_string(),
        ));
    }

    log::debug!(
        "Starting redaction detection: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    let duration_seconds = samples.len() as f64 / sample_rate as f64;
    let mut metadata = DetectionMetadata {
        duration_seconds,
        sample_rate,
        n_frames: 0,
        masked_frames: 0,
        processing_time_ms: 0.0,
        algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
        warnings: vec![],
    };

    if samples.is_empty() {
        log::warn!("Empty audio, no regions to detect");
        metadata.warnings.push("Empty audio".to_string());
        return Ok(DetectionResult {
            segments: vec![],
            candidates: vec![],
            thresholds: None,
            metadata,
        });
    }

    let spectrogram = compute_stft(samples, sample_rate, config.nfft, config.window_len)?;
    metadata.n_frames = spectrogram.n_frames();

    if spectrogram.n_frames() < MIN_FRAMES {
        log::warn!(
            "Audio too short for detection: {} frames",
            spectrogram.n_frames()
        );
        metadata
            .warnings
            .push(format!("Too short: {} frames", spectrogram.n_frames()));
        metadata.processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;
        return Ok(DetectionResult {
            segments: vec![],
            candidates: vec![],
            thresholds: None,
            metadata,
        });
    }

    if spectrogram.n_frames() <= config.interior_margin.saturating_mul(2) {
        metadata.warnings.push(format!(
            "Interior margin {} covers all {} frames; thresholds use the whole recording",
            config.interior_margin,
            spectrogram.n_frames()
        ));
    }

    let output = detection::run_stages(&spectrogram, config)?;
    metadata.masked_frames = output.mask.iter().filter(|&&m| m).count();

    metadata.processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    log::debug!(
        "Detected {} redacted segments in {:.2} ms",
        output.segments.len(),
        metadata.processing_time_ms
    );

    Ok(DetectionResult {
        segments: output.segments,
        candidates: output.candidates,
        thresholds: Some(output.thresholds),
        metadata,
    })
}

/// Detect redacted segments in one recording
///
/// Convenience wrapper around [`analyze_redactions`] returning only the segments.
///
/// # Example
///
/// ```no_run
/// use redaction_dsp::{detect_redactions, DetectionConfig};
///
/// let samples = vec![0.0f32; 16000 * 30]; // 30 seconds of silence
/// let segments = detect_redactions(&samples, 16000, &DetectionConfig::default())?;
/// assert!(segments.is_empty());
/// # Ok::<(), redaction_dsp::DetectionError>(())
/// ```
pub fn detect_redactions(
    samples: &[f32],
    sample_rate: u32,
    config: &DetectionConfig,
) -> Result<Vec<Segment>, DetectionError> {
    analyze_redactions(samples, sample_rate, config).map(|result| result.segments)
}

/// Detect redacted segments in a decoded waveform
pub fn detect_waveform(
    waveform: &Waveform,
    config: &DetectionConfig,
) -> Result<Vec<Segment>, DetectionError> {
    detect_redactions(&waveform.samples, waveform.sample_rate, config)
}
