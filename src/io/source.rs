//! Waveform sources
//!
//! Batch drivers ask a [`WaveformSource`] for each recording identifier instead of
//! reading files themselves, which keeps the detector testable on synthetic
//! buffers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::DetectionError;
use crate::io::decoder::decode_first_channel;

/// Single-channel audio with its sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Amplitude samples
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl Waveform {
    /// Create a waveform
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Duration in seconds (0 for a zero sample rate)
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Provides the waveform for a recording identifier
pub trait WaveformSource {
    /// Load the recording identified by `id`
    fn load(&self, id: &str) -> Result<Waveform, DetectionError>;
}

/// Recordings stored as `<dir>/<id>.<extension>`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    extension: String,
}

impl DirectorySource {
    /// Source reading `<dir>/<id>.wav`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: "wav".to_string(),
        }
    }

    /// Use a different file extension
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Directory the recordings are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a recording identifier
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", id, self.extension))
    }
}

impl WaveformSource for DirectorySource {
    fn load(&self, id: &str) -> Result<Waveform, DetectionError> {
        decode_first_channel(&self.path_for(id))
    }
}

/// In-memory recordings keyed by identifier
impl WaveformSource for HashMap<String, Waveform> {
    fn load(&self, id: &str) -> Result<Waveform, DetectionError> {
        self.get(id)
            .cloned()
            .ok_or_else(|| DetectionError::InvalidInput(format!("Unknown recording: {}", id)))
    }
}
