//! Feature extraction modules
//!
//! This module contains the spectral building blocks of the detector:
//! - STFT (complex spectrogram)
//! - Band energy (per-frame log energy below/above the cutoff)
//! - Thresholds (median and quantile statistics over interior frames)
//! - Smoothing (sliding median filter)

pub mod band_energy;
pub mod smoothing;
pub mod stft;
pub mod threshold;
