//! Configuration parameters for redaction detection

use serde::{Deserialize, Serialize};

use crate::error::DetectionError;

/// Detection configuration parameters
///
/// All defaults were tuned by hand against a labeled speech corpus; the
/// energy thresholds are in summed natural-log magnitude units, so changing
/// `nfft` or `cutoff_bin` changes their scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    // STFT parameters
    /// FFT size in samples (default: 512)
    /// Each analysis window is zero-padded to this length
    pub nfft: usize,

    /// Analysis window length in samples (default: 256)
    /// The hop size is half of this
    pub window_len: usize,

    // Band split
    /// First frequency bin of the high band (default: 17)
    /// Bins below this index form the low band
    pub cutoff_bin: usize,

    // Thresholds
    /// Offset subtracted from the median high-band energy (default: 435.0)
    pub db_red: f64,

    /// Quantile of low-band energy used as the silence floor (default: 0.1)
    pub ener_quant: f64,

    /// Frames excluded at each end when estimating thresholds (default: 1000)
    pub interior_margin: usize,

    // Classification
    /// Sliding median filter width in frames, odd and at least 3 (default: 31)
    /// A width of 1 would let a single frame at either end of the mask form a
    /// region whose edges cannot be paired
    pub median_window: usize,

    /// Fraction of quiet low-band frames at which a candidate is treated as
    /// silence and rejected (default: 0.95)
    pub ener_thresh_ratio: f64,

    // Time mapping
    /// Offset added to region start times in seconds (default: 0.02)
    pub t_adj_lo: f64,

    /// Offset added to region end times in seconds (default: 0.08)
    pub t_adj_hi: f64,

    /// Constant added to magnitudes before taking the log (default: 1e-12)
    pub eps: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            nfft: 512,
            window_len: 256,
            cutoff_bin: 17,
            db_red: 435.0,
            ener_quant: 0.1,
            interior_margin: 1000,
            median_window: 31,
            ener_thresh_ratio: 0.95,
            t_adj_lo: 0.02,
            t_adj_hi: 0.08,
            eps: 1e-12,
        }
    }
}

impl DetectionConfig {
    /// Hop size between analysis frames in samples
    pub fn hop_size(&self) -> usize {
        self.window_len / 2
    }

    /// Number of one-sided frequency bins produced by the transform
    pub fn n_bins(&self) -> usize {
        self.nfft / 2 + 1
    }

    /// Padding applied on each side of the energy curve before median filtering
    pub fn median_pad(&self) -> usize {
        (self.median_window + 1) / 2
    }

    /// Check every parameter and fail fast on the first invalid one
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::InvalidConfig` describing the offending field
    pub fn validate(&self) -> Result<(), DetectionError> {
        if self.nfft < 2 {
            return Err(DetectionError::InvalidConfig(format!(
                "nfft must be >= 2, got {}",
                self.nfft
            )));
        }

        if self.window_len < 2 || self.window_len % 2 != 0 {
            return Err(DetectionError::InvalidConfig(format!(
                "window_len must be an even number >= 2, got {}",
                self.window_len
            )));
        }

        if self.window_len > self.nfft {
            return Err(DetectionError::InvalidConfig(format!(
                "window_len ({}) must not exceed nfft ({})",
                self.window_len, self.nfft
            )));
        }

        let n_bins = self.n_bins();
        if self.cutoff_bin == 0 || self.cutoff_bin >= n_bins {
            return Err(DetectionError::InvalidConfig(format!(
                "cutoff_bin must be in [1, {}), got {}",
                n_bins, self.cutoff_bin
            )));
        }

        if !(0.0..=1.0).contains(&self.ener_quant) {
            return Err(DetectionError::InvalidConfig(format!(
                "ener_quant must be in [0.0, 1.0], got {}",
                self.ener_quant
            )));
        }

        if self.median_window < 3 || self.median_window % 2 == 0 {
            return Err(DetectionError::InvalidConfig(format!(
                "median_window must be odd and >= 3, got {}",
                self.median_window
            )));
        }

        if !self.ener_thresh_ratio.is_finite() || self.ener_thresh_ratio < 0.0 {
            return Err(DetectionError::InvalidConfig(format!(
                "ener_thresh_ratio must be a non-negative number, got {}",
                self.ener_thresh_ratio
            )));
        }

        // The classifier pads with red_thresh + db_red, which must never fall below red_thresh
        if !self.db_red.is_finite() || self.db_red < 0.0 {
            return Err(DetectionError::InvalidConfig(format!(
                "db_red must be a non-negative number, got {}",
                self.db_red
            )));
        }

        if !self.t_adj_lo.is_finite() || !self.t_adj_hi.is_finite() {
            return Err(DetectionError::InvalidConfig(
                "time adjustments must be finite".to_string(),
            ));
        }

        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(DetectionError::InvalidConfig(format!(
                "eps must be a positive number, got {}",
                self.eps
            )));
        }

        Ok(())
    }
}
