//! Audio preprocessing modules
//!
//! This module contains utilities for preparing audio for detection:
//! - Channel selection (first channel of interleaved PCM)

pub mod channel_mixer;
