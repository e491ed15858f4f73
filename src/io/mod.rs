//! Audio I/O modules
//!
//! Decoding with Symphonia, waveform sources for batch drivers, and label
//! file output.

pub mod decoder;
pub mod source;
pub mod writer;
