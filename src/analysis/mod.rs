//! Result types
//!
//! Segments, per-candidate outcomes and run metadata.

pub mod result;
