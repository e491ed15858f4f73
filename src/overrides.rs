//! Per-recording manual corrections
//!
//! Detection output for a curated corpus is corrected by hand: some recordings
//! are known to contain no filtered regions at all, some have short redactions
//! the detector misses, and some have known false alarms. Those corrections are
//! data, kept in an [`OverrideTable`] and applied to the detector's output; the
//! detection pipeline never consults them.
//!
//! # Example
//!
//! ```
//! use redaction_dsp::{OverrideTable, Segment};
//!
//! let table = OverrideTable::from_json_str(r#"{
//!     "recordings": {
//!         "SBC023": { "exclusions": [{ "kind": "drop_after", "start": 1462.0 }] }
//!     }
//! }"#)?;
//!
//! let detected = vec![Segment::new(10.0, 11.0), Segment::new(1500.0, 1501.0)];
//! assert_eq!(table.apply("SBC023", detected), vec![Segment::new(10.0, 11.0)]);
//! # Ok::<(), redaction_dsp::DetectionError>(())
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::result::Segment;
use crate::error::DetectionError;

/// Rule removing detected segments from a recording's output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionRule {
    /// Stop emitting segments at the first one starting after `start`
    StopAfter {
        /// Start time in seconds
        start: f64,
    },

    /// Drop every segment starting after `start`
    DropAfter {
        /// Start time in seconds
        start: f64,
    },

    /// Drop segments whose start lies strictly between `lo` and `hi`
    DropWithin {
        /// Lower bound in seconds (exclusive)
        lo: f64,
        /// Upper bound in seconds (exclusive)
        hi: f64,
    },
}

/// What a rule does with one segment
enum RuleAction {
    Keep,
    Drop,
    Stop,
}

impl ExclusionRule {
    fn action(&self, seg: &Segment) -> RuleAction {
        match *self {
            ExclusionRule::StopAfter { start } if seg.start > start => RuleAction::Stop,
            ExclusionRule::DropAfter { start } if seg.start > start => RuleAction::Drop,
            ExclusionRule::DropWithin { lo, hi } if seg.start > lo && seg.start < hi => {
                RuleAction::Drop
            }
            _ => RuleAction::Keep,
        }
    }
}

/// Corrections for one recording
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingOverride {
    /// Recording is known to contain no filtered regions; its output is empty
    pub skip: bool,

    /// Manually identified segments as `[start, end]` pairs
    pub additions: Vec<[f64; 2]>,

    /// Rules removing known false alarms, checked in order
    pub exclusions: Vec<ExclusionRule>,
}

/// Override table keyed by recording identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideTable {
    /// Corrections per recording
    pub recordings: BTreeMap<String, RecordingOverride>,
}

impl OverrideTable {
    /// Parse a table from JSON
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::InvalidInput` if the JSON does not match the table layout
    pub fn from_json_str(json: &str) -> Result<Self, DetectionError> {
        let table: OverrideTable = serde_json::from_str(json)?;
        for (id, entry) in &table.recordings {
            let invalid = entry
                .additions
                .iter()
                .find(|p| !p[0].is_finite() || !p[1].is_finite() || p[0] >= p[1]);
            if let Some(pair) = invalid {
                return Err(DetectionError::InvalidInput(format!(
                    "Override for {}: addition [{}, {}] must have start < end",
                    id, pair[0], pair[1]
                )));
            }
        }
        Ok(table)
    }

    /// Load a table from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::IoError` if the file cannot be read
    pub fn from_path(path: &Path) -> Result<Self, DetectionError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| DetectionError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Corrections for a recording, if any
    pub fn get(&self, id: &str) -> Option<&RecordingOverride> {
        self.recordings.get(id)
    }

    /// Whether a recording is known to contain no filtered regions
    pub fn is_skipped(&self, id: &str) -> bool {
        self.get(id).is_some_and(|o| o.skip)
    }

    /// Apply a recording's corrections to detected segments
    ///
    /// Additions are merged in and the list is re-sorted by start time before the
    /// exclusion rules run, so a `stop_after` rule also drops later additions.
    pub fn apply(&self, id: &str, detected: Vec<Segment>) -> Vec<Segment> {
        let Some(entry) = self.get(id) else {
            return detected;
        };

        if entry.skip {
            log::debug!("{}: known to contain no filtered regions", id);
            return Vec::new();
        }

        let mut segments = detected;
        segments.extend(entry.additions.iter().map(|&pair| Segment::from(pair)));
        segments.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut kept = Vec::with_capacity(segments.len());
        'segments: for seg in segments {
            for rule in &entry.exclusions {
                match rule.action(&seg) {
                    RuleAction::Keep => {}
                    RuleAction::Drop => continue 'segments,
                    RuleAction::Stop => break 'segments,
                }
            }
            kept.push(seg);
        }

        log::debug!(
            "{}: {} additions, {} segments after exclusions",
            id,
            entry.additions.len(),
            kept.len()
        );

        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> OverrideTable {
        OverrideTable::from_json_str(
            r#"{
                "recordings": {
                    "SBC013": { "exclusions": [{ "kind": "stop_after", "start": 95.0 }] },
                    "SBC014": { "additions": [[1417.742, 1418.819], [1419.721, 1421.786]] },
                    "SBC017": { "skip": true },
                    "SBC057": { "exclusions": [
                        { "kind": "drop_within", "lo": 874.0, "hi": 875.0 },
                        { "kind": "drop_within", "lo": 928.0, "hi": 929.0 }
                    ] }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_recording_untouched() {
        let segs = vec![Segment::new(1.0, 2.0)];
        assert_eq!(table().apply("SBC001", segs.clone()), segs);
    }

    #[test]
    fn test_skip_empties_output() {
        let t = table();
        assert!(t.is_skipped("SBC017"));
        assert!(!t.is_skipped("SBC013"));
        assert!(t.apply("SBC017", vec![Segment::new(1.0, 2.0)]).is_empty());
    }

    #[test]
    fn test_additions_merged_sorted() {
        let out = table().apply(
            "SBC014",
            vec![Segment::new(1500.0, 1501.0), Segment::new(3.0, 4.0)],
        );
        let starts: Vec<f64> = out.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![3.0, 1417.742, 1419.721, 1500.0]);
    }

    #[test]
    fn test_stop_after_drops_everything_later() {
        let out = table().apply(
            "SBC013",
            vec![
                Segment::new(10.0, 11.0),
                Segment::new(96.0, 97.0),
                Segment::new(200.0, 201.0),
            ],
        );
        assert_eq!(out, vec![Segment::new(10.0, 11.0)]);
    }

    #[test]
    fn test_drop_within_is_exclusive() {
        let out = table().apply(
            "SBC057",
            vec![
                Segment::new(874.0, 874.5),
                Segment::new(874.3, 874.9),
                Segment::new(928.5, 929.2),
                Segment::new(1000.0, 1001.0),
            ],
        );
        assert_eq!(out, vec![Segment::new(874.0, 874.5), Segment::new(1000.0, 1001.0)]);
    }

    #[test]
    fn test_bad_addition_rejected() {
        let result = OverrideTable::from_json_str(
            r#"{ "recordings": { "X": { "additions": [[2.0, 1.0]] } } }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_rule_kind_rejected() {
        let result = OverrideTable::from_json_str(
            r#"{ "recordings": { "X": { "exclusions": [{ "kind": "drop_all" }] } } }"#,
        );
        assert!(result.is_err());
    }
}
