//! Structured difference records produced by the comparison pass.

use crate::segment::SegmentKind;
use serde::{Deserialize, Serialize};

/// One field-level difference between a matched pair of segments.
///
/// Numeric variants carry the magnitude that exceeded its tolerance;
/// string variants carry both values verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field")]
pub enum FieldDelta {
    /// The two sides disagree on the segment kind, or one side has no
    /// segment at all for this slice of the shotline.
    Kind {
        /// Kind on the recorded side, if a segment is present.
        original: Option<SegmentKind>,
        /// Kind on the regenerated side, if a segment is present.
        current: Option<SegmentKind>,
    },
    /// Entry points moved apart by `delta`.
    InPoint {
        /// Distance between the two entry points.
        delta: f64,
    },
    /// Exit points moved apart by `delta`.
    OutPoint {
        /// Distance between the two exit points.
        delta: f64,
    },
    /// Line-of-sight lengths differ by `delta`.
    Los {
        /// Absolute difference of the two lengths.
        delta: f64,
    },
    /// Scaled line-of-sight lengths differ by `delta`.
    ScaledLos {
        /// Absolute difference of the two scaled lengths.
        delta: f64,
    },
    /// Entry obliquities differ by `delta`.
    ObliqIn {
        /// Absolute difference of the two angles.
        delta: f64,
    },
    /// Exit obliquities differ by `delta`.
    ObliqOut {
        /// Absolute difference of the two angles.
        delta: f64,
    },
    /// Region names differ.
    RegionName {
        /// Name on the recorded side.
        original: String,
        /// Name on the regenerated side.
        current: String,
    },
    /// Full path names differ.
    PathName {
        /// Path on the recorded side.
        original: String,
        /// Path on the regenerated side.
        current: String,
    },
    /// Region identifiers differ.
    RegionId {
        /// Identifier on the recorded side.
        original: i64,
        /// Identifier on the regenerated side.
        current: i64,
    },
    /// An overlap's claimant region names differ.
    ClaimantName {
        /// Which claimant slot differs (1 or 2).
        slot: u8,
        /// Name on the recorded side.
        original: String,
        /// Name on the regenerated side.
        current: String,
    },
    /// An overlap's claimant region identifiers differ.
    ClaimantId {
        /// Which claimant slot differs (1 or 2).
        slot: u8,
        /// Identifier on the recorded side.
        original: i64,
        /// Identifier on the regenerated side.
        current: i64,
    },
}

impl FieldDelta {
    /// True for the kind-mismatch variant, which short-circuits
    /// reporting for the rest of the ray.
    pub fn is_kind(&self) -> bool {
        matches!(self, FieldDelta::Kind { .. })
    }
}

/// One reconciled segment pair that differed.
///
/// The segment references are indices into the owning ray's
/// `original` and `current` sequences; `None` marks an unmatched
/// slice where only one side had a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffInstance {
    /// Index into the recorded segment sequence, if present.
    pub original: Option<usize>,
    /// Index into the regenerated segment sequence, if present.
    pub current: Option<usize>,
    /// Every field whose comparison exceeded its tolerance.
    pub deltas: Vec<FieldDelta>,
}

impl DiffInstance {
    /// True if this instance records a kind mismatch (including an
    /// absent side).
    pub fn is_kind_mismatch(&self) -> bool {
        self.deltas.iter().any(FieldDelta::is_kind)
    }
}
