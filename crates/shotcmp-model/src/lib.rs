#![warn(missing_docs)]

//! Shotline data model for the shotcmp comparison toolkit.
//!
//! A *shotline* is the ordered record of what a single ray encounters
//! along its path through a solid model: partitions of solid material,
//! gaps, overlapping region claims, or nothing at all. This crate
//! defines the segment types, the ray that owns them, and the
//! structured difference records produced when two shotlines for the
//! same ray are compared.
//!
//! # Architecture
//!
//! - [`Ray`] - ray origin and direction, immutable once recorded
//! - [`Segment`] - tagged union of the four segment kinds
//! - [`ShotRay`] - a ray together with its recorded (original) and
//!   regenerated (current) segment sequences and accumulated diffs
//! - [`DiffInstance`] / [`FieldDelta`] - structured difference records

mod diff;
mod segment;

pub use diff::{DiffInstance, FieldDelta};
pub use segment::{Gap, Overlap, Partition, Segment, SegmentKind};

use serde::{Deserialize, Serialize};
use shotcmp_math::{Point3, Vec3};

/// A ray fired through the model, defined by origin and direction.
///
/// Recorded rays are immutable; the comparison engine only ever reads
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray as recorded (not necessarily unit length).
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }
}

/// A ray with both shotline sides and the differences found between
/// them.
///
/// `original` holds the recorded segments loaded from a shotfile;
/// `current` holds the segments regenerated by the tracer
/// collaborator. Both are ordered by increasing entry distance from
/// the ray origin. `diffs` is filled by the comparison pass and refers
/// to the two sequences by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRay {
    /// The ray itself.
    pub ray: Ray,
    /// Recorded segment sequence (the "old" side).
    pub original: Vec<Segment>,
    /// Regenerated segment sequence (the "new" side).
    pub current: Vec<Segment>,
    /// Differences accumulated by the comparison pass.
    pub diffs: Vec<DiffInstance>,
}

impl ShotRay {
    /// Create a shot ray holding only the recorded side.
    pub fn new(ray: Ray, original: Vec<Segment>) -> Self {
        Self {
            ray,
            original,
            current: Vec::new(),
            diffs: Vec::new(),
        }
    }
}
