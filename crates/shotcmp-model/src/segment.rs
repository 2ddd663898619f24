//! Segment types: the four kinds of record a shotline can contain.

use serde::{Deserialize, Serialize};
use shotcmp_math::{dist, Point3};
use std::fmt;

/// A solid hit: a maximal contiguous span of the ray inside one
/// identified region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    /// Point where the ray enters the region.
    pub in_point: Point3,
    /// Distance from the ray origin to the entry point.
    pub in_dist: f64,
    /// Point where the ray exits the region.
    pub out_point: Point3,
    /// Distance from the ray origin to the exit point.
    pub out_dist: f64,
    /// Line-of-sight length between entry and exit.
    pub los: f64,
    /// Scaled line-of-sight length.
    pub scaled_los: f64,
    /// Obliquity angle at the entry point (radians).
    pub obliq_in: f64,
    /// Obliquity angle at the exit point (radians).
    pub obliq_out: f64,
    /// Name of the region that was hit.
    pub region_name: String,
    /// Full path name of the region within the model hierarchy.
    pub path_name: String,
    /// Numeric region identifier.
    pub region_id: i64,
}

/// Empty space between partitions that is still inside the overall
/// shotline path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    /// Point where the gap begins.
    pub in_point: Point3,
    /// Point where solid material resumes.
    pub resume_point: Point3,
    /// Line-of-sight length of the gap.
    pub los: f64,
}

/// A span where two regions' geometry both claim the same space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlap {
    /// Name of the first claiming region.
    pub region1: String,
    /// Name of the second claiming region.
    pub region2: String,
    /// Numeric identifier of the first claiming region.
    pub id1: i64,
    /// Numeric identifier of the second claiming region.
    pub id2: i64,
    /// Point where the overlap begins.
    pub in_point: Point3,
    /// Point where the overlap ends.
    pub out_point: Point3,
    /// Line-of-sight length of the overlap.
    pub los: f64,
}

/// One typed record of a shotline.
///
/// Each variant carries only the fields meaningful for its kind;
/// there is no way to read a partition field out of a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Segment {
    /// A solid hit.
    Partition(Partition),
    /// Empty space between hits.
    Gap(Gap),
    /// Two regions claiming the same space.
    Overlap(Overlap),
    /// The ray did not hit anything.
    Miss,
}

/// Discriminant of a [`Segment`], used for mismatch reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// A solid hit.
    Partition,
    /// Empty space between hits.
    Gap,
    /// Two regions claiming the same space.
    Overlap,
    /// No hit at all.
    Miss,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SegmentKind::Partition => "Partition",
            SegmentKind::Gap => "Gap",
            SegmentKind::Overlap => "Overlap",
            SegmentKind::Miss => "Miss",
        };
        f.write_str(name)
    }
}

impl Segment {
    /// The kind of this segment.
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Partition(_) => SegmentKind::Partition,
            Segment::Gap(_) => SegmentKind::Gap,
            Segment::Overlap(_) => SegmentKind::Overlap,
            Segment::Miss => SegmentKind::Miss,
        }
    }

    /// Distance from `origin` to this segment's entry, the key the
    /// sequences are ordered by.
    ///
    /// Partitions carry their entry distance; gap and overlap entries
    /// are derived from the entry point. A miss has no extent and
    /// orders at zero.
    pub fn entry_dist(&self, origin: &Point3) -> f64 {
        match self {
            Segment::Partition(p) => p.in_dist,
            Segment::Gap(g) => dist(origin, &g.in_point),
            Segment::Overlap(o) => dist(origin, &o.in_point),
            Segment::Miss => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition(in_x: f64, out_x: f64, region: &str) -> Segment {
        Segment::Partition(Partition {
            in_point: Point3::new(in_x, 0.0, 0.0),
            in_dist: in_x,
            out_point: Point3::new(out_x, 0.0, 0.0),
            out_dist: out_x,
            los: out_x - in_x,
            scaled_los: out_x - in_x,
            obliq_in: 0.0,
            obliq_out: 0.0,
            region_name: region.to_string(),
            path_name: format!("/all/{region}"),
            region_id: 1000,
        })
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SegmentKind::Partition.to_string(), "Partition");
        assert_eq!(SegmentKind::Miss.to_string(), "Miss");
    }

    #[test]
    fn test_entry_dist() {
        let origin = Point3::new(0.0, 0.0, 0.0);
        let seg = partition(2.0, 5.0, "R1");
        assert_eq!(seg.entry_dist(&origin), 2.0);

        let gap = Segment::Gap(Gap {
            in_point: Point3::new(0.0, 3.0, 4.0),
            resume_point: Point3::new(0.0, 6.0, 8.0),
            los: 5.0,
        });
        assert!((gap.entry_dist(&origin) - 5.0).abs() < 1e-12);

        assert_eq!(Segment::Miss.entry_dist(&origin), 0.0);
    }
}
