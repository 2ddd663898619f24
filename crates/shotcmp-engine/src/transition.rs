//! Transition walk: merges the two sides' segment boundaries into one
//! ordered event stream.
//!
//! Partitions and overlaps are boundary-bearing: each contributes an
//! entry and an exit boundary at its measured distance from the ray
//! origin. Gaps and misses contribute none. The walk merges the two
//! sides' boundary streams by distance; every pending boundary within
//! the distance tolerance of the chosen distance is consumed by the
//! same event, so a boundary is never emitted twice and a segment
//! whose whole extent falls inside one tolerance window is skipped
//! without an event of its own.

use shotcmp_math::{dist, Point3};
use shotcmp_model::{Ray, Segment};

/// Whether a transition is an entry, an exit, or a coincident mix of
/// both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// All coinciding boundaries enter solid.
    Entry,
    /// All coinciding boundaries leave solid.
    Exit,
    /// An entry and an exit coincide within tolerance.
    Multi,
}

/// Which side(s) produced a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOrigin {
    /// Only the recorded side.
    Original,
    /// Only the regenerated side.
    Current,
    /// Both sides, within the distance tolerance.
    Both,
}

/// One boundary event along the ray.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Distance from the ray origin.
    pub dist: f64,
    /// Boundary point of the nearest contributing boundary.
    pub point: Point3,
    /// Entry, exit, or both.
    pub kind: TransitionKind,
    /// Which side(s) contributed.
    pub origin: TransitionOrigin,
    /// Obliquity at the nearest contributing boundary, when the
    /// segment kind carries one.
    pub obliq: Option<f64>,
}

/// One segment boundary, before merging.
#[derive(Debug, Clone)]
struct Boundary {
    dist: f64,
    point: Point3,
    is_exit: bool,
    obliq: Option<f64>,
}

/// Collect one side's boundaries in distance order.
fn side_boundaries(origin: &Point3, segments: &[Segment]) -> Vec<Boundary> {
    let mut out = Vec::with_capacity(segments.len() * 2);
    for seg in segments {
        match seg {
            Segment::Partition(p) => {
                out.push(Boundary {
                    dist: p.in_dist,
                    point: p.in_point,
                    is_exit: false,
                    obliq: Some(p.obliq_in),
                });
                out.push(Boundary {
                    dist: p.out_dist,
                    point: p.out_point,
                    is_exit: true,
                    obliq: Some(p.obliq_out),
                });
            }
            Segment::Overlap(o) => {
                out.push(Boundary {
                    dist: dist(origin, &o.in_point),
                    point: o.in_point,
                    is_exit: false,
                    obliq: None,
                });
                out.push(Boundary {
                    dist: dist(origin, &o.out_point),
                    point: o.out_point,
                    is_exit: true,
                    obliq: None,
                });
            }
            Segment::Gap(_) | Segment::Miss => {}
        }
    }
    // Overlap spans may straddle partition boundaries; sort so the
    // merge sees one monotone stream per side.
    out.sort_by(|a, b| a.dist.total_cmp(&b.dist));
    out
}

/// Walk both sides of a ray and emit the merged transition stream.
pub fn walk_transitions(
    ray: &Ray,
    original: &[Segment],
    current: &[Segment],
    dist_tol: f64,
) -> Vec<Transition> {
    let lhs = side_boundaries(&ray.origin, original);
    let rhs = side_boundaries(&ray.origin, current);

    let mut events = Vec::new();
    let mut li = 0usize;
    let mut ri = 0usize;

    while li < lhs.len() || ri < rhs.len() {
        let chosen = match (lhs.get(li), rhs.get(ri)) {
            (Some(l), Some(r)) => l.dist.min(r.dist),
            (Some(l), None) => l.dist,
            (None, Some(r)) => r.dist,
            (None, None) => break,
        };

        let mut nearest: Option<&Boundary> = None;
        let mut entries = 0usize;
        let mut exits = 0usize;
        let mut from_original = false;
        let mut from_current = false;

        while let Some(b) = lhs.get(li) {
            if b.dist > chosen + dist_tol {
                break;
            }
            tally(b, &mut nearest, &mut entries, &mut exits);
            from_original = true;
            li += 1;
        }
        while let Some(b) = rhs.get(ri) {
            if b.dist > chosen + dist_tol {
                break;
            }
            tally(b, &mut nearest, &mut entries, &mut exits);
            from_current = true;
            ri += 1;
        }

        let nearest = nearest.expect("at least one boundary consumed per event");
        let kind = match (entries > 0, exits > 0) {
            (true, false) => TransitionKind::Entry,
            (false, true) => TransitionKind::Exit,
            _ => TransitionKind::Multi,
        };
        let origin = match (from_original, from_current) {
            (true, true) => TransitionOrigin::Both,
            (true, false) => TransitionOrigin::Original,
            _ => TransitionOrigin::Current,
        };
        events.push(Transition {
            dist: chosen,
            point: nearest.point,
            kind,
            origin,
            obliq: nearest.obliq,
        });
    }

    events
}

fn tally<'a>(
    b: &'a Boundary,
    nearest: &mut Option<&'a Boundary>,
    entries: &mut usize,
    exits: &mut usize,
) {
    if b.is_exit {
        *exits += 1;
    } else {
        *entries += 1;
    }
    if nearest.map_or(true, |n| b.dist < n.dist) {
        *nearest = Some(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shotcmp_math::Vec3;
    use shotcmp_model::Partition;

    fn x_ray() -> Ray {
        Ray::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0))
    }

    fn partition(in_x: f64, out_x: f64) -> Segment {
        Segment::Partition(Partition {
            in_point: Point3::new(in_x, 0.0, 0.0),
            in_dist: in_x,
            out_point: Point3::new(out_x, 0.0, 0.0),
            out_dist: out_x,
            los: out_x - in_x,
            scaled_los: out_x - in_x,
            obliq_in: 0.1,
            obliq_out: 0.2,
            region_name: "r".to_string(),
            path_name: "/r".to_string(),
            region_id: 1,
        })
    }

    #[test]
    fn test_identical_sides_merge() {
        let ray = x_ray();
        let segs = vec![partition(1.0, 2.0)];
        let events = walk_transitions(&ray, &segs, &segs, 0.005);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, TransitionKind::Entry);
        assert_eq!(events[0].origin, TransitionOrigin::Both);
        assert_eq!(events[0].dist, 1.0);
        assert_eq!(events[1].kind, TransitionKind::Exit);
        assert_eq!(events[1].origin, TransitionOrigin::Both);
        assert_eq!(events[1].dist, 2.0);
        assert_eq!(events[0].obliq, Some(0.1));
    }

    #[test]
    fn test_one_sided_boundary() {
        let ray = x_ray();
        // Current side splits the recorded partition in two.
        let original = vec![partition(1.0, 3.0)];
        let current = vec![partition(1.0, 2.0), partition(2.0, 3.0)];
        let events = walk_transitions(&ray, &original, &current, 0.005);

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].origin, TransitionOrigin::Both);
        // The split point exists only on the current side; its exit
        // and re-entry coincide.
        assert_eq!(events[1].dist, 2.0);
        assert_eq!(events[1].origin, TransitionOrigin::Current);
        assert_eq!(events[1].kind, TransitionKind::Multi);
        assert_eq!(events[2].origin, TransitionOrigin::Both);
    }

    #[test]
    fn test_multi_from_opposite_sides() {
        let ray = x_ray();
        // Original exits at 2.0 where current enters.
        let original = vec![partition(1.0, 2.0)];
        let current = vec![partition(2.0, 3.0)];
        let events = walk_transitions(&ray, &original, &current, 0.005);

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].origin, TransitionOrigin::Original);
        assert_eq!(events[0].kind, TransitionKind::Entry);
        assert_eq!(events[1].dist, 2.0);
        assert_eq!(events[1].origin, TransitionOrigin::Both);
        assert_eq!(events[1].kind, TransitionKind::Multi);
        assert_eq!(events[2].origin, TransitionOrigin::Current);
        assert_eq!(events[2].kind, TransitionKind::Exit);
    }

    #[test]
    fn test_empty_sides() {
        let ray = x_ray();
        assert!(walk_transitions(&ray, &[], &[], 0.005).is_empty());
        assert!(walk_transitions(&ray, &[Segment::Miss], &[Segment::Miss], 0.005).is_empty());

        let one = vec![partition(1.0, 2.0)];
        let events = walk_transitions(&ray, &one, &[], 0.005);
        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .all(|e| e.origin == TransitionOrigin::Original));
    }

    #[test]
    fn test_tolerance_window_consumes_fine_structure() {
        let ray = x_ray();
        // The current side has a sliver entirely inside the tolerance
        // window around 2.0; it must not produce its own event.
        let original = vec![partition(1.0, 2.0)];
        let current = vec![partition(1.0, 1.999), partition(2.001, 3.0)];
        let events = walk_transitions(&ray, &original, &current, 0.005);

        assert_eq!(events.len(), 3);
        assert_eq!(events[1].kind, TransitionKind::Multi);
        assert_eq!(events[1].origin, TransitionOrigin::Both);
        assert_eq!(events[2].dist, 3.0);
    }

    #[test]
    fn test_gap_contributes_no_boundary() {
        let ray = x_ray();
        let original = vec![partition(1.0, 2.0)];
        let with_gap = vec![
            partition(1.0, 2.0),
            Segment::Gap(shotcmp_model::Gap {
                in_point: Point3::new(2.0, 0.0, 0.0),
                resume_point: Point3::new(5.0, 0.0, 0.0),
                los: 3.0,
            }),
        ];
        let a = walk_transitions(&ray, &original, &with_gap, 0.005);
        let b = walk_transitions(&ray, &original, &original, 0.005);
        assert_eq!(a, b);
    }
}
