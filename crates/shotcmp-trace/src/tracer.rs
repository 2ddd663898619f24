//! Analytic reference tracer over [`Scene`]s.

use crate::scene::{Scene, ShapeSpan};
use crate::{ShotlineTracer, TraceError};
use shotcmp_math::{obliquity, Vec3, LENGTH_EPSILON};
use shotcmp_model::{Gap, Overlap, Partition, Ray, Segment};

/// Fires rays against an analytic [`Scene`] and produces ordered
/// shotlines: one partition per region crossing, gaps where nothing
/// is hit between crossings, and overlaps where two regions claim the
/// same span.
pub struct SceneTracer {
    scene: Scene,
}

/// One region crossing, before segment assembly.
struct RegionSpan {
    span: ShapeSpan,
    region: usize,
}

impl SceneTracer {
    /// Build a tracer over a validated scene.
    pub fn new(scene: Scene) -> Result<Self, TraceError> {
        scene.validate()?;
        Ok(Self { scene })
    }

    /// Load the scene from a TOML file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, TraceError> {
        Self::new(Scene::from_path(path)?)
    }
}

impl ShotlineTracer for SceneTracer {
    fn trace(&self, ray: &Ray) -> Result<Vec<Segment>, TraceError> {
        let norm = ray.direction.norm();
        if norm < 1e-12 {
            return Err(TraceError::Fatal("ray direction has zero length".into()));
        }
        let dir: Vec3 = ray.direction / norm;

        let mut spans: Vec<RegionSpan> = self
            .scene
            .regions
            .iter()
            .enumerate()
            .filter_map(|(i, region)| {
                region
                    .shape
                    .intersect(&ray.origin, &dir)
                    .filter(|s| s.t_out - s.t_in > LENGTH_EPSILON)
                    .map(|span| RegionSpan { span, region: i })
            })
            .collect();
        spans.sort_by(|a, b| {
            a.span
                .t_in
                .total_cmp(&b.span.t_in)
                .then(a.region.cmp(&b.region))
        });

        if spans.is_empty() {
            return Ok(vec![Segment::Miss]);
        }

        // (entry distance, tie rank) keyed list, sorted at the end so
        // gaps and overlaps interleave with partitions by entry.
        let mut keyed: Vec<(f64, u8, Segment)> = Vec::new();

        for rs in &spans {
            keyed.push((rs.span.t_in, 0, self.partition(ray, &dir, rs)));
        }

        // Coverage walk: `cover_end` is how far solid has reached,
        // `owner` the span that got it there.
        let mut cover_end = spans[0].span.t_out;
        let mut owner = 0usize;
        for k in 1..spans.len() {
            let s = &spans[k];
            if s.span.t_in > cover_end + LENGTH_EPSILON {
                keyed.push((
                    cover_end,
                    1,
                    Segment::Gap(Gap {
                        in_point: ray.origin + cover_end * dir,
                        resume_point: ray.origin + s.span.t_in * dir,
                        los: s.span.t_in - cover_end,
                    }),
                ));
            } else if s.span.t_in < cover_end - LENGTH_EPSILON {
                let end = cover_end.min(s.span.t_out);
                let a = &self.scene.regions[spans[owner].region];
                let b = &self.scene.regions[s.region];
                keyed.push((
                    s.span.t_in,
                    2,
                    Segment::Overlap(Overlap {
                        region1: a.name.clone(),
                        region2: b.name.clone(),
                        id1: a.id,
                        id2: b.id,
                        in_point: ray.origin + s.span.t_in * dir,
                        out_point: ray.origin + end * dir,
                        los: end - s.span.t_in,
                    }),
                ));
            }
            if s.span.t_out > cover_end {
                cover_end = s.span.t_out;
                owner = k;
            }
        }

        keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        Ok(keyed.into_iter().map(|(_, _, seg)| seg).collect())
    }
}

impl SceneTracer {
    fn partition(&self, ray: &Ray, dir: &Vec3, rs: &RegionSpan) -> Segment {
        let region = &self.scene.regions[rs.region];
        let los = rs.span.t_out - rs.span.t_in;
        let obliq_in = obliquity(dir, &rs.span.normal_in);
        let obliq_out = obliquity(dir, &rs.span.normal_out);
        Segment::Partition(Partition {
            in_point: ray.origin + rs.span.t_in * dir,
            in_dist: rs.span.t_in,
            out_point: ray.origin + rs.span.t_out * dir,
            out_dist: rs.span.t_out,
            los,
            scaled_los: los * obliq_in.cos(),
            obliq_in,
            obliq_out,
            region_name: region.name.clone(),
            path_name: region.path_name(),
            region_id: region.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shotcmp_math::Point3;
    use shotcmp_model::SegmentKind;

    fn x_ray() -> Ray {
        Ray::new(Point3::new(-10.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0))
    }

    fn tracer(toml: &str) -> SceneTracer {
        SceneTracer::new(Scene::from_toml_str(toml).unwrap()).unwrap()
    }

    #[test]
    fn test_single_sphere_partition() {
        let tracer = tracer(
            r#"
            [[region]]
            name = "r.ball"
            id = 7
            shape = "sphere"
            center = [0.0, 0.0, 0.0]
            radius = 2.0
            "#,
        );
        let segs = tracer.trace(&x_ray()).unwrap();
        assert_eq!(segs.len(), 1);
        let Segment::Partition(p) = &segs[0] else {
            panic!("expected partition");
        };
        assert_relative_eq!(p.in_dist, 8.0, epsilon = 1e-12);
        assert_relative_eq!(p.out_dist, 12.0, epsilon = 1e-12);
        assert_relative_eq!(p.los, 4.0, epsilon = 1e-12);
        // Head-on hit: normal incidence at both crossings.
        assert_relative_eq!(p.obliq_in, 0.0, epsilon = 1e-12);
        assert_eq!(p.region_name, "r.ball");
        assert_eq!(p.region_id, 7);
    }

    #[test]
    fn test_gap_between_boxes() {
        let tracer = tracer(
            r#"
            [[region]]
            name = "r.front"
            id = 1
            shape = "box"
            min = [0.0, -1.0, -1.0]
            max = [1.0, 1.0, 1.0]

            [[region]]
            name = "r.back"
            id = 2
            shape = "box"
            min = [3.0, -1.0, -1.0]
            max = [4.0, 1.0, 1.0]
            "#,
        );
        let segs = tracer.trace(&x_ray()).unwrap();
        let kinds: Vec<_> = segs.iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![SegmentKind::Partition, SegmentKind::Gap, SegmentKind::Partition]
        );
        let Segment::Gap(g) = &segs[1] else { unreachable!() };
        assert_relative_eq!(g.los, 2.0, epsilon = 1e-12);
        assert_relative_eq!(g.in_point.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(g.resume_point.x, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_overlap_reported() {
        let tracer = tracer(
            r#"
            [[region]]
            name = "r.a"
            id = 1
            shape = "box"
            min = [0.0, -1.0, -1.0]
            max = [2.0, 1.0, 1.0]

            [[region]]
            name = "r.b"
            id = 2
            shape = "box"
            min = [1.0, -1.0, -1.0]
            max = [3.0, 1.0, 1.0]
            "#,
        );
        let segs = tracer.trace(&x_ray()).unwrap();
        let overlap = segs
            .iter()
            .find_map(|s| match s {
                Segment::Overlap(o) => Some(o),
                _ => None,
            })
            .expect("expected an overlap segment");
        assert_eq!(overlap.region1, "r.a");
        assert_eq!(overlap.region2, "r.b");
        assert_relative_eq!(overlap.los, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_miss() {
        let tracer = tracer(
            r#"
            [[region]]
            name = "r.ball"
            id = 7
            shape = "sphere"
            center = [0.0, 50.0, 0.0]
            radius = 1.0
            "#,
        );
        assert_eq!(tracer.trace(&x_ray()).unwrap(), vec![Segment::Miss]);
    }

    #[test]
    fn test_zero_direction_is_fatal() {
        let tracer = tracer("");
        let ray = Ray::new(Point3::origin(), Vec3::zeros());
        assert!(matches!(tracer.trace(&ray), Err(TraceError::Fatal(_))));
    }
}
