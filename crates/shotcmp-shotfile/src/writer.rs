//! Shotfile writer: serializes recorded shotlines back to text.
//!
//! Floats are written with Rust's shortest round-trip formatting, so
//! a read/write/read cycle reproduces the same values exactly.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;
use crate::lexer::escape_field;
use crate::RECORD_VERSION;

use shotcmp_math::Point3;
use shotcmp_model::{Segment, ShotRay};

/// Serialize the recorded (original) side of every ray to the
/// shotfile grammar.
pub fn write_shotfile(rays: &[ShotRay]) -> String {
    let mut out = String::new();
    for shot in rays {
        let o = shot.ray.origin;
        let d = shot.ray.direction;
        let _ = writeln!(
            out,
            "RAY,{RECORD_VERSION},{},{},{},{},{},{}",
            o.x, o.y, o.z, d.x, d.y, d.z
        );
        for seg in &shot.original {
            push_segment(&mut out, seg);
        }
    }
    out
}

/// Write a shotfile to a path.
pub fn write_shotfile_to_path(path: impl AsRef<Path>, rays: &[ShotRay]) -> Result<()> {
    std::fs::write(path, write_shotfile(rays))?;
    Ok(())
}

fn push_segment(out: &mut String, seg: &Segment) {
    match seg {
        Segment::Partition(p) => {
            let _ = writeln!(
                out,
                "HIT,{RECORD_VERSION},{},{},{},{},{},{},{},{},{},{},{}",
                point(&p.in_point),
                p.in_dist,
                point(&p.out_point),
                p.out_dist,
                p.los,
                p.scaled_los,
                p.obliq_in,
                p.obliq_out,
                escape_field(&p.region_name),
                escape_field(&p.path_name),
                p.region_id
            );
        }
        Segment::Gap(g) => {
            let _ = writeln!(
                out,
                "GAP,{RECORD_VERSION},{},{},{}",
                point(&g.in_point),
                point(&g.resume_point),
                g.los
            );
        }
        Segment::Overlap(o) => {
            let _ = writeln!(
                out,
                "OVERLAP,{RECORD_VERSION},{},{},{},{},{},{},{}",
                escape_field(&o.region1),
                escape_field(&o.region2),
                o.id1,
                o.id2,
                point(&o.in_point),
                point(&o.out_point),
                o.los
            );
        }
        Segment::Miss => {
            let _ = writeln!(out, "MISS,{RECORD_VERSION}");
        }
    }
}

fn point(p: &Point3) -> String {
    format!("{},{},{}", p.x, p.y, p.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_shotfile_from_str;
    use shotcmp_math::Vec3;
    use shotcmp_model::{Partition, Ray};

    #[test]
    fn test_round_trip() {
        let text = "\
RAY,1,0,0,0,1,0,0
HIT,1,1.25,0,0,1.25,2,0,0,2,0.75,0.7125,0.1,0.2,r.hull,/all/r.hull,1001
GAP,1,2,0,0,3,0,0,1
OVERLAP,1,r.a,r.b,1,2,3,0,0,4,0,0,1
RAY,1,0,5,0,1,0,0
MISS,1
";
        let rays = read_shotfile_from_str(text).unwrap();
        let written = write_shotfile(&rays);
        assert_eq!(written, text);

        let reread = read_shotfile_from_str(&written).unwrap();
        assert_eq!(reread, rays);
    }

    #[test]
    fn test_escapes_survive_round_trip() {
        let shot = ShotRay::new(
            Ray::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
            vec![Segment::Partition(Partition {
                in_point: Point3::new(1.0, 0.0, 0.0),
                in_dist: 1.0,
                out_point: Point3::new(2.0, 0.0, 0.0),
                out_dist: 2.0,
                los: 1.0,
                scaled_los: 1.0,
                obliq_in: 0.0,
                obliq_out: 0.0,
                region_name: "left, forward #2".to_string(),
                path_name: "/all/left, forward #2".to_string(),
                region_id: 7,
            })],
        );
        let written = write_shotfile(&[shot.clone()]);
        let reread = read_shotfile_from_str(&written).unwrap();
        assert_eq!(reread, vec![shot]);
    }
}
