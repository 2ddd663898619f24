//! Deterministic text rendering of accumulated differences.

use crate::settings::CompareSettings;
use shotcmp_model::{FieldDelta, SegmentKind, ShotRay};
use std::fmt::Write as _;

/// Render the report for every compared ray.
///
/// One block per ray with at least one rendered difference, in input
/// order; instances render in segment order. A kind mismatch renders
/// alone and ends its ray's block. When nothing renders at all the
/// report is the single line `no differences found`.
pub fn render_report(rays: &[ShotRay], settings: &CompareSettings) -> String {
    let mut out = String::new();

    for (number, shot) in rays.iter().enumerate() {
        let block = render_ray(number + 1, shot, settings);
        if !block.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&block);
        }
    }

    if out.is_empty() {
        out.push_str("no differences found\n");
    }
    out
}

fn render_ray(number: usize, shot: &ShotRay, settings: &CompareSettings) -> String {
    let mut lines = String::new();

    for inst in &shot.diffs {
        if inst.is_kind_mismatch() {
            // Fundamental divergence: report it alone and stop.
            let _ = writeln!(lines, "  segment {}:", pair_label(inst.original, inst.current));
            for delta in &inst.deltas {
                push_delta(&mut lines, delta, settings);
            }
            break;
        }

        let category = inst
            .original
            .and_then(|i| shot.original.get(i))
            .or_else(|| inst.current.and_then(|i| shot.current.get(i)))
            .map(|seg| seg.kind());
        let enabled = match category {
            Some(SegmentKind::Partition) => settings.report_partitions,
            Some(SegmentKind::Gap) => settings.report_gaps,
            Some(SegmentKind::Overlap) => settings.report_overlaps,
            _ => true,
        };
        if !enabled {
            continue;
        }

        let mut body = String::new();
        for delta in &inst.deltas {
            push_delta(&mut body, delta, settings);
        }
        if !body.is_empty() {
            let _ = writeln!(lines, "  segment {}:", pair_label(inst.original, inst.current));
            lines.push_str(&body);
        }
    }

    if lines.is_empty() {
        return lines;
    }

    let mut block = String::new();
    let o = shot.ray.origin;
    let d = shot.ray.direction;
    let _ = writeln!(
        block,
        "Ray {number}: origin ({}, {}, {}) direction ({}, {}, {})",
        o.x, o.y, o.z, d.x, d.y, d.z
    );
    block.push_str(&lines);
    block
}

fn pair_label(original: Option<usize>, current: Option<usize>) -> String {
    let fmt = |v: Option<usize>| v.map_or_else(|| "-".to_string(), |i| i.to_string());
    format!("{}/{}", fmt(original), fmt(current))
}

fn push_delta(out: &mut String, delta: &FieldDelta, settings: &CompareSettings) {
    match delta {
        FieldDelta::Kind { original, current } => {
            let line = match (original, current) {
                (Some(l), Some(r)) => format!("type mismatch: Original {l}, Current {r}"),
                (Some(l), None) => {
                    format!("unmatched segment: Original {l} has no Current counterpart")
                }
                (None, Some(r)) => {
                    format!("unmatched segment: Current {r} has no Original counterpart")
                }
                (None, None) => return,
            };
            let _ = writeln!(out, "    {line}");
        }
        FieldDelta::InPoint { delta } if settings.report_points => {
            let _ = writeln!(out, "    entry point moved {delta}");
        }
        FieldDelta::OutPoint { delta } if settings.report_points => {
            let _ = writeln!(out, "    exit point moved {delta}");
        }
        FieldDelta::Los { delta } if settings.report_los => {
            let _ = writeln!(out, "    los delta {delta}");
        }
        FieldDelta::ScaledLos { delta } if settings.report_los => {
            let _ = writeln!(out, "    scaled los delta {delta}");
        }
        FieldDelta::ObliqIn { delta } if settings.report_obliquity => {
            let _ = writeln!(out, "    entry obliquity delta {delta}");
        }
        FieldDelta::ObliqOut { delta } if settings.report_obliquity => {
            let _ = writeln!(out, "    exit obliquity delta {delta}");
        }
        FieldDelta::RegionName { original, current } if settings.report_names => {
            let _ = writeln!(out, "    region name: \"{original}\" -> \"{current}\"");
        }
        FieldDelta::PathName { original, current } if settings.report_names => {
            let _ = writeln!(out, "    path name: \"{original}\" -> \"{current}\"");
        }
        FieldDelta::RegionId { original, current } if settings.report_names => {
            let _ = writeln!(out, "    region id: {original} -> {current}");
        }
        FieldDelta::ClaimantName {
            slot,
            original,
            current,
        } if settings.report_names => {
            let _ = writeln!(
                out,
                "    overlap region {slot}: \"{original}\" -> \"{current}\""
            );
        }
        FieldDelta::ClaimantId {
            slot,
            original,
            current,
        } if settings.report_names => {
            let _ = writeln!(out, "    overlap id {slot}: {original} -> {current}");
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shotcmp_math::{Point3, Vec3};
    use shotcmp_model::{DiffInstance, Gap, Partition, Ray, Segment};

    fn shot_with_diffs(diffs: Vec<DiffInstance>) -> ShotRay {
        let p = Segment::Partition(Partition {
            in_point: Point3::new(1.0, 0.0, 0.0),
            in_dist: 1.0,
            out_point: Point3::new(2.0, 0.0, 0.0),
            out_dist: 2.0,
            los: 1.0,
            scaled_los: 1.0,
            obliq_in: 0.0,
            obliq_out: 0.0,
            region_name: "R1".to_string(),
            path_name: "/R1".to_string(),
            region_id: 1,
        });
        let g = Segment::Gap(Gap {
            in_point: Point3::new(1.0, 0.0, 0.0),
            resume_point: Point3::new(2.0, 0.0, 0.0),
            los: 1.0,
        });
        ShotRay {
            ray: Ray::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
            original: vec![p.clone(), p],
            current: vec![g.clone(), g],
            diffs,
        }
    }

    #[test]
    fn test_no_differences_message() {
        let settings = CompareSettings::default();
        let report = render_report(&[shot_with_diffs(vec![])], &settings);
        assert_eq!(report, "no differences found\n");
    }

    #[test]
    fn test_kind_mismatch_short_circuits_block() {
        let settings = CompareSettings::default();
        let diffs = vec![
            DiffInstance {
                original: Some(0),
                current: Some(0),
                deltas: vec![FieldDelta::Kind {
                    original: Some(SegmentKind::Partition),
                    current: Some(SegmentKind::Gap),
                }],
            },
            DiffInstance {
                original: Some(1),
                current: Some(1),
                deltas: vec![FieldDelta::Los { delta: 0.5 }],
            },
        ];
        let report = render_report(&[shot_with_diffs(diffs)], &settings);
        assert!(report.contains("type mismatch: Original Partition, Current Gap"));
        assert!(!report.contains("los delta"));
    }

    #[test]
    fn test_field_toggles_filter_lines() {
        let mut settings = CompareSettings::default();
        settings.report_los = false;
        let diffs = vec![DiffInstance {
            original: Some(0),
            current: Some(0),
            deltas: vec![
                FieldDelta::Los { delta: 0.5 },
                FieldDelta::RegionName {
                    original: "R1".to_string(),
                    current: "R2".to_string(),
                },
            ],
        }];
        let report = render_report(&[shot_with_diffs(diffs)], &settings);
        assert!(!report.contains("los delta"));
        assert!(report.contains("region name: \"R1\" -> \"R2\""));
    }

    #[test]
    fn test_fully_suppressed_ray_collapses_to_no_differences() {
        let mut settings = CompareSettings::default();
        settings.report_partitions = false;
        let diffs = vec![DiffInstance {
            original: Some(0),
            current: None,
            deltas: vec![FieldDelta::Los { delta: 0.5 }],
        }];
        let report = render_report(&[shot_with_diffs(diffs)], &settings);
        assert_eq!(report, "no differences found\n");
    }

    #[test]
    fn test_header_and_label() {
        let settings = CompareSettings::default();
        let diffs = vec![DiffInstance {
            original: Some(1),
            current: None,
            deltas: vec![FieldDelta::Kind {
                original: Some(SegmentKind::Partition),
                current: None,
            }],
        }];
        let report = render_report(&[shot_with_diffs(diffs)], &settings);
        assert!(report.starts_with("Ray 1: origin (0, 0, 0) direction (1, 0, 0)\n"));
        assert!(report.contains("  segment 1/-:\n"));
        assert!(report.contains("unmatched segment: Original Partition has no Current counterpart"));
    }
}
