//! Shotfile reader: parses recorded shotlines into [`ShotRay`]s.

use std::path::Path;

use crate::error::{Result, ShotfileError};
use crate::lexer::{split_fields, strip_comment};
use crate::RECORD_VERSION;

use shotcmp_math::{Point3, Vec3};
use shotcmp_model::{Gap, Overlap, Partition, Ray, Segment, ShotRay};
use tracing::debug;

/// Payload field counts for the version-1 record layouts.
const RAY_FIELDS: usize = 6;
const HIT_FIELDS: usize = 15;
const GAP_FIELDS: usize = 7;
const MISS_FIELDS: usize = 0;
const OVERLAP_FIELDS: usize = 11;

/// Read a shotfile from a path.
pub fn read_shotfile(path: impl AsRef<Path>) -> Result<Vec<ShotRay>> {
    let text = std::fs::read_to_string(path)?;
    read_shotfile_from_str(&text)
}

/// Read a shotfile from a string.
///
/// Returns every recorded ray with its segment sequence in the
/// `original` side. Any malformed line is fatal: the error identifies
/// the line and nothing is returned.
pub fn read_shotfile_from_str(text: &str) -> Result<Vec<ShotRay>> {
    let mut rays: Vec<ShotRay> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw);
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(line);
        let keyword = fields[0].as_str();
        if fields.len() < 2 {
            return Err(ShotfileError::parse(
                line_no,
                format!("{keyword} record is missing a version"),
            ));
        }
        let version: u32 = fields[1].parse().map_err(|_| {
            ShotfileError::parse(line_no, format!("invalid version `{}`", fields[1]))
        })?;
        if version != RECORD_VERSION {
            return Err(ShotfileError::UnsupportedVersion {
                line: line_no,
                keyword: keyword.to_string(),
                version,
            });
        }
        let payload = &fields[2..];

        match keyword {
            "RAY" => {
                expect_fields(line_no, keyword, RAY_FIELDS, payload)?;
                let v = parse_reals(line_no, payload)?;
                let ray = Ray::new(
                    Point3::new(v[0], v[1], v[2]),
                    Vec3::new(v[3], v[4], v[5]),
                );
                rays.push(ShotRay::new(ray, Vec::new()));
            }
            "HIT" => {
                expect_fields(line_no, keyword, HIT_FIELDS, payload)?;
                let ray = current_ray(line_no, keyword, &mut rays)?;
                let v = parse_reals(line_no, &payload[..12])?;
                ray.original.push(Segment::Partition(Partition {
                    in_point: Point3::new(v[0], v[1], v[2]),
                    in_dist: v[3],
                    out_point: Point3::new(v[4], v[5], v[6]),
                    out_dist: v[7],
                    los: v[8],
                    scaled_los: v[9],
                    obliq_in: v[10],
                    obliq_out: v[11],
                    region_name: payload[12].clone(),
                    path_name: payload[13].clone(),
                    region_id: parse_int(line_no, &payload[14])?,
                }));
            }
            "GAP" => {
                expect_fields(line_no, keyword, GAP_FIELDS, payload)?;
                let ray = current_ray(line_no, keyword, &mut rays)?;
                let v = parse_reals(line_no, payload)?;
                ray.original.push(Segment::Gap(Gap {
                    in_point: Point3::new(v[0], v[1], v[2]),
                    resume_point: Point3::new(v[3], v[4], v[5]),
                    los: v[6],
                }));
            }
            "MISS" => {
                expect_fields(line_no, keyword, MISS_FIELDS, payload)?;
                let ray = current_ray(line_no, keyword, &mut rays)?;
                ray.original.push(Segment::Miss);
            }
            "OVERLAP" => {
                expect_fields(line_no, keyword, OVERLAP_FIELDS, payload)?;
                let ray = current_ray(line_no, keyword, &mut rays)?;
                let v = parse_reals(line_no, &payload[4..])?;
                ray.original.push(Segment::Overlap(Overlap {
                    region1: payload[0].clone(),
                    region2: payload[1].clone(),
                    id1: parse_int(line_no, &payload[2])?,
                    id2: parse_int(line_no, &payload[3])?,
                    in_point: Point3::new(v[0], v[1], v[2]),
                    out_point: Point3::new(v[3], v[4], v[5]),
                    los: v[6],
                }));
            }
            _ => {
                return Err(ShotfileError::UnknownRecord {
                    line: line_no,
                    keyword: keyword.to_string(),
                });
            }
        }
    }

    debug!(
        rays = rays.len(),
        segments = rays.iter().map(|r| r.original.len()).sum::<usize>(),
        "shotfile read"
    );
    Ok(rays)
}

fn expect_fields(line: usize, keyword: &str, expected: usize, payload: &[String]) -> Result<()> {
    if payload.len() != expected {
        return Err(ShotfileError::FieldCount {
            line,
            keyword: keyword.to_string(),
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

fn current_ray<'a>(
    line: usize,
    keyword: &str,
    rays: &'a mut [ShotRay],
) -> Result<&'a mut ShotRay> {
    rays.last_mut().ok_or_else(|| ShotfileError::OrphanRecord {
        line,
        keyword: keyword.to_string(),
    })
}

fn parse_reals(line: usize, fields: &[String]) -> Result<Vec<f64>> {
    fields
        .iter()
        .map(|f| {
            f.parse::<f64>()
                .map_err(|_| ShotfileError::parse(line, format!("invalid number `{f}`")))
        })
        .collect()
}

fn parse_int(line: usize, field: &str) -> Result<i64> {
    field
        .parse::<i64>()
        .map_err(|_| ShotfileError::parse(line, format!("invalid integer `{field}`")))
}
