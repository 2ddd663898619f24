//! TOML-described analytic scenes for the reference tracer.

use crate::TraceError;
use serde::{Deserialize, Serialize};
use shotcmp_math::{Point3, Vec3};
use std::path::Path;

/// A scene: a flat list of named regions.
///
/// ```toml
/// [[region]]
/// name = "r.hull"
/// id = 1001
/// shape = "sphere"
/// center = [0.0, 0.0, 0.0]
/// radius = 10.0
///
/// [[region]]
/// name = "r.core"
/// id = 1002
/// shape = "box"
/// min = [-2.0, -2.0, -2.0]
/// max = [2.0, 2.0, 2.0]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// The regions making up the scene.
    #[serde(default, rename = "region")]
    pub regions: Vec<Region>,
}

/// One named solid region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Region name reported in partitions.
    pub name: String,
    /// Full path name; defaults to `/<name>` when absent.
    #[serde(default)]
    pub path: Option<String>,
    /// Numeric region identifier.
    pub id: i64,
    /// The region's geometry.
    #[serde(flatten)]
    pub shape: Shape,
}

impl Region {
    /// The path name to report for this region.
    pub fn path_name(&self) -> String {
        self.path.clone().unwrap_or_else(|| format!("/{}", self.name))
    }
}

/// Region geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Shape {
    /// A sphere.
    Sphere {
        /// Center point.
        center: [f64; 3],
        /// Radius, must be positive.
        radius: f64,
    },
    /// An axis-aligned box.
    Box {
        /// Minimum corner.
        min: [f64; 3],
        /// Maximum corner.
        max: [f64; 3],
    },
}

/// An entry/exit interval of a ray through one shape, with surface
/// normals at both crossings.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ShapeSpan {
    pub t_in: f64,
    pub t_out: f64,
    pub normal_in: Vec3,
    pub normal_out: Vec3,
}

impl Shape {
    /// Intersect a ray (unit `dir`) with this shape.
    ///
    /// Returns the parametric span, or `None` when the ray misses or
    /// the shape lies entirely behind the origin. A span straddling
    /// the origin is clipped to start at zero.
    pub(crate) fn intersect(&self, origin: &Point3, dir: &Vec3) -> Option<ShapeSpan> {
        let span = match self {
            Shape::Sphere { center, radius } => {
                let center = Point3::new(center[0], center[1], center[2]);
                intersect_sphere(origin, dir, &center, *radius)
            }
            Shape::Box { min, max } => {
                let min = Point3::new(min[0], min[1], min[2]);
                let max = Point3::new(max[0], max[1], max[2]);
                intersect_box(origin, dir, &min, &max)
            }
        }?;
        if span.t_out <= 0.0 {
            return None;
        }
        if span.t_in < 0.0 {
            // Ray starts inside; the entry surface is behind us.
            return Some(ShapeSpan {
                t_in: 0.0,
                normal_in: -*dir,
                ..span
            });
        }
        Some(span)
    }
}

/// Quadratic sphere test.
fn intersect_sphere(origin: &Point3, dir: &Vec3, center: &Point3, radius: f64) -> Option<ShapeSpan> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.norm_squared() - radius * radius;
    let disc = b * b - c;
    if disc <= 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let t_in = -b - sqrt_disc;
    let t_out = -b + sqrt_disc;
    let p_in = origin + t_in * dir;
    let p_out = origin + t_out * dir;
    Some(ShapeSpan {
        t_in,
        t_out,
        normal_in: (p_in - center) / radius,
        normal_out: (p_out - center) / radius,
    })
}

/// Slab test against an axis-aligned box, tracking which axis bounds
/// the entry and exit so the normals are exact.
fn intersect_box(origin: &Point3, dir: &Vec3, min: &Point3, max: &Point3) -> Option<ShapeSpan> {
    let mut t_min = f64::NEG_INFINITY;
    let mut t_max = f64::INFINITY;
    let mut axis_in = 0usize;
    let mut axis_out = 0usize;

    for axis in 0..3 {
        let d = dir[axis];
        let o = origin[axis];
        if d.abs() < 1e-12 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let mut t0 = (min[axis] - o) / d;
        let mut t1 = (max[axis] - o) / d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_min {
            t_min = t0;
            axis_in = axis;
        }
        if t1 < t_max {
            t_max = t1;
            axis_out = axis;
        }
    }

    if t_min > t_max {
        return None;
    }
    let mut normal_in = Vec3::zeros();
    normal_in[axis_in] = -dir[axis_in].signum();
    let mut normal_out = Vec3::zeros();
    normal_out[axis_out] = dir[axis_out].signum();
    Some(ShapeSpan {
        t_in: t_min,
        t_out: t_max,
        normal_in,
        normal_out,
    })
}

impl Scene {
    /// Parse a scene from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, TraceError> {
        let scene: Scene = toml::from_str(text)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load a scene from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Check the scene for degenerate regions.
    pub fn validate(&self) -> Result<(), TraceError> {
        for region in &self.regions {
            if region.name.is_empty() {
                return Err(TraceError::Scene("region with empty name".into()));
            }
            match &region.shape {
                Shape::Sphere { radius, .. } if *radius <= 0.0 => {
                    return Err(TraceError::Scene(format!(
                        "region `{}` has non-positive radius",
                        region.name
                    )));
                }
                Shape::Box { min, max } if (0..3).any(|a| min[a] >= max[a]) => {
                    return Err(TraceError::Scene(format!(
                        "region `{}` has an empty box extent",
                        region.name
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_scene() {
        let scene = Scene::from_toml_str(
            r#"
            [[region]]
            name = "r.hull"
            id = 1001
            shape = "sphere"
            center = [0.0, 0.0, 0.0]
            radius = 10.0

            [[region]]
            name = "r.core"
            id = 1002
            shape = "box"
            min = [-2.0, -2.0, -2.0]
            max = [2.0, 2.0, 2.0]
            "#,
        )
        .unwrap();
        assert_eq!(scene.regions.len(), 2);
        assert_eq!(scene.regions[0].name, "r.hull");
        assert_eq!(scene.regions[1].path_name(), "/r.core");
    }

    #[test]
    fn test_invalid_scene_rejected() {
        let err = Scene::from_toml_str(
            r#"
            [[region]]
            name = "bad"
            id = 1
            shape = "sphere"
            center = [0.0, 0.0, 0.0]
            radius = 0.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, TraceError::Scene(_)));
    }

    #[test]
    fn test_sphere_span() {
        let shape = Shape::Sphere {
            center: [5.0, 0.0, 0.0],
            radius: 1.0,
        };
        let span = shape
            .intersect(&Point3::new(0.0, 0.0, 0.0), &Vec3::new(1.0, 0.0, 0.0))
            .unwrap();
        assert_relative_eq!(span.t_in, 4.0, epsilon = 1e-12);
        assert_relative_eq!(span.t_out, 6.0, epsilon = 1e-12);
        assert_relative_eq!(span.normal_in.x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_box_span_and_normals() {
        let shape = Shape::Box {
            min: [2.0, -1.0, -1.0],
            max: [4.0, 1.0, 1.0],
        };
        let span = shape
            .intersect(&Point3::new(0.0, 0.0, 0.0), &Vec3::new(1.0, 0.0, 0.0))
            .unwrap();
        assert_relative_eq!(span.t_in, 2.0, epsilon = 1e-12);
        assert_relative_eq!(span.t_out, 4.0, epsilon = 1e-12);
        assert_eq!(span.normal_in, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(span.normal_out, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_starting_inside_is_clipped() {
        let shape = Shape::Sphere {
            center: [0.0, 0.0, 0.0],
            radius: 2.0,
        };
        let span = shape
            .intersect(&Point3::new(0.0, 0.0, 0.0), &Vec3::new(0.0, 0.0, 1.0))
            .unwrap();
        assert_eq!(span.t_in, 0.0);
        assert_relative_eq!(span.t_out, 2.0, epsilon = 1e-12);
    }
}
