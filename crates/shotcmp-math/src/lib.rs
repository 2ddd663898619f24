#![warn(missing_docs)]

//! Math types for the shotcmp shotline comparison toolkit.
//!
//! Thin wrappers around nalgebra providing the types shared by the
//! segment model, the tracers, and the comparison engine: points,
//! vectors, unit directions, and distance helpers.

use nalgebra::{Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Length tolerance used when merging tracer intervals.
pub const LENGTH_EPSILON: f64 = 1e-9;

/// Euclidean distance between two points.
#[inline]
pub fn dist(a: &Point3, b: &Point3) -> f64 {
    (a - b).norm()
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn dist_sq(a: &Point3, b: &Point3) -> f64 {
    (a - b).norm_squared()
}

/// Obliquity of a surface hit: the angle in radians between the ray
/// direction and the surface normal, folded into `[0, pi/2]`.
pub fn obliquity(direction: &Vec3, normal: &Vec3) -> f64 {
    let denom = direction.norm() * normal.norm();
    if denom == 0.0 {
        return 0.0;
    }
    let cos = (direction.dot(normal) / denom).abs().clamp(0.0, 1.0);
    cos.acos()
}
