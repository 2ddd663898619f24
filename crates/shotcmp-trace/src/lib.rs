//! Ray-tracer collaborator interface for shotcmp.
//!
//! The comparison engine never traces rays itself; it asks a
//! [`ShotlineTracer`] to produce the "current" segment sequence for
//! each recorded ray. Two implementations live here:
//!
//! - [`ReplayTracer`] replays shotlines recorded in a second shotfile,
//!   so two recorded runs can be compared without any geometry.
//! - [`SceneTracer`] fires rays analytically against a small
//!   TOML-described scene of named sphere and box regions. It exists
//!   for demos and end-to-end tests, not as a modeling kernel.

mod scene;
mod tracer;

pub use scene::{Region, Scene, Shape};
pub use tracer::SceneTracer;

use shotcmp_model::{Ray, Segment, ShotRay};
use thiserror::Error;

/// Errors reported by tracer collaborators.
#[derive(Error, Debug)]
pub enum TraceError {
    /// I/O error loading a replay file or scene description.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tracer hit a fatal internal error; the run is aborted.
    #[error("tracer failed: {0}")]
    Fatal(String),

    /// A replay file has no shotline for the requested ray.
    #[error("replay has no shotline for ray with origin ({x}, {y}, {z})")]
    NoReplayRay {
        /// Requested ray origin.
        x: f64,
        /// Requested ray origin.
        y: f64,
        /// Requested ray origin.
        z: f64,
    },

    /// The replay shotfile itself failed to parse.
    #[error(transparent)]
    Replay(#[from] shotcmp_shotfile::ShotfileError),

    /// A scene description is malformed.
    #[error("invalid scene: {0}")]
    Scene(String),

    /// A scene file failed to parse as TOML.
    #[error("scene file error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// The sole geometry-producing dependency of the comparison engine.
///
/// Given a ray, returns the ordered segment sequence the model
/// produces for it, nearest first. Implementations are synchronous;
/// a returned error aborts the run for the remaining rays.
pub trait ShotlineTracer {
    /// Fire one ray and return its shotline.
    fn trace(&self, ray: &Ray) -> Result<Vec<Segment>, TraceError>;
}

/// Replays shotlines recorded in another shotfile.
///
/// Rays are matched by origin and direction, so replaying is
/// stateless and repeatable. Matching is exact up to `1e-9` per
/// component.
pub struct ReplayTracer {
    recorded: Vec<ShotRay>,
}

impl ReplayTracer {
    /// Build a replay tracer from already-loaded rays.
    pub fn new(recorded: Vec<ShotRay>) -> Self {
        Self { recorded }
    }

    /// Load a replay tracer from a shotfile path.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, TraceError> {
        Ok(Self::new(shotcmp_shotfile::read_shotfile(path)?))
    }

    /// Load a replay tracer from shotfile text.
    pub fn from_text(text: &str) -> Result<Self, TraceError> {
        Ok(Self::new(shotcmp_shotfile::read_shotfile_from_str(text)?))
    }
}

impl ShotlineTracer for ReplayTracer {
    fn trace(&self, ray: &Ray) -> Result<Vec<Segment>, TraceError> {
        const EPS: f64 = 1e-9;
        let hit = self.recorded.iter().find(|shot| {
            (shot.ray.origin - ray.origin).abs().max() <= EPS
                && (shot.ray.direction - ray.direction).abs().max() <= EPS
        });
        match hit {
            Some(shot) => Ok(shot.original.clone()),
            None => Err(TraceError::NoReplayRay {
                x: ray.origin.x,
                y: ray.origin.y,
                z: ray.origin.z,
            }),
        }
    }
}
