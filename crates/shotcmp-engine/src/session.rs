//! Comparison session: owns the loaded rays and drives the
//! clear / load / run / report / settings operation set.

use crate::diff::diff_segment_pair;
use crate::error::{CompareError, Result};
use crate::reconcile::reconcile;
use crate::report::render_report;
use crate::settings::{CompareSettings, SettingValue};
use crate::transition::walk_transitions;

use rayon::prelude::*;
use shotcmp_model::ShotRay;
use shotcmp_trace::ShotlineTracer;
use std::path::Path;
use tracing::{debug, info};

/// Counts reported by a completed [`Session::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Rays traced and compared.
    pub rays: usize,
    /// Rays with at least one difference.
    pub rays_differing: usize,
    /// Total difference instances across all rays.
    pub instances: usize,
}

/// One comparison session.
///
/// The session owns the loaded rays (numbered by load order), the
/// settings, and the run state. Settings are read-only during a run
/// and mutated only through [`Session::set_setting`] between runs.
pub struct Session {
    rays: Vec<ShotRay>,
    settings: CompareSettings,
    compared: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session with default settings.
    pub fn new() -> Self {
        Self {
            rays: Vec::new(),
            settings: CompareSettings::default(),
            compared: false,
        }
    }

    /// Create an empty session with validated settings.
    pub fn with_settings(settings: CompareSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            rays: Vec::new(),
            settings,
            compared: false,
        })
    }

    /// Discard all loaded rays and diff state.
    pub fn clear(&mut self) {
        self.rays.clear();
        self.compared = false;
    }

    /// Load recorded shotlines from a shotfile path.
    ///
    /// Fails without touching state if rays are already loaded or the
    /// file does not parse; a parse failure loads nothing.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        if !self.rays.is_empty() {
            return Err(CompareError::AlreadyLoaded);
        }
        self.rays = shotcmp_shotfile::read_shotfile(path)?;
        self.compared = false;
        info!(rays = self.rays.len(), "shotlines loaded");
        Ok(self.rays.len())
    }

    /// Load recorded shotlines from shotfile text.
    pub fn load_str(&mut self, text: &str) -> Result<usize> {
        if !self.rays.is_empty() {
            return Err(CompareError::AlreadyLoaded);
        }
        self.rays = shotcmp_shotfile::read_shotfile_from_str(text)?;
        self.compared = false;
        Ok(self.rays.len())
    }

    /// Regenerate the current side of every ray through `tracer`, then
    /// compare both sides.
    ///
    /// Tracing is sequential; a tracer failure aborts the remaining
    /// rays (already-traced rays keep their shotlines) and the session
    /// stays un-compared. The comparison pass itself is pure per ray
    /// and runs in parallel; results are kept in ray order.
    pub fn run(&mut self, tracer: &dyn ShotlineTracer) -> Result<RunSummary> {
        if self.rays.is_empty() {
            return Err(CompareError::NothingLoaded);
        }
        self.compared = false;

        for shot in self.rays.iter_mut() {
            shot.current = tracer.trace(&shot.ray)?;
            shot.diffs.clear();
        }

        let settings = self.settings.clone();
        self.rays
            .par_iter_mut()
            .for_each(|shot| compare_shot(shot, &settings));
        self.compared = true;

        let summary = RunSummary {
            rays: self.rays.len(),
            rays_differing: self.rays.iter().filter(|r| !r.diffs.is_empty()).count(),
            instances: self.rays.iter().map(|r| r.diffs.len()).sum(),
        };
        info!(
            rays = summary.rays,
            differing = summary.rays_differing,
            instances = summary.instances,
            "comparison complete"
        );
        Ok(summary)
    }

    /// Render the report for the last completed run.
    pub fn report(&self) -> Result<String> {
        if !self.compared {
            return Err(CompareError::NotCompared);
        }
        Ok(render_report(&self.rays, &self.settings))
    }

    /// The loaded rays, in load order.
    pub fn rays(&self) -> &[ShotRay] {
        &self.rays
    }

    /// The session settings.
    pub fn settings(&self) -> &CompareSettings {
        &self.settings
    }

    /// Read one setting by name.
    pub fn get_setting(&self, name: &str) -> Result<SettingValue> {
        self.settings.get(name)
    }

    /// Write one setting by name. Tolerances take effect at the next
    /// `run`; report toggles at the next `report`.
    pub fn set_setting(&mut self, name: &str, value: &str) -> Result<()> {
        self.settings.set(name, value)
    }
}

/// Compare one ray's two sides and fill its diff list.
pub fn compare_shot(shot: &mut ShotRay, settings: &CompareSettings) {
    shot.diffs.clear();
    let events = walk_transitions(&shot.ray, &shot.original, &shot.current, settings.dist_tol);
    let pairs = reconcile(
        &shot.ray,
        &shot.original,
        &shot.current,
        &events,
        settings.dist_tol,
    );
    debug!(
        events = events.len(),
        pairs = pairs.len(),
        "reconciled shotline"
    );

    for pair in pairs {
        let original = pair.original.map(|i| (i, &shot.original[i]));
        let current = pair.current.map(|i| (i, &shot.current[i]));
        if let Some(inst) = diff_segment_pair(original, current, settings) {
            shot.diffs.push(inst);
        }
    }
}
