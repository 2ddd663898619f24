//! Comparison tolerances and report toggles.

use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// All numeric tolerances and report toggles for one comparison
/// session.
///
/// Tolerances are inclusive: a delta exactly equal to its tolerance is
/// not a difference. Toggles control what the report formatter prints,
/// not what the differ records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareSettings {
    /// Distance tolerance for entry/exit point and transition
    /// comparisons (model units).
    pub dist_tol: f64,
    /// Obliquity tolerance (radians).
    pub obliq_tol: f64,
    /// Line-of-sight length tolerance (model units).
    pub los_tol: f64,
    /// Scaled line-of-sight length tolerance (model units).
    pub scaled_los_tol: f64,
    /// Report differences in partition segments.
    pub report_partitions: bool,
    /// Report differences in gap segments.
    pub report_gaps: bool,
    /// Report differences in overlap segments.
    pub report_overlaps: bool,
    /// Report entry/exit point movement.
    pub report_points: bool,
    /// Report line-of-sight (and scaled) length changes.
    pub report_los: bool,
    /// Report obliquity changes.
    pub report_obliquity: bool,
    /// Report region name / path / id changes.
    pub report_names: bool,
}

impl Default for CompareSettings {
    fn default() -> Self {
        Self {
            dist_tol: 0.005,
            obliq_tol: 0.001,
            los_tol: 0.005,
            scaled_los_tol: 0.005,
            report_partitions: true,
            report_gaps: true,
            report_overlaps: true,
            report_points: true,
            report_los: true,
            report_obliquity: true,
            report_names: true,
        }
    }
}

/// Value of one named setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    /// A numeric tolerance.
    Tolerance(f64),
    /// A report toggle.
    Toggle(bool),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Tolerance(v) => write!(f, "{v}"),
            SettingValue::Toggle(v) => write!(f, "{v}"),
        }
    }
}

impl CompareSettings {
    /// Validate the settings.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.entries() {
            if let SettingValue::Tolerance(v) = value {
                if v < 0.0 {
                    return Err(CompareError::InvalidSettings(format!(
                        "{name} must be non-negative"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Every setting as `(name, value)`, in listing order.
    pub fn entries(&self) -> Vec<(&'static str, SettingValue)> {
        use SettingValue::{Toggle, Tolerance};
        vec![
            ("dist_tol", Tolerance(self.dist_tol)),
            ("obliq_tol", Tolerance(self.obliq_tol)),
            ("los_tol", Tolerance(self.los_tol)),
            ("scaled_los_tol", Tolerance(self.scaled_los_tol)),
            ("report_partitions", Toggle(self.report_partitions)),
            ("report_gaps", Toggle(self.report_gaps)),
            ("report_overlaps", Toggle(self.report_overlaps)),
            ("report_points", Toggle(self.report_points)),
            ("report_los", Toggle(self.report_los)),
            ("report_obliquity", Toggle(self.report_obliquity)),
            ("report_names", Toggle(self.report_names)),
        ]
    }

    /// Read a setting by name.
    pub fn get(&self, name: &str) -> Result<SettingValue> {
        self.entries()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| CompareError::UnknownSetting(name.to_string()))
    }

    /// Write a setting by name from its text form.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let invalid = || CompareError::InvalidSettingValue {
            name: name.to_string(),
            value: value.to_string(),
        };
        if let Some(slot) = self.tolerance_slot(name) {
            let parsed = value.parse::<f64>().map_err(|_| invalid())?;
            if parsed < 0.0 {
                return Err(invalid());
            }
            *slot = parsed;
            return Ok(());
        }
        if let Some(slot) = self.toggle_slot(name) {
            *slot = value.parse::<bool>().map_err(|_| invalid())?;
            return Ok(());
        }
        Err(CompareError::UnknownSetting(name.to_string()))
    }

    fn tolerance_slot(&mut self, name: &str) -> Option<&mut f64> {
        match name {
            "dist_tol" => Some(&mut self.dist_tol),
            "obliq_tol" => Some(&mut self.obliq_tol),
            "los_tol" => Some(&mut self.los_tol),
            "scaled_los_tol" => Some(&mut self.scaled_los_tol),
            _ => None,
        }
    }

    fn toggle_slot(&mut self, name: &str) -> Option<&mut bool> {
        match name {
            "report_partitions" => Some(&mut self.report_partitions),
            "report_gaps" => Some(&mut self.report_gaps),
            "report_overlaps" => Some(&mut self.report_overlaps),
            "report_points" => Some(&mut self.report_points),
            "report_los" => Some(&mut self.report_los),
            "report_obliquity" => Some(&mut self.report_obliquity),
            "report_names" => Some(&mut self.report_names),
            _ => None,
        }
    }
}
