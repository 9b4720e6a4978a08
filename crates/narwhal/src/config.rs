//! Calibration constants and options.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Canonical distance between adjacent nodes, in drawing units.
///
/// Normalized layouts have this mean edge length, and it is the default node separation used
/// when evaluating stress.
pub const DEFAULT_NODE_DISTANCE: f64 = 100.0;

/// Width and height assigned to every node by layout normalization.
pub const DEFAULT_NODE_SIZE: f64 = 5.0;

/// Probe points and strictness of the parabola-based stress calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationOptions {
    /// Node separations probed by the node-separation fit, as fractions of
    /// [`DEFAULT_NODE_DISTANCE`].
    pub nodesep_probes: [f64; 3],
    /// Whole-layout magnification factors probed by the scale fit.
    pub scale_probes: [f64; 3],
    /// Reject fits that fail the plausibility assessment instead of only logging them.
    pub strict: bool,
}

impl Default for CalibrationOptions {
    fn default() -> Self {
        Self {
            nodesep_probes: [0.1, 0.5, 1.0],
            scale_probes: [0.5, 1.0, 1.5],
            strict: false,
        }
    }
}

impl CalibrationOptions {
    pub fn validate(&self) -> Result<()> {
        check_probes("nodesep_probes", &self.nodesep_probes)?;
        check_probes("scale_probes", &self.scale_probes)
    }
}

// The 3x3 interpolation system is singular unless the abscissae are pairwise distinct.
fn check_probes(name: &str, probes: &[f64; 3]) -> Result<()> {
    if let Some(p) = probes.iter().find(|p| !(p.is_finite() && **p > 0.0)) {
        return Err(Error::InvalidOptions(format!(
            "{name} must be positive and finite, got {p}"
        )));
    }
    for i in 0..3 {
        for j in (i + 1)..3 {
            if probes[i] == probes[j] {
                return Err(Error::InvalidOptions(format!(
                    "{name} must be pairwise distinct, got {probes:?}"
                )));
            }
        }
    }
    Ok(())
}
