//! Stress evaluation entry point and its JSON report.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calibrate::{fit_nodesep_with, fit_scale_with};
use crate::config::{CalibrationOptions, DEFAULT_NODE_DISTANCE};
use crate::error::{Error, Result};
use crate::model::Layout;
use crate::parabola::ParabolaResult;
use crate::stress::compute_stress;

/// Name reported as the `producer` of every [`StressReport`].
pub const PRODUCER: &str = "stress";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StressMode {
    /// Stress at the default node separation and the layout's own scale.
    #[default]
    Fixed,
    /// Minimum of the parabola fitted over the node separation.
    FitNodesep,
    /// Minimum of the parabola fitted over a layout magnification.
    FitScale,
}

impl StressMode {
    pub fn as_str(self) -> &'static str {
        match self {
            StressMode::Fixed => "fixed",
            StressMode::FitNodesep => "fit-nodesep",
            StressMode::FitScale => "fit-scale",
        }
    }
}

impl fmt::Display for StressMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StressMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fixed" => Ok(StressMode::Fixed),
            "fit-nodesep" => Ok(StressMode::FitNodesep),
            "fit-scale" => Ok(StressMode::FitScale),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

/// Outcome of [`evaluate`].
///
/// Serializes to `{"stress": .., "producer": "stress"}`, plus `nodesep` or `scale` and
/// `polynomial: [a, b, c]` for the fitted modes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressReport {
    pub stress: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodesep: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polynomial: Option<[f64; 3]>,
    pub producer: &'static str,
}

impl StressReport {
    fn fixed(stress: f64) -> Self {
        Self {
            stress,
            nodesep: None,
            scale: None,
            polynomial: None,
            producer: PRODUCER,
        }
    }

    fn fitted(fit: &ParabolaResult, mode: StressMode) -> Self {
        let mut report = Self::fixed(fit.y0);
        report.polynomial = Some(fit.polynomial());
        match mode {
            StressMode::FitScale => report.scale = Some(fit.x0),
            _ => report.nodesep = Some(fit.x0),
        }
        report
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Scores `layout` according to `mode`.
///
/// Rejects layouts with non-finite coordinates before any evaluation.
pub fn evaluate<N, E>(
    layout: &Layout<'_, N, E>,
    mode: StressMode,
    opts: &CalibrationOptions,
) -> Result<StressReport> {
    layout.check_finite()?;
    let report = match mode {
        StressMode::Fixed => StressReport::fixed(compute_stress(layout, DEFAULT_NODE_DISTANCE)),
        StressMode::FitNodesep => StressReport::fitted(&fit_nodesep_with(layout, opts)?, mode),
        StressMode::FitScale => StressReport::fitted(&fit_scale_with(layout, opts)?, mode),
    };
    tracing::debug!(%mode, stress = report.stress, "layout evaluated");
    Ok(report)
}
