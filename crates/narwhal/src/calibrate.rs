//! Stress calibration by parabola fitting.
//!
//! Near its minimum, stress as a function of the node separation (or of a layout magnification)
//! is close to quadratic. Three probe evaluations and a closed-form fit therefore locate an
//! approximate optimum without running a numerical optimizer.

use crate::config::{CalibrationOptions, DEFAULT_NODE_DISTANCE};
use crate::error::{Error, Result};
use crate::model::Layout;
use crate::pairwise::{DistanceMatrix, get_pairwise_shortest_paths};
use crate::parabola::{FitAssessment, ParabolaResult, fit_parabola};
use crate::stress::compute_stress_with_matrix;

/// Fit reported for graphs without edges: the default separation with zero stress.
fn default_answer() -> ParabolaResult {
    ParabolaResult {
        x0: DEFAULT_NODE_DISTANCE,
        ..Default::default()
    }
}

/// Fits stress against the node separation and returns the vertex.
///
/// Probes `0.1`, `0.5` and `1.0` times [`DEFAULT_NODE_DISTANCE`]. Implausible fits are logged
/// and returned as computed.
pub fn compute_stress_fit_nodesep<N, E>(layout: &Layout<'_, N, E>) -> ParabolaResult {
    let opts = CalibrationOptions::default();
    if layout.graph().edge_count() == 0 {
        return default_answer();
    }
    let matrix = get_pairwise_shortest_paths(layout.graph());
    fit_nodesep_inner(layout, &matrix, &opts.nodesep_probes).0
}

/// Fits stress against a whole-layout magnification at the default node separation.
///
/// Probes the factors `0.5`, `1.0` and `1.5`. Implausible fits are logged and returned as
/// computed.
pub fn compute_stress_fit_scale<N, E>(layout: &Layout<'_, N, E>) -> ParabolaResult {
    let opts = CalibrationOptions::default();
    if layout.graph().edge_count() == 0 {
        return default_answer();
    }
    let matrix = get_pairwise_shortest_paths(layout.graph());
    fit_scale_inner(layout, &matrix, &opts.scale_probes).0
}

/// [`compute_stress_fit_nodesep`] with explicit options.
pub fn fit_nodesep_with<N, E>(
    layout: &Layout<'_, N, E>,
    opts: &CalibrationOptions,
) -> Result<ParabolaResult> {
    opts.validate()?;
    if layout.graph().edge_count() == 0 {
        return Ok(default_answer());
    }
    let matrix = get_pairwise_shortest_paths(layout.graph());
    let (result, assessment) = fit_nodesep_inner(layout, &matrix, &opts.nodesep_probes);
    enforce("stress fit over node separation", opts, result, assessment)
}

/// [`compute_stress_fit_scale`] with explicit options.
pub fn fit_scale_with<N, E>(
    layout: &Layout<'_, N, E>,
    opts: &CalibrationOptions,
) -> Result<ParabolaResult> {
    opts.validate()?;
    if layout.graph().edge_count() == 0 {
        return Ok(default_answer());
    }
    let matrix = get_pairwise_shortest_paths(layout.graph());
    let (result, assessment) = fit_scale_inner(layout, &matrix, &opts.scale_probes);
    enforce("stress fit over layout scale", opts, result, assessment)
}

fn enforce(
    what: &'static str,
    opts: &CalibrationOptions,
    result: ParabolaResult,
    assessment: FitAssessment,
) -> Result<ParabolaResult> {
    if opts.strict && !assessment.is_plausible() {
        return Err(Error::ImplausibleFit {
            what,
            issues: assessment.to_string(),
        });
    }
    Ok(result)
}

fn fit_nodesep_inner<N, E>(
    layout: &Layout<'_, N, E>,
    matrix: &DistanceMatrix,
    probes: &[f64; 3],
) -> (ParabolaResult, FitAssessment) {
    let nodesep = probes.map(|p| p * DEFAULT_NODE_DISTANCE);
    let stress_at = |s: f64| compute_stress_with_matrix(layout, matrix, s);
    let stress = nodesep.map(stress_at);
    fit_and_assess("nodesep", &nodesep, &stress, stress_at)
}

fn fit_scale_inner<N, E>(
    layout: &Layout<'_, N, E>,
    matrix: &DistanceMatrix,
    probes: &[f64; 3],
) -> (ParabolaResult, FitAssessment) {
    let stress_at = |factor: f64| {
        let copy = layout.scaled(factor);
        compute_stress_with_matrix(&copy, matrix, DEFAULT_NODE_DISTANCE)
    };
    let stress = probes.map(stress_at);
    fit_and_assess("scale", probes, &stress, stress_at)
}

// `stress_at` is the sampled function; it is evaluated once more at the fitted vertex.
fn fit_and_assess<F>(
    name: &'static str,
    x: &[f64; 3],
    y: &[f64; 3],
    stress_at: F,
) -> (ParabolaResult, FitAssessment)
where
    F: Fn(f64) -> f64,
{
    let result = fit_parabola(x, y);
    let assessment = result.assess(stress_at, y);
    tracing::debug!(
        fit = name,
        x = ?x,
        y = ?y,
        a = result.a,
        b = result.b,
        c = result.c,
        x0 = result.x0,
        y0 = result.y0,
        "stress parabola fitted"
    );
    if !assessment.is_plausible() {
        tracing::warn!(fit = name, issues = %assessment, "implausible stress parabola: {result}");
    }
    (result, assessment)
}
