//! Closed-form quadratic interpolation through three samples.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The quadratic `f(x) = a + b*x + c*x^2` and its vertex `(x0, y0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParabolaResult {
    pub x0: f64,
    pub y0: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl ParabolaResult {
    pub fn eval(&self, x: f64) -> f64 {
        self.a + self.b * x + self.c * x * x
    }

    pub fn polynomial(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// Checks whether the fit describes a believable minimum of `f`, the function that produced
    /// the samples `y`.
    ///
    /// `f` is evaluated once, at `x0`, to compare the real value at the vertex with the fitted
    /// minimum.
    pub fn assess<F>(&self, f: F, y: &[f64; 3]) -> FitAssessment
    where
        F: FnOnce(f64) -> f64,
    {
        let mut issues: Vec<FitIssue> = Vec::new();
        if !(self.c > -PLAUSIBILITY_TOLERANCE) {
            issues.push(FitIssue::OpensDownward);
        }
        if !(self.x0 > -PLAUSIBILITY_TOLERANCE) {
            issues.push(FitIssue::NegativeAbscissa);
        }
        if !(self.y0 >= -PLAUSIBILITY_TOLERANCE) {
            issues.push(FitIssue::NegativeMinimum);
        }
        let y0_div = self.y0.abs().max(1.0);
        if !((f(self.x0) - self.y0).abs() / y0_div < PLAUSIBILITY_TOLERANCE) {
            issues.push(FitIssue::VertexMismatch);
        }
        let y_min = y.iter().copied().fold(f64::INFINITY, f64::min);
        if !((self.y0 - y_min).abs() / y0_div < PLAUSIBILITY_TOLERANCE || self.y0 <= y_min) {
            issues.push(FitIssue::VertexAboveSamples);
        }
        FitAssessment { issues }
    }
}

impl fmt::Display for ParabolaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = |v: f64| if v < 0.0 { '-' } else { '+' };
        write!(
            f,
            "f(x) = {} * x**2 {} {} * x {} {} with f({}) = {}",
            self.c,
            sign(self.b),
            self.b.abs(),
            sign(self.a),
            self.a.abs(),
            self.x0,
            self.y0
        )
    }
}

/// Relative tolerance of the plausibility checks (single-precision epsilon).
pub const PLAUSIBILITY_TOLERANCE: f64 = f32::EPSILON as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitIssue {
    /// The leading coefficient is negative, so the vertex is a maximum.
    OpensDownward,
    NegativeAbscissa,
    NegativeMinimum,
    /// The sampled function at `x0` differs from `y0`, so the quadratic is a poor approximation.
    VertexMismatch,
    /// The vertex lies above the smallest sample.
    VertexAboveSamples,
}

impl fmt::Display for FitIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FitIssue::OpensDownward => "leading coefficient is not positive",
            FitIssue::NegativeAbscissa => "x0 is not positive",
            FitIssue::NegativeMinimum => "y0 is negative",
            FitIssue::VertexMismatch => "f(x0) != y0",
            FitIssue::VertexAboveSamples => "y0 > min { y }",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FitAssessment {
    pub issues: Vec<FitIssue>,
}

impl FitAssessment {
    pub fn is_plausible(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for FitAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return f.write_str("OK");
        }
        for (ix, issue) in self.issues.iter().enumerate() {
            if ix > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Fits the quadratic through `(x[i], y[i])` and extracts its vertex.
///
/// The 3x3 Vandermonde system is inverted by cofactor expansion. The abscissae must be pairwise
/// distinct. A fit that does not open upward still reports `x0 = -b / (2c)` and `y0 = f(x0)`;
/// with `c == 0` those are non-finite.
pub fn fit_parabola(x: &[f64; 3], y: &[f64; 3]) -> ParabolaResult {
    let m = [
        [1.0, x[0], x[0] * x[0]],
        [1.0, x[1], x[1] * x[1]],
        [1.0, x[2], x[2] * x[2]],
    ];
    let det = m[0][0] * m[1][1] * m[2][2]
        + m[0][1] * m[1][2] * m[2][0]
        + m[0][2] * m[1][0] * m[2][1]
        - m[0][2] * m[1][1] * m[2][0]
        - m[0][1] * m[1][0] * m[2][2]
        - m[0][0] * m[1][2] * m[2][1];
    debug_assert!(det != 0.0, "parabola abscissae must be pairwise distinct: {x:?}");

    let inv = [
        [
            (m[1][1] * m[2][2] - m[1][2] * m[2][1]) / det,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) / det,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) / det,
        ],
        [
            (m[1][2] * m[2][0] - m[1][0] * m[2][2]) / det,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) / det,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) / det,
        ],
        [
            (m[1][0] * m[2][1] - m[1][1] * m[2][0]) / det,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) / det,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) / det,
        ],
    ];

    let row = |r: &[f64; 3]| r[0] * y[0] + r[1] * y[1] + r[2] * y[2];
    let a = row(&inv[0]);
    let b = row(&inv[1]);
    let c = row(&inv[2]);
    let x0 = -0.5 * b / c;
    let mut result = ParabolaResult {
        x0,
        y0: 0.0,
        a,
        b,
        c,
    };
    result.y0 = result.eval(x0);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_spells_out_the_polynomial() {
        let p = ParabolaResult {
            x0: 2.0,
            y0: -1.0,
            a: 3.0,
            b: -4.0,
            c: 1.0,
        };
        assert_eq!(p.to_string(), "f(x) = 1 * x**2 - 4 * x + 3 with f(2) = -1");
    }

    #[test]
    fn assessment_lists_every_failed_check() {
        // f(x) = -x^2 + 2x has its maximum at (1, 1).
        let p = fit_parabola(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]);
        let a = p.assess(|x| p.eval(x), &[0.0, 1.0, 0.0]);
        assert!(!a.is_plausible());
        assert!(a.issues.contains(&FitIssue::OpensDownward));
        assert!(a.issues.contains(&FitIssue::VertexAboveSamples));
        assert!(!a.issues.contains(&FitIssue::NegativeAbscissa));
    }

    #[test]
    fn upward_parabola_is_plausible() {
        let x = [1.0, 2.0, 4.0];
        let y = x.map(|x: f64| 2.0 + (x - 2.5) * (x - 2.5));
        let p = fit_parabola(&x, &y);
        assert!(p.assess(|x| p.eval(x), &y).is_plausible(), "{p}");
    }

    #[test]
    fn vertex_is_checked_against_the_sampled_function() {
        // The interpolant of x^4 bottoms out near -1.6 while x^4 itself is never negative.
        let f = |x: f64| x.powi(4);
        let x = [-1.0, 0.5, 2.0];
        let y = x.map(f);
        let p = fit_parabola(&x, &y);
        let a = p.assess(f, &y);
        assert!(a.issues.contains(&FitIssue::VertexMismatch), "{p}: {a}");
        assert!(!p.assess(|x| p.eval(x), &y).issues.contains(&FitIssue::VertexMismatch));
    }
}
