//! Alpha Calculator
//!
//! Load terms of the three-moment (Clapeyron) equation for one span. With
//! `A` the area of the simple-span moment diagram and `x̄_L`, `x̄_R` its
//! centroid distances from the left and right supports:
//!
//! ```text
//! α1 = A · x̄_R / L      (used at the left end of the span)
//! α2 = A · x̄_L / L      (used at the right end)
//! ```
//!
//! Two routes are provided. [`calculate_alphas`] integrates sampled moments
//! with the trapezoidal rule and also reports the peak moment.
//! [`calculate_alpha_analytical`] sums exact per-load integrals and leaves
//! the peak moment at zero.
//!
//! ## Example
//! ```rust
//! use clapeyron_core::calculations::alpha::{calculate_alpha_analytical, calculate_alphas};
//! use clapeyron_core::loads::Load;
//!
//! let loads = vec![Load::point(100.0, 5.0)];
//!
//! let exact = calculate_alpha_analytical(&loads, 10.0);
//! assert!((exact.area - 1250.0).abs() < 1e-9);
//! assert!((exact.alpha1 - 625.0).abs() < 1e-9);
//!
//! let numeric = calculate_alphas(&loads, 10.0, 1000);
//! assert!((numeric.alpha2 - exact.alpha2).abs() < 1e-2);
//! ```

use serde::{Deserialize, Serialize};

use super::sampler::{find_max_moment, generate_moment_points, MomentSamplePoint};
use super::symmetry::check_load_symmetry;
use crate::config::DEFAULT_SYMMETRY_TOLERANCE;
use crate::loads::{Load, CANCELLING_INTENSITY_TOLERANCE};

/// Areas below which centroids and alphas collapse to zero
const AREA_EPSILON: f64 = 1e-10;
const SPAN_EPSILON: f64 = 1e-10;

/// Integrals of the moment diagram over the span
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationResult {
    /// `∫ M dx` (kN·m²)
    pub area: f64,
    /// `∫ x·M dx` (kN·m³)
    pub first_moment: f64,
    /// `∫ (L - x)·M dx` (kN·m³)
    pub first_moment_right: f64,
}

impl std::ops::Add for IntegrationResult {
    type Output = IntegrationResult;
    fn add(self, rhs: IntegrationResult) -> IntegrationResult {
        IntegrationResult {
            area: self.area + rhs.area,
            first_moment: self.first_moment + rhs.first_moment,
            first_moment_right: self.first_moment_right + rhs.first_moment_right,
        }
    }
}

/// Alpha coefficients and the diagram properties they come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlphaResults {
    pub alpha1: f64,
    pub alpha2: f64,
    /// Area of the moment diagram (kN·m²)
    pub area: f64,
    /// Centroid distance from the left support (m)
    pub centroid_left: f64,
    /// Centroid distance from the right support (m)
    pub centroid_right: f64,
    pub is_symmetric: bool,
    /// Peak `|M|` (kN·m); zero on the analytical route
    pub max_moment: f64,
    /// Position of the peak (m)
    pub max_moment_position: f64,
}

/// Plausibility check on a set of alpha results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlphaValidation {
    pub is_valid: bool,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Trapezoidal integration of sampled moments.
///
/// Fewer than two samples integrate to zero.
pub fn integrate_moment_points(points: &[MomentSamplePoint], span_m: f64) -> IntegrationResult {
    points
        .windows(2)
        .map(|pair| {
            let dx = pair[1].x - pair[0].x;
            let avg_m = (pair[0].moment + pair[1].moment) / 2.0;
            let avg_x = (pair[0].x + pair[1].x) / 2.0;
            IntegrationResult {
                area: avg_m * dx,
                first_moment: avg_x * avg_m * dx,
                first_moment_right: (span_m - avg_x) * avg_m * dx,
            }
        })
        .fold(IntegrationResult::default(), |acc, step| acc + step)
}

/// Centroids and cross-assigned alphas from the diagram integrals
fn alphas_from_integrals(integrals: IntegrationResult, span_m: f64, is_symmetric: bool) -> AlphaResults {
    let (centroid_left, centroid_right) = if integrals.area.abs() > AREA_EPSILON {
        (
            integrals.first_moment / integrals.area,
            integrals.first_moment_right / integrals.area,
        )
    } else {
        (0.0, 0.0)
    };

    let (alpha1, alpha2) = if span_m.abs() > SPAN_EPSILON {
        (
            integrals.area * centroid_right / span_m,
            integrals.area * centroid_left / span_m,
        )
    } else {
        (0.0, 0.0)
    };

    AlphaResults {
        alpha1,
        alpha2,
        area: integrals.area,
        centroid_left,
        centroid_right,
        is_symmetric,
        max_moment: 0.0,
        max_moment_position: 0.0,
    }
}

/// Alphas by numerical integration of `num_points + 1` moment samples
pub fn calculate_alphas(loads: &[Load], span_m: f64, num_points: usize) -> AlphaResults {
    calculate_alphas_with_tolerance(loads, span_m, num_points, DEFAULT_SYMMETRY_TOLERANCE)
}

/// [`calculate_alphas`] with an explicit symmetry tolerance
pub fn calculate_alphas_with_tolerance(
    loads: &[Load],
    span_m: f64,
    num_points: usize,
    tolerance: f64,
) -> AlphaResults {
    let points = generate_moment_points(loads, span_m, num_points);
    let integrals = integrate_moment_points(&points, span_m);
    let is_symmetric = check_load_symmetry(loads, span_m, tolerance);
    let peak = find_max_moment(&points);

    log::debug!(
        "integrated {} samples: area={:.6} first={:.6} first_right={:.6}",
        points.len(),
        integrals.area,
        integrals.first_moment,
        integrals.first_moment_right
    );

    AlphaResults {
        max_moment: peak.max_moment,
        max_moment_position: peak.max_moment_position,
        ..alphas_from_integrals(integrals, span_m, is_symmetric)
    }
}

/// Alphas from exact per-load integrals of the moment field
pub fn calculate_alpha_analytical(loads: &[Load], span_m: f64) -> AlphaResults {
    let integrals = loads
        .iter()
        .map(|load| load_contribution(load, span_m))
        .fold(IntegrationResult::default(), |acc, c| acc + c);
    let is_symmetric = check_load_symmetry(loads, span_m, DEFAULT_SYMMETRY_TOLERANCE);

    alphas_from_integrals(integrals, span_m, is_symmetric)
}

/// Exact `∫M`, `∫xM` and `∫(L-x)M` of one load's simple-span moment diagram
pub fn load_contribution(load: &Load, span_m: f64) -> IntegrationResult {
    let l = span_m;
    match load {
        Load::Point { position, magnitude, .. } => {
            let (a, b) = (*position, l - position);
            let pab = magnitude * a * b;
            IntegrationResult {
                area: pab / 2.0,
                first_moment: pab * (l + a) / 6.0,
                first_moment_right: pab * (l + b) / 6.0,
            }
        }
        Load::Distributed { start, end, w1, w2, .. } => {
            let length = end - start;
            if length <= 0.0 {
                return IntegrationResult::default();
            }
            if (w1 + w2).abs() < CANCELLING_INTENSITY_TOLERANCE {
                return cancelling_ramp_contribution(*w1, *w2, *start, length, l);
            }

            // w(s) = c0 + c1·s; J_k = ∫ s^k w(s) ds over [start, end]
            let c1 = (w2 - w1) / length;
            let c0 = w1 - c1 * start;
            let power_integral = |k: i32| (end.powi(k + 1) - start.powi(k + 1)) / f64::from(k + 1);
            let j = |k: i32| c0 * power_integral(k) + c1 * power_integral(k + 1);
            let (j1, j2, j3) = (j(1), j(2), j(3));

            IntegrationResult {
                area: (l * j1 - j2) / 2.0,
                first_moment: (l * l * j1 - j3) / 6.0,
                first_moment_right: (2.0 * l * l * j1 - 3.0 * l * j2 + j3) / 6.0,
            }
        }
        Load::Moment { position, magnitude, .. } => {
            let a = *position;
            IntegrationResult {
                area: magnitude * (l - 2.0 * a) / 2.0,
                first_moment: magnitude * (l * l / 6.0 - a * a / 2.0),
                first_moment_right: magnitude * (l * l / 3.0 - l * a + a * a / 2.0),
            }
        }
    }
}

/// Integrals of a zero-resultant ramp.
///
/// With no resultant the supports carry nothing, so the moment is only the
/// ramp's own `-(w1·ξ²/2 + (w2-w1)·ξ³/(6·len))` over the loaded length and
/// zero elsewhere. `ξ` runs from `start`.
fn cancelling_ramp_contribution(w1: f64, w2: f64, start: f64, length: f64, l: f64) -> IntegrationResult {
    let dw = w2 - w1;
    // ∫ M dξ and ∫ ξ·M dξ over [0, length]
    let i0 = -(w1 / 6.0 + dw / 24.0) * length.powi(3);
    let i1 = -(w1 / 8.0 + dw / 30.0) * length.powi(4);

    IntegrationResult {
        area: i0,
        first_moment: start * i0 + i1,
        first_moment_right: (l - start) * i0 - i1,
    }
}

/// Largest `|α1 - α2|` still treated as equal for a symmetric set
pub const SYMMETRIC_ALPHA_TOLERANCE: f64 = 1e-3;

/// Flag implausible alpha results. Never fails; `is_valid` means no warnings.
pub fn validate_alpha_results(results: &AlphaResults) -> AlphaValidation {
    let mut warnings = Vec::new();
    let mut recommendations = Vec::new();

    if results.alpha1.abs() > 1000.0 || results.alpha2.abs() > 1000.0 {
        warnings.push("Alpha values are very large: check the applied loads".to_string());
    }

    if results.alpha1.abs() < 1e-10 && results.alpha2.abs() < 1e-10 {
        warnings.push("Alpha values are very small: there may be no significant loads".to_string());
    }

    if results.is_symmetric && (results.alpha1 - results.alpha2).abs() > SYMMETRIC_ALPHA_TOLERANCE {
        warnings.push("Loads appear symmetric but the alphas differ".to_string());
        recommendations.push("Check the load symmetry or use a single alpha value".to_string());
    }

    let out_of_range = |c: f64| !(0.0..=1000.0).contains(&c);
    if out_of_range(results.centroid_left) {
        warnings.push("Left centroid is outside the expected range".to_string());
    }
    if out_of_range(results.centroid_right) {
        warnings.push("Right centroid is outside the expected range".to_string());
    }

    AlphaValidation {
        is_valid: warnings.is_empty(),
        warnings,
        recommendations,
    }
}
