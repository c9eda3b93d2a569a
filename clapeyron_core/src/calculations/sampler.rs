//! Moment diagram sampling
//!
//! Discretizes the moment field into evenly spaced samples and finds the
//! peak absolute moment.

use serde::{Deserialize, Serialize};

use super::moment_field::moment_at;
use crate::loads::Load;

/// One sample of the moment diagram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentSamplePoint {
    /// Position along the span (m)
    pub x: f64,
    /// Bending moment at `x` (kN·m)
    pub moment: f64,
}

/// Largest absolute moment and where it occurs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxMoment {
    /// `|M|` at the peak (kN·m)
    pub max_moment: f64,
    /// Position of the peak (m)
    pub max_moment_position: f64,
}

/// Sample the moment field at `num_points + 1` evenly spaced positions.
///
/// `x_i = span·i/n` for `i = 0..=n`; the last sample sits exactly on the
/// right support. A `num_points` of zero is treated as one.
///
/// # Example
/// ```
/// use clapeyron_core::calculations::sampler::generate_moment_points;
/// use clapeyron_core::loads::Load;
///
/// let points = generate_moment_points(&[Load::point(100.0, 5.0)], 10.0, 4);
/// assert_eq!(points.len(), 5);
/// assert_eq!(points[4].x, 10.0);
/// assert!((points[2].moment - 250.0).abs() < 1e-9);
/// ```
pub fn generate_moment_points(loads: &[Load], span_m: f64, num_points: usize) -> Vec<MomentSamplePoint> {
    let n = num_points.max(1);

    (0..=n)
        .map(|i| {
            let x = if i == n {
                span_m
            } else {
                span_m * i as f64 / n as f64
            };
            MomentSamplePoint {
                x,
                moment: moment_at(loads, x, span_m),
            }
        })
        .collect()
}

/// Peak absolute moment over a set of samples.
///
/// Ties keep the first (leftmost) sample. Empty input gives zeros.
pub fn find_max_moment(points: &[MomentSamplePoint]) -> MaxMoment {
    let mut best = MaxMoment::default();
    let mut found = false;

    for point in points {
        let abs = point.moment.abs();
        if !found || abs > best.max_moment {
            best = MaxMoment {
                max_moment: abs,
                max_moment_position: point.x,
            };
            found = true;
        }
    }

    best
}
