//! Moment Field of a Simply Supported Span
//!
//! Bending moment at any position by superposition: each load is reacted
//! independently by the two supports, and its moment at `x` is the left
//! reaction times `x` minus the moment of whatever part of the load lies
//! left of `x`.
//!
//! ## Sign Convention
//! - Positive force: downward
//! - Positive moment: sagging (tension on bottom fiber)
//! - Positive reaction: upward
//! - Applied couple `M0` at `a`: `M(x) = -M0·x/L` left of `a`,
//!   `M0·(L-x)/L` right of it
//!
//! ## Example
//! ```rust
//! use clapeyron_core::calculations::moment_field::{moment_at, reactions};
//! use clapeyron_core::loads::Load;
//!
//! // 10 m span, 100 kN at midspan
//! let loads = vec![Load::point(100.0, 5.0)];
//!
//! assert!((moment_at(&loads, 5.0, 10.0) - 250.0).abs() < 1e-9);
//! assert!((reactions(&loads, 10.0).left - 50.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::loads::Load;

/// Support reactions (kN, positive upward)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Left support
    pub left: f64,
    /// Right support
    pub right: f64,
}

impl Reactions {
    /// Sum of both reactions
    pub fn total(&self) -> f64 {
        self.left + self.right
    }
}

impl std::ops::Add for Reactions {
    type Output = Reactions;
    fn add(self, rhs: Reactions) -> Reactions {
        Reactions {
            left: self.left + rhs.left,
            right: self.right + rhs.right,
        }
    }
}

impl Load {
    /// Left support reaction (kN) for this load alone
    pub fn reaction_left(&self, span_m: f64) -> f64 {
        match self {
            Load::Point { position, magnitude, .. } => magnitude * (span_m - position) / span_m,
            Load::Distributed { start, end, .. } => {
                if end - start <= 0.0 {
                    return 0.0;
                }
                self.vertical_resultant() * (span_m - self.resultant_position()) / span_m
            }
            // The couple is balanced by equal and opposite reactions
            Load::Moment { magnitude, .. } => -magnitude / span_m,
        }
    }

    /// Right support reaction (kN) for this load alone
    pub fn reaction_right(&self, span_m: f64) -> f64 {
        match self {
            Load::Point { position, magnitude, .. } => magnitude * position / span_m,
            Load::Distributed { start, end, .. } => {
                if end - start <= 0.0 {
                    return 0.0;
                }
                self.vertical_resultant() * self.resultant_position() / span_m
            }
            Load::Moment { magnitude, .. } => magnitude / span_m,
        }
    }

    /// Both support reactions for this load alone
    pub fn reactions(&self, span_m: f64) -> Reactions {
        Reactions {
            left: self.reaction_left(span_m),
            right: self.reaction_right(span_m),
        }
    }

    /// Bending moment (kN·m) at `x_m` due to this load alone
    pub fn moment_at(&self, x_m: f64, span_m: f64) -> f64 {
        match self {
            Load::Point { position, magnitude, .. } => {
                point_load_moment(*magnitude, *position, x_m, span_m)
            }
            Load::Distributed { start, end, w1, w2, .. } => {
                if end - start <= 0.0 {
                    0.0
                } else if self.is_uniform() {
                    uniform_load_moment(self, *w1, *start, *end, x_m, span_m)
                } else {
                    trapezoidal_load_moment(self, *w1, *w2, *start, *end, x_m, span_m)
                }
            }
            Load::Moment { position, magnitude, .. } => {
                applied_moment(*magnitude, *position, x_m, span_m)
            }
        }
    }
}

/// Point load `p` at `a`: `R1·x` up to the load, `R1·x - P(x - a)` after it
fn point_load_moment(p: f64, a: f64, x: f64, l: f64) -> f64 {
    let r1 = p * (l - a) / l;
    if x <= a {
        r1 * x
    } else {
        r1 * x - p * (x - a)
    }
}

fn uniform_load_moment(load: &Load, w: f64, start: f64, end: f64, x: f64, l: f64) -> f64 {
    let r1 = load.reaction_left(l);

    if x <= start {
        r1 * x
    } else if x <= end {
        // Only the part of the load left of x
        r1 * x - w * (x - start).powi(2) / 2.0
    } else {
        let total = w * (end - start);
        let centroid = (start + end) / 2.0;
        r1 * x - total * (x - centroid)
    }
}

fn trapezoidal_load_moment(
    load: &Load,
    w1: f64,
    w2: f64,
    start: f64,
    end: f64,
    x: f64,
    l: f64,
) -> f64 {
    let length = end - start;
    let r1 = load.reaction_left(l);

    if x <= start {
        r1 * x
    } else if x <= end {
        // Moment of the ramp w(s) = w1 + (w2 - w1)(s - start)/length over [start, x]
        let xi = x - start;
        let partial = w1 * xi * xi / 2.0 + (w2 - w1) * xi.powi(3) / (6.0 * length);
        r1 * x - partial
    } else {
        r1 * x - load.vertical_resultant() * (x - load.resultant_position())
    }
}

fn applied_moment(m0: f64, a: f64, x: f64, l: f64) -> f64 {
    if x <= a {
        -m0 * x / l
    } else {
        m0 * (l - x) / l
    }
}

/// Total bending moment (kN·m) at `x_m` by superposition.
///
/// Assumes `0 <= x_m <= span_m` and `span_m > 0`.
pub fn moment_at(loads: &[Load], x_m: f64, span_m: f64) -> f64 {
    loads.iter().map(|load| load.moment_at(x_m, span_m)).sum()
}

/// Total support reactions by superposition
pub fn reactions(loads: &[Load], span_m: f64) -> Reactions {
    loads
        .iter()
        .map(|load| load.reactions(span_m))
        .fold(Reactions::default(), |acc, r| acc + r)
}

/// Sum of vertical load resultants (kN); applied moments contribute nothing
pub fn total_vertical_load(loads: &[Load]) -> f64 {
    loads.iter().map(Load::vertical_resultant).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if b.abs() < 1e-10 {
            a.abs() < tol
        } else {
            ((a - b) / b).abs() < tol
        }
    }

    #[test]
    fn test_point_load_reactions() {
        // 10 m span, 100 kN at midspan
        let load = Load::point(100.0, 5.0);
        assert!(approx_eq(load.reaction_left(10.0), 50.0, EPSILON));
        assert!(approx_eq(load.reaction_right(10.0), 50.0, EPSILON));

        // R1 = P(L-a)/L = 20 * 8/10 = 16, R2 = Pa/L = 4
        let load = Load::point(20.0, 2.0);
        assert!(approx_eq(load.reaction_left(10.0), 16.0, EPSILON));
        assert!(approx_eq(load.reaction_right(10.0), 4.0, EPSILON));
    }

    #[test]
    fn test_point_load_moment() {
        // M = PL/4 = 100 * 10 / 4 = 250 kN·m at midspan
        let loads = vec![Load::point(100.0, 5.0)];
        assert!(approx_eq(moment_at(&loads, 5.0, 10.0), 250.0, EPSILON));
        assert!(approx_eq(moment_at(&loads, 2.0, 10.0), 100.0, EPSILON));
        assert!(approx_eq(moment_at(&loads, 8.0, 10.0), 100.0, EPSILON));
    }

    #[test]
    fn test_uniform_full_span() {
        // M(x) = wx(L - x)/2, peak wL²/8 = 10 * 36 / 8 = 45
        let loads = vec![Load::uniform(10.0, 0.0, 6.0)];
        assert!(approx_eq(moment_at(&loads, 3.0, 6.0), 45.0, EPSILON));
        assert!(approx_eq(moment_at(&loads, 1.0, 6.0), 25.0, EPSILON));
        assert!(moment_at(&loads, 0.0, 6.0).abs() < EPSILON);
        assert!(moment_at(&loads, 6.0, 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_partial_uniform_matches_closed_form() {
        // 10 m span, 4 kN/m from 2 m to 8 m: W = 24 kN centred, R1 = 12
        let loads = vec![Load::uniform(4.0, 2.0, 8.0)];
        assert!(approx_eq(moment_at(&loads, 2.0, 10.0), 24.0, EPSILON));
        // Inside: 12·5 - 4·3²/2 = 42
        assert!(approx_eq(moment_at(&loads, 5.0, 10.0), 42.0, EPSILON));
        // After: 12·9 - 24·(9 - 5) = 12
        assert!(approx_eq(moment_at(&loads, 9.0, 10.0), 12.0, EPSILON));
    }

    #[test]
    fn test_triangular_load() {
        // Full-span triangle 0 -> w on L: M(x) = w·x(L² - x²)/(6L)
        let w = 12.0;
        let l = 6.0;
        let loads = vec![Load::distributed(0.0, w, 0.0, l)];
        for &x in &[1.0, 2.5, 3.0, 4.5] {
            let expected = w * x * (l * l - x * x) / (6.0 * l);
            assert!(approx_eq(moment_at(&loads, x, l), expected, 1e-9));
        }
    }

    #[test]
    fn test_trapezoid_is_continuous_at_segment_ends() {
        let loads = vec![Load::distributed(3.0, 7.0, 2.0, 5.0)];
        for &edge in &[2.0, 5.0] {
            let before = moment_at(&loads, edge - 1e-9, 10.0);
            let after = moment_at(&loads, edge + 1e-9, 10.0);
            assert!((before - after).abs() < 1e-6);
        }
        assert!(moment_at(&loads, 10.0, 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_cancelling_trapezoid_is_finite() {
        // w1 = 5, w2 = -5: zero resultant, moment is the pure ramp couple
        let load = Load::distributed(5.0, -5.0, 2.0, 4.0);
        assert_eq!(load.resultant_position(), 3.0);

        for i in 0..=10 {
            let x = i as f64;
            assert!(load.moment_at(x, 10.0).is_finite());
        }
        // Zero resultant means zero reactions, so nothing acts outside the
        // loaded length even though the ramp carries a net couple
        assert!(load.moment_at(1.0, 10.0).abs() < 1e-12);
        assert!(load.moment_at(6.0, 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_applied_moment_jump() {
        // 15 kN·m at 8 m on a 10 m span
        let load = Load::moment(15.0, 8.0);
        assert!(approx_eq(load.moment_at(8.0, 10.0), -12.0, EPSILON));
        assert!(approx_eq(load.moment_at(8.0 + 1e-12, 10.0), 3.0, 1e-6));
        assert!(approx_eq(load.reaction_left(10.0), -1.5, EPSILON));
        assert!(approx_eq(load.reaction_right(10.0), 1.5, EPSILON));
    }

    #[test]
    fn test_zero_length_distributed_contributes_nothing() {
        let load = Load::uniform(10.0, 3.0, 3.0);
        assert_eq!(load.moment_at(3.0, 10.0), 0.0);
        assert_eq!(load.reactions(10.0), Reactions::default());
    }

    #[test]
    fn test_equilibrium() {
        let loads = vec![
            Load::point(20.0, 2.0),
            Load::uniform(5.0, 1.0, 7.0),
            Load::distributed(2.0, 9.0, 4.0, 10.0),
            Load::moment(15.0, 8.0),
        ];
        let r = reactions(&loads, 10.0);
        assert!(approx_eq(r.total(), total_vertical_load(&loads), 1e-12));
    }

    #[test]
    fn test_superposition() {
        // 12 m span: 5 kN/m full span plus 100 kN at midspan
        // wL²/8 = 90, PL/4 = 300
        let loads = vec![Load::uniform(5.0, 0.0, 12.0), Load::point(100.0, 6.0)];
        assert!(approx_eq(moment_at(&loads, 6.0, 12.0), 390.0, EPSILON));

        let r = reactions(&loads, 12.0);
        assert!(approx_eq(r.left, 80.0, EPSILON));
        assert!(approx_eq(r.right, 80.0, EPSILON));
    }

    #[test]
    fn test_empty_load_list() {
        assert_eq!(moment_at(&[], 3.0, 6.0), 0.0);
        assert_eq!(reactions(&[], 6.0).total(), 0.0);
    }
}
