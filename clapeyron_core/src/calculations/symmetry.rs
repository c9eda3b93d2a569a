//! Symmetry Analyzer
//!
//! Decides whether a load set is mirror-symmetric about midspan. Each load
//! must either be self-symmetric (centred) or have a mirror partner; a
//! couple's mirror partner carries the opposite sign.
//!
//! Confidence per load:
//!
//! | Case                                   | Confidence             |
//! |----------------------------------------|------------------------|
//! | Point load at midspan                  | 1.0                    |
//! | Point load with mirror partner         | `1 - (Δx + ΔP)/tol`    |
//! | Centred uniform distributed load       | 1.0                    |
//! | Distributed load with mirror partner   | 0.9                    |
//! | Balanced or zero couple at midspan     | 0.8                    |
//! | Couple with opposite mirror partner    | 0.9                    |
//! | Anything else                          | 0.0                    |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_SYMMETRY_TOLERANCE;
use crate::loads::Load;

/// Classification of a load set's symmetry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SymmetryType {
    Perfect,
    Approximate,
    None,
}

impl fmt::Display for SymmetryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymmetryType::Perfect => "perfect",
            SymmetryType::Approximate => "approximate",
            SymmetryType::None => "none",
        };
        f.write_str(name)
    }
}

/// Result of [`analyze_load_symmetry`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetryAnalysis {
    /// Every load is centred or has a mirror partner
    pub is_symmetric: bool,
    pub symmetry_type: SymmetryType,
    /// Mean per-load confidence in `[0, 1]`
    pub confidence: f64,
    /// One line per load, `"Load n: ..."`
    pub details: Vec<String>,
}

struct LoadSymmetry {
    is_symmetric: bool,
    confidence: f64,
    description: String,
}

impl LoadSymmetry {
    fn symmetric(confidence: f64, description: String) -> Self {
        LoadSymmetry {
            is_symmetric: true,
            confidence,
            description,
        }
    }

    fn asymmetric(description: String) -> Self {
        LoadSymmetry {
            is_symmetric: false,
            confidence: 0.0,
            description,
        }
    }
}

/// Analyse the mirror symmetry of `loads` about midspan.
///
/// # Example
/// ```
/// use clapeyron_core::calculations::symmetry::{analyze_load_symmetry, SymmetryType};
/// use clapeyron_core::loads::Load;
///
/// let loads = vec![Load::point(10.0, 2.0), Load::point(10.0, 8.0)];
/// let analysis = analyze_load_symmetry(&loads, 10.0, 0.001);
///
/// assert!(analysis.is_symmetric);
/// assert_eq!(analysis.symmetry_type, SymmetryType::Perfect);
/// assert_eq!(analysis.details.len(), 2);
/// ```
pub fn analyze_load_symmetry(loads: &[Load], span_m: f64, tolerance: f64) -> SymmetryAnalysis {
    if loads.is_empty() {
        return SymmetryAnalysis {
            is_symmetric: true,
            symmetry_type: SymmetryType::Perfect,
            confidence: 1.0,
            details: vec!["No loads applied".to_string()],
        };
    }

    let center = span_m / 2.0;
    let results: Vec<LoadSymmetry> = loads
        .iter()
        .map(|load| check_single_load(load, loads, center, span_m, tolerance))
        .collect();

    let all_symmetric = results.iter().all(|r| r.is_symmetric);
    let confidence = results.iter().map(|r| r.confidence).sum::<f64>() / results.len() as f64;

    let symmetry_type = if all_symmetric && confidence > 0.95 {
        SymmetryType::Perfect
    } else if all_symmetric && confidence > 0.8 {
        SymmetryType::Approximate
    } else {
        SymmetryType::None
    };

    let details = results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("Load {}: {}", i + 1, r.description))
        .collect();

    SymmetryAnalysis {
        is_symmetric: all_symmetric,
        symmetry_type,
        confidence,
        details,
    }
}

fn check_single_load(load: &Load, all: &[Load], center: f64, span_m: f64, tol: f64) -> LoadSymmetry {
    match load {
        Load::Point { position, magnitude, .. } => {
            if (position - center).abs() < tol {
                return LoadSymmetry::symmetric(1.0, format!("point load at midspan ({} kN)", magnitude));
            }

            let mirror = 2.0 * center - position;
            let partner = all.iter().find_map(|other| match other {
                Load::Point { position: p, magnitude: m, .. }
                    if (p - mirror).abs() < tol && (m - magnitude).abs() < tol =>
                {
                    Some(((p - mirror).abs(), (m - magnitude).abs()))
                }
                _ => None,
            });

            match partner {
                Some((pos_err, mag_err)) => LoadSymmetry::symmetric(
                    (1.0 - (pos_err + mag_err) / tol).max(0.0),
                    format!("point load with mirror partner ({} kN)", magnitude),
                ),
                None => LoadSymmetry::asymmetric(format!(
                    "point load without mirror partner ({} kN at {} m)",
                    magnitude, position
                )),
            }
        }

        Load::Distributed { start, end, w1, w2, .. } => {
            let load_center = (start + end) / 2.0;
            if (load_center - center).abs() < tol && (w1 - w2).abs() < tol {
                return LoadSymmetry::symmetric(
                    1.0,
                    format!("centred uniform distributed load ({} kN/m)", w1),
                );
            }

            let mirror_start = span_m - end;
            let mirror_end = span_m - start;
            let has_partner = all.iter().any(|other| match other {
                Load::Distributed { start: s, end: e, w1: a, w2: b, .. } => {
                    (s - mirror_start).abs() < tol
                        && (e - mirror_end).abs() < tol
                        && (a - w2).abs() < tol
                        && (b - w1).abs() < tol
                }
                _ => false,
            });

            if has_partner {
                LoadSymmetry::symmetric(0.9, "distributed load with mirror partner".to_string())
            } else {
                LoadSymmetry::asymmetric("distributed load without mirror partner".to_string())
            }
        }

        Load::Moment { position, magnitude, .. } => {
            let is_opposite_at = |target: f64| {
                all.iter().any(|other| match other {
                    Load::Moment { position: p, magnitude: m, .. } => {
                        (p - target).abs() < tol && (m + magnitude).abs() < tol
                    }
                    _ => false,
                })
            };

            if (position - center).abs() < tol && (magnitude.abs() < tol || is_opposite_at(center)) {
                return LoadSymmetry::symmetric(0.8, "balanced moment at midspan".to_string());
            }

            if is_opposite_at(2.0 * center - position) {
                LoadSymmetry::symmetric(0.9, "moment with opposite mirror partner".to_string())
            } else {
                LoadSymmetry::asymmetric(format!(
                    "moment without mirror partner ({} kN·m at {} m)",
                    magnitude, position
                ))
            }
        }
    }
}

/// True when every load is centred or has a mirror partner
pub fn check_load_symmetry(loads: &[Load], span_m: f64, tolerance: f64) -> bool {
    loads.is_empty() || analyze_load_symmetry(loads, span_m, tolerance).is_symmetric
}

/// Suggestions that would make an asymmetric set symmetric.
///
/// One line per load lying more than 0.1 m away from midspan.
pub fn suggest_symmetry_improvements(loads: &[Load], span_m: f64) -> Vec<String> {
    let center = span_m / 2.0;

    loads
        .iter()
        .enumerate()
        .filter_map(|(i, load)| {
            let n = i + 1;
            match load {
                Load::Point { position, magnitude, .. } if (position - center).abs() > 0.1 => {
                    Some(format!(
                        "Load {}: add a {} kN point load at {:.2} m",
                        n,
                        magnitude,
                        2.0 * center - position
                    ))
                }
                Load::Distributed { start, end, .. } if ((start + end) / 2.0 - center).abs() > 0.1 => {
                    Some(format!("Load {}: consider centring the distributed load on the span", n))
                }
                Load::Moment { position, magnitude, .. } if (position - center).abs() > 0.1 => {
                    Some(format!(
                        "Load {}: add a {} kN·m moment at {:.2} m",
                        n,
                        -magnitude,
                        2.0 * center - position
                    ))
                }
                _ => None,
            }
        })
        .collect()
}

/// Overall symmetry factor in `[0, 1]` at the default tolerance
pub fn calculate_symmetry_factor(loads: &[Load], span_m: f64) -> f64 {
    if loads.is_empty() {
        return 1.0;
    }
    analyze_load_symmetry(loads, span_m, DEFAULT_SYMMETRY_TOLERANCE).confidence
}
