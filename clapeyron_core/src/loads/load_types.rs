//! Load definitions for a single simply supported span
//!
//! Three load kinds act on the span: concentrated forces, linearly varying
//! line loads, and applied couples. Positions are metres from the left
//! support, forces kN, intensities kN/m, couples kN·m. All magnitudes are
//! signed; positive forces act downward and produce sagging moment.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Intensities closer than this are treated as a uniform load
pub const UNIFORM_TOLERANCE: f64 = 1e-6;

/// When `|w1 + w2|` is below this the resultant is zero and the
/// centroid falls back to the geometric midpoint
pub const CANCELLING_INTENSITY_TOLERANCE: f64 = 1e-10;

/// The three load kinds.
///
/// # Example
/// ```
/// use clapeyron_core::loads::LoadKind;
///
/// assert_eq!(LoadKind::Moment.to_string(), "Applied Moment");
/// assert_eq!(serde_json::to_string(&LoadKind::Distributed).unwrap(), "\"distributed\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadKind {
    /// Concentrated force (kN)
    Point,
    /// Uniform or trapezoidal line load (kN/m)
    Distributed,
    /// Applied couple (kN·m)
    Moment,
}

impl LoadKind {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadKind::Point => "Point Load",
            LoadKind::Distributed => "Distributed Load",
            LoadKind::Moment => "Applied Moment",
        }
    }
}

impl fmt::Display for LoadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single load on the span.
///
/// Values reaching the engine are assumed validated: positions inside
/// `[0, span]` and `start < end` for distributed loads.
///
/// # JSON Format
/// ```json
/// { "type": "distributed", "id": "load_1", "start": 0.0, "end": 6.0, "w1": 10.0, "w2": 10.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Load {
    /// Concentrated force `magnitude` (kN) at `position` (m)
    Point {
        id: String,
        position: f64,
        magnitude: f64,
    },

    /// Line load ramping linearly from `w1` at `start` to `w2` at `end` (kN/m)
    Distributed {
        id: String,
        start: f64,
        end: f64,
        w1: f64,
        w2: f64,
    },

    /// Applied couple `magnitude` (kN·m) at `position` (m)
    Moment {
        id: String,
        position: f64,
        magnitude: f64,
    },
}

/// Generate an opaque, unique load id
pub fn generate_load_id() -> String {
    format!("load_{}", Uuid::new_v4().simple())
}

impl Load {
    /// Create a point load
    pub fn point(magnitude_kn: f64, position_m: f64) -> Self {
        Load::Point {
            id: generate_load_id(),
            position: position_m,
            magnitude: magnitude_kn,
        }
    }

    /// Create a linearly varying line load from `w1` at `start` to `w2` at `end`
    pub fn distributed(w1_kn_m: f64, w2_kn_m: f64, start_m: f64, end_m: f64) -> Self {
        Load::Distributed {
            id: generate_load_id(),
            start: start_m,
            end: end_m,
            w1: w1_kn_m,
            w2: w2_kn_m,
        }
    }

    /// Create a uniform line load over `[start, end]`
    pub fn uniform(w_kn_m: f64, start_m: f64, end_m: f64) -> Self {
        Load::distributed(w_kn_m, w_kn_m, start_m, end_m)
    }

    /// Create an applied moment
    pub fn moment(magnitude_kn_m: f64, position_m: f64) -> Self {
        Load::Moment {
            id: generate_load_id(),
            position: position_m,
            magnitude: magnitude_kn_m,
        }
    }

    /// Replace the generated id (builder pattern)
    pub fn with_id(mut self, new_id: impl Into<String>) -> Self {
        match &mut self {
            Load::Point { id, .. } | Load::Distributed { id, .. } | Load::Moment { id, .. } => {
                *id = new_id.into();
            }
        }
        self
    }

    /// The load's id
    pub fn id(&self) -> &str {
        match self {
            Load::Point { id, .. } | Load::Distributed { id, .. } | Load::Moment { id, .. } => id,
        }
    }

    /// The load's kind
    pub fn kind(&self) -> LoadKind {
        match self {
            Load::Point { .. } => LoadKind::Point,
            Load::Distributed { .. } => LoadKind::Distributed,
            Load::Moment { .. } => LoadKind::Moment,
        }
    }

    /// True for a distributed load whose end intensities agree
    pub fn is_uniform(&self) -> bool {
        match self {
            Load::Distributed { w1, w2, .. } => (w1 - w2).abs() < UNIFORM_TOLERANCE,
            _ => false,
        }
    }

    /// Vertical resultant (kN). Applied moments have none.
    pub fn vertical_resultant(&self) -> f64 {
        match self {
            Load::Point { magnitude, .. } => *magnitude,
            Load::Distributed { start, end, w1, w2, .. } => (w1 + w2) * (end - start) / 2.0,
            Load::Moment { .. } => 0.0,
        }
    }

    /// Position (m) at which the resultant acts.
    ///
    /// For distributed loads this is the centroid of the trapezoid. When the
    /// end intensities cancel the resultant is zero and the geometric
    /// midpoint is used instead.
    ///
    /// # Example
    /// ```
    /// use clapeyron_core::loads::Load;
    ///
    /// let ramp = Load::distributed(0.0, 6.0, 0.0, 3.0);
    /// assert!((ramp.resultant_position() - 2.0).abs() < 1e-12);
    ///
    /// let cancelling = Load::distributed(5.0, -5.0, 2.0, 4.0);
    /// assert_eq!(cancelling.resultant_position(), 3.0);
    /// ```
    pub fn resultant_position(&self) -> f64 {
        match self {
            Load::Point { position, .. } | Load::Moment { position, .. } => *position,
            Load::Distributed { start, end, w1, w2, .. } => {
                start + distributed_centroid_offset(*w1, *w2, end - start)
            }
        }
    }

    /// Mirror image of this load about midspan, with a fresh id.
    ///
    /// Positions reflect to `span - x`, a ramp reverses direction, and a
    /// couple changes sign.
    pub fn mirrored(&self, span_m: f64) -> Load {
        match self {
            Load::Point { position, magnitude, .. } => Load::point(*magnitude, span_m - position),
            Load::Distributed { start, end, w1, w2, .. } => {
                Load::distributed(*w2, *w1, span_m - end, span_m - start)
            }
            Load::Moment { position, magnitude, .. } => Load::moment(-magnitude, span_m - position),
        }
    }
}

/// Centroid offset from the start of a linearly varying load of `length`.
///
/// Uniform loads sit at the midpoint; when `w1 + w2` cancels the formula
/// would divide by zero, so the midpoint is used as well.
pub(crate) fn distributed_centroid_offset(w1: f64, w2: f64, length: f64) -> f64 {
    if (w1 - w2).abs() < UNIFORM_TOLERANCE || (w1 + w2).abs() < CANCELLING_INTENSITY_TOLERANCE {
        length / 2.0
    } else {
        length * (w1 + 2.0 * w2) / (3.0 * (w1 + w2))
    }
}

impl fmt::Display for Load {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Load::Point { position, magnitude, .. } => {
                write!(f, "Point load {} kN at {} m", magnitude, position)
            }
            Load::Distributed { start, end, w1, w2, .. } => {
                if self.is_uniform() {
                    write!(f, "Uniform load {} kN/m from {} m to {} m", w1, start, end)
                } else {
                    write!(
                        f,
                        "Trapezoidal load {} to {} kN/m from {} m to {} m",
                        w1, w2, start, end
                    )
                }
            }
            Load::Moment { position, magnitude, .. } => {
                write!(f, "Applied moment {} kN·m at {} m", magnitude, position)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_and_kind() {
        let p = Load::point(100.0, 5.0);
        let d = Load::uniform(10.0, 0.0, 6.0);
        let m = Load::moment(15.0, 8.0);

        assert_eq!(p.kind(), LoadKind::Point);
        assert_eq!(d.kind(), LoadKind::Distributed);
        assert_eq!(m.kind(), LoadKind::Moment);
        assert!(d.is_uniform());
        assert!(!p.is_uniform());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Load::point(1.0, 1.0);
        let b = Load::point(1.0, 1.0);
        assert_ne!(a.id(), b.id());
        assert!(a.id().starts_with("load_"));

        let named = a.with_id("P1");
        assert_eq!(named.id(), "P1");
    }

    #[test]
    fn test_vertical_resultant() {
        assert_eq!(Load::point(20.0, 2.0).vertical_resultant(), 20.0);
        assert_eq!(Load::distributed(2.0, 6.0, 1.0, 5.0).vertical_resultant(), 16.0);
        assert_eq!(Load::moment(15.0, 8.0).vertical_resultant(), 0.0);
    }

    #[test]
    fn test_trapezoid_centroid() {
        // Triangle rising to the right: centroid at 2/3 of its length
        let tri = Load::distributed(0.0, 9.0, 3.0, 6.0);
        assert!((tri.resultant_position() - 5.0).abs() < 1e-12);

        // Uniform: midpoint
        let uni = Load::uniform(4.0, 2.0, 8.0);
        assert_eq!(uni.resultant_position(), 5.0);
    }

    #[test]
    fn test_cancelling_intensities_use_midpoint() {
        let load = Load::distributed(5.0, -5.0, 2.0, 4.0);
        assert_eq!(load.resultant_position(), 3.0);
        assert_eq!(load.vertical_resultant(), 0.0);
    }

    #[test]
    fn test_mirrored() {
        let d = Load::distributed(2.0, 6.0, 1.0, 4.0).mirrored(10.0);
        assert!(matches!(
            d,
            Load::Distributed { start, end, w1, w2, .. }
                if start == 6.0 && end == 9.0 && w1 == 6.0 && w2 == 2.0
        ));

        let m = Load::moment(15.0, 2.0).mirrored(10.0);
        assert!(matches!(m, Load::Moment { position, magnitude, .. } if position == 8.0 && magnitude == -15.0));
    }

    #[test]
    fn test_serialization_tag() {
        let load = Load::point(100.0, 5.0).with_id("P1");
        let json = serde_json::to_string(&load).unwrap();
        assert!(json.contains("\"type\":\"point\""));

        let parsed: Load = serde_json::from_str(
            r#"{"type":"distributed","id":"D1","start":0.0,"end":6.0,"w1":10.0,"w2":10.0}"#,
        )
        .unwrap();
        assert_eq!(parsed.id(), "D1");
        assert!(parsed.is_uniform());
    }

    #[test]
    fn test_display() {
        assert_eq!(Load::point(100.0, 5.0).to_string(), "Point load 100 kN at 5 m");
        assert_eq!(
            Load::distributed(2.0, 4.0, 0.0, 3.0).to_string(),
            "Trapezoidal load 2 to 4 kN/m from 0 m to 3 m"
        );
    }
}
