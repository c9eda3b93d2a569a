//! Load input records
//!
//! [`LoadInput`] is what a form or request file provides before validation.
//! Every numeric field is an `Option<f64>`: `None` means the field was not
//! supplied, while `Some(0.0)` is a perfectly valid position or magnitude.

use serde::{Deserialize, Serialize};

use super::load_types::{generate_load_id, Load, LoadKind};
use crate::errors::{CalcError, CalcResult};
use crate::units::UnitSelection;
use crate::validation::validate_load;

/// Unvalidated load data, optionally in non-engine units.
///
/// Point loads use `position`/`magnitude`, distributed loads use
/// `start`/`end`/`w1`/`w2`, and applied moments use
/// `momentPosition`/`momentMagnitude`.
///
/// # Example
/// ```
/// use clapeyron_core::loads::{Load, LoadInput};
///
/// let input = LoadInput::point(0.0, 25.0);
/// let load = input.into_load(10.0, &[]).unwrap();
/// assert!(matches!(load, Load::Point { position, .. } if position == 0.0));
///
/// // A missing magnitude is an error, not a zero
/// let mut incomplete = LoadInput::point(2.0, 1.0);
/// incomplete.magnitude = None;
/// assert!(incomplete.into_load(10.0, &[]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadInput {
    /// Load kind
    #[serde(rename = "type")]
    pub kind: LoadKind,

    /// Caller-supplied id; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Point load position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,

    /// Point load magnitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,

    /// Distributed load start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,

    /// Distributed load end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,

    /// Intensity at `start`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w1: Option<f64>,

    /// Intensity at `end`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w2: Option<f64>,

    /// Applied moment position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moment_position: Option<f64>,

    /// Applied moment magnitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moment_magnitude: Option<f64>,

    /// Units the values above were entered in
    #[serde(default, skip_serializing_if = "UnitSelection::is_si")]
    pub units: UnitSelection,
}

impl LoadInput {
    /// Empty input of the given kind
    pub fn new(kind: LoadKind) -> Self {
        LoadInput {
            kind,
            id: None,
            position: None,
            magnitude: None,
            start: None,
            end: None,
            w1: None,
            w2: None,
            moment_position: None,
            moment_magnitude: None,
            units: UnitSelection::default(),
        }
    }

    /// Point load input
    pub fn point(position: f64, magnitude: f64) -> Self {
        LoadInput {
            position: Some(position),
            magnitude: Some(magnitude),
            ..LoadInput::new(LoadKind::Point)
        }
    }

    /// Distributed load input
    pub fn distributed(start: f64, end: f64, w1: f64, w2: f64) -> Self {
        LoadInput {
            start: Some(start),
            end: Some(end),
            w1: Some(w1),
            w2: Some(w2),
            ..LoadInput::new(LoadKind::Distributed)
        }
    }

    /// Applied moment input
    pub fn moment(position: f64, magnitude: f64) -> Self {
        LoadInput {
            moment_position: Some(position),
            moment_magnitude: Some(magnitude),
            ..LoadInput::new(LoadKind::Moment)
        }
    }

    /// Set the caller id (builder pattern)
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the input units (builder pattern)
    pub fn with_units(mut self, units: UnitSelection) -> Self {
        self.units = units;
        self
    }

    /// Copy of this input converted to engine units.
    ///
    /// Absent fields stay absent. The result carries the default (engine)
    /// unit selection, so converting twice is harmless.
    pub fn to_si(&self) -> LoadInput {
        let u = self.units;
        let length = |v: Option<f64>| v.map(|x| u.length.to_m(x).value());
        LoadInput {
            kind: self.kind,
            id: self.id.clone(),
            position: length(self.position),
            magnitude: self.magnitude.map(|x| u.force.to_kn(x).value()),
            start: length(self.start),
            end: length(self.end),
            w1: self.w1.map(|x| u.line_load.to_kn_per_m(x).value()),
            w2: self.w2.map(|x| u.line_load.to_kn_per_m(x).value()),
            moment_position: length(self.moment_position),
            moment_magnitude: self.moment_magnitude.map(|x| u.moment.to_kn_m(x).value()),
            units: UnitSelection::default(),
        }
    }

    /// Validate against `span_m` and the loads already present, then build
    /// the [`Load`]. Returns the first validation error, if any.
    pub fn into_load(&self, span_m: f64, existing: &[Load]) -> CalcResult<Load> {
        let validation = validate_load(self, span_m, existing);
        if let Some(err) = validation.errors.into_iter().next() {
            return Err(err);
        }
        let id = self.id.clone().unwrap_or_else(generate_load_id);
        self.to_si().build(id)
    }

    /// Build a load from engine-unit fields without range checks.
    pub(crate) fn build(&self, id: String) -> CalcResult<Load> {
        let load = match self.kind {
            LoadKind::Point => Load::Point {
                id,
                position: required(self.position, "position")?,
                magnitude: required(self.magnitude, "magnitude")?,
            },
            LoadKind::Distributed => Load::Distributed {
                id,
                start: required(self.start, "start")?,
                end: required(self.end, "end")?,
                w1: required(self.w1, "w1")?,
                w2: required(self.w2, "w2")?,
            },
            LoadKind::Moment => Load::Moment {
                id,
                position: required(self.moment_position, "momentPosition")?,
                magnitude: required(self.moment_magnitude, "momentMagnitude")?,
            },
        };
        Ok(load)
    }
}

impl From<&Load> for LoadInput {
    fn from(load: &Load) -> Self {
        match load {
            Load::Point { id, position, magnitude } => {
                LoadInput::point(*position, *magnitude).with_id(id.clone())
            }
            Load::Distributed { id, start, end, w1, w2 } => {
                LoadInput::distributed(*start, *end, *w1, *w2).with_id(id.clone())
            }
            Load::Moment { id, position, magnitude } => {
                LoadInput::moment(*position, *magnitude).with_id(id.clone())
            }
        }
    }
}

fn required(value: Option<f64>, field: &str) -> CalcResult<f64> {
    value.ok_or_else(|| CalcError::missing_field(field))
}
