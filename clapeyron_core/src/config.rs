//! # Calculation Settings
//!
//! Defaults and limits shared by the engine, the validator, and the CLI.
//! A request may override any field of [`CalculationConfig`]; missing fields
//! fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Sample count used for diagram display
pub const DIAGRAM_POINTS: usize = 200;

/// Sample count used for alpha integration (finer sampling, smaller error)
pub const ALPHA_POINTS: usize = 1000;

/// Default position/magnitude tolerance for symmetry matching
pub const DEFAULT_SYMMETRY_TOLERANCE: f64 = 0.001;

/// Default span length (m) used when a request omits it
pub const DEFAULT_SPAN_LENGTH: f64 = 6.0;

/// Settings for one analysis run.
///
/// # JSON Format
/// ```json
/// { "numPoints": 1000, "diagramPoints": 200, "tolerance": 0.001 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationConfig {
    /// Span length (m)
    pub span_length: f64,

    /// Integration intervals for the alpha calculation
    pub num_points: usize,

    /// Sample intervals for the displayed moment diagram
    pub diagram_points: usize,

    /// Symmetry matching tolerance (m and kN)
    pub tolerance: f64,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        CalculationConfig {
            span_length: DEFAULT_SPAN_LENGTH,
            num_points: ALPHA_POINTS,
            diagram_points: DIAGRAM_POINTS,
            tolerance: DEFAULT_SYMMETRY_TOLERANCE,
        }
    }
}

impl CalculationConfig {
    /// Config for a given span with default sampling
    pub fn for_span(span_length: f64) -> Self {
        CalculationConfig {
            span_length,
            ..Default::default()
        }
    }

    /// Set the integration sample count (builder pattern)
    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    /// Set the symmetry tolerance (builder pattern)
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check the sampling settings.
    ///
    /// The span itself is checked by [`crate::validation::validate_span`].
    pub fn validate(&self) -> CalcResult<()> {
        if self.num_points == 0 {
            return Err(CalcError::invalid_input(
                "numPoints",
                "0",
                "At least one integration interval is required",
            ));
        }
        if self.diagram_points == 0 {
            return Err(CalcError::invalid_input(
                "diagramPoints",
                "0",
                "At least one diagram interval is required",
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(CalcError::invalid_input(
                "tolerance",
                self.tolerance.to_string(),
                "Symmetry tolerance must be positive",
            ));
        }
        Ok(())
    }
}

/// Limits applied by the load-set validator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationLimits {
    /// Shortest accepted span (m)
    pub span_min: f64,
    /// Longest accepted span (m)
    pub span_max: f64,
    /// Point load magnitude above which a warning is raised (kN)
    pub max_magnitude: f64,
    /// Maximum decimal places on positions before a rounding hint
    pub position_precision: usize,
}

/// Limits used throughout the validator
pub const VALIDATION_LIMITS: ValidationLimits = ValidationLimits {
    span_min: 0.1,
    span_max: 500.0,
    max_magnitude: 1000.0,
    position_precision: 3,
};
