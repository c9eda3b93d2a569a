//! Analysis driver
//!
//! Runs one complete span analysis from a request: validate the span and
//! every load, then sample, integrate, and classify. Validation failures
//! are returned as [`CalcError`]s; everything unusual but legal ends up in
//! [`AnalysisReport::warnings`].
//!
//! # Example
//!
//! ```
//! use clapeyron_core::calculations::analysis::{analyze, AnalysisRequest};
//! use clapeyron_core::config::CalculationConfig;
//! use clapeyron_core::loads::LoadInput;
//!
//! let request = AnalysisRequest::new("Midspan point load", CalculationConfig::for_span(10.0))
//!     .with_load(LoadInput::point(5.0, 100.0));
//!
//! let report = analyze(&request).unwrap();
//! assert!((report.alphas.alpha1 - 625.0).abs() < 1e-2);
//! assert!((report.max_moment() - 250.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::alpha::{
    calculate_alpha_analytical, calculate_alphas_with_tolerance, validate_alpha_results,
    AlphaResults, AlphaValidation, SYMMETRIC_ALPHA_TOLERANCE,
};
use super::moment_field::{reactions, total_vertical_load, Reactions};
use super::sampler::{generate_moment_points, MomentSamplePoint};
use super::symmetry::{analyze_load_symmetry, suggest_symmetry_improvements, SymmetryAnalysis};
use crate::config::CalculationConfig;
use crate::errors::{CalcError, CalcResult};
use crate::file_io::SCHEMA_VERSION;
use crate::loads::{generate_load_id, Load, LoadInput, LoadKind, LoadSet};
use crate::validation::{validate_load, validate_load_set, validate_span};

/// Method name recorded in every report
pub const CALCULATION_METHOD: &str = "Clapeyron three-moment equation (simple-span load terms)";

/// Relative gap between the two alpha routes above which a report warns
pub const ALPHA_DISCREPANCY_WARNING: f64 = 1e-2;

/// One analysis run as read from a request file.
///
/// Calculation settings sit at the top level next to the loads:
///
/// ```json
/// {
///   "version": "0.1.0",
///   "label": "Scenario C",
///   "spanLength": 10.0,
///   "numPoints": 1000,
///   "loads": [
///     { "type": "point", "position": 2.0, "magnitude": 20.0 },
///     { "type": "moment", "momentPosition": 8.0, "momentMagnitude": 15.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Request schema version
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub label: String,

    #[serde(flatten)]
    pub config: CalculationConfig,

    #[serde(default)]
    pub loads: Vec<LoadInput>,
}

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

impl AnalysisRequest {
    /// Empty request at the current schema version
    pub fn new(label: impl Into<String>, config: CalculationConfig) -> Self {
        AnalysisRequest {
            version: default_version(),
            label: label.into(),
            config,
            loads: Vec::new(),
        }
    }

    /// Add a load input (builder pattern)
    pub fn with_load(mut self, input: LoadInput) -> Self {
        self.loads.push(input);
        self
    }

    /// Request reproducing an already built load set
    pub fn from_load_set(set: &LoadSet, config: CalculationConfig) -> Self {
        AnalysisRequest {
            version: default_version(),
            label: set.label.clone(),
            config,
            loads: set.loads.iter().map(LoadInput::from).collect(),
        }
    }
}

/// Everything one analysis run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub version: String,
    pub label: String,
    pub calculation_method: String,
    pub span_length: f64,

    /// Validated loads in engine units, with ids
    pub loads: Vec<Load>,

    pub total_vertical_load: f64,
    pub reactions: Reactions,

    /// Numerical alphas, including the peak moment
    pub alphas: AlphaResults,

    /// Closed-form alphas for cross-checking
    pub analytical: AlphaResults,

    pub alpha_validation: AlphaValidation,
    pub symmetry: SymmetryAnalysis,
    pub symmetry_suggestions: Vec<String>,

    /// Moment diagram at display resolution
    pub diagram: Vec<MomentSamplePoint>,

    /// Validator remarks for the span, each load, and the set
    pub warnings: Vec<String>,
}

impl AnalysisReport {
    /// Peak absolute moment (kN·m)
    pub fn max_moment(&self) -> f64 {
        self.alphas.max_moment
    }

    /// Largest relative gap between the numerical and closed-form alphas
    pub fn alpha_discrepancy(&self) -> f64 {
        alpha_discrepancy(&self.alphas, &self.analytical)
    }
}

fn alpha_discrepancy(numeric: &AlphaResults, exact: &AlphaResults) -> f64 {
    let rel = |n: f64, e: f64| {
        if e.abs() < 1e-10 {
            (n - e).abs()
        } else {
            ((n - e) / e).abs()
        }
    };
    rel(numeric.alpha1, exact.alpha1).max(rel(numeric.alpha2, exact.alpha2))
}

/// Remarks on how far the sampled alphas drift from the closed forms
fn sampling_warnings(loads: &[Load], numeric: &AlphaResults, exact: &AlphaResults) -> Vec<String> {
    let mut warnings = Vec::new();

    let discrepancy = alpha_discrepancy(numeric, exact);
    if discrepancy > ALPHA_DISCREPANCY_WARNING {
        warnings.push(format!(
            "Numerical and closed-form alphas differ by {:.2}%: consider more integration points",
            discrepancy * 100.0
        ));
    }

    // Each couple's jump lands half a step off in the trapezoidal sum
    let numeric_gap = (numeric.alpha1 - numeric.alpha2).abs();
    let exact_gap = (exact.alpha1 - exact.alpha2).abs();
    let has_couples = loads.iter().any(|l| l.kind() == LoadKind::Moment);
    if numeric.is_symmetric
        && has_couples
        && numeric_gap > SYMMETRIC_ALPHA_TOLERANCE
        && exact_gap <= SYMMETRIC_ALPHA_TOLERANCE
    {
        warnings.push(format!(
            "Alphas of this symmetric set differ by {:.4} only through sampling of the applied moment jumps; the closed-form alphas are equal",
            numeric_gap
        ));
    }

    warnings
}

/// Validate a request and run the full analysis.
///
/// Fails on the first span, config, or load error; loads are checked in
/// order, each against the ones accepted before it.
pub fn analyze(request: &AnalysisRequest) -> CalcResult<AnalysisReport> {
    let config = request.config;
    config.validate()?;

    let span = config.span_length;
    let span_check = validate_span(span);
    if let Some(err) = span_check.errors.into_iter().next() {
        return Err(err);
    }
    let mut warnings = span_check.warnings;

    let mut set = LoadSet::new(request.label.clone());
    for (i, input) in request.loads.iter().enumerate() {
        let check = validate_load(input, span, set.as_slice());
        if let Some(err) = check.errors.into_iter().next() {
            log::error!("load {} rejected: {}", i + 1, err);
            return Err(err);
        }
        warnings.extend(check.warnings.into_iter().map(|w| format!("Load {}: {}", i + 1, w)));

        let id = input.id.clone().unwrap_or_else(generate_load_id);
        set.add_load(input.to_si().build(id)?);
    }

    let replaced = set.ensure_unique_ids();
    if replaced > 0 {
        warnings.push(format!("{} duplicate or empty load id(s) were replaced", replaced));
    }

    warnings.extend(validate_load_set(set.as_slice(), span).warnings);

    let loads = set.as_slice();
    let alphas = calculate_alphas_with_tolerance(loads, span, config.num_points, config.tolerance);
    let analytical = AlphaResults {
        is_symmetric: alphas.is_symmetric,
        ..calculate_alpha_analytical(loads, span)
    };
    let symmetry = analyze_load_symmetry(loads, span, config.tolerance);

    warnings.extend(sampling_warnings(loads, &alphas, &analytical));

    if !alphas.area.is_finite() {
        return Err(CalcError::calculation_failed(
            "alpha",
            "Moment diagram area is not finite",
        ));
    }

    for warning in &warnings {
        log::warn!("{}", warning);
    }
    log::info!(
        "analysed {} load(s) on {} m: alpha1={:.4} alpha2={:.4} max|M|={:.4}",
        loads.len(),
        span,
        alphas.alpha1,
        alphas.alpha2,
        alphas.max_moment
    );

    Ok(AnalysisReport {
        version: SCHEMA_VERSION.to_string(),
        label: request.label.clone(),
        calculation_method: CALCULATION_METHOD.to_string(),
        span_length: span,
        total_vertical_load: total_vertical_load(loads),
        reactions: reactions(loads, span),
        alpha_validation: validate_alpha_results(&alphas),
        symmetry_suggestions: suggest_symmetry_improvements(loads, span),
        diagram: generate_moment_points(loads, span, config.diagram_points),
        alphas,
        analytical,
        symmetry,
        warnings,
        loads: loads.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{LengthUnit, UnitSelection};

    fn scenario_c() -> AnalysisRequest {
        AnalysisRequest::new("Scenario C", CalculationConfig::for_span(10.0))
            .with_load(LoadInput::point(2.0, 20.0).with_id("P1"))
            .with_load(LoadInput::moment(8.0, 15.0).with_id("M1"))
    }

    #[test]
    fn test_scenario_c_report() {
        let report = analyze(&scenario_c()).unwrap();

        assert_eq!(report.loads.len(), 2);
        assert_eq!(report.loads[0].id(), "P1");
        assert!((report.analytical.alpha1 - 74.0).abs() < 1e-9);
        assert!((report.analytical.alpha2 - 41.0).abs() < 1e-9);
        assert!(report.alpha_discrepancy() < 1e-2);
        assert!(!report.symmetry.is_symmetric);
        assert_eq!(report.diagram.len(), 201);
        assert!((report.reactions.total() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_invalid_load_stops_analysis() {
        let request = scenario_c().with_load(LoadInput::point(11.0, 5.0));
        let err = analyze(&request).unwrap_err();
        assert_eq!(err.field(), Some("position"));
    }

    #[test]
    fn test_invalid_span_and_config() {
        let request = AnalysisRequest::new("bad span", CalculationConfig::for_span(0.0));
        assert_eq!(analyze(&request).unwrap_err().field(), Some("spanLength"));

        let request = AnalysisRequest::new("bad points", CalculationConfig::for_span(5.0).with_num_points(0));
        assert_eq!(analyze(&request).unwrap_err().field(), Some("numPoints"));
    }

    #[test]
    fn test_empty_request_is_valid() {
        let report = analyze(&AnalysisRequest::new("empty", CalculationConfig::for_span(6.0))).unwrap();
        assert_eq!(report.alphas.alpha1, 0.0);
        assert!(report.symmetry.is_symmetric);
        assert!(report.warnings.iter().any(|w| w == "No loads applied"));
        assert!(!report.alpha_validation.is_valid);
    }

    #[test]
    fn test_tolerance_drives_symmetry() {
        // Mirror pair off by 5 mm
        let request = AnalysisRequest::new("loose", CalculationConfig::for_span(10.0).with_tolerance(0.01))
            .with_load(LoadInput::point(2.0, 10.0))
            .with_load(LoadInput::point(8.005, 10.0));

        let report = analyze(&request).unwrap();
        assert!(report.alphas.is_symmetric);
        assert!(report.analytical.is_symmetric);
        assert!(report.symmetry.is_symmetric);
    }

    #[test]
    fn test_inputs_converted_to_engine_units() {
        let cm = UnitSelection {
            length: LengthUnit::Centimeter,
            ..Default::default()
        };
        let request = AnalysisRequest::new("cm", CalculationConfig::for_span(10.0))
            .with_load(LoadInput::point(500.0, 100.0).with_units(cm));

        let report = analyze(&request).unwrap();
        assert!(matches!(report.loads[0], Load::Point { position, .. } if position == 5.0));
        assert!((report.analytical.alpha1 - 625.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_couples_explain_alpha_gap() {
        let request = AnalysisRequest::new("couples", CalculationConfig::for_span(10.0))
            .with_load(LoadInput::moment(2.0, 10.0))
            .with_load(LoadInput::moment(8.0, -10.0));

        let report = analyze(&request).unwrap();
        assert!(report.alphas.is_symmetric);
        assert!((report.analytical.alpha1 - report.analytical.alpha2).abs() < 1e-9);
        assert!(report.warnings.iter().any(|w| w.contains("applied moment jumps")));
        assert!(!report.warnings.iter().any(|w| w.contains("differ by") && w.contains('%')));
    }

    #[test]
    fn test_cancelling_ramp_routes_agree() {
        let request = AnalysisRequest::new("ramp", CalculationConfig::for_span(10.0))
            .with_load(LoadInput::distributed(2.0, 4.0, 5.0, -5.0));

        let report = analyze(&request).unwrap();
        assert!(report.alpha_discrepancy() < ALPHA_DISCREPANCY_WARNING);
        assert!(!report.warnings.iter().any(|w| w.contains("closed-form")));
    }

    #[test]
    fn test_duplicate_ids_replaced() {
        let request = AnalysisRequest::new("dupes", CalculationConfig::for_span(10.0))
            .with_load(LoadInput::point(2.0, 10.0).with_id("A"))
            .with_load(LoadInput::point(8.0, 10.0).with_id("A"));

        let report = analyze(&request).unwrap();
        assert_ne!(report.loads[0].id(), report.loads[1].id());
        assert!(report.warnings.iter().any(|w| w.contains("replaced")));
    }

    #[test]
    fn test_request_json_shape() {
        let json = r#"{
            "spanLength": 10.0,
            "loads": [
                { "type": "point", "position": 2.0, "magnitude": 20.0 },
                { "type": "moment", "momentPosition": 8.0, "momentMagnitude": 15.0 }
            ]
        }"#;
        let request: AnalysisRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.version, SCHEMA_VERSION);
        assert_eq!(request.config.num_points, 1000);
        assert_eq!(request.loads.len(), 2);

        let report = analyze(&request).unwrap();
        let out = serde_json::to_value(&report).unwrap();
        assert!(out.get("alphaValidation").is_some());
        assert!(out["alphas"].get("maxMomentPosition").is_some());
    }
}
