//! Load Set Validator
//!
//! Checks user-entered loads and spans before they reach the engine.
//! Problems that make a load unusable are structured [`CalcError`]s naming
//! the offending field; anything merely unusual is a plain warning string.
//!
//! The engine itself never re-validates. Everything here runs on engine
//! units: [`validate_load`] converts its input with [`LoadInput::to_si`]
//! before checking it.

use serde::{Deserialize, Serialize};

use crate::config::VALIDATION_LIMITS;
use crate::errors::CalcError;
use crate::loads::{Load, LoadInput, LoadKind};

/// Outcome of a validation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadValidation {
    /// True when there are no errors (warnings are allowed)
    pub is_valid: bool,
    /// Problems that block the load
    pub errors: Vec<CalcError>,
    /// Non-blocking remarks
    pub warnings: Vec<String>,
}

impl LoadValidation {
    fn from_parts(errors: Vec<CalcError>, warnings: Vec<String>) -> Self {
        LoadValidation {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// First error, if any
    pub fn first_error(&self) -> Option<&CalcError> {
        self.errors.first()
    }
}

/// Collects errors and warnings while a single input is checked
#[derive(Default)]
struct Findings {
    errors: Vec<CalcError>,
    warnings: Vec<String>,
}

impl Findings {
    fn error(&mut self, field: &str, value: f64, reason: impl Into<String>) {
        self.errors
            .push(CalcError::invalid_input(field, value.to_string(), reason));
    }

    fn missing(&mut self, field: &str) {
        self.errors.push(CalcError::missing_field(field));
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn finish(self) -> LoadValidation {
        LoadValidation::from_parts(self.errors, self.warnings)
    }
}

/// Validate one load input against the span and the loads already present.
///
/// # Example
/// ```
/// use clapeyron_core::loads::LoadInput;
/// use clapeyron_core::validation::validate_load;
///
/// let result = validate_load(&LoadInput::point(12.0, 5.0), 10.0, &[]);
/// assert!(!result.is_valid);
/// assert_eq!(result.errors[0].field(), Some("position"));
///
/// // Loads at a support are legal but flagged
/// let result = validate_load(&LoadInput::point(0.0, 5.0), 10.0, &[]);
/// assert!(result.is_valid);
/// assert!(!result.warnings.is_empty());
/// ```
pub fn validate_load(entered: &LoadInput, span_m: f64, existing: &[Load]) -> LoadValidation {
    let input = entered.to_si();
    let mut findings = Findings::default();

    match input.kind {
        LoadKind::Point => check_point(&input, span_m, &mut findings),
        LoadKind::Distributed => check_distributed(&input, span_m, &mut findings),
        LoadKind::Moment => check_moment(&input, span_m, &mut findings),
    }

    check_compatibility(&input, existing, span_m, &mut findings);
    check_engineering_limits(&input, span_m, &mut findings);
    check_entered_precision(entered, &mut findings);

    findings.finish()
}

fn check_position(field: &str, position: f64, span_m: f64, at_support: &str, f: &mut Findings) {
    if position < 0.0 {
        f.error(field, position, "Position cannot be negative");
    } else if position > span_m {
        f.error(
            field,
            position,
            format!("Position cannot exceed the span length ({} m)", span_m),
        );
    } else if position == 0.0 || position == span_m {
        f.warn(at_support);
    }
}

fn check_point(input: &LoadInput, span_m: f64, f: &mut Findings) {
    match input.position {
        None => f.missing("position"),
        Some(position) => check_position(
            "position",
            position,
            span_m,
            "Load applied at a support: it goes straight into the reaction",
            f,
        ),
    }

    match input.magnitude {
        None => f.missing("magnitude"),
        Some(magnitude) => {
            let abs = magnitude.abs();
            if abs < 0.001 {
                f.warn("Load magnitude is very small");
            } else if abs > VALIDATION_LIMITS.max_magnitude {
                f.warn(format!(
                    "Very high magnitude (>{} kN): check the values",
                    VALIDATION_LIMITS.max_magnitude
                ));
            } else if abs < 0.1 {
                f.warn("Small magnitude: may have little effect on the analysis");
            }
        }
    }
}

fn check_distributed(input: &LoadInput, span_m: f64, f: &mut Findings) {
    if input.start.is_none() {
        f.missing("start");
    }
    if input.end.is_none() {
        f.missing("end");
    }

    if let (Some(start), Some(end)) = (input.start, input.end) {
        if start < 0.0 {
            f.error("start", start, "Start position cannot be negative");
        }
        if end > span_m {
            f.error(
                "end",
                end,
                format!("End position cannot exceed the span length ({} m)", span_m),
            );
        }
        if start >= end {
            f.error("end", end, "End position must be greater than start position");
        }

        let length = end - start;
        if length < 0.1 {
            f.warn("Distributed load length is very small");
        } else if length > span_m * 0.9 {
            f.warn("Distributed load covers almost the whole span");
        }
    }

    if input.w1.is_none() {
        f.missing("w1");
    }
    if input.w2.is_none() {
        f.missing("w2");
    }

    if let (Some(w1), Some(w2)) = (input.w1, input.w2) {
        if w1.abs() < 0.001 && w2.abs() < 0.001 {
            f.warn("Both intensities are very small");
        }

        let max_intensity = w1.abs().max(w2.abs());
        if max_intensity > 100.0 {
            f.warn("Very high load intensity: check the units");
        }
        if (w1 - w2).abs() > max_intensity * 5.0 {
            f.warn("Abrupt change between w1 and w2: consider splitting the load");
        }
    }
}

fn check_moment(input: &LoadInput, span_m: f64, f: &mut Findings) {
    match input.moment_position {
        None => f.missing("momentPosition"),
        Some(position) => check_position(
            "momentPosition",
            position,
            span_m,
            "Moment applied at a support: it may need special consideration",
            f,
        ),
    }

    match input.moment_magnitude {
        None => f.missing("momentMagnitude"),
        Some(magnitude) => {
            let abs = magnitude.abs();
            if abs < 0.001 {
                f.warn("Moment magnitude is very small");
            } else if abs > 1000.0 {
                f.warn("Very high moment magnitude: check the values");
            }
        }
    }
}

fn check_compatibility(input: &LoadInput, existing: &[Load], span_m: f64, f: &mut Findings) {
    match input.kind {
        LoadKind::Distributed => {
            if let (Some(start), Some(end)) = (input.start, input.end) {
                let overlaps = existing.iter().any(|load| match load {
                    Load::Distributed { start: s, end: e, .. } => !(end <= *s || start >= *e),
                    _ => false,
                });
                if overlaps {
                    f.warn("Distributed load overlaps existing distributed loads");
                }
            }
        }
        LoadKind::Point => {
            if let Some(position) = input.position {
                let nearby = existing.iter().any(|load| match load {
                    Load::Point { position: p, .. } => (p - position).abs() < span_m * 0.05,
                    _ => false,
                });
                if nearby {
                    f.warn("Point loads are very close together: consider combining them");
                }
            }
        }
        LoadKind::Moment => {}
    }

    if existing.len() > 10 {
        f.warn("Many loads applied: consider simplifying the model");
    }
}

fn check_engineering_limits(input: &LoadInput, span_m: f64, f: &mut Findings) {
    match input.kind {
        LoadKind::Point => {
            if let Some(magnitude) = input.magnitude {
                if magnitude.abs() / span_m > 50.0 {
                    f.warn("Load to span ratio is very high for typical applications");
                }
            }
        }
        LoadKind::Distributed => {
            if let (Some(w1), Some(w2)) = (input.w1, input.w2) {
                let avg_intensity = (w1.abs() + w2.abs()) / 2.0;
                if avg_intensity * span_m > 1000.0 {
                    f.warn("Very high total load: check the units");
                }
            }
        }
        LoadKind::Moment => {}
    }
}

/// Precision of the positions as typed, before any unit conversion
fn check_entered_precision(entered: &LoadInput, f: &mut Findings) {
    let positions = [
        (entered.position, "Position"),
        (entered.start, "Start position"),
        (entered.end, "End position"),
    ];
    for (value, name) in positions {
        if let Some(v) = value {
            if decimal_places(v) > VALIDATION_LIMITS.position_precision {
                f.warn(format!("{} has too many decimal places: consider rounding", name));
            }
        }
    }
}

/// Digits after the decimal point in the shortest representation of `value`
fn decimal_places(value: f64) -> usize {
    let text = value.to_string();
    text.split_once('.').map_or(0, |(_, frac)| frac.len())
}

/// Validate a whole load set against a span.
///
/// Never produces errors for well-formed loads; the warnings flag empty or
/// unusually heavy sets and sets whose resultants balance about midspan.
pub fn validate_load_set(loads: &[Load], span_m: f64) -> LoadValidation {
    let mut warnings = Vec::new();

    if loads.is_empty() {
        warnings.push("No loads applied".to_string());
        return LoadValidation::from_parts(Vec::new(), warnings);
    }

    let total_load: f64 = loads
        .iter()
        .map(|load| match load {
            Load::Point { magnitude, .. } => magnitude.abs(),
            Load::Distributed { start, end, w1, w2, .. } => {
                (w1.abs() + w2.abs()) / 2.0 * (end - start)
            }
            Load::Moment { .. } => 0.0,
        })
        .sum();

    if total_load == 0.0 {
        warnings.push("Total load is zero: check the magnitudes".to_string());
    } else if total_load > 1000.0 {
        warnings.push("Very high total load: check units and magnitudes".to_string());
    }

    let center = span_m / 2.0;
    let moment_about_center: f64 = loads
        .iter()
        .map(|load| match load {
            Load::Point { position, magnitude, .. } => magnitude * (position - center),
            Load::Distributed { start, end, w1, w2, .. } => {
                (w1 + w2) / 2.0 * (end - start) * ((start + end) / 2.0 - center)
            }
            Load::Moment { .. } => 0.0,
        })
        .sum();

    if moment_about_center.abs() < total_load * span_m * 0.1 {
        warnings.push("Loads appear approximately symmetric".to_string());
    }

    LoadValidation::from_parts(Vec::new(), warnings)
}

/// Validate a span length (m).
///
/// ```
/// use clapeyron_core::validation::validate_span;
///
/// assert!(validate_span(6.0).is_valid);
/// assert!(!validate_span(0.0).is_valid);
/// assert!(!validate_span(600.0).is_valid);
/// ```
pub fn validate_span(span_m: f64) -> LoadValidation {
    let mut f = Findings::default();
    let limits = VALIDATION_LIMITS;

    if !span_m.is_finite() || span_m <= 0.0 {
        f.error("spanLength", span_m, "Span length must be positive");
    } else if span_m < limits.span_min {
        f.error(
            "spanLength",
            span_m,
            format!("Minimum span length is {} m", limits.span_min),
        );
    } else if span_m > limits.span_max {
        f.error(
            "spanLength",
            span_m,
            format!("Maximum span length is {} m", limits.span_max),
        );
    }

    if span_m < 1.0 {
        f.warn("Very short span: results may not be representative");
    } else if span_m > 100.0 {
        f.warn("Very long span: consider splitting into several spans");
    }

    f.finish()
}

/// Textual fixes for out-of-range positions in `input`
pub fn suggest_load_corrections(input: &LoadInput, span_m: f64) -> Vec<String> {
    let input = input.to_si();
    let mut suggestions = Vec::new();

    match input.kind {
        LoadKind::Point => {
            if let Some(position) = input.position {
                if position < 0.0 {
                    suggestions.push(format!("Move the load to a position between 0 and {} m", span_m));
                } else if position > span_m {
                    suggestions.push(format!("Reduce the position to at most {} m", span_m));
                }
            }
        }
        LoadKind::Distributed => {
            if let (Some(start), Some(end)) = (input.start, input.end) {
                if start >= end {
                    suggestions.push("Make the end position greater than the start position".to_string());
                }
                if end > span_m {
                    suggestions.push(format!("Set the end position to at most {} m", span_m));
                }
            }
        }
        LoadKind::Moment => {
            if let Some(position) = input.moment_position {
                if position < 0.0 || position > span_m {
                    suggestions.push(format!("Move the moment to a position between 0 and {} m", span_m));
                }
            }
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{LengthUnit, UnitSelection};

    fn has_warning(v: &LoadValidation, needle: &str) -> bool {
        v.warnings.iter().any(|w| w.contains(needle))
    }

    #[test]
    fn test_valid_point_load() {
        let v = validate_load(&LoadInput::point(3.0, 20.0), 10.0, &[]);
        assert!(v.is_valid);
        assert!(v.errors.is_empty());
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn test_point_position_bounds() {
        let v = validate_load(&LoadInput::point(-1.0, 20.0), 10.0, &[]);
        assert_eq!(v.first_error().and_then(|e| e.field()), Some("position"));

        let v = validate_load(&LoadInput::point(10.0, 20.0), 10.0, &[]);
        assert!(v.is_valid);
        assert!(has_warning(&v, "support"));
    }

    #[test]
    fn test_point_magnitude_warnings() {
        let tiny = validate_load(&LoadInput::point(5.0, 0.0005), 10.0, &[]);
        assert!(has_warning(&tiny, "very small"));

        let low = validate_load(&LoadInput::point(5.0, 0.05), 10.0, &[]);
        assert!(has_warning(&low, "little effect"));

        let high = validate_load(&LoadInput::point(5.0, 1500.0), 10.0, &[]);
        assert!(high.is_valid);
        assert!(has_warning(&high, "Very high magnitude"));
        assert!(has_warning(&high, "ratio"));
    }

    #[test]
    fn test_missing_fields() {
        let v = validate_load(&LoadInput::new(LoadKind::Point), 10.0, &[]);
        assert_eq!(
            v.errors,
            vec![
                CalcError::missing_field("position"),
                CalcError::missing_field("magnitude")
            ]
        );

        let v = validate_load(&LoadInput::new(LoadKind::Moment), 10.0, &[]);
        assert_eq!(v.errors[0], CalcError::missing_field("momentPosition"));
    }

    #[test]
    fn test_distributed_errors() {
        let v = validate_load(&LoadInput::distributed(-1.0, 12.0, 5.0, 5.0), 10.0, &[]);
        let fields: Vec<_> = v.errors.iter().filter_map(|e| e.field()).collect();
        assert_eq!(fields, vec!["start", "end"]);

        let v = validate_load(&LoadInput::distributed(4.0, 4.0, 5.0, 5.0), 10.0, &[]);
        assert!(!v.is_valid);
        assert!(has_warning(&v, "length is very small"));
    }

    #[test]
    fn test_distributed_warnings() {
        let v = validate_load(&LoadInput::distributed(0.0, 10.0, 0.0, 0.0), 10.0, &[]);
        assert!(v.is_valid);
        assert!(has_warning(&v, "almost the whole span"));
        assert!(has_warning(&v, "Both intensities"));

        let v = validate_load(&LoadInput::distributed(1.0, 4.0, 150.0, 150.0), 10.0, &[]);
        assert!(has_warning(&v, "check the units"));

        // |w1 - w2| must exceed five times the larger magnitude
        let v = validate_load(&LoadInput::distributed(1.0, 4.0, 1.0, -5.0), 10.0, &[]);
        assert!(!has_warning(&v, "Abrupt"));
    }

    #[test]
    fn test_moment_checks() {
        let v = validate_load(&LoadInput::moment(11.0, 5.0), 10.0, &[]);
        assert_eq!(v.first_error().and_then(|e| e.field()), Some("momentPosition"));

        let v = validate_load(&LoadInput::moment(0.0, 5.0), 10.0, &[]);
        assert!(v.is_valid);
        assert!(has_warning(&v, "support"));

        let v = validate_load(&LoadInput::moment(5.0, -2000.0), 10.0, &[]);
        assert!(has_warning(&v, "Very high moment"));
    }

    #[test]
    fn test_compatibility_warnings() {
        let existing = vec![Load::uniform(5.0, 2.0, 6.0), Load::point(10.0, 5.0)];

        let v = validate_load(&LoadInput::distributed(5.0, 8.0, 2.0, 2.0), 10.0, &existing);
        assert!(has_warning(&v, "overlaps"));

        // Touching at an end is not an overlap
        let v = validate_load(&LoadInput::distributed(6.0, 8.0, 2.0, 2.0), 10.0, &existing);
        assert!(!has_warning(&v, "overlaps"));

        let v = validate_load(&LoadInput::point(5.3, 10.0), 10.0, &existing);
        assert!(has_warning(&v, "very close"));

        let crowded: Vec<Load> = (0..11).map(|i| Load::moment(1.0, i as f64 * 0.5)).collect();
        let v = validate_load(&LoadInput::moment(5.0, 1.0), 10.0, &crowded);
        assert!(has_warning(&v, "Many loads"));
    }

    #[test]
    fn test_decimal_precision() {
        assert_eq!(decimal_places(2.0), 0);
        assert_eq!(decimal_places(2.125), 3);
        assert_eq!(decimal_places(2.1255), 4);

        let v = validate_load(&LoadInput::point(2.1255, 10.0), 10.0, &[]);
        assert!(has_warning(&v, "decimal places"));
    }

    #[test]
    fn test_precision_checks_entered_values() {
        // 12.3 cm converts to 0.12300000000000001 m
        let cm = UnitSelection {
            length: LengthUnit::Centimeter,
            ..Default::default()
        };
        let v = validate_load(&LoadInput::point(12.3, 10.0).with_units(cm), 5.0, &[]);
        assert!(!has_warning(&v, "decimal places"));

        let span = LoadInput::distributed(12.3, 456.7, 4.0, 4.0).with_units(cm);
        assert!(!has_warning(&validate_load(&span, 5.0, &[]), "decimal places"));

        // 1234.5 mm is 1.2345 m but was typed with one decimal
        let mm = UnitSelection {
            length: LengthUnit::Millimeter,
            ..Default::default()
        };
        let v = validate_load(&LoadInput::point(1234.5, 10.0).with_units(mm), 5.0, &[]);
        assert!(!has_warning(&v, "decimal places"));

        let v = validate_load(&LoadInput::point(12.3456, 10.0).with_units(cm), 5.0, &[]);
        assert!(has_warning(&v, "Position has too many decimal places"));
    }

    #[test]
    fn test_validation_runs_in_engine_units() {
        // 250 cm on a 5 m span is fine; 250 m would not be
        let units = UnitSelection {
            length: LengthUnit::Centimeter,
            ..Default::default()
        };
        let input = LoadInput::point(250.0, 10.0).with_units(units);
        assert!(validate_load(&input, 5.0, &[]).is_valid);
    }

    #[test]
    fn test_load_set_checks() {
        let empty = validate_load_set(&[], 10.0);
        assert!(empty.is_valid);
        assert_eq!(empty.warnings.len(), 1);

        let symmetric = validate_load_set(&[Load::point(10.0, 2.0), Load::point(10.0, 8.0)], 10.0);
        assert!(has_warning(&symmetric, "approximately symmetric"));

        let lopsided = validate_load_set(&[Load::point(10.0, 0.5)], 10.0);
        assert!(!has_warning(&lopsided, "approximately symmetric"));

        let heavy = validate_load_set(&[Load::uniform(200.0, 0.0, 10.0)], 10.0);
        assert!(has_warning(&heavy, "Very high total load"));

        let moments_only = validate_load_set(&[Load::moment(5.0, 3.0)], 10.0);
        assert!(has_warning(&moments_only, "zero"));
    }

    #[test]
    fn test_span_checks() {
        assert!(!validate_span(-3.0).is_valid);
        assert!(!validate_span(0.05).is_valid);
        assert!(!validate_span(f64::NAN).is_valid);

        let short = validate_span(0.5);
        assert!(short.is_valid);
        assert_eq!(short.warnings.len(), 1);

        let long = validate_span(150.0);
        assert!(long.is_valid);
        assert_eq!(long.warnings.len(), 1);
    }

    #[test]
    fn test_suggestions() {
        let s = suggest_load_corrections(&LoadInput::point(12.0, 1.0), 10.0);
        assert_eq!(s, vec!["Reduce the position to at most 10 m".to_string()]);

        let s = suggest_load_corrections(&LoadInput::distributed(6.0, 11.0, 1.0, 1.0), 10.0);
        assert_eq!(s.len(), 1);

        let s = suggest_load_corrections(&LoadInput::distributed(11.0, 6.0, 1.0, 1.0), 10.0);
        assert_eq!(s.len(), 1);

        assert!(suggest_load_corrections(&LoadInput::moment(4.0, 1.0), 10.0).is_empty());
    }
}
