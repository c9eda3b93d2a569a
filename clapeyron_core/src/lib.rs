//! # clapeyron_core - Simple-Span Load Terms for the Three-Moment Equation
//!
//! `clapeyron_core` computes the bending moment field of a simply supported
//! span under point loads, linearly varying distributed loads, and applied
//! couples, and reduces it to the Clapeyron load terms α1 and α2 used by the
//! three-moment equation for continuous beams. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over a borrowed slice of loads
//! - **JSON-First**: All types implement Serialize/Deserialize with camelCase fields
//! - **Rich Errors**: Validation returns structured errors naming the field
//! - **Validate Once**: The engine trusts its input; the validator guards it
//!
//! ## Quick Start
//!
//! ```rust
//! use clapeyron_core::calculations::calculate_alphas;
//! use clapeyron_core::config::ALPHA_POINTS;
//! use clapeyron_core::loads::Load;
//!
//! // 6 m span, 10 kN/m over the whole length
//! let loads = vec![Load::uniform(10.0, 0.0, 6.0)];
//! let alphas = calculate_alphas(&loads, 6.0, ALPHA_POINTS);
//!
//! assert!((alphas.alpha1 - 90.0).abs() < 1e-2);
//! assert!((alphas.max_moment - 45.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`loads`] - Load model, unvalidated inputs, and load sets
//! - [`calculations`] - Moment field, sampling, alphas, symmetry, analysis driver
//! - [`validation`] - Load, load-set, and span validation
//! - [`config`] - Calculation settings and validation limits
//! - [`units`] - Unit wrappers and input unit conversion
//! - [`errors`] - Structured error types
//! - [`file_io`] - Request parsing and atomic report saves

pub mod calculations;
pub mod config;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze, AlphaResults, AnalysisReport, AnalysisRequest};
pub use config::{CalculationConfig, ALPHA_POINTS, DIAGRAM_POINTS};
pub use errors::{CalcError, CalcResult};
pub use file_io::{parse_request, read_request, save_report, SCHEMA_VERSION};
pub use loads::{Load, LoadInput, LoadKind, LoadSet};
