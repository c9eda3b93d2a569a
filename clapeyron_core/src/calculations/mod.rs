//! # Span Calculations
//!
//! The numerical engine for a single simply supported span. Every function
//! here is pure and total: it takes a borrowed slice of validated loads and
//! a span length and returns plain data.
//!
//! - [`moment_field`] - Bending moment and support reactions by superposition
//! - [`sampler`] - Evenly spaced moment samples and the peak moment
//! - [`alpha`] - Diagram integrals and the Clapeyron load terms α1, α2
//! - [`symmetry`] - Mirror-symmetry classification about midspan
//! - [`analysis`] - Request-to-report driver that validates first
//!
//! All result types serialize to camelCase JSON.

pub mod alpha;
pub mod analysis;
pub mod moment_field;
pub mod sampler;
pub mod symmetry;

// Re-export commonly used types
pub use alpha::{
    calculate_alpha_analytical, calculate_alphas, calculate_alphas_with_tolerance,
    integrate_moment_points, load_contribution, validate_alpha_results, AlphaResults,
    AlphaValidation, IntegrationResult,
};
pub use analysis::{analyze, AnalysisReport, AnalysisRequest, CALCULATION_METHOD};
pub use moment_field::{moment_at, reactions, total_vertical_load, Reactions};
pub use sampler::{find_max_moment, generate_moment_points, MaxMoment, MomentSamplePoint};
pub use symmetry::{
    analyze_load_symmetry, calculate_symmetry_factor, check_load_symmetry,
    suggest_symmetry_improvements, SymmetryAnalysis, SymmetryType,
};
