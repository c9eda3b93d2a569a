//! # Clapeyron CLI
//!
//! Runs span analyses from request files and prints a readable report.
//!
//! ```text
//! clapeyron analyze beam.json
//! clapeyron analyze beam.json --points 4000 --output beam.report.json
//! clapeyron demo --json
//! ```
//!
//! Exit status is 0 on success, 1 on a validation or I/O error, and 2 on a
//! usage error.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use clapeyron_core::calculations::{analyze, AnalysisReport, AnalysisRequest};
use clapeyron_core::config::CalculationConfig;
use clapeyron_core::errors::CalcError;
use clapeyron_core::file_io::{read_request, report_to_json, save_report};
use clapeyron_core::loads::LoadInput;

#[derive(Parser)]
#[command(name = "clapeyron", version, about = "Clapeyron load terms for a simply supported span")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyse a JSON request file
    Analyze {
        /// Request file
        request: PathBuf,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Also save the JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the integration interval count
        #[arg(long)]
        points: Option<usize>,
    },

    /// Run the built-in reference scenarios
    Demo {
        /// Print the reports as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Analyze { request, json, output, points } => run_analyze(&request, json, output, points),
        Command::Demo { json } => run_demo(json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::from(1)
        }
    }
}

fn run_analyze(path: &Path, json: bool, output: Option<PathBuf>, points: Option<usize>) -> Result<(), CalcError> {
    let mut request = read_request(path)?;
    if let Some(n) = points {
        request.config.num_points = n;
    }

    let report = analyze(&request)?;
    print_report(&report, json)?;

    if let Some(out) = output {
        save_report(&report, &out)?;
        log::info!("report saved to {}", out.display());
    }
    Ok(())
}

fn run_demo(json: bool) -> Result<(), CalcError> {
    for request in demo_scenarios() {
        let report = analyze(&request)?;
        print_report(&report, json)?;
        println!();
    }
    Ok(())
}

/// Reference scenarios with hand-checkable results
fn demo_scenarios() -> Vec<AnalysisRequest> {
    vec![
        // α1 = α2 = 625
        AnalysisRequest::new("A: 100 kN at midspan of 10 m", CalculationConfig::for_span(10.0))
            .with_load(LoadInput::point(5.0, 100.0).with_id("P1")),
        // α1 = α2 = 90, M_max = 45 at 3 m
        AnalysisRequest::new("B: 10 kN/m over 6 m", CalculationConfig::for_span(6.0))
            .with_load(LoadInput::distributed(0.0, 6.0, 10.0, 10.0).with_id("W1")),
        // α1 = 74, α2 = 41
        AnalysisRequest::new("C: 20 kN at 2 m, 15 kN·m at 8 m", CalculationConfig::for_span(10.0))
            .with_load(LoadInput::point(2.0, 20.0).with_id("P1"))
            .with_load(LoadInput::moment(8.0, 15.0).with_id("M1")),
    ]
}

fn print_report(report: &AnalysisReport, json: bool) -> Result<(), CalcError> {
    if json {
        println!("{}", report_to_json(report)?);
        return Ok(());
    }

    let a = &report.alphas;
    println!("═══════════════════════════════════════");
    println!("  SPAN ANALYSIS: {}", report.label);
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Span:  {:.3} m", report.span_length);
    for (i, load) in report.loads.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, load);
    }
    println!();
    println!("Reactions:");
    println!("  R_left  = {:.3} kN", report.reactions.left);
    println!("  R_right = {:.3} kN", report.reactions.right);
    println!();
    println!("Moment Diagram:");
    println!("  Area        = {:.4} kN·m²", a.area);
    println!("  x̄ (left)    = {:.4} m", a.centroid_left);
    println!("  x̄ (right)   = {:.4} m", a.centroid_right);
    println!("  |M|max      = {:.4} kN·m at {:.3} m", a.max_moment, a.max_moment_position);
    println!();
    println!("Load Terms:");
    println!("  α1 = {:.4}   (closed form {:.4})", a.alpha1, report.analytical.alpha1);
    println!("  α2 = {:.4}   (closed form {:.4})", a.alpha2, report.analytical.alpha2);
    println!();
    println!(
        "Symmetry: {} (confidence {:.2}) {}",
        report.symmetry.symmetry_type,
        report.symmetry.confidence,
        status_icon(report.symmetry.is_symmetric)
    );
    for line in &report.symmetry.details {
        println!("  {}", line);
    }

    if !report.warnings.is_empty() || !report.alpha_validation.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for w in report.warnings.iter().chain(&report.alpha_validation.warnings) {
            println!("  - {}", w);
        }
    }

    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: α1 = {:.3}, α2 = {:.3} {}",
        a.alpha1,
        a.alpha2,
        status_icon(report.alpha_validation.is_valid)
    );
    println!("═══════════════════════════════════════");
    Ok(())
}

fn status_icon(ok: bool) -> &'static str {
    if ok { "[OK]" } else { "[CHECK]" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_demo_scenarios() {
        let expected = [(625.0, 625.0), (90.0, 90.0), (74.0, 41.0)];
        for (request, (a1, a2)) in demo_scenarios().iter().zip(expected) {
            let report = analyze(request).unwrap();
            assert!((report.analytical.alpha1 - a1).abs() < 1e-9);
            assert!((report.analytical.alpha2 - a2).abs() < 1e-9);
            assert!((report.alphas.alpha1 - a1).abs() / a1 < 1e-2);
        }
    }

    #[test]
    fn test_parse_analyze_args() {
        let cli = Cli::try_parse_from(["clapeyron", "analyze", "beam.json", "--points", "500", "--json"]).unwrap();
        match cli.command {
            Command::Analyze { request, json, points, output } => {
                assert_eq!(request, PathBuf::from("beam.json"));
                assert!(json);
                assert_eq!(points, Some(500));
                assert!(output.is_none());
            }
            Command::Demo { .. } => panic!("expected analyze"),
        }
    }
}
