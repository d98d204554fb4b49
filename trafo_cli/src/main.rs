//! # Trafo CLI Application
//!
//! Terminal front end for the transformer design engine.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive: prompts for the main ratings, defaults in brackets
//! trafo
//!
//! # From a JSON DesignInput
//! trafo --input t1.json --engineer "J. Engineer" --job 25-001 --client Acme
//!
//! # Machine-readable result, with per-stage trace
//! trafo --input t1.json --json --trace
//! ```

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use trafo_core::calculations::{
    calculate_observed, DesignInput, DesignResult, FillVerdict, PhaseConfig, SecondaryInput,
    ThermalVerdict,
};
use trafo_core::materials::{CoreMaterial, CoreShape};
use trafo_core::{CalcError, DesignObserver, DesignReport, ReportHeader, StageTrace};

/// Power transformer design calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding a DesignInput; prompts interactively when omitted
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print the DesignResult as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Print every stage's intermediate values
    #[arg(long)]
    trace: bool,

    /// Append the equations reference to the report
    #[arg(long)]
    equations: bool,

    /// Markdown output instead of plain text
    #[arg(long, conflicts_with = "json")]
    markdown: bool,

    /// Engineer named in the report header
    #[arg(long)]
    engineer: Option<String>,

    /// Job number for the report header
    #[arg(long)]
    job: Option<String>,

    /// Client for the report header
    #[arg(long)]
    client: Option<String>,
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_input() -> DesignInput {
    println!("Trafo CLI - Transformer Design Calculator");
    println!("=========================================");
    println!();

    let input_voltage_v = prompt_f64("Primary voltage (V) [220.0]: ", 220.0);
    let frequency_hz = prompt_f64("Frequency (Hz) [50.0]: ", 50.0);
    let voltage_v = prompt_f64("Secondary voltage (V) [110.0]: ", 110.0);
    let current_a = prompt_f64("Secondary current (A) [30.0]: ", 30.0);
    let flux_density_t = prompt_f64("Flux density (T) [1.5]: ", 1.5);
    let current_density_a_mm2 = prompt_f64("Current density (A/mm²) [3.5]: ", 3.5);
    println!();

    DesignInput {
        label: "CLI".to_string(),
        phase: PhaseConfig::SinglePhase,
        input_voltage_v,
        frequency_hz,
        secondaries: vec![SecondaryInput { voltage_v, current_a }],
        flux_density_t,
        current_density_a_mm2,
        core_shape: CoreShape::EI,
        core_material: CoreMaterial::M19,
        efficiency: 0.95,
        fill_factor: 0.40,
        ambient_temp_c: 25.0,
    }
}

fn load_input(path: &Path) -> Result<DesignInput, CalcError> {
    let text = fs::read_to_string(path).map_err(|e| {
        CalcError::invalid_input("input", path.display().to_string(), e.to_string())
    })?;
    DesignInput::from_json(&text)
}

fn header_from(args: &Args) -> Option<ReportHeader> {
    if args.engineer.is_none() && args.job.is_none() && args.client.is_none() {
        return None;
    }
    Some(ReportHeader::new(
        args.engineer.clone().unwrap_or_default(),
        args.job.clone().unwrap_or_default(),
        args.client.clone().unwrap_or_default(),
    ))
}

fn print_result(args: &Args, result: &DesignResult) {
    if args.json {
        match result.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e),
        }
        return;
    }

    let mut report = DesignReport::assemble(result, header_from(args));
    if args.equations {
        report = report.with_equations();
    }
    if args.markdown {
        println!("{}", report.to_markdown());
    } else {
        println!("{}", report.to_text());
        println!(
            "Window fill: {} {}",
            result.window_fill.verdict,
            status_icon(result.window_fill.verdict != FillVerdict::Insufficient)
        );
        println!(
            "Thermal:     {} {}",
            result.thermal.verdict,
            status_icon(result.thermal.verdict == ThermalVerdict::Normal)
        );
    }
}

fn print_error(error: &CalcError) {
    eprintln!("Error: {}", error);
    if let Ok(json) = serde_json::to_string_pretty(error) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let input = match &args.input {
        Some(path) => match load_input(path) {
            Ok(input) => input,
            Err(e) => {
                print_error(&e);
                return ExitCode::FAILURE;
            }
        },
        None => prompt_input(),
    };

    let mut trace = StageTrace::new();
    let observer: Option<&mut dyn DesignObserver> = if args.trace { Some(&mut trace) } else { None };
    let outcome = calculate_observed(&input, observer);

    if args.trace {
        eprintln!("{}", trace.to_text());
    }

    match outcome {
        Ok(result) => {
            print_result(&args, &result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Infeasible designs still print their numbers for diagnosis.
            if let Some(result) = e.partial_result() {
                print_result(&args, result);
            }
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[REVIEW]" }
}
