//! # trafo_core - Power Transformer Design Engine
//!
//! `trafo_core` turns a handful of electrical requirements (input voltage and
//! frequency, one or two secondaries, efficiency target, core shape and
//! material, flux and current density, fill factor, ambient temperature) into
//! a complete physical transformer design: core dimensions, turns and wire
//! gauge for every winding, protection ratings, losses, temperature rise and
//! regulation. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every stage is a pure function; identical input gives a
//!   bit-identical result
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Observable**: pass a [`DesignObserver`] to watch intermediate values;
//!   there is no global logging state
//!
//! ## Quick Start
//!
//! ```rust
//! use trafo_core::calculations::{calculate, DesignInput, PhaseConfig, SecondaryInput};
//! use trafo_core::materials::{CoreMaterial, CoreShape};
//! use trafo_core::report::DesignReport;
//!
//! let input = DesignInput {
//!     label: "T-1".to_string(),
//!     phase: PhaseConfig::SinglePhase,
//!     input_voltage_v: 220.0,
//!     frequency_hz: 50.0,
//!     secondaries: vec![SecondaryInput { voltage_v: 110.0, current_a: 30.0 }],
//!     flux_density_t: 1.5,
//!     current_density_a_mm2: 3.5,
//!     core_shape: CoreShape::EI,
//!     core_material: CoreMaterial::M19,
//!     efficiency: 0.95,
//!     fill_factor: 0.40,
//!     ambient_temp_c: 25.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! let report = DesignReport::assemble(&result, None);
//! println!("{}", report.to_text());
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The design pipeline, one module per stage
//! - [`materials`] - Wire gauge table, core shapes, core materials
//! - [`equations`] - Closed-form formulas and their registry
//! - [`observer`] - Stage observers for diagnostics
//! - [`report`] - Human-readable report assembly
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod generated;
pub mod materials;
pub mod observer;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, calculate_observed, DesignInput, DesignResult};
pub use errors::{CalcError, CalcResult};
pub use observer::{DesignObserver, Stage, StageTrace, StageValue, TracingObserver};
pub use report::{DesignReport, ReportHeader};
