//! # Design Calculations
//!
//! The transformer design pipeline, one module per stage. Each stage follows
//! the same pattern:
//!
//! - a JSON-serializable output struct (`PowerSummary`, `CoreGeometry`, ...)
//! - `calculate(...)` - a pure function of the input and earlier stage outputs
//! - a crate-private `stage_values()` that names the intermediate values for
//!   observers
//!
//! Only [`design::calculate`] validates input; the stage functions assume a
//! validated [`DesignInput`].
//!
//! ## Stages
//!
//! - [`power`] - apparent power, loss budget, primary current
//! - [`core_sizing`] - area product and core dimensions
//! - [`winding`] - turns, wire gauge, resistance
//! - [`window_fill`] - copper vs window verdict
//! - [`protection`] - fuse/breaker ratings
//! - [`thermal`] - losses, efficiency, temperature rise
//! - [`regulation`] - secondary voltage regulation
//! - [`construction`] - layers and interlayer insulation

pub mod construction;
pub mod core_sizing;
pub mod design;
pub mod power;
pub mod protection;
pub mod regulation;
pub mod thermal;
pub mod window_fill;
pub mod winding;

// Re-export commonly used types
pub use construction::{Construction, InterlayerInsulation, WindingLayers};
pub use core_sizing::CoreGeometry;
pub use design::{
    calculate, calculate_observed, DesignInput, DesignResult, PhaseConfig, SecondaryInput,
};
pub use power::PowerSummary;
pub use protection::ProtectionRating;
pub use regulation::Regulation;
pub use thermal::{InsulationClass, ThermalResult, ThermalVerdict, VentilationClass, WindingLoss};
pub use window_fill::{FillVerdict, WindowFill};
pub use winding::{InfeasibilityIssue, WindingDesign, WindingRole, WindingSpec};
