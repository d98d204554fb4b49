//! # Stage Observers
//!
//! The design pipeline keeps no global diagnostics state. Callers that want
//! to watch intermediate values pass an observer; after every stage the
//! pipeline hands it the stage's named values. Passing no observer yields the
//! same [`DesignResult`](crate::calculations::DesignResult).
//!
//! ## Example
//!
//! ```rust
//! use trafo_core::calculations::design::{calculate_observed, DesignInput, SecondaryInput};
//! use trafo_core::materials::{CoreMaterial, CoreShape};
//! use trafo_core::observer::{Stage, StageTrace};
//! use trafo_core::calculations::design::PhaseConfig;
//!
//! let input = DesignInput {
//!     label: "T-1".to_string(),
//!     phase: PhaseConfig::SinglePhase,
//!     input_voltage_v: 230.0,
//!     frequency_hz: 50.0,
//!     secondaries: vec![SecondaryInput { voltage_v: 24.0, current_a: 5.0 }],
//!     flux_density_t: 1.4,
//!     current_density_a_mm2: 3.0,
//!     core_shape: CoreShape::EI,
//!     core_material: CoreMaterial::M19,
//!     efficiency: 0.9,
//!     fill_factor: 0.4,
//!     ambient_temp_c: 25.0,
//! };
//!
//! let mut trace = StageTrace::new();
//! calculate_observed(&input, Some(&mut trace)).unwrap();
//! assert!(trace.value(Stage::WindingDesign, "turns_per_volt").is_some());
//! ```

use serde::{Deserialize, Serialize};

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Power,
    CoreSizing,
    WindingDesign,
    WindowFill,
    Protection,
    LossAndThermal,
    Regulation,
    Construction,
}

impl Stage {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Power => "Power",
            Stage::CoreSizing => "Core sizing",
            Stage::WindingDesign => "Winding design",
            Stage::WindowFill => "Window fill",
            Stage::Protection => "Protection",
            Stage::LossAndThermal => "Loss and thermal",
            Stage::Regulation => "Regulation",
            Stage::Construction => "Construction",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One named intermediate value reported by a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageValue {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

impl StageValue {
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
        }
    }
}

/// Receives each stage's intermediate values.
///
/// Implementations must not influence the design; they only watch.
pub trait DesignObserver {
    fn on_stage(&mut self, stage: Stage, values: &[StageValue]);
}

/// Everything one stage reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    pub stage: Stage,
    pub values: Vec<StageValue>,
}

/// Observer that keeps every stage event in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageTrace {
    records: Vec<StageRecord>,
}

impl StageTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, in the order the stages ran
    pub fn records(&self) -> &[StageRecord] {
        &self.records
    }

    /// Stages in the order they were reported
    pub fn stages(&self) -> Vec<Stage> {
        self.records.iter().map(|r| r.stage).collect()
    }

    /// Look up a single value by stage and name
    pub fn value(&self, stage: Stage, name: &str) -> Option<f64> {
        self.records
            .iter()
            .filter(|r| r.stage == stage)
            .flat_map(|r| r.values.iter())
            .find(|v| v.name == name)
            .map(|v| v.value)
    }

    /// Plain-text dump, one value per line
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&format!("[{}]\n", record.stage));
            for v in &record.values {
                out.push_str(&format!("  {:<32} {:>14.6} {}\n", v.name, v.value, v.unit));
            }
        }
        out
    }
}

impl DesignObserver for StageTrace {
    fn on_stage(&mut self, stage: Stage, values: &[StageValue]) {
        self.records.push(StageRecord {
            stage,
            values: values.to_vec(),
        });
    }
}

/// Observer that forwards stage values as `tracing` debug events.
///
/// Nothing is emitted unless the host installs a subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DesignObserver for TracingObserver {
    fn on_stage(&mut self, stage: Stage, values: &[StageValue]) {
        let span = tracing::debug_span!("design_stage", stage = stage.display_name());
        let _guard = span.enter();
        for v in values {
            tracing::debug!(name = %v.name, value = v.value, unit = %v.unit, "stage value");
        }
    }
}
