//! # Transformer Design Pipeline
//!
//! Entry point that turns a [`DesignInput`] into a complete [`DesignResult`].
//!
//! ## Stage Order
//!
//! Power -> core sizing -> winding design -> window fill and protection ->
//! loss and thermal -> regulation -> construction. Every stage is a pure
//! function of the input and the stages before it.
//!
//! ## Failure Classes
//!
//! - Invalid input is rejected by [`DesignInput::validate`] before any stage
//!   runs.
//! - A winding outside the practical turns band makes the run return
//!   [`CalcError::DesignInfeasible`], which still carries the full result.
//! - An overfull window or elevated temperature is only a verdict in the
//!   result, plus a line in [`DesignResult::notes`].
//!
//! ## Example
//!
//! ```rust
//! use trafo_core::calculations::design::{calculate, DesignInput};
//!
//! let json = r#"{
//!     "label": "T-1",
//!     "phase": "single-phase",
//!     "input_voltage_v": 220.0,
//!     "frequency_hz": 50.0,
//!     "secondaries": [{ "voltage_v": 110.0, "current_a": 30.0 }],
//!     "flux_density_t": 1.5,
//!     "current_density_a_mm2": 3.5,
//!     "core_shape": "E-I",
//!     "core_material": "M19",
//!     "efficiency": 0.95,
//!     "fill_factor": 0.4,
//!     "ambient_temp_c": 25.0
//! }"#;
//!
//! let input = DesignInput::from_json(json).unwrap();
//! let result = calculate(&input).unwrap();
//! assert!(result.geometry.core_area_cm2 > 30.0);
//! assert!(result.thermal.efficiency_percent < 100.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::construction::{self, Construction};
use crate::calculations::core_sizing::{self, CoreGeometry};
use crate::calculations::power::{self, PowerSummary};
use crate::calculations::protection::{self, ProtectionRating};
use crate::calculations::regulation::{self, Regulation};
use crate::calculations::thermal::{self, ThermalResult, ThermalVerdict};
use crate::calculations::window_fill::{self, FillVerdict, WindowFill};
use crate::calculations::winding::{self, WindingSpec};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{CoreMaterial, CoreShape};
use crate::observer::{DesignObserver, Stage, StageValue};

/// Most secondaries a single design may carry
pub const MAX_SECONDARIES: usize = 2;

/// How the primary is fed.
///
/// The input voltage is always the voltage across the primary winding. A
/// three-phase-plus-neutral feed splits the primary into two identical
/// sub-windings in parallel, each carrying half the current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseConfig {
    SinglePhase,
    ThreePhase,
    ThreePhaseNeutral,
}

impl PhaseConfig {
    pub const ALL: [PhaseConfig; 3] = [
        PhaseConfig::SinglePhase,
        PhaseConfig::ThreePhase,
        PhaseConfig::ThreePhaseNeutral,
    ];

    /// Number of parallel primary sub-windings
    pub fn primary_sub_windings(&self) -> u32 {
        match self {
            PhaseConfig::SinglePhase | PhaseConfig::ThreePhase => 1,
            PhaseConfig::ThreePhaseNeutral => 2,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_uppercase().replace([' ', '_', '-', '+'], "").as_str() {
            "SINGLEPHASE" | "SINGLE" | "1P" | "1PH" | "MONO" => Ok(PhaseConfig::SinglePhase),
            "THREEPHASE" | "THREE" | "3P" | "3PH" => Ok(PhaseConfig::ThreePhase),
            "THREEPHASENEUTRAL" | "THREEPHASEWITHNEUTRAL" | "3PN" | "3PHN" => {
                Ok(PhaseConfig::ThreePhaseNeutral)
            }
            _ => Err(CalcError::invalid_input(
                "phase",
                s,
                "Unknown phase configuration (expected single-phase, three-phase or three-phase-neutral)",
            )),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PhaseConfig::SinglePhase => "Single-phase",
            PhaseConfig::ThreePhase => "Three-phase",
            PhaseConfig::ThreePhaseNeutral => "Three-phase + neutral",
        }
    }
}

impl std::fmt::Display for PhaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One secondary output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryInput {
    /// Rated output voltage (V RMS)
    pub voltage_v: f64,
    /// Rated output current (A RMS)
    pub current_a: f64,
}

/// Everything the pipeline needs. Immutable once supplied.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "T-1",
///   "phase": "single-phase",
///   "input_voltage_v": 220.0,
///   "frequency_hz": 50.0,
///   "secondaries": [{ "voltage_v": 110.0, "current_a": 30.0 }],
///   "flux_density_t": 1.5,
///   "current_density_a_mm2": 3.5,
///   "core_shape": "E-I",
///   "core_material": "M19",
///   "efficiency": 0.95,
///   "fill_factor": 0.4,
///   "ambient_temp_c": 25.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignInput {
    /// User label (e.g., "T-1", "Control transformer")
    #[serde(default)]
    pub label: String,

    pub phase: PhaseConfig,

    /// Voltage across the primary (V RMS)
    pub input_voltage_v: f64,

    /// Supply frequency (Hz)
    pub frequency_hz: f64,

    /// One or two secondaries
    pub secondaries: Vec<SecondaryInput>,

    /// Peak operating flux density (T)
    pub flux_density_t: f64,

    /// Conductor current density (A/mm²)
    pub current_density_a_mm2: f64,

    pub core_shape: CoreShape,

    pub core_material: CoreMaterial,

    /// Target efficiency, 0 < η ≤ 1
    pub efficiency: f64,

    /// Target window fill factor Ku, 0 < Ku ≤ 1
    pub fill_factor: f64,

    /// Ambient temperature (°C)
    pub ambient_temp_c: f64,
}

impl DesignInput {
    /// Parse from JSON, accepting loose spellings of the enumerated fields
    /// ("EI", "toroid", "3PN", "grain oriented", ...).
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(fields) = value.as_object_mut() {
            normalize_field(fields, "phase", PhaseConfig::from_str_flexible)?;
            normalize_field(fields, "core_shape", CoreShape::from_str_flexible)?;
            normalize_field(fields, "core_material", CoreMaterial::from_str_flexible)?;
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Validate every precondition.
    ///
    /// Returns the first violation, naming the offending field.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("input_voltage_v", self.input_voltage_v, "Input voltage")?;
        require_positive("frequency_hz", self.frequency_hz, "Frequency")?;
        require_positive("flux_density_t", self.flux_density_t, "Flux density")?;
        require_positive(
            "current_density_a_mm2",
            self.current_density_a_mm2,
            "Current density",
        )?;
        require_fraction("efficiency", self.efficiency, "Efficiency")?;
        require_fraction("fill_factor", self.fill_factor, "Fill factor")?;

        if !self.ambient_temp_c.is_finite() {
            return Err(CalcError::invalid_input(
                "ambient_temp_c",
                self.ambient_temp_c.to_string(),
                "Ambient temperature must be a finite number",
            ));
        }

        if self.secondaries.is_empty() || self.secondaries.len() > MAX_SECONDARIES {
            return Err(CalcError::invalid_input(
                "secondaries",
                self.secondaries.len().to_string(),
                "A design needs one or two secondaries",
            ));
        }
        for (i, secondary) in self.secondaries.iter().enumerate() {
            require_positive(
                &format!("secondaries[{}].voltage_v", i),
                secondary.voltage_v,
                "Secondary voltage",
            )?;
            require_positive(
                &format!("secondaries[{}].current_a", i),
                secondary.current_a,
                "Secondary current",
            )?;
        }
        Ok(())
    }
}

fn normalize_field<T: Serialize>(
    fields: &mut serde_json::Map<String, serde_json::Value>,
    name: &str,
    parse: fn(&str) -> CalcResult<T>,
) -> CalcResult<()> {
    let parsed = match fields.get(name) {
        Some(serde_json::Value::String(raw)) => parse(raw)?,
        Some(other) => {
            return Err(CalcError::invalid_input(
                name,
                other.to_string(),
                "Expected a name string",
            ))
        }
        None => return Ok(()),
    };
    fields.insert(name.to_string(), serde_json::to_value(parsed)?);
    Ok(())
}

fn require_positive(field: &str, value: f64, what: &str) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("{} must be a positive number", what),
        ));
    }
    Ok(())
}

fn require_fraction(field: &str, value: f64, what: &str) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("{} must be greater than 0 and at most 1", what),
        ));
    }
    Ok(())
}

/// Complete numeric design. Produced fresh by every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    /// The input this result was computed from
    pub input: DesignInput,
    pub power: PowerSummary,
    pub geometry: CoreGeometry,
    /// Turns per volt N/V
    pub turns_per_volt: f64,
    /// Primary first, then secondaries in input order
    pub windings: Vec<WindingSpec>,
    pub window_fill: WindowFill,
    /// One per winding, same order as `windings`
    pub protection: Vec<ProtectionRating>,
    pub thermal: ThermalResult,
    /// One per secondary
    pub regulation: Vec<Regulation>,
    pub construction: Construction,
    /// Advisory findings (saturation, fill, temperature)
    pub notes: Vec<String>,
}

impl DesignResult {
    /// Primary winding (always present)
    pub fn primary(&self) -> Option<&WindingSpec> {
        self.windings.first()
    }

    /// Secondary windings in input order
    pub fn secondaries(&self) -> &[WindingSpec] {
        self.windings.get(1..).unwrap_or(&[])
    }

    /// True when neither the window nor the temperature verdict needs attention
    pub fn passes(&self) -> bool {
        self.window_fill.verdict != FillVerdict::Insufficient
            && self.thermal.verdict == ThermalVerdict::Normal
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run the full pipeline.
pub fn calculate(input: &DesignInput) -> CalcResult<DesignResult> {
    calculate_observed(input, None)
}

/// Run the full pipeline, reporting every stage's intermediate values to
/// `observer`. The result does not depend on whether an observer is given.
pub fn calculate_observed(
    input: &DesignInput,
    mut observer: Option<&mut dyn DesignObserver>,
) -> CalcResult<DesignResult> {
    input.validate()?;

    let power = power::calculate(input);
    notify(&mut observer, Stage::Power, || power.stage_values());

    let geometry = core_sizing::calculate(power.input_va, input);
    notify(&mut observer, Stage::CoreSizing, || geometry.stage_values());

    let winding_design = winding::calculate(&geometry, &power, input);
    notify(&mut observer, Stage::WindingDesign, || winding_design.stage_values());
    let windings = winding_design.windings;

    let window_fill = window_fill::calculate(&windings, &geometry, input.fill_factor);
    notify(&mut observer, Stage::WindowFill, || window_fill.stage_values());

    let protection = protection::calculate(&windings);
    notify(&mut observer, Stage::Protection, || protection::stage_values(&protection));

    let thermal = thermal::calculate(&windings, &geometry, &power, input);
    notify(&mut observer, Stage::LossAndThermal, || thermal.stage_values());

    let regulation = regulation::calculate(&windings, &thermal);
    notify(&mut observer, Stage::Regulation, || regulation::stage_values(&regulation));

    let construction = construction::calculate(&windings, &geometry, &thermal);
    notify(&mut observer, Stage::Construction, || construction.stage_values());

    let notes = advisory_notes(input, &window_fill, &thermal);

    let result = DesignResult {
        input: input.clone(),
        power,
        geometry,
        turns_per_volt: winding_design.turns_per_volt,
        windings,
        window_fill,
        protection,
        thermal,
        regulation,
        construction,
        notes,
    };

    if winding_design.issues.is_empty() {
        Ok(result)
    } else {
        Err(CalcError::design_infeasible(winding_design.issues, result))
    }
}

fn notify(
    observer: &mut Option<&mut dyn DesignObserver>,
    stage: Stage,
    values: impl FnOnce() -> Vec<StageValue>,
) {
    if let Some(observer) = observer.as_deref_mut() {
        observer.on_stage(stage, &values());
    }
}

fn advisory_notes(input: &DesignInput, fill: &WindowFill, thermal: &ThermalResult) -> Vec<String> {
    let mut notes = Vec::new();

    let saturation = input.core_material.properties().saturation_flux_t;
    if input.flux_density_t > saturation {
        notes.push(format!(
            "Flux density {:.2} T exceeds the {:.2} T saturation of {}",
            input.flux_density_t,
            saturation,
            input.core_material.display_name()
        ));
    }

    match fill.verdict {
        FillVerdict::Insufficient => notes.push(format!(
            "Window fill {:.1}% is well above the {:.0}% target; the windings may not fit",
            fill.fill_percent, fill.target_percent
        )),
        FillVerdict::Marginal => notes.push(format!(
            "Window fill {:.1}% is above the {:.0}% target; winding will be tight",
            fill.fill_percent, fill.target_percent
        )),
        FillVerdict::Oversized | FillVerdict::Adequate => {}
    }

    if thermal.rise_capped {
        notes.push(format!(
            "Temperature rise exceeds {:.0} °C and is reported capped",
            thermal::MAX_TEMPERATURE_RISE_C
        ));
    }
    if thermal.verdict == ThermalVerdict::Elevated {
        notes.push(format!(
            "Operating temperature {:.1} °C is elevated; consider {}",
            thermal.operating_temp_c,
            thermal.ventilation.display_name().to_lowercase()
        ));
    }

    notes
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::observer::StageTrace;

    /// 220 V / 50 Hz to 110 V at 30 A on an M19 E-I core
    pub(crate) fn example_input() -> DesignInput {
        DesignInput {
            label: "T-220/110".to_string(),
            phase: PhaseConfig::SinglePhase,
            input_voltage_v: 220.0,
            frequency_hz: 50.0,
            secondaries: vec![SecondaryInput {
                voltage_v: 110.0,
                current_a: 30.0,
            }],
            flux_density_t: 1.5,
            current_density_a_mm2: 3.5,
            core_shape: CoreShape::EI,
            core_material: CoreMaterial::M19,
            efficiency: 0.95,
            fill_factor: 0.40,
            ambient_temp_c: 25.0,
        }
    }

    fn field_of(err: CalcError) -> String {
        match err {
            CalcError::InvalidInput { field, .. } => field,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_example_input_is_valid() {
        assert!(example_input().validate().is_ok());
    }

    #[test]
    fn test_validation_names_field() {
        let mut input = example_input();
        input.frequency_hz = 0.0;
        assert_eq!(field_of(input.validate().unwrap_err()), "frequency_hz");

        let mut input = example_input();
        input.efficiency = 1.2;
        assert_eq!(field_of(input.validate().unwrap_err()), "efficiency");

        let mut input = example_input();
        input.fill_factor = 0.0;
        assert_eq!(field_of(input.validate().unwrap_err()), "fill_factor");

        let mut input = example_input();
        input.flux_density_t = f64::NAN;
        assert_eq!(field_of(input.validate().unwrap_err()), "flux_density_t");

        let mut input = example_input();
        input.secondaries.push(SecondaryInput {
            voltage_v: 12.0,
            current_a: -1.0,
        });
        assert_eq!(
            field_of(input.validate().unwrap_err()),
            "secondaries[1].current_a"
        );
    }

    #[test]
    fn test_secondary_count() {
        let mut input = example_input();
        input.secondaries.clear();
        assert_eq!(field_of(input.validate().unwrap_err()), "secondaries");

        let mut input = example_input();
        input.secondaries = vec![input.secondaries[0].clone(); 3];
        assert_eq!(field_of(input.validate().unwrap_err()), "secondaries");
    }

    #[test]
    fn test_unity_efficiency_is_allowed() {
        let mut input = example_input();
        input.efficiency = 1.0;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_from_json_flexible_enums() {
        let json = r#"{
            "phase": "3PN",
            "input_voltage_v": 400.0,
            "frequency_hz": 50.0,
            "secondaries": [{ "voltage_v": 24.0, "current_a": 10.0 }],
            "flux_density_t": 1.6,
            "current_density_a_mm2": 3.0,
            "core_shape": "toroid",
            "core_material": "grain oriented",
            "efficiency": 0.96,
            "fill_factor": 0.35,
            "ambient_temp_c": 30.0
        }"#;
        let input = DesignInput::from_json(json).unwrap();
        assert_eq!(input.phase, PhaseConfig::ThreePhaseNeutral);
        assert_eq!(input.core_shape, CoreShape::Toroidal);
        assert_eq!(input.core_material, CoreMaterial::GrainOriented);
        assert_eq!(input.label, "");
    }

    #[test]
    fn test_from_json_unknown_enum_names_field() {
        let json = r#"{
            "phase": "single-phase",
            "input_voltage_v": 220.0,
            "frequency_hz": 50.0,
            "secondaries": [{ "voltage_v": 110.0, "current_a": 1.0 }],
            "flux_density_t": 1.5,
            "current_density_a_mm2": 3.5,
            "core_shape": "pot core",
            "core_material": "M19",
            "efficiency": 0.9,
            "fill_factor": 0.4,
            "ambient_temp_c": 25.0
        }"#;
        let err = DesignInput::from_json(json).unwrap_err();
        assert_eq!(field_of(err), "core_shape");
    }

    #[test]
    fn test_from_json_non_string_enum_names_field() {
        for (field, raw) in [("phase", "3"), ("core_shape", "null"), ("core_material", r#"{"x":1}"#)] {
            let mut value = serde_json::to_value(example_input()).unwrap();
            value[field] = serde_json::from_str(raw).unwrap();
            let err = DesignInput::from_json(&value.to_string()).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
            assert_eq!(field_of(err), field);
        }
    }

    #[test]
    fn test_from_json_malformed() {
        let err = DesignInput::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_input_json_round_trip() {
        let input = example_input();
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"single-phase\""));
        assert!(json.contains("\"E-I\""));
        assert_eq!(DesignInput::from_json(&json).unwrap(), input);
    }

    #[test]
    fn test_phase_parsing() {
        for phase in PhaseConfig::ALL {
            let json = serde_json::to_value(phase).unwrap();
            let text = json.as_str().unwrap();
            assert_eq!(PhaseConfig::from_str_flexible(text).unwrap(), phase);
        }
        assert!(PhaseConfig::from_str_flexible("two-phase").is_err());
    }

    #[test]
    fn test_example_design_passes() {
        let result = calculate(&example_input()).unwrap();
        assert_eq!(result.windings.len(), 2);
        assert_eq!(result.protection.len(), 2);
        assert_eq!(result.regulation.len(), 1);
        assert_eq!(result.secondaries().len(), 1);
        assert!(result.passes());
        assert!(result.notes.is_empty(), "{:?}", result.notes);
    }

    #[test]
    fn test_observer_sees_every_stage_in_order() {
        let mut trace = StageTrace::new();
        calculate_observed(&example_input(), Some(&mut trace)).unwrap();
        assert_eq!(
            trace.stages(),
            vec![
                Stage::Power,
                Stage::CoreSizing,
                Stage::WindingDesign,
                Stage::WindowFill,
                Stage::Protection,
                Stage::LossAndThermal,
                Stage::Regulation,
                Stage::Construction,
            ]
        );
    }

    #[test]
    fn test_invalid_input_runs_no_stage() {
        let mut input = example_input();
        input.input_voltage_v = -1.0;
        let mut trace = StageTrace::new();
        let err = calculate_observed(&input, Some(&mut trace)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(trace.records().is_empty());
    }

    #[test]
    fn test_saturation_note() {
        let mut input = example_input();
        input.flux_density_t = 2.2;
        let result = calculate(&input).unwrap();
        assert!(result.notes.iter().any(|n| n.contains("saturation")));
    }
}
