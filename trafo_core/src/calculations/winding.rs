//! # Winding Design Stage
//!
//! Turns, conductors and DC resistance for the primary and each secondary.
//!
//! ## Procedure
//!
//! 1. Turns per volt from Faraday's law, Ae converted cm² -> m²
//! 2. Primary turns = ⌈V·N/V⌉. A three-phase-plus-neutral supply splits the
//!    primary into two identical sub-windings that share the line current.
//! 3. Secondary turns = ⌈V·N/V·1.03⌉; the 3% covers resistive drop at load
//! 4. Conductor: smallest AWG with area ≥ I/J (see [`select_for_area`])
//! 5. Mean turn length = π × diagonal of the leg-width by window-height
//!    envelope padded by [`WINDING_CLEARANCE_CM`]; R20 = ρ·N·MTL/A
//!
//! Turns outside [`MIN_PRACTICAL_TURNS`]..=[`MAX_PRACTICAL_TURNS`] are reported
//! as [`InfeasibilityIssue`]s. They are never clamped.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::calculations::core_sizing::CoreGeometry;
use crate::calculations::design::DesignInput;
use crate::calculations::power::PowerSummary;
use crate::equations::electrical::dc_resistance_ohm;
use crate::equations::magnetics::turns_per_volt;
use crate::materials::wire_gauge::{select_for_area, WireSelection};
use crate::observer::StageValue;
use crate::units::{Cm, Meters, SqCm, SqMm};

/// Secondary turns allowance for resistive drop at rated load (+3%)
pub const SECONDARY_TURNS_COMPENSATION: f64 = 1.03;

/// Fewer turns than this cannot be wound with a usable voltage resolution
pub const MIN_PRACTICAL_TURNS: u32 = 2;

/// More turns than this are impractical on any core the pipeline sizes
pub const MAX_PRACTICAL_TURNS: u32 = 10_000;

/// Padding between the core leg and the mean turn (bobbin plus half the build)
pub const WINDING_CLEARANCE_CM: f64 = 1.0;

/// Which winding a [`WindingSpec`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", content = "index")]
pub enum WindingRole {
    Primary,
    /// Secondary number, starting at 1
    Secondary(u8),
}

impl WindingRole {
    /// Get display name
    pub fn display_name(&self) -> String {
        match self {
            WindingRole::Primary => "Primary".to_string(),
            WindingRole::Secondary(n) => format!("Secondary {}", n),
        }
    }

    /// Short key used for stage-value names, e.g. "secondary_1"
    pub fn key(&self) -> String {
        match self {
            WindingRole::Primary => "primary".to_string(),
            WindingRole::Secondary(n) => format!("secondary_{}", n),
        }
    }
}

impl std::fmt::Display for WindingRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Complete description of one winding.
///
/// For a split primary, `current_a`, `turns` and `resistance_20c_ohm` describe
/// one sub-winding; `copper_area_mm2` covers all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindingSpec {
    pub role: WindingRole,
    /// Rated voltage (V)
    pub voltage_v: f64,
    /// Rated current per sub-winding (A)
    pub current_a: f64,
    /// Identical sub-windings sharing the current (1 or 2)
    pub sub_windings: u32,
    /// Turns per sub-winding
    pub turns: u32,
    /// Selected conductor
    pub wire: WireSelection,
    /// Cross-section the current requires at the target density (mm²)
    pub required_area_mm2: f64,
    /// Mean length of one turn (cm)
    pub mean_turn_length_cm: f64,
    /// Conductor length of one sub-winding (m)
    pub length_m: f64,
    /// DC resistance of one sub-winding at 20 °C (Ω)
    pub resistance_20c_ohm: f64,
    /// Copper occupying the window, all sub-windings (mm²)
    pub copper_area_mm2: f64,
}

impl WindingSpec {
    /// Current drawn from the line by all sub-windings together (A)
    pub fn line_current_a(&self) -> f64 {
        self.current_a * f64::from(self.sub_windings)
    }

    /// Copper cross-section of one turn (mm²)
    pub fn conductor_area_mm2(&self) -> f64 {
        self.wire.total_area_mm2()
    }
}

/// A winding whose turns fall outside the buildable band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfeasibilityIssue {
    pub role: WindingRole,
    pub turns: u32,
    pub min_turns: u32,
    pub max_turns: u32,
    pub reason: String,
}

impl std::fmt::Display for InfeasibilityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} has {} turns ({}; practical range {}-{})",
            self.role, self.turns, self.reason, self.min_turns, self.max_turns
        )
    }
}

/// Output of the winding stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindingDesign {
    /// Turns per volt N/V
    pub turns_per_volt: f64,
    /// Primary first, then secondaries in input order
    pub windings: Vec<WindingSpec>,
    /// Windings outside the practical turns band
    pub issues: Vec<InfeasibilityIssue>,
}

impl WindingDesign {
    pub(crate) fn stage_values(&self) -> Vec<StageValue> {
        let mut values = vec![StageValue::new("turns_per_volt", self.turns_per_volt, "1/V")];
        for w in &self.windings {
            let key = w.role.key();
            values.push(StageValue::new(format!("{}.turns", key), f64::from(w.turns), "turns"));
            values.push(StageValue::new(format!("{}.current_a", key), w.current_a, "A"));
            values.push(StageValue::new(format!("{}.awg", key), f64::from(w.wire.gauge.awg), "AWG"));
            values.push(StageValue::new(format!("{}.strands", key), f64::from(w.wire.strands), ""));
            values.push(StageValue::new(format!("{}.mtl_cm", key), w.mean_turn_length_cm, "cm"));
            values.push(StageValue::new(format!("{}.r20_ohm", key), w.resistance_20c_ohm, "Ω"));
        }
        values
    }
}

/// Mean turn length around a leg of width `core_width_cm` inside a window of
/// height `window_height_cm`
///
/// π times the diagonal of the external envelope (leg width by window height)
/// padded by the winding clearance on every side.
pub fn mean_turn_length_cm(core_width_cm: f64, window_height_cm: f64) -> f64 {
    let width = core_width_cm + 2.0 * WINDING_CLEARANCE_CM;
    let height = window_height_cm + 2.0 * WINDING_CLEARANCE_CM;
    PI * width.hypot(height)
}

/// Design every winding on the sized core.
pub fn calculate(geometry: &CoreGeometry, power: &PowerSummary, input: &DesignInput) -> WindingDesign {
    let tpv = turns_per_volt(
        input.frequency_hz,
        input.flux_density_t,
        SqCm(geometry.core_area_cm2),
    );
    let mtl = mean_turn_length_cm(geometry.core_width_cm, geometry.window_height_cm);

    let sub_windings = input.phase.primary_sub_windings();
    let primary_turns = ceil_turns(input.input_voltage_v * tpv);
    let mut windings = vec![wind(
        WindingRole::Primary,
        input.input_voltage_v,
        power.primary_current_a / f64::from(sub_windings),
        sub_windings,
        primary_turns,
        mtl,
        input.current_density_a_mm2,
    )];

    for (i, secondary) in input.secondaries.iter().enumerate() {
        let turns = ceil_turns(secondary.voltage_v * tpv * SECONDARY_TURNS_COMPENSATION);
        windings.push(wind(
            WindingRole::Secondary(i as u8 + 1),
            secondary.voltage_v,
            secondary.current_a,
            1,
            turns,
            mtl,
            input.current_density_a_mm2,
        ));
    }

    let issues = windings.iter().filter_map(check_turns).collect();

    WindingDesign {
        turns_per_volt: tpv,
        windings,
        issues,
    }
}

fn ceil_turns(exact: f64) -> u32 {
    // `as` saturates, so absurd inputs surface as u32::MAX rather than wrapping.
    exact.ceil() as u32
}

fn wind(
    role: WindingRole,
    voltage_v: f64,
    current_a: f64,
    sub_windings: u32,
    turns: u32,
    mean_turn_length_cm: f64,
    current_density_a_mm2: f64,
) -> WindingSpec {
    let required = SqMm(current_a / current_density_a_mm2);
    let wire = select_for_area(required);

    let length: Meters = Cm(mean_turn_length_cm * f64::from(turns)).into();
    let resistance_20c_ohm = dc_resistance_ohm(length, SqMm(wire.total_area_mm2()));
    let copper_area_mm2 = f64::from(turns) * wire.total_area_mm2() * f64::from(sub_windings);

    WindingSpec {
        role,
        voltage_v,
        current_a,
        sub_windings,
        turns,
        wire,
        required_area_mm2: required.0,
        mean_turn_length_cm,
        length_m: length.0,
        resistance_20c_ohm,
        copper_area_mm2,
    }
}

fn check_turns(winding: &WindingSpec) -> Option<InfeasibilityIssue> {
    let reason = if winding.turns < MIN_PRACTICAL_TURNS {
        "too few turns to build"
    } else if winding.turns > MAX_PRACTICAL_TURNS {
        "too many turns for a practical winding"
    } else {
        return None;
    };
    Some(InfeasibilityIssue {
        role: winding.role,
        turns: winding.turns,
        min_turns: MIN_PRACTICAL_TURNS,
        max_turns: MAX_PRACTICAL_TURNS,
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::core_sizing;
    use crate::calculations::design::tests::example_input;
    use crate::calculations::design::{PhaseConfig, SecondaryInput};
    use crate::calculations::power;

    fn design_for(input: &DesignInput) -> WindingDesign {
        let power = power::calculate(input);
        let geometry = core_sizing::calculate(power.input_va, input);
        calculate(&geometry, &power, input)
    }

    #[test]
    fn test_example_turns() {
        let design = design_for(&example_input());
        let primary = &design.windings[0];
        let secondary = &design.windings[1];

        assert!(
            (100..300).contains(&primary.turns),
            "primary turns {}",
            primary.turns
        );
        // 2:1 voltage ratio with +3% compensation
        let ratio = f64::from(secondary.turns) / f64::from(primary.turns);
        assert!(ratio > 0.5 && ratio < 0.54, "ratio {}", ratio);
        assert!(design.issues.is_empty());
    }

    #[test]
    fn test_primary_turns_round_trip_voltage() {
        let input = example_input();
        let design = design_for(&input);
        let primary = &design.windings[0];
        let back = f64::from(primary.turns) / design.turns_per_volt;
        assert!(back >= input.input_voltage_v);
        assert!(back - input.input_voltage_v < 1.0 / design.turns_per_volt);
    }

    #[test]
    fn test_secondary_turns_include_compensation() {
        let input = example_input();
        let design = design_for(&input);
        let secondary = &design.windings[1];
        let exact = 110.0 * design.turns_per_volt * SECONDARY_TURNS_COMPENSATION;
        assert_eq!(secondary.turns, exact.ceil() as u32);
    }

    #[test]
    fn test_wire_never_undersized() {
        let design = design_for(&example_input());
        for w in &design.windings {
            assert!(w.conductor_area_mm2() >= w.required_area_mm2, "{}", w.role);
            assert!(w.turns >= 1);
        }
    }

    #[test]
    fn test_example_wire_gauges() {
        let design = design_for(&example_input());
        // 15.79 A / 3.5 = 4.51 mm² -> AWG 10; 30 A / 3.5 = 8.57 mm² -> AWG 7
        assert_eq!(design.windings[0].wire.gauge.awg, 10);
        assert_eq!(design.windings[1].wire.gauge.awg, 7);
    }

    #[test]
    fn test_split_primary_for_three_phase_neutral() {
        let mut input = example_input();
        input.phase = PhaseConfig::ThreePhaseNeutral;
        let design = design_for(&input);
        let single = design_for(&example_input());

        let primary = &design.windings[0];
        assert_eq!(primary.sub_windings, 2);
        assert_eq!(primary.turns, single.windings[0].turns);
        assert!((primary.line_current_a() - single.windings[0].current_a).abs() < 1e-9);
        assert!(primary.copper_area_mm2 > primary.conductor_area_mm2() * f64::from(primary.turns));
    }

    #[test]
    fn test_resistance_matches_length_and_area() {
        let design = design_for(&example_input());
        let w = &design.windings[1];
        let expected = 1.72e-8 * w.length_m / (w.conductor_area_mm2() * 1e-6);
        assert!((w.resistance_20c_ohm - expected).abs() < 1e-12);
        assert!((w.length_m - w.mean_turn_length_cm * f64::from(w.turns) / 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_turn_length_follows_window_height() {
        let short = mean_turn_length_cm(6.0, 10.0);
        let tall = mean_turn_length_cm(6.0, 20.0);
        assert!(tall > short);
        assert!((short - PI * (8.0f64 * 8.0 + 12.0 * 12.0).sqrt()).abs() < 1e-12);

        let design = design_for(&example_input());
        let geometry = {
            let input = example_input();
            let power = power::calculate(&input);
            core_sizing::calculate(power.input_va, &input)
        };
        for w in &design.windings {
            assert_eq!(
                w.mean_turn_length_cm,
                mean_turn_length_cm(geometry.core_width_cm, geometry.window_height_cm)
            );
        }
    }

    #[test]
    fn test_low_voltage_secondary_flags_too_few_turns() {
        let mut input = example_input();
        input.secondaries.push(SecondaryInput {
            voltage_v: 0.5,
            current_a: 1.0,
        });
        let design = design_for(&input);
        assert_eq!(design.issues.len(), 1);
        assert_eq!(design.issues[0].role, WindingRole::Secondary(2));
        assert_eq!(design.issues[0].turns, 1);
        // not clamped
        assert_eq!(design.windings[2].turns, 1);
    }

    #[test]
    fn test_tiny_flux_density_flags_too_many_turns() {
        let mut input = example_input();
        input.flux_density_t = 0.0001;
        let design = design_for(&input);
        assert!(design
            .issues
            .iter()
            .any(|i| i.role == WindingRole::Primary && i.turns > MAX_PRACTICAL_TURNS));
    }

    #[test]
    fn test_role_names() {
        assert_eq!(WindingRole::Primary.key(), "primary");
        assert_eq!(WindingRole::Secondary(2).to_string(), "Secondary 2");
    }
}
