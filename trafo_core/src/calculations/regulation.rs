//! # Regulation Stage
//!
//! Full-load voltage drop of each secondary from its hot resistance:
//! regulation (%) = R_hot × I / V × 100.
//!
//! Leakage reactance is not modelled, so this is the resistive part only.

use serde::{Deserialize, Serialize};

use crate::calculations::thermal::ThermalResult;
use crate::calculations::winding::{WindingRole, WindingSpec};
use crate::equations::electrical::regulation_percent;
use crate::observer::StageValue;

/// Regulation of one secondary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regulation {
    pub role: WindingRole,
    /// Corrected (hot) resistance (Ω)
    pub resistance_ohm: f64,
    pub current_a: f64,
    pub voltage_v: f64,
    pub regulation_percent: f64,
}

/// Regulation for every secondary, in input order.
pub fn calculate(windings: &[WindingSpec], thermal: &ThermalResult) -> Vec<Regulation> {
    windings
        .iter()
        .filter(|w| matches!(w.role, WindingRole::Secondary(_)))
        .filter_map(|w| {
            let resistance_ohm = thermal.corrected_resistance_ohm(w.role)?;
            Some(Regulation {
                role: w.role,
                resistance_ohm,
                current_a: w.current_a,
                voltage_v: w.voltage_v,
                regulation_percent: regulation_percent(resistance_ohm, w.current_a, w.voltage_v),
            })
        })
        .collect()
}

pub(crate) fn stage_values(regulation: &[Regulation]) -> Vec<StageValue> {
    regulation
        .iter()
        .map(|r| StageValue::new(format!("{}.regulation", r.role.key()), r.regulation_percent, "%"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::design::tests::example_input;
    use crate::calculations::{core_sizing, power, thermal, winding};
    use approx::assert_relative_eq;

    #[test]
    fn test_example_regulation() {
        let input = example_input();
        let power = power::calculate(&input);
        let geometry = core_sizing::calculate(power.input_va, &input);
        let windings = winding::calculate(&geometry, &power, &input).windings;
        let thermal = thermal::calculate(&windings, &geometry, &power, &input);
        let regulation = calculate(&windings, &thermal);

        assert_eq!(regulation.len(), 1);
        let r = &regulation[0];
        assert_eq!(r.role, WindingRole::Secondary(1));
        assert_relative_eq!(
            r.regulation_percent,
            r.resistance_ohm * 30.0 / 110.0 * 100.0,
            max_relative = 1e-12
        );
        assert!(r.regulation_percent > 0.0 && r.regulation_percent < 10.0);
    }
}
