//! # Power Stage
//!
//! Apparent power bookkeeping: what the secondaries deliver, what the primary
//! must draw at the target efficiency, and the loss budget that implies.
//!
//! Power factor is taken as unity, so VA and W are interchangeable here.

use serde::{Deserialize, Serialize};

use crate::calculations::design::DesignInput;
use crate::observer::StageValue;

/// Output of the power stage.
///
/// ## JSON Example
///
/// ```json
/// {
///   "secondary_va": [3300.0],
///   "output_va": 3300.0,
///   "input_va": 3473.68,
///   "loss_budget_w": 173.68,
///   "primary_current_a": 15.79
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSummary {
    /// Apparent power of each secondary (VA)
    pub secondary_va: Vec<f64>,
    /// Sum of secondary powers (VA)
    pub output_va: f64,
    /// Required input power at the target efficiency (VA)
    pub input_va: f64,
    /// Loss the target efficiency allows (W)
    pub loss_budget_w: f64,
    /// Total primary line current (A)
    pub primary_current_a: f64,
}

impl PowerSummary {
    pub(crate) fn stage_values(&self) -> Vec<StageValue> {
        let mut values: Vec<StageValue> = self
            .secondary_va
            .iter()
            .enumerate()
            .map(|(i, va)| StageValue::new(format!("secondary_{}.va", i + 1), *va, "VA"))
            .collect();
        values.push(StageValue::new("output_va", self.output_va, "VA"));
        values.push(StageValue::new("input_va", self.input_va, "VA"));
        values.push(StageValue::new("loss_budget_w", self.loss_budget_w, "W"));
        values.push(StageValue::new("primary_current_a", self.primary_current_a, "A"));
        values
    }
}

/// Compute the power summary for a validated input.
pub fn calculate(input: &DesignInput) -> PowerSummary {
    let secondary_va: Vec<f64> = input
        .secondaries
        .iter()
        .map(|s| s.voltage_v * s.current_a)
        .collect();
    let output_va: f64 = secondary_va.iter().sum();
    let input_va = output_va / input.efficiency;

    PowerSummary {
        secondary_va,
        output_va,
        input_va,
        loss_budget_w: input_va - output_va,
        primary_current_a: input_va / input.input_voltage_v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::design::tests::example_input;
    use crate::calculations::design::SecondaryInput;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_secondary() {
        let power = calculate(&example_input());
        assert_relative_eq!(power.output_va, 3300.0, max_relative = 1e-12);
        assert_relative_eq!(power.input_va, 3300.0 / 0.95, max_relative = 1e-12);
        assert_relative_eq!(power.loss_budget_w, 3300.0 / 0.95 - 3300.0, max_relative = 1e-12);
        assert_relative_eq!(power.primary_current_a, 3300.0 / 0.95 / 220.0, max_relative = 1e-12);
    }

    #[test]
    fn test_two_secondaries_sum() {
        let mut input = example_input();
        input.secondaries.push(SecondaryInput {
            voltage_v: 12.0,
            current_a: 5.0,
        });
        let power = calculate(&input);
        assert_eq!(power.secondary_va, vec![3300.0, 60.0]);
        assert_relative_eq!(power.output_va, 3360.0, max_relative = 1e-12);
    }

    #[test]
    fn test_unity_efficiency_has_no_loss_budget() {
        let mut input = example_input();
        input.efficiency = 1.0;
        let power = calculate(&input);
        assert_eq!(power.loss_budget_w, 0.0);
    }
}
