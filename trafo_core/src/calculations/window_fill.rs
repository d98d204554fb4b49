//! # Window Fill Stage
//!
//! Compares the copper the windings put in the window against the fill factor
//! the designer targeted. The verdict is advisory; an overfull window does
//! not make the design fail.

use serde::{Deserialize, Serialize};

use crate::calculations::core_sizing::CoreGeometry;
use crate::calculations::winding::WindingSpec;
use crate::observer::StageValue;
use crate::units::{SqCm, SqMm};

/// Below this multiple of the target the window is mostly empty
pub const OVERSIZED_BELOW: f64 = 0.5;
/// Up to this multiple of the target the windings fit comfortably
pub const ADEQUATE_UP_TO: f64 = 1.2;
/// Up to this multiple of the target the windings fit with care
pub const MARGINAL_UP_TO: f64 = 1.5;

/// How well the windings fit the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillVerdict {
    Oversized,
    Adequate,
    Marginal,
    Insufficient,
}

impl FillVerdict {
    /// Classify an achieved fill against the target fill (both in percent)
    pub fn classify(fill_percent: f64, target_percent: f64) -> Self {
        let ratio = fill_percent / target_percent;
        if ratio < OVERSIZED_BELOW {
            FillVerdict::Oversized
        } else if ratio <= ADEQUATE_UP_TO {
            FillVerdict::Adequate
        } else if ratio <= MARGINAL_UP_TO {
            FillVerdict::Marginal
        } else {
            FillVerdict::Insufficient
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FillVerdict::Oversized => "Oversized (window underused)",
            FillVerdict::Adequate => "Adequate",
            FillVerdict::Marginal => "Marginal",
            FillVerdict::Insufficient => "Insufficient (windings may not fit)",
        }
    }
}

impl std::fmt::Display for FillVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Output of the window fill stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowFill {
    /// Copper of every winding (mm²)
    pub copper_area_mm2: f64,
    /// Window area (mm²)
    pub window_area_mm2: f64,
    /// Achieved fill (%)
    pub fill_percent: f64,
    /// Targeted fill, i.e. fill factor × 100 (%)
    pub target_percent: f64,
    pub verdict: FillVerdict,
}

impl WindowFill {
    pub(crate) fn stage_values(&self) -> Vec<StageValue> {
        vec![
            StageValue::new("copper_area_mm2", self.copper_area_mm2, "mm²"),
            StageValue::new("window_area_mm2", self.window_area_mm2, "mm²"),
            StageValue::new("fill_percent", self.fill_percent, "%"),
            StageValue::new("target_percent", self.target_percent, "%"),
        ]
    }
}

/// Evaluate how much of the window the windings occupy.
pub fn calculate(windings: &[WindingSpec], geometry: &CoreGeometry, fill_factor: f64) -> WindowFill {
    let copper_area_mm2: f64 = windings.iter().map(|w| w.copper_area_mm2).sum();
    let window: SqMm = SqCm(geometry.window_area_cm2).into();
    let fill_percent = copper_area_mm2 / window.0 * 100.0;
    let target_percent = fill_factor * 100.0;

    WindowFill {
        copper_area_mm2,
        window_area_mm2: window.0,
        fill_percent,
        target_percent,
        verdict: FillVerdict::classify(fill_percent, target_percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::design::tests::example_input;
    use crate::calculations::{core_sizing, power, winding};
    use approx::assert_relative_eq;

    #[test]
    fn test_verdict_bands() {
        assert_eq!(FillVerdict::classify(10.0, 40.0), FillVerdict::Oversized);
        assert_eq!(FillVerdict::classify(20.0, 40.0), FillVerdict::Adequate);
        assert_eq!(FillVerdict::classify(48.0, 40.0), FillVerdict::Adequate);
        assert_eq!(FillVerdict::classify(55.0, 40.0), FillVerdict::Marginal);
        assert_eq!(FillVerdict::classify(60.0, 40.0), FillVerdict::Marginal);
        assert_eq!(FillVerdict::classify(61.0, 40.0), FillVerdict::Insufficient);
    }

    #[test]
    fn test_example_fill() {
        let input = example_input();
        let power = power::calculate(&input);
        let geometry = core_sizing::calculate(power.input_va, &input);
        let windings = winding::calculate(&geometry, &power, &input);
        let fill = calculate(&windings.windings, &geometry, input.fill_factor);

        let copper: f64 = windings
            .windings
            .iter()
            .map(|w| f64::from(w.turns) * w.wire.total_area_mm2() * f64::from(w.sub_windings))
            .sum();
        assert_relative_eq!(fill.copper_area_mm2, copper, max_relative = 1e-12);
        assert_relative_eq!(
            fill.window_area_mm2,
            geometry.window_area_cm2 * 100.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(fill.target_percent, 40.0, max_relative = 1e-12);
        assert!(fill.fill_percent > 0.0 && fill.fill_percent < 100.0);
        assert_eq!(
            fill.verdict,
            FillVerdict::classify(fill.fill_percent, fill.target_percent)
        );
    }
}
