//! # Construction Recommendations
//!
//! Practical build notes derived from the finished design: how many layers
//! each winding needs in the window height, and which interlayer insulation
//! suits the thermal class the operating temperature calls for.

use serde::{Deserialize, Serialize};

use crate::calculations::core_sizing::CoreGeometry;
use crate::calculations::thermal::{InsulationClass, ThermalResult};
use crate::calculations::winding::{WindingRole, WindingSpec};
use crate::observer::StageValue;
use crate::units::{Cm, Mm};

/// Share of the window height usable for turns; the rest is bobbin cheeks
/// and creepage margin
pub const USABLE_WINDOW_HEIGHT: f64 = 0.9;

/// Insulation placed between winding layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterlayerInsulation {
    KraftPaper,
    PolyesterFilm,
    /// Aramid paper, 0.05 mm
    NomexThin,
    /// Aramid paper, 0.13 mm
    NomexThick,
    MicaGlass,
}

impl InterlayerInsulation {
    pub fn for_class(class: InsulationClass) -> Self {
        match class {
            InsulationClass::A => InterlayerInsulation::KraftPaper,
            InsulationClass::B => InterlayerInsulation::PolyesterFilm,
            InsulationClass::F => InterlayerInsulation::NomexThin,
            InsulationClass::H => InterlayerInsulation::NomexThick,
            InsulationClass::C => InterlayerInsulation::MicaGlass,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            InterlayerInsulation::KraftPaper => "Kraft paper",
            InterlayerInsulation::PolyesterFilm => "Polyester film (PET)",
            InterlayerInsulation::NomexThin => "Nomex 410, 0.05 mm",
            InterlayerInsulation::NomexThick => "Nomex 410, 0.13 mm",
            InterlayerInsulation::MicaGlass => "Mica-glass tape",
        }
    }
}

impl std::fmt::Display for InterlayerInsulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Layer layout of one winding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindingLayers {
    pub role: WindingRole,
    pub turns_per_layer: u32,
    /// Layers for all sub-windings together
    pub layers: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Construction {
    pub insulation_class: InsulationClass,
    pub interlayer_insulation: InterlayerInsulation,
    pub windings: Vec<WindingLayers>,
}

impl Construction {
    pub(crate) fn stage_values(&self) -> Vec<StageValue> {
        let mut values = Vec::with_capacity(self.windings.len() * 2);
        for w in &self.windings {
            let key = w.role.key();
            values.push(StageValue::new(format!("{}.turns_per_layer", key), f64::from(w.turns_per_layer), "turns"));
            values.push(StageValue::new(format!("{}.layers", key), f64::from(w.layers), "layers"));
        }
        values
    }
}

/// Lay out the windings and pick insulation.
pub fn calculate(windings: &[WindingSpec], geometry: &CoreGeometry, thermal: &ThermalResult) -> Construction {
    let usable: Mm = Cm(geometry.window_height_cm * USABLE_WINDOW_HEIGHT).into();

    let layers = windings
        .iter()
        .map(|w| {
            let pitch_mm = w.wire.gauge.insulated_diameter_mm() * f64::from(w.wire.strands);
            let turns_per_layer = ((usable.0 / pitch_mm).floor() as u32).max(1);
            let total_turns = w.turns.saturating_mul(w.sub_windings);
            WindingLayers {
                role: w.role,
                turns_per_layer,
                layers: total_turns.div_ceil(turns_per_layer).max(1),
            }
        })
        .collect();

    Construction {
        insulation_class: thermal.insulation,
        interlayer_insulation: InterlayerInsulation::for_class(thermal.insulation),
        windings: layers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::design::tests::example_input;
    use crate::calculations::{core_sizing, power, thermal, winding};

    #[test]
    fn test_example_layers_hold_every_turn() {
        let input = example_input();
        let power = power::calculate(&input);
        let geometry = core_sizing::calculate(power.input_va, &input);
        let windings = winding::calculate(&geometry, &power, &input).windings;
        let thermal = thermal::calculate(&windings, &geometry, &power, &input);
        let construction = calculate(&windings, &geometry, &thermal);

        assert_eq!(construction.windings.len(), windings.len());
        for (layout, w) in construction.windings.iter().zip(&windings) {
            assert!(layout.turns_per_layer >= 1);
            assert!(layout.layers * layout.turns_per_layer >= w.turns * w.sub_windings);
            assert!((layout.layers - 1) * layout.turns_per_layer < w.turns * w.sub_windings);
        }
        assert_eq!(
            construction.interlayer_insulation,
            InterlayerInsulation::for_class(thermal.insulation)
        );
    }

    #[test]
    fn test_insulation_by_class() {
        assert_eq!(
            InterlayerInsulation::for_class(InsulationClass::A),
            InterlayerInsulation::KraftPaper
        );
        assert_eq!(
            InterlayerInsulation::for_class(InsulationClass::H),
            InterlayerInsulation::NomexThick
        );
    }
}
