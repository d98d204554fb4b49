//! # Loss and Thermal Stage
//!
//! Copper and core losses, real efficiency, and a lumped steady-state
//! temperature estimate.
//!
//! ## Procedure
//!
//! 1. Winding temperature is seeded at ambient + [`SEED_RISE_C`]. This is a
//!    single pass; resistance and temperature are not iterated to a fixed point.
//! 2. Resistances are corrected to that temperature (α = 0.00393/°C). A split
//!    primary's resistance is multiplied by its sub-winding count.
//! 3. Copper loss per winding = I² × corrected R
//! 4. Core loss from the material's Steinmetz preset
//! 5. Efficiency = P_out / (P_out + P_loss) × 100
//! 6. Radiating surface from the core shape
//! 7. Rise = P_loss / (A × h), capped at [`MAX_TEMPERATURE_RISE_C`]
//! 8. Operating temperature selects ventilation and insulation classes
//!
//! ## References
//!
//! - McLyman, Transformer and Inductor Design Handbook, 4th Ed., Ch. 5-6
//! - IEC 60085 thermal classes

use serde::{Deserialize, Serialize};

use crate::calculations::core_sizing::CoreGeometry;
use crate::calculations::design::DesignInput;
use crate::calculations::power::PowerSummary;
use crate::calculations::winding::{WindingRole, WindingSpec};
use crate::equations::electrical::{copper_loss_w, temperature_correction_factor};
use crate::equations::thermal::{efficiency_percent, temperature_rise_c};
use crate::observer::StageValue;

/// Assumed winding temperature above ambient for resistance correction (°C)
pub const SEED_RISE_C: f64 = 40.0;

/// Largest temperature rise reported; anything beyond is capped (°C)
pub const MAX_TEMPERATURE_RISE_C: f64 = 150.0;

/// Operating temperatures above this are flagged as elevated (°C)
pub const ELEVATED_TEMPERATURE_C: f64 = 105.0;

/// Cooling recommended for the estimated operating temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VentilationClass {
    /// Up to 70 °C
    Natural,
    /// Up to 90 °C
    NaturalEnhanced,
    /// Up to 120 °C
    Forced,
    /// Above 120 °C
    ForcedActive,
}

impl VentilationClass {
    /// Select by operating temperature (°C)
    pub fn for_temperature(operating_temp_c: f64) -> Self {
        if operating_temp_c <= 70.0 {
            VentilationClass::Natural
        } else if operating_temp_c <= 90.0 {
            VentilationClass::NaturalEnhanced
        } else if operating_temp_c <= 120.0 {
            VentilationClass::Forced
        } else {
            VentilationClass::ForcedActive
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            VentilationClass::Natural => "Natural convection",
            VentilationClass::NaturalEnhanced => "Natural convection, ventilated enclosure",
            VentilationClass::Forced => "Forced air",
            VentilationClass::ForcedActive => "Forced air with active cooling",
        }
    }
}

impl std::fmt::Display for VentilationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// IEC 60085 thermal class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InsulationClass {
    /// 105 °C
    A,
    /// 130 °C
    B,
    /// 155 °C
    F,
    /// 180 °C
    H,
    /// Above 180 °C
    C,
}

impl InsulationClass {
    /// Lowest class whose limit covers the operating temperature (°C)
    pub fn for_temperature(operating_temp_c: f64) -> Self {
        [
            InsulationClass::A,
            InsulationClass::B,
            InsulationClass::F,
            InsulationClass::H,
        ]
        .into_iter()
        .find(|class| class.limit_c().is_some_and(|limit| operating_temp_c <= limit))
        .unwrap_or(InsulationClass::C)
    }

    /// Rated hot-spot limit (°C); class C has no fixed upper limit
    pub fn limit_c(&self) -> Option<f64> {
        match self {
            InsulationClass::A => Some(105.0),
            InsulationClass::B => Some(130.0),
            InsulationClass::F => Some(155.0),
            InsulationClass::H => Some(180.0),
            InsulationClass::C => None,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            InsulationClass::A => "Class A (105 °C)",
            InsulationClass::B => "Class B (130 °C)",
            InsulationClass::F => "Class F (155 °C)",
            InsulationClass::H => "Class H (180 °C)",
            InsulationClass::C => "Class C (>180 °C)",
        }
    }
}

impl std::fmt::Display for InsulationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThermalVerdict {
    Normal,
    /// Operating temperature above 105 °C, or the rise was capped
    Elevated,
}

impl std::fmt::Display for ThermalVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThermalVerdict::Normal => write!(f, "Normal"),
            ThermalVerdict::Elevated => write!(f, "Elevated"),
        }
    }
}

/// Hot resistance and copper loss of one winding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindingLoss {
    pub role: WindingRole,
    /// R20 × correction × sub-windings (Ω)
    pub corrected_resistance_ohm: f64,
    /// I² × corrected R (W)
    pub copper_loss_w: f64,
}

/// Output of the loss and thermal stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalResult {
    /// Seeded winding temperature used for resistance correction (°C)
    pub estimated_temp_c: f64,
    /// Resistance multiplier at `estimated_temp_c`
    pub correction_factor: f64,
    pub winding_losses: Vec<WindingLoss>,
    pub copper_loss_w: f64,
    pub core_loss_w: f64,
    pub total_loss_w: f64,
    /// Real efficiency (%), always below 100
    pub efficiency_percent: f64,
    pub radiating_surface_cm2: f64,
    /// Temperature rise above ambient after the cap (°C)
    pub temperature_rise_c: f64,
    /// True when the uncapped rise exceeded the cap
    pub rise_capped: bool,
    /// Ambient + rise (°C)
    pub operating_temp_c: f64,
    pub ventilation: VentilationClass,
    pub insulation: InsulationClass,
    pub verdict: ThermalVerdict,
}

impl ThermalResult {
    /// Corrected resistance of a winding, if present
    pub fn corrected_resistance_ohm(&self, role: WindingRole) -> Option<f64> {
        self.winding_losses
            .iter()
            .find(|l| l.role == role)
            .map(|l| l.corrected_resistance_ohm)
    }

    pub(crate) fn stage_values(&self) -> Vec<StageValue> {
        let mut values = vec![
            StageValue::new("estimated_temp_c", self.estimated_temp_c, "°C"),
            StageValue::new("correction_factor", self.correction_factor, ""),
        ];
        for l in &self.winding_losses {
            let key = l.role.key();
            values.push(StageValue::new(format!("{}.r_hot_ohm", key), l.corrected_resistance_ohm, "Ω"));
            values.push(StageValue::new(format!("{}.copper_loss_w", key), l.copper_loss_w, "W"));
        }
        values.extend([
            StageValue::new("copper_loss_w", self.copper_loss_w, "W"),
            StageValue::new("core_loss_w", self.core_loss_w, "W"),
            StageValue::new("total_loss_w", self.total_loss_w, "W"),
            StageValue::new("efficiency_percent", self.efficiency_percent, "%"),
            StageValue::new("radiating_surface_cm2", self.radiating_surface_cm2, "cm²"),
            StageValue::new("temperature_rise_c", self.temperature_rise_c, "°C"),
            StageValue::new("operating_temp_c", self.operating_temp_c, "°C"),
        ]);
        values
    }
}

/// Compute losses and the temperature estimate.
pub fn calculate(
    windings: &[WindingSpec],
    geometry: &CoreGeometry,
    power: &PowerSummary,
    input: &DesignInput,
) -> ThermalResult {
    let estimated_temp_c = input.ambient_temp_c + SEED_RISE_C;
    let correction_factor = temperature_correction_factor(estimated_temp_c);

    let winding_losses: Vec<WindingLoss> = windings
        .iter()
        .map(|w| {
            let corrected = w.resistance_20c_ohm * correction_factor * f64::from(w.sub_windings);
            WindingLoss {
                role: w.role,
                corrected_resistance_ohm: corrected,
                copper_loss_w: copper_loss_w(w.current_a, corrected),
            }
        })
        .collect();
    let copper_loss_w: f64 = winding_losses.iter().map(|l| l.copper_loss_w).sum();

    let core_loss_w = input.core_material.properties().core_loss_w(
        geometry.volume_cm3,
        input.frequency_hz,
        input.flux_density_t,
    );
    let total_loss_w = copper_loss_w + core_loss_w;

    let radiating_surface_cm2 = geometry.shape.radiating_surface_cm2(
        geometry.core_width_cm,
        geometry.window_height_cm,
        geometry.window_width_cm,
    );
    let raw_rise = temperature_rise_c(total_loss_w, radiating_surface_cm2);
    let rise_capped = raw_rise > MAX_TEMPERATURE_RISE_C;
    let temperature_rise_c = raw_rise.min(MAX_TEMPERATURE_RISE_C);
    let operating_temp_c = input.ambient_temp_c + temperature_rise_c;

    let verdict = if rise_capped || operating_temp_c > ELEVATED_TEMPERATURE_C {
        ThermalVerdict::Elevated
    } else {
        ThermalVerdict::Normal
    };

    ThermalResult {
        estimated_temp_c,
        correction_factor,
        winding_losses,
        copper_loss_w,
        core_loss_w,
        total_loss_w,
        efficiency_percent: efficiency_percent(power.output_va, total_loss_w),
        radiating_surface_cm2,
        temperature_rise_c,
        rise_capped,
        operating_temp_c,
        ventilation: VentilationClass::for_temperature(operating_temp_c),
        insulation: InsulationClass::for_temperature(operating_temp_c),
        verdict,
    }
}
