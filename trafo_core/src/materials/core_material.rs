//! Core Materials and Loss Model
//!
//! Four magnetic material presets: three silicon-steel grades and a MnZn
//! ferrite. Coefficients are loaded from `data/core_materials.toml` at
//! compile time.
//!
//! Core loss follows a Steinmetz-style power law referenced to 50 Hz:
//!
//! ```text
//! P = k * (f / f_ref)^a * (B / B_ref)^b * m
//! ```
//!
//! Ferrite carries steeper exponents (a ~ 1.3, b ~ 2.5) than the steels.

use serde::{Deserialize, Serialize};

use crate::equations::magnetics::steinmetz_loss_w;
use crate::errors::{CalcError, CalcResult};
use crate::generated::core_material_data;

/// Magnetic core material grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoreMaterial {
    /// Non-oriented silicon steel, M19 grade
    M19,
    /// Non-oriented silicon steel, M27 grade
    M27,
    /// Grain-oriented silicon steel
    #[serde(rename = "GO")]
    GrainOriented,
    /// MnZn power ferrite
    Ferrite,
}

/// Physical and loss constants for a core material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreMaterialProperties {
    pub material: CoreMaterial,
    /// Density (g/cm³)
    pub density_g_cm3: f64,
    /// Specific loss at the reference point (W/kg)
    pub loss_w_per_kg: f64,
    /// Reference peak flux density (T)
    pub reference_flux_t: f64,
    /// Reference frequency (Hz)
    pub reference_frequency_hz: f64,
    /// Frequency exponent
    pub frequency_exponent: f64,
    /// Flux-density exponent
    pub flux_exponent: f64,
    /// Practical saturation flux density (T)
    pub saturation_flux_t: f64,
}

impl CoreMaterial {
    /// All core materials for UI selection
    pub const ALL: [CoreMaterial; 4] = [
        CoreMaterial::M19,
        CoreMaterial::M27,
        CoreMaterial::GrainOriented,
        CoreMaterial::Ferrite,
    ];

    /// Get the code string for table lookup (e.g., "M19", "GO")
    pub fn code(&self) -> &'static str {
        match self {
            CoreMaterial::M19 => "M19",
            CoreMaterial::M27 => "M27",
            CoreMaterial::GrainOriented => "GO",
            CoreMaterial::Ferrite => "FERRITE",
        }
    }

    /// Look up the material constants
    pub fn properties(&self) -> CoreMaterialProperties {
        match core_material_data::lookup(self.code()) {
            Some(row) => CoreMaterialProperties {
                material: *self,
                density_g_cm3: row.density_g_cm3,
                loss_w_per_kg: row.loss_w_per_kg,
                reference_flux_t: row.reference_flux_t,
                reference_frequency_hz: row.reference_frequency_hz,
                frequency_exponent: row.frequency_exponent,
                flux_exponent: row.flux_exponent,
                saturation_flux_t: row.saturation_flux_t,
            },
            None => unreachable!("material {} has no entry in data/core_materials.toml", self.code()),
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_uppercase().replace([' ', '_', '-'], "").as_str() {
            "M19" => Ok(CoreMaterial::M19),
            "M27" => Ok(CoreMaterial::M27),
            "GO" | "GOSS" | "CRGO" | "GRAINORIENTED" => Ok(CoreMaterial::GrainOriented),
            "FERRITE" | "MNZN" => Ok(CoreMaterial::Ferrite),
            _ => Err(CalcError::invalid_input(
                "core_material",
                s,
                "Unknown core material (expected M19, M27, GO or Ferrite)",
            )),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CoreMaterial::M19 => "Silicon steel M19",
            CoreMaterial::M27 => "Silicon steel M27",
            CoreMaterial::GrainOriented => "Grain-oriented silicon steel",
            CoreMaterial::Ferrite => "MnZn ferrite",
        }
    }
}

impl std::fmt::Display for CoreMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl CoreMaterialProperties {
    /// Core mass from volume (kg)
    pub fn mass_kg(&self, volume_cm3: f64) -> f64 {
        volume_cm3 * self.density_g_cm3 / 1000.0
    }

    /// Core loss for a core of `volume_cm3` at the given operating point (W)
    ///
    /// # Example
    ///
    /// ```rust
    /// use trafo_core::materials::CoreMaterial;
    ///
    /// let m19 = CoreMaterial::M19.properties();
    /// // At the reference point the loss is just k times the mass.
    /// let loss = m19.core_loss_w(1000.0, 50.0, 1.5);
    /// assert!((loss - m19.loss_w_per_kg * m19.mass_kg(1000.0)).abs() < 1e-9);
    /// ```
    pub fn core_loss_w(&self, volume_cm3: f64, frequency_hz: f64, flux_density_t: f64) -> f64 {
        steinmetz_loss_w(
            self.loss_w_per_kg,
            frequency_hz / self.reference_frequency_hz,
            flux_density_t / self.reference_flux_t,
            self.frequency_exponent,
            self.flux_exponent,
            self.mass_kg(volume_cm3),
        )
    }
}
