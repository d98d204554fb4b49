//! # Equation Registry
//!
//! Central registry of every formula the design pipeline applies. Each
//! equation carries a plain-text formula, a reference, and the function that
//! implements it, so a reviewer can audit a design against its sources.
//!
//! ## Usage
//!
//! ```rust
//! use trafo_core::equations::registry::Equation;
//!
//! let meta = Equation::TurnsPerVolt.metadata();
//! assert_eq!(meta.formula_plain, "N/V = 1 / (4.44 * f * B * Ae)");
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Source an equation is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reference {
    /// McLyman, Transformer and Inductor Design Handbook
    McLyman { edition: u8, chapter: u8 },
    /// Steinmetz empirical core-loss law
    Steinmetz,
    /// An IEC standard
    Iec { number: u16 },
    /// NEC article
    Nec { article: &'static str },
    /// Fundamental physics (no specific reference needed)
    Physics,
}

impl Reference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            Reference::McLyman { edition, chapter } => {
                format!("McLyman {}ed, Chapter {}", edition, chapter)
            }
            Reference::Steinmetz => "Steinmetz (1892)".to_string(),
            Reference::Iec { number } => format!("IEC {}", number),
            Reference::Nec { article } => format!("NEC {}", article),
            Reference::Physics => "Fundamental physics".to_string(),
        }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Code/standard reference
    pub reference: Reference,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

/// Every formula used by the design pipeline, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equation {
    AreaProduct,
    CoreWindowSplit,
    TurnsPerVolt,
    DcResistance,
    TemperatureCorrection,
    CopperLoss,
    CoreLoss,
    Efficiency,
    TemperatureRise,
    Regulation,
    ProtectionRating,
}

impl Equation {
    /// All equations, in the order the pipeline applies them
    pub const ALL: [Equation; 11] = [
        Equation::AreaProduct,
        Equation::CoreWindowSplit,
        Equation::TurnsPerVolt,
        Equation::DcResistance,
        Equation::TemperatureCorrection,
        Equation::CopperLoss,
        Equation::CoreLoss,
        Equation::Efficiency,
        Equation::TemperatureRise,
        Equation::Regulation,
        Equation::ProtectionRating,
    ];

    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::AreaProduct => EquationMetadata {
                name: "Area Product",
                formula_plain: "Ap = P * 1e4 * Ks / (4.44 * f * B * J * Ku)",
                reference: Reference::McLyman { edition: 4, chapter: 5 },
                source_module: "equations/magnetics.rs",
                source_function: "area_product_cm4",
            },
            Equation::CoreWindowSplit => EquationMetadata {
                name: "Core and Window Areas",
                formula_plain: "Ae = sqrt(Ap / r), Aw = Ap / Ae",
                reference: Reference::McLyman { edition: 4, chapter: 5 },
                source_module: "equations/magnetics.rs",
                source_function: "split_area_product",
            },
            Equation::TurnsPerVolt => EquationMetadata {
                name: "Turns per Volt (Faraday)",
                formula_plain: "N/V = 1 / (4.44 * f * B * Ae)",
                reference: Reference::Physics,
                source_module: "equations/magnetics.rs",
                source_function: "turns_per_volt",
            },
            Equation::DcResistance => EquationMetadata {
                name: "Conductor DC Resistance",
                formula_plain: "R20 = rho * L / A",
                reference: Reference::Iec { number: 60028 },
                source_module: "equations/electrical.rs",
                source_function: "dc_resistance_ohm",
            },
            Equation::TemperatureCorrection => EquationMetadata {
                name: "Resistance Temperature Correction",
                formula_plain: "k = 1 + 0.00393 * (T - 20)",
                reference: Reference::Iec { number: 60076 },
                source_module: "equations/electrical.rs",
                source_function: "temperature_correction_factor",
            },
            Equation::CopperLoss => EquationMetadata {
                name: "Copper Loss",
                formula_plain: "Pcu = I^2 * R",
                reference: Reference::Physics,
                source_module: "equations/electrical.rs",
                source_function: "copper_loss_w",
            },
            Equation::CoreLoss => EquationMetadata {
                name: "Core Loss",
                formula_plain: "Pfe = k * (f/f0)^a * (B/B0)^b * m",
                reference: Reference::Steinmetz,
                source_module: "equations/magnetics.rs",
                source_function: "steinmetz_loss_w",
            },
            Equation::Efficiency => EquationMetadata {
                name: "Efficiency",
                formula_plain: "eta = Pout / (Pout + Ploss) * 100",
                reference: Reference::Physics,
                source_module: "equations/thermal.rs",
                source_function: "efficiency_percent",
            },
            Equation::TemperatureRise => EquationMetadata {
                name: "Temperature Rise",
                formula_plain: "dT = Ploss / (As * (hc + hr))",
                reference: Reference::McLyman { edition: 4, chapter: 6 },
                source_module: "equations/thermal.rs",
                source_function: "temperature_rise_c",
            },
            Equation::Regulation => EquationMetadata {
                name: "Resistive Regulation",
                formula_plain: "Reg = R * I / V * 100",
                reference: Reference::Physics,
                source_module: "equations/electrical.rs",
                source_function: "regulation_percent",
            },
            Equation::ProtectionRating => EquationMetadata {
                name: "Protection Rating",
                formula_plain: "I_fuse = ceil(1.25 * I)",
                reference: Reference::Nec { article: "450.3(B)" },
                source_module: "equations/electrical.rs",
                source_function: "protection_rating_a",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        for eq in Equation::ALL {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "{:?} missing name", eq);
            assert!(!meta.formula_plain.is_empty(), "{:?} missing formula", eq);
            assert!(meta.source_module.starts_with("equations/"));
            assert!(!meta.source_function.is_empty());
        }
    }

    #[test]
    fn test_citations() {
        assert_eq!(
            Reference::McLyman { edition: 4, chapter: 5 }.citation(),
            "McLyman 4ed, Chapter 5"
        );
        assert_eq!(Reference::Iec { number: 60085 }.citation(), "IEC 60085");
    }
}
