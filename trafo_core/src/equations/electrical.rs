//! # Winding Electrical Formulas
//!
//! Copper resistance, temperature correction, I²R loss, regulation and
//! protection sizing.
//!
//! ## References
//!
//! - IEC 60028: International standard of resistance for copper
//! - IEC 60076-1: Power transformers, general (reference temperature)
//! - NEC 450.3(B): 125% continuous-duty overcurrent margin

use crate::units::{Meters, SqM, SqMm};

/// Resistivity of annealed copper at 20 °C (Ω·m)
pub const COPPER_RESISTIVITY_OHM_M: f64 = 1.72e-8;

/// Temperature coefficient of copper resistance at 20 °C (1/°C)
pub const COPPER_TEMP_COEFFICIENT: f64 = 0.00393;

/// Temperature the table resistivity is quoted at (°C)
pub const REFERENCE_TEMP_C: f64 = 20.0;

/// Continuous-duty protection margin (125%)
pub const PROTECTION_MARGIN: f64 = 1.25;

/// DC resistance of a copper conductor
///
/// # Formula
/// R = ρ·L / A
///
/// # Example
/// ```rust
/// use trafo_core::equations::electrical::dc_resistance_ohm;
/// use trafo_core::units::{Meters, SqMm};
///
/// // 100 m of 1 mm² copper is 1.72 Ω
/// let r = dc_resistance_ohm(Meters(100.0), SqMm(1.0));
/// assert!((r - 1.72).abs() < 1e-9);
/// ```
#[inline]
pub fn dc_resistance_ohm(length: Meters, area: SqMm) -> f64 {
    let area_m2: SqM = area.into();
    COPPER_RESISTIVITY_OHM_M * length.0 / area_m2.0
}

/// Resistance multiplier relative to 20 °C
///
/// # Formula
/// k = 1 + α·(T - 20)
#[inline]
pub fn temperature_correction_factor(temp_c: f64) -> f64 {
    1.0 + COPPER_TEMP_COEFFICIENT * (temp_c - REFERENCE_TEMP_C)
}

/// Joule loss in a conductor
///
/// # Formula
/// P = I²·R
#[inline]
pub fn copper_loss_w(current_a: f64, resistance_ohm: f64) -> f64 {
    current_a.powi(2) * resistance_ohm
}

/// Resistive voltage regulation in percent
///
/// # Formula
/// Reg = R·I / V × 100
#[inline]
pub fn regulation_percent(resistance_ohm: f64, current_a: f64, voltage_v: f64) -> f64 {
    resistance_ohm * current_a / voltage_v * 100.0
}

/// Overcurrent device rating, rounded up to the next whole ampere
///
/// # Formula
/// I_fuse = ⌈1.25·I⌉
///
/// # Example
/// ```rust
/// use trafo_core::equations::electrical::protection_rating_a;
///
/// assert_eq!(protection_rating_a(30.0), 38.0);
/// assert_eq!(protection_rating_a(8.0), 10.0);
/// ```
#[inline]
pub fn protection_rating_a(current_a: f64) -> f64 {
    (current_a * PROTECTION_MARGIN).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_resistance_scales_with_area() {
        let r1 = dc_resistance_ohm(Meters(50.0), SqMm(2.0));
        let r2 = dc_resistance_ohm(Meters(50.0), SqMm(1.0));
        assert_relative_eq!(r2, 2.0 * r1, max_relative = 1e-12);
    }

    #[test]
    fn test_correction_factor_at_reference() {
        assert_eq!(temperature_correction_factor(20.0), 1.0);
    }

    #[test]
    fn test_correction_factor_at_65c() {
        // 1 + 0.00393 * 45 = 1.17685
        assert_relative_eq!(temperature_correction_factor(65.0), 1.17685, max_relative = 1e-12);
    }

    #[test]
    fn test_copper_loss() {
        assert_relative_eq!(copper_loss_w(10.0, 0.5), 50.0, max_relative = 1e-12);
    }

    #[test]
    fn test_regulation() {
        // 0.1 Ω × 20 A / 100 V = 2%
        assert_relative_eq!(regulation_percent(0.1, 20.0, 100.0), 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_protection_rounds_up() {
        assert_eq!(protection_rating_a(15.79), 20.0);
        assert_eq!(protection_rating_a(0.1), 1.0);
    }
}
