//! # Magnetic Circuit Formulas
//!
//! Core sizing and flux equations for sinusoidally excited power transformers.
//!
//! ## Notation
//!
//! - `P` = Apparent power handled by the core (VA)
//! - `f` = Supply frequency (Hz)
//! - `B` = Peak flux density in the core (T)
//! - `J` = Winding current density (A/mm²)
//! - `Ku` = Window utilization (fill) factor
//! - `Ks` = Core-shape factor
//! - `Ae` = Effective core cross-section
//! - `Aw` = Winding window area
//! - `Ap` = Area product Ae·Aw
//!
//! ## References
//!
//! - McLyman, Transformer and Inductor Design Handbook, 4th Ed., Ch. 5 and 7
//! - Steinmetz, "On the Law of Hysteresis", AIEE Transactions, 1892

use crate::units::{SqCm, SqM};

/// Form factor of a sine wave times 4 (Kf in Faraday's law)
pub const SINE_WAVE_FACTOR: f64 = 4.44;

/// Converts A/mm² to A/cm²
const A_PER_MM2_TO_A_PER_CM2: f64 = 100.0;

/// Area product required to transfer `power_va` through a core
///
/// # Formula
/// Ap = P·10⁴·Ks / (Kf·f·B·J·Ku), with J expressed in A/cm²
///
/// The 10⁴ factor converts the m²·A/cm² result into cm⁴. `Ks` scales the
/// ideal Faraday-limited product up by how much of the window a given core
/// geometry actually wastes.
///
/// # Example
/// ```rust
/// use trafo_core::equations::magnetics::area_product_cm4;
///
/// let ap = area_product_cm4(3473.7, 50.0, 1.5, 3.5, 0.40, 1.0);
/// assert!((ap - 745.1).abs() < 0.5);
/// ```
#[inline]
pub fn area_product_cm4(
    power_va: f64,
    frequency_hz: f64,
    flux_density_t: f64,
    current_density_a_mm2: f64,
    fill_factor: f64,
    shape_factor: f64,
) -> f64 {
    let j_a_cm2 = current_density_a_mm2 * A_PER_MM2_TO_A_PER_CM2;
    power_va * 1e4 * shape_factor
        / (SINE_WAVE_FACTOR * frequency_hz * flux_density_t * j_a_cm2 * fill_factor)
}

/// Split an area product into core and window areas
///
/// # Formulas
/// - Ae = √(Ap / r)
/// - Aw = Ap / Ae
///
/// where r = Aw/Ae is the geometry's window-to-core ratio.
///
/// # Returns
/// (Ae, Aw) in cm²
#[inline]
pub fn split_area_product(area_product_cm4: f64, window_ratio: f64) -> (SqCm, SqCm) {
    let ae = (area_product_cm4 / window_ratio).sqrt();
    (SqCm(ae), SqCm(area_product_cm4 / ae))
}

/// Turns per volt from Faraday's law
///
/// # Formula
/// N/V = 1 / (Kf·f·B·Ae), with Ae in m²
///
/// # Example
/// ```rust
/// use trafo_core::equations::magnetics::turns_per_volt;
/// use trafo_core::units::SqCm;
///
/// // 50 cm² core at 50 Hz and 1.5 T: about 0.6 turns per volt
/// let tpv = turns_per_volt(50.0, 1.5, SqCm(50.0));
/// assert!((tpv - 0.6006).abs() < 1e-3);
/// ```
#[inline]
pub fn turns_per_volt(frequency_hz: f64, flux_density_t: f64, core_area: SqCm) -> f64 {
    let ae_m2: SqM = core_area.into();
    1.0 / (SINE_WAVE_FACTOR * frequency_hz * flux_density_t * ae_m2.0)
}

/// Steinmetz-style core loss
///
/// # Formula
/// P = k·(f/f_ref)^α·(B/B_ref)^β·m
///
/// # Arguments
/// * `loss_w_per_kg` - Specific loss k at the reference point
/// * `frequency_ratio` - f / f_ref
/// * `flux_ratio` - B / B_ref
/// * `frequency_exponent` - α
/// * `flux_exponent` - β
/// * `mass_kg` - Core mass
#[inline]
pub fn steinmetz_loss_w(
    loss_w_per_kg: f64,
    frequency_ratio: f64,
    flux_ratio: f64,
    frequency_exponent: f64,
    flux_exponent: f64,
    mass_kg: f64,
) -> f64 {
    loss_w_per_kg
        * frequency_ratio.powf(frequency_exponent)
        * flux_ratio.powf(flux_exponent)
        * mass_kg
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_area_product_scales_inversely_with_current_density() {
        let ap1 = area_product_cm4(1000.0, 50.0, 1.4, 3.0, 0.4, 4.0);
        let ap2 = area_product_cm4(1000.0, 50.0, 1.4, 6.0, 0.4, 4.0);
        assert_relative_eq!(ap1 / ap2, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_split_area_product_identity() {
        let (ae, aw) = split_area_product(3000.0, 1.5);
        assert_relative_eq!(ae.0 * aw.0, 3000.0, max_relative = 1e-12);
        assert_relative_eq!(aw.0 / ae.0, 1.5, max_relative = 1e-12);
    }

    #[test]
    fn test_turns_per_volt_halves_with_double_frequency() {
        let tpv_50 = turns_per_volt(50.0, 1.5, SqCm(40.0));
        let tpv_100 = turns_per_volt(100.0, 1.5, SqCm(40.0));
        assert_relative_eq!(tpv_100, tpv_50 / 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_turns_per_volt_uses_square_meters() {
        // 1e-4 m² core: N/V = 1 / (4.44 * 50 * 1.0 * 1e-4) = 45.05
        let tpv = turns_per_volt(50.0, 1.0, SqCm(1.0));
        assert_relative_eq!(tpv, 45.045, max_relative = 1e-4);
    }

    #[test]
    fn test_steinmetz_reference_point() {
        let loss = steinmetz_loss_w(1.3, 1.0, 1.0, 1.0, 2.0, 10.0);
        assert_relative_eq!(loss, 13.0, max_relative = 1e-12);
    }

    #[test]
    fn test_steinmetz_flux_exponent() {
        let loss = steinmetz_loss_w(1.0, 1.0, 2.0, 1.0, 2.0, 1.0);
        assert_relative_eq!(loss, 4.0, max_relative = 1e-12);
    }
}
