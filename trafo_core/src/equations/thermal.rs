//! # Thermal and Efficiency Formulas
//!
//! Lumped single-resistance temperature rise of a naturally cooled
//! transformer. The whole unit is treated as one isothermal body dissipating
//! through its exposed surface by convection and radiation.
//!
//! ## References
//!
//! - McLyman, Transformer and Inductor Design Handbook, 4th Ed., Ch. 6
//! - IEC 60085: Electrical insulation, thermal evaluation and designation

/// Natural convection coefficient for a vertical surface in still air (W/cm²·°C)
pub const CONVECTION_COEFFICIENT_W_CM2_C: f64 = 0.0007;

/// Linearized radiation coefficient for a dark varnished surface (W/cm²·°C)
pub const RADIATION_COEFFICIENT_W_CM2_C: f64 = 0.0005;

/// Combined surface heat-transfer coefficient (W/cm²·°C)
pub const HEAT_TRANSFER_COEFFICIENT_W_CM2_C: f64 =
    CONVECTION_COEFFICIENT_W_CM2_C + RADIATION_COEFFICIENT_W_CM2_C;

/// Steady-state temperature rise of a body shedding `loss_w` from `surface_cm2`
///
/// # Formula
/// ΔT = P / (A·(h_c + h_r))
///
/// # Example
/// ```rust
/// use trafo_core::equations::thermal::temperature_rise_c;
///
/// // 120 W from 2000 cm² at 0.0012 W/cm²·°C is a 50 °C rise
/// let rise = temperature_rise_c(120.0, 2000.0);
/// assert!((rise - 50.0).abs() < 1e-9);
/// ```
#[inline]
pub fn temperature_rise_c(loss_w: f64, surface_cm2: f64) -> f64 {
    loss_w / (surface_cm2 * HEAT_TRANSFER_COEFFICIENT_W_CM2_C)
}

/// Efficiency in percent from output power and total loss
///
/// # Formula
/// η = P_out / (P_out + P_loss) × 100
#[inline]
pub fn efficiency_percent(output_w: f64, loss_w: f64) -> f64 {
    output_w / (output_w + loss_w) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rise_scales_with_loss() {
        let r1 = temperature_rise_c(50.0, 1000.0);
        let r2 = temperature_rise_c(100.0, 1000.0);
        assert_relative_eq!(r2, 2.0 * r1, max_relative = 1e-12);
    }

    #[test]
    fn test_efficiency_below_100_with_loss() {
        let eta = efficiency_percent(1000.0, 25.0);
        assert!(eta < 100.0);
        assert_relative_eq!(eta, 97.5609756, max_relative = 1e-6);
    }

    #[test]
    fn test_efficiency_non_increasing_in_loss() {
        let mut last = efficiency_percent(500.0, 0.1);
        for loss in [1.0, 5.0, 20.0, 100.0, 1000.0] {
            let eta = efficiency_percent(500.0, loss);
            assert!(eta <= last);
            last = eta;
        }
    }
}
