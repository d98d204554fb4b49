//! # Core Sizing Stage
//!
//! Sizes the magnetic core by the area-product method:
//!
//! 1. Ap from input power, frequency, flux density, current density, fill
//!    factor and the core shape factor
//! 2. Ae = √(Ap/r) and Aw = Ap/Ae from the shape's window-to-core ratio
//! 3. Leg width a = √Ae (square stack); window height and width from Aw and
//!    the shape's window aspect
//! 4. Magnetic path length from the shape formula; volume = Ae × path
//!
//! Flux density, current density and fill factor must be positive. That is a
//! precondition checked by [`DesignInput::validate`], not here.

use serde::{Deserialize, Serialize};

use crate::calculations::design::DesignInput;
use crate::equations::magnetics::{area_product_cm4, split_area_product};
use crate::materials::CoreShape;
use crate::observer::StageValue;

/// Derived core dimensions.
///
/// ## JSON Example
///
/// ```json
/// {
///   "shape": "E-I",
///   "area_product_cm4": 3353.0,
///   "core_area_cm2": 47.3,
///   "window_area_cm2": 70.9,
///   "core_width_cm": 6.88,
///   "window_height_cm": 14.58,
///   "window_width_cm": 4.86,
///   "path_length_cm": 56.7,
///   "volume_cm3": 2681.0,
///   "mass_kg": 20.5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreGeometry {
    pub shape: CoreShape,
    /// Area product Ap = Ae·Aw (cm⁴)
    pub area_product_cm4: f64,
    /// Effective core cross-section Ae (cm²)
    pub core_area_cm2: f64,
    /// Winding window area Aw (cm²)
    pub window_area_cm2: f64,
    /// Center-leg width = stack depth (cm)
    pub core_width_cm: f64,
    /// Window height (cm)
    pub window_height_cm: f64,
    /// Window width (cm)
    pub window_width_cm: f64,
    /// Mean magnetic path length (cm)
    pub path_length_cm: f64,
    /// Core volume Ae × path length (cm³)
    pub volume_cm3: f64,
    /// Core mass (kg)
    pub mass_kg: f64,
}

impl CoreGeometry {
    pub(crate) fn stage_values(&self) -> Vec<StageValue> {
        vec![
            StageValue::new("area_product_cm4", self.area_product_cm4, "cm⁴"),
            StageValue::new("core_area_cm2", self.core_area_cm2, "cm²"),
            StageValue::new("window_area_cm2", self.window_area_cm2, "cm²"),
            StageValue::new("core_width_cm", self.core_width_cm, "cm"),
            StageValue::new("window_height_cm", self.window_height_cm, "cm"),
            StageValue::new("window_width_cm", self.window_width_cm, "cm"),
            StageValue::new("path_length_cm", self.path_length_cm, "cm"),
            StageValue::new("volume_cm3", self.volume_cm3, "cm³"),
            StageValue::new("mass_kg", self.mass_kg, "kg"),
        ]
    }
}

/// Size the core for `input_va` of throughput.
pub fn calculate(input_va: f64, input: &DesignInput) -> CoreGeometry {
    let shape = input.core_shape.constants();

    let area_product = area_product_cm4(
        input_va,
        input.frequency_hz,
        input.flux_density_t,
        input.current_density_a_mm2,
        input.fill_factor,
        shape.shape_factor,
    );
    let (ae, aw) = split_area_product(area_product, shape.window_ratio);

    let core_width_cm = ae.0.sqrt();
    let window_height_cm = (aw.0 * shape.window_aspect).sqrt();
    let window_width_cm = aw.0 / window_height_cm;

    let path_length_cm = input
        .core_shape
        .path_length_cm(core_width_cm, window_height_cm, window_width_cm);
    let volume_cm3 = ae.0 * path_length_cm;
    let mass_kg = input.core_material.properties().mass_kg(volume_cm3);

    CoreGeometry {
        shape: input.core_shape,
        area_product_cm4: area_product,
        core_area_cm2: ae.0,
        window_area_cm2: aw.0,
        core_width_cm,
        window_height_cm,
        window_width_cm,
        path_length_cm,
        volume_cm3,
        mass_kg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::design::tests::example_input;
    use crate::calculations::power;
    use approx::assert_relative_eq;

    fn example_geometry() -> CoreGeometry {
        let input = example_input();
        let power = power::calculate(&input);
        calculate(power.input_va, &input)
    }

    #[test]
    fn test_example_core_area_in_expected_range() {
        let geometry = example_geometry();
        assert!(
            geometry.core_area_cm2 > 30.0 && geometry.core_area_cm2 < 70.0,
            "Ae = {}",
            geometry.core_area_cm2
        );
    }

    #[test]
    fn test_area_product_identity() {
        let g = example_geometry();
        assert_relative_eq!(
            g.core_area_cm2 * g.window_area_cm2,
            g.area_product_cm4,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            g.window_height_cm * g.window_width_cm,
            g.window_area_cm2,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_volume_is_area_times_path() {
        let g = example_geometry();
        assert_eq!(g.volume_cm3, g.core_area_cm2 * g.path_length_cm);
    }

    #[test]
    fn test_all_shapes_produce_positive_geometry() {
        let mut input = example_input();
        for shape in CoreShape::ALL {
            input.core_shape = shape;
            let g = calculate(3000.0, &input);
            assert!(g.core_area_cm2 > 0.0, "{:?}", shape);
            assert!(g.window_area_cm2 > 0.0, "{:?}", shape);
            assert!(g.volume_cm3 > 0.0, "{:?}", shape);
            assert!(g.mass_kg > 0.0, "{:?}", shape);
            assert_eq!(g.shape, shape);
        }
    }

    #[test]
    fn test_higher_current_density_shrinks_core() {
        let mut input = example_input();
        let base = calculate(3000.0, &input);
        input.current_density_a_mm2 = 6.0;
        let denser = calculate(3000.0, &input);
        assert!(denser.core_area_cm2 < base.core_area_cm2);
    }
}
