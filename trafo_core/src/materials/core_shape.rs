//! Core Geometry Model
//!
//! Per-shape constants and formulas for the four supported core topologies.
//! Each shape maps to one [`ShapeConstants`] record that the sizing and
//! thermal stages look up once per run.
//!
//! ## Notation
//!
//! - `a` = core leg width (cm); the stack is square, so the stack depth is also `a`
//! - `h` = window height (cm)
//! - `w` = window width (cm)
//!
//! ## Example
//!
//! ```rust
//! use trafo_core::materials::CoreShape;
//!
//! let consts = CoreShape::EI.constants();
//! assert!(consts.shape_factor >= 3.5 && consts.shape_factor <= 5.5);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Supported core topologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoreShape {
    /// E-I laminated shell core
    #[serde(rename = "E-I")]
    EI,
    /// Toroidal (ring) core
    Toroidal,
    /// Wound C-core pair
    #[serde(rename = "C-Core")]
    CCore,
    /// U-I laminated core form
    #[serde(rename = "U-I")]
    UI,
}

/// Fixed constants for one core topology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeConstants {
    /// Area-product multiplier Ks (3.5-5.5); higher means more window is lost
    pub shape_factor: f64,
    /// Window-to-core area ratio r = Aw/Ae (0.8-2.0)
    pub window_ratio: f64,
    /// Window height over window width
    pub window_aspect: f64,
    /// Correction from envelope faces to effective radiating surface (1.0-1.3)
    pub surface_multiplier: f64,
}

impl CoreShape {
    /// All core shapes for UI selection
    pub const ALL: [CoreShape; 4] = [
        CoreShape::EI,
        CoreShape::Toroidal,
        CoreShape::CCore,
        CoreShape::UI,
    ];

    /// Constant record for this shape
    pub fn constants(&self) -> ShapeConstants {
        match self {
            CoreShape::EI => ShapeConstants {
                shape_factor: 4.5,
                window_ratio: 1.5,
                window_aspect: 3.0,
                surface_multiplier: 1.2,
            },
            CoreShape::Toroidal => ShapeConstants {
                shape_factor: 3.5,
                window_ratio: 2.0,
                window_aspect: 1.0,
                surface_multiplier: 1.0,
            },
            CoreShape::CCore => ShapeConstants {
                shape_factor: 4.0,
                window_ratio: 1.0,
                window_aspect: 2.5,
                surface_multiplier: 1.15,
            },
            CoreShape::UI => ShapeConstants {
                shape_factor: 5.5,
                window_ratio: 1.8,
                window_aspect: 2.0,
                surface_multiplier: 1.3,
            },
        }
    }

    /// Mean magnetic path length (cm)
    ///
    /// - E-I: 2·(2a + h)
    /// - Toroidal: π·(a + h/2)
    /// - C-core: 2·(w + h) + π·a (wound corners)
    /// - U-I: 2·(w + h) + 4a (square corners)
    pub fn path_length_cm(&self, core_width_cm: f64, window_height_cm: f64, window_width_cm: f64) -> f64 {
        let a = core_width_cm;
        let h = window_height_cm;
        let w = window_width_cm;
        match self {
            CoreShape::EI => 2.0 * (2.0 * a + h),
            CoreShape::Toroidal => PI * (a + h / 2.0),
            CoreShape::CCore => 2.0 * (w + h) + PI * a,
            CoreShape::UI => 2.0 * (w + h) + 4.0 * a,
        }
    }

    /// Effective radiating surface of the wound core (cm²)
    ///
    /// Sum of the exposed faces of the assembled envelope, scaled by the
    /// shape's surface multiplier. Coils protrude past the stack by half the
    /// window width on each side.
    pub fn radiating_surface_cm2(&self, core_width_cm: f64, window_height_cm: f64, window_width_cm: f64) -> f64 {
        let a = core_width_cm;
        let h = window_height_cm;
        let w = window_width_cm;
        let faces = match self {
            CoreShape::Toroidal => {
                let inner = h;
                let outer = h + 2.0 * a + w;
                let height = a + w;
                PI * outer * height + 2.0 * (PI / 4.0) * (outer.powi(2) - inner.powi(2))
            }
            CoreShape::EI => box_surface(2.0 * w + 2.0 * a, h + a, a + w),
            CoreShape::CCore | CoreShape::UI => box_surface(w + 2.0 * a, h + 2.0 * a, a + w),
        };
        faces * self.constants().surface_multiplier
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_uppercase().replace([' ', '_', '-'], "").as_str() {
            "EI" | "EILAMINATED" | "SHELL" => Ok(CoreShape::EI),
            "TOROIDAL" | "TOROID" | "RING" => Ok(CoreShape::Toroidal),
            "C" | "CCORE" => Ok(CoreShape::CCore),
            "UI" | "UILAMINATED" => Ok(CoreShape::UI),
            _ => Err(CalcError::invalid_input(
                "core_shape",
                s,
                "Unknown core shape (expected E-I, Toroidal, C-Core or U-I)",
            )),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CoreShape::EI => "E-I laminated",
            CoreShape::Toroidal => "Toroidal",
            CoreShape::CCore => "C-core",
            CoreShape::UI => "U-I laminated",
        }
    }
}

impl std::fmt::Display for CoreShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn box_surface(width: f64, height: f64, depth: f64) -> f64 {
    2.0 * (width * height + width * depth + height * depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_within_documented_ranges() {
        for shape in CoreShape::ALL {
            let c = shape.constants();
            assert!((3.5..=5.5).contains(&c.shape_factor), "{:?}", shape);
            assert!((0.8..=2.0).contains(&c.window_ratio), "{:?}", shape);
            assert!((1.0..=1.3).contains(&c.surface_multiplier), "{:?}", shape);
            assert!(c.window_aspect > 0.0);
        }
    }

    #[test]
    fn test_ei_path_length() {
        // 2 * (2*5 + 12) = 44
        assert_eq!(CoreShape::EI.path_length_cm(5.0, 12.0, 4.0), 44.0);
    }

    #[test]
    fn test_toroid_path_length() {
        let l = CoreShape::Toroidal.path_length_cm(4.0, 8.0, 8.0);
        assert!((l - PI * 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_c_core_shorter_than_u_i() {
        let c = CoreShape::CCore.path_length_cm(5.0, 10.0, 4.0);
        let u = CoreShape::UI.path_length_cm(5.0, 10.0, 4.0);
        assert!(c < u);
    }

    #[test]
    fn test_surface_positive_and_grows_with_size() {
        for shape in CoreShape::ALL {
            let small = shape.radiating_surface_cm2(3.0, 6.0, 2.0);
            let large = shape.radiating_surface_cm2(6.0, 12.0, 4.0);
            assert!(small > 0.0);
            assert!(large > small);
        }
    }

    #[test]
    fn test_shape_parsing() {
        assert_eq!(CoreShape::from_str_flexible("E-I").unwrap(), CoreShape::EI);
        assert_eq!(CoreShape::from_str_flexible("toroid").unwrap(), CoreShape::Toroidal);
        assert_eq!(CoreShape::from_str_flexible("c_core").unwrap(), CoreShape::CCore);
        let err = CoreShape::from_str_flexible("pot").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("core_shape"));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&CoreShape::EI).unwrap(), "\"E-I\"");
        let shape: CoreShape = serde_json::from_str("\"C-Core\"").unwrap();
        assert_eq!(shape, CoreShape::CCore);
    }
}
