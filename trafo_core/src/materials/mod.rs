//! # Materials Database
//!
//! Static lookup data for transformer design: magnet wire gauges, core
//! topologies and core materials. All tables are read-only constants and can
//! be shared freely between concurrent design runs.
//!
//! ## Example
//!
//! ```rust
//! use trafo_core::materials::{CoreMaterial, CoreShape, WireGauge};
//!
//! let awg14 = WireGauge::lookup(14).unwrap();
//! println!("AWG 14 = {:.3} mm²", awg14.area_mm2);
//!
//! let props = CoreMaterial::GrainOriented.properties();
//! println!("GO density = {} g/cm³", props.density_g_cm3);
//!
//! let shape = CoreShape::Toroidal.constants();
//! println!("Toroid window ratio = {}", shape.window_ratio);
//! ```

pub mod core_material;
pub mod core_shape;
pub mod wire_gauge;

pub use core_material::{CoreMaterial, CoreMaterialProperties};
pub use core_shape::{CoreShape, ShapeConstants};
pub use wire_gauge::{select_for_area, WireGauge, WireSelection};
