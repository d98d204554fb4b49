//! # Transformer Design Equations
//!
//! This module contains the closed-form formulas the design pipeline applies.
//! Having equations in one place enables:
//! - Easy verification against references
//! - Documented unit handling (the pipeline mixes cm², mm² and m²)
//! - Consistent implementation across stages
//!
//! ## Modules
//!
//! - [`magnetics`] - Area product, Faraday's law, Steinmetz core loss
//! - [`electrical`] - Copper resistance, I²R, regulation, protection
//! - [`thermal`] - Temperature rise and efficiency
//! - [`registry`] - Equation metadata for report appendices

pub mod electrical;
pub mod magnetics;
pub mod registry;
pub mod thermal;

pub use electrical::{
    copper_loss_w,
    dc_resistance_ohm,
    protection_rating_a,
    regulation_percent,
    temperature_correction_factor,
};

pub use magnetics::{
    area_product_cm4,
    split_area_product,
    steinmetz_loss_w,
    turns_per_volt,
};

pub use thermal::{efficiency_percent, temperature_rise_c};

pub use registry::{Equation, EquationMetadata, Reference};
